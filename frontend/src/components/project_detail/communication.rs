use leptos::prelude::*;
use leptos::task::spawn_local;
use scholars_shared::Message;

use super::drafts::{message_content, sender_label};
use crate::api::use_api;
use crate::components::icons::PaperPlane;

const SEND_FAILED: &str = "Failed to send message";

#[component]
pub fn CommunicationTab(
    project_id: String,
    #[prop(into)] user_id: Signal<String>,
    /// 发送失败时上报给页面级错误提示
    on_error: Callback<String>,
) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let project_id = StoredValue::new(project_id);
    let (messages, set_messages) = signal(Vec::<Message>::new());
    let new_message = RwSignal::new(String::new());
    let (sending, set_sending) = signal(false);

    let load_messages = move || {
        let api = api.get_value();
        let id = project_id.get_value();
        spawn_local(async move {
            match api.get_project_messages(&id).await {
                Ok(data) => set_messages.set(data),
                // 消息加载失败不打断页面
                Err(e) => log::error!("loading messages for {id} failed: {e}"),
            }
        });
    };

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let Some(content) = message_content(&new_message.get_untracked()) else {
            return;
        };

        set_sending.set(true);
        let api = api.get_value();
        let id = project_id.get_value();
        spawn_local(async move {
            log::debug!("sending message to {id}");
            match api.send_message(&id, &content).await {
                Ok(_) => {
                    new_message.set(String::new());
                    load_messages();
                }
                Err(e) => {
                    log::error!("sending message to {id} failed: {e}");
                    on_error.run(SEND_FAILED.to_string());
                }
            }
            set_sending.set(false);
        });
    };

    load_messages();

    view! {
        <h3 class="card-title mb-4">"Project Communication"</h3>

        <div class="space-y-4 mb-6 max-h-96 overflow-y-auto">
            <Show
                when=move || !messages.with(Vec::is_empty)
                fallback=|| view! {
                    <p class="text-base-content/60 text-center py-8">"No messages yet. Start the conversation!"</p>
                }
            >
                <For
                    each=move || messages.get()
                    key=|m| m.id.clone()
                    children=move |message| {
                        let author = sender_label(&message, &user_id.get_untracked());
                        let sent_at = message
                            .timestamp
                            .map(|t| t.datetime_label())
                            .unwrap_or_default();
                        view! {
                            <div class="bg-base-200 p-4 rounded-lg">
                                <div class="flex items-center justify-between mb-2">
                                    <span class="font-medium">{author}</span>
                                    <span class="text-sm text-base-content/60">{sent_at}</span>
                                </div>
                                <p class="text-base-content/80">{message.content}</p>
                            </div>
                        }
                    }
                />
            </Show>
        </div>

        <form on:submit=on_submit class="flex gap-3">
            <input
                type="text"
                placeholder="Type your message..."
                class="input input-bordered flex-1"
                on:input=move |ev| new_message.set(event_target_value(&ev))
                prop:value=move || new_message.get()
            />
            <button type="submit" class="btn btn-primary gap-2" disabled=move || sending.get()>
                <PaperPlane attr:class="h-4 w-4" /> "Send"
            </button>
        </form>
    }
}
