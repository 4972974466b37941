//! 新建项目对话框
//!
//! 自带触发按钮；提交成功后关闭、重置表单并通知调用方刷新列表。

mod form_state;
mod project_fields;

use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api::use_api;
use crate::components::common::ErrorBanner;
use crate::components::icons::Plus;
use form_state::FormState;
use project_fields::ProjectFields;

const CREATE_FAILED: &str = "Failed to create project";

#[component]
pub fn CreateProjectDialog(
    /// 触发按钮文字
    #[prop(into)]
    label: String,
    #[prop(into)] on_created: Callback<()>,
) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let state = FormState::new();
    let (open, set_open) = signal(false);
    let (loading, set_loading) = signal(false);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let dialog_ref = NodeRef::<leptos::html::Dialog>::new();

    Effect::new(move |_| {
        if let Some(dialog) = dialog_ref.get() {
            if open.get() {
                if !dialog.open() {
                    if let Err(e) = dialog.show_modal() {
                        log::warn!("showModal failed: {e:?}");
                    }
                }
            } else if dialog.open() {
                dialog.close();
            }
        }
    });

    let on_submit = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();

        let request = match state.to_request() {
            Ok(request) => request,
            Err(message) => {
                set_error_msg.set(Some(message));
                return;
            }
        };

        set_loading.set(true);
        set_error_msg.set(None);

        let api = api.get_value();
        spawn_local(async move {
            match api.create_project(&request).await {
                Ok(project) => {
                    log::info!("created project {} ({})", project.title, project.id);
                    set_open.set(false);
                    state.reset();
                    on_created.run(());
                }
                Err(e) => {
                    log::error!("creating project failed: {e}");
                    set_error_msg.set(Some(e.user_message(CREATE_FAILED)));
                }
            }
            set_loading.set(false);
        });
    };

    view! {
        // 触发按钮
        <button class="btn btn-primary gap-2" on:click=move |_| set_open.set(true)>
            <Plus attr:class="h-4 w-4" /> {label}
        </button>

        // 模态框内容
        <dialog class="modal" node_ref=dialog_ref on:close=move |_| set_open.set(false)>
            <div class="modal-box">
                <h3 class="font-bold text-lg">"Create New Project"</h3>
                <p class="py-2 text-base-content/70">"Describe the challenge your organization needs help with."</p>

                <form on:submit=on_submit class="space-y-4">
                    <ErrorBanner message=error_msg />
                    <ProjectFields state=state />

                    <div class="modal-action">
                        <button type="button" class="btn btn-ghost" on:click=move |_| set_open.set(false)>"Cancel"</button>
                        <button type="submit" disabled=move || loading.get() class="btn btn-primary">
                            {move || if loading.get() {
                                view! { <span class="loading loading-spinner"></span> "Creating..." }.into_any()
                            } else {
                                "Create Project".into_any()
                            }}
                        </button>
                    </div>
                </form>
            </div>
            <form method="dialog" class="modal-backdrop">
                <button>"close"</button>
            </form>
        </dialog>
    }
}
