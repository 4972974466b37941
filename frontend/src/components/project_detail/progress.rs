//! 进度：里程碑与进度报告

use leptos::prelude::*;
use leptos::task::spawn_local;
use scholars_shared::{Milestone, ProgressReport};

use super::drafts::{MilestoneDraft, ReportDraft};
use crate::api::use_api;
use crate::components::common::{ErrorBanner, date_or_na};
use crate::components::icons::{CheckCircle, Clock};

const LOAD_FAILED: &str = "Failed to load progress";
const MILESTONE_FAILED: &str = "Failed to create milestone";
const REPORT_FAILED: &str = "Failed to submit progress report";

#[component]
pub fn ProgressTab(project_id: String) -> impl IntoView {
    let api = StoredValue::new(use_api());
    let project_id = StoredValue::new(project_id);

    let (milestones, set_milestones) = signal(Vec::<Milestone>::new());
    let (reports, set_reports) = signal(Vec::<ProgressReport>::new());
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let milestone_title = RwSignal::new(String::new());
    let milestone_description = RwSignal::new(String::new());
    let milestone_due = RwSignal::new(String::new());
    let report_content = RwSignal::new(String::new());
    let report_milestone = RwSignal::new(String::new());

    let load_progress = move || {
        let api = api.get_value();
        let id = project_id.get_value();
        spawn_local(async move {
            log::debug!("loading progress for {id}");
            let loaded = match api.get_milestones(&id).await {
                Ok(items) => {
                    set_milestones.set(items);
                    api.get_progress_reports(&id).await
                }
                Err(e) => Err(e),
            };
            match loaded {
                Ok(items) => set_reports.set(items),
                Err(e) => {
                    log::error!("loading progress for {id} failed: {e}");
                    set_error_msg.set(Some(LOAD_FAILED.to_string()));
                }
            }
        });
    };

    let on_add_milestone = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = MilestoneDraft {
            title: milestone_title.get_untracked(),
            description: milestone_description.get_untracked(),
            due_date: milestone_due.get_untracked(),
        };
        let milestone = match draft.into_new() {
            Ok(milestone) => milestone,
            Err(message) => {
                set_error_msg.set(Some(message));
                return;
            }
        };

        set_error_msg.set(None);
        let api = api.get_value();
        let id = project_id.get_value();
        spawn_local(async move {
            match api.create_milestone(&id, milestone).await {
                Ok(_) => {
                    milestone_title.set(String::new());
                    milestone_description.set(String::new());
                    milestone_due.set(String::new());
                    load_progress();
                }
                Err(e) => {
                    log::error!("creating milestone for {id} failed: {e}");
                    set_error_msg.set(Some(e.user_message(MILESTONE_FAILED)));
                }
            }
        });
    };

    let on_add_report = move |ev: leptos::web_sys::SubmitEvent| {
        ev.prevent_default();
        let draft = ReportDraft {
            content: report_content.get_untracked(),
            milestone_id: report_milestone.get_untracked(),
        };
        let report = match draft.into_new() {
            Ok(report) => report,
            Err(message) => {
                set_error_msg.set(Some(message));
                return;
            }
        };

        set_error_msg.set(None);
        let api = api.get_value();
        let id = project_id.get_value();
        spawn_local(async move {
            match api.create_progress_report(&id, report).await {
                Ok(_) => {
                    report_content.set(String::new());
                    report_milestone.set(String::new());
                    load_progress();
                }
                Err(e) => {
                    log::error!("submitting report for {id} failed: {e}");
                    set_error_msg.set(Some(e.user_message(REPORT_FAILED)));
                }
            }
        });
    };

    load_progress();

    view! {
        <h3 class="card-title mb-4">"Progress Tracking"</h3>
        <ErrorBanner message=error_msg />

        <div class="grid grid-cols-1 lg:grid-cols-2 gap-8 mt-4">
            // 里程碑
            <section class="space-y-4">
                <h4 class="font-medium">"Milestones"</h4>
                <Show
                    when=move || !milestones.with(Vec::is_empty)
                    fallback=|| view! { <p class="text-sm text-base-content/60">"No milestones yet."</p> }
                >
                    <ul class="space-y-3">
                        <For
                            each=move || milestones.get()
                            key=|m| (m.id.clone(), m.completed)
                            children=|milestone| {
                                let icon = if milestone.completed {
                                    view! { <CheckCircle attr:class="h-5 w-5 text-success" /> }.into_any()
                                } else {
                                    view! { <Clock attr:class="h-5 w-5 text-warning" /> }.into_any()
                                };
                                view! {
                                    <li class="flex items-start gap-3 bg-base-200 p-3 rounded-lg">
                                        {icon}
                                        <div class="flex-1">
                                            <p class="font-medium">{milestone.title}</p>
                                            <p class="text-sm text-base-content/70">{milestone.description}</p>
                                            <p class="text-xs text-base-content/60 mt-1">
                                                "Due: " {date_or_na(milestone.due_date.as_ref())}
                                            </p>
                                        </div>
                                    </li>
                                }
                            }
                        />
                    </ul>
                </Show>

                <form on:submit=on_add_milestone class="space-y-2">
                    <input
                        type="text"
                        placeholder="Milestone title"
                        class="input input-bordered input-sm w-full"
                        on:input=move |ev| milestone_title.set(event_target_value(&ev))
                        prop:value=move || milestone_title.get()
                    />
                    <textarea
                        placeholder="Description"
                        class="textarea textarea-bordered textarea-sm w-full"
                        on:input=move |ev| milestone_description.set(event_target_value(&ev))
                        prop:value=move || milestone_description.get()
                    ></textarea>
                    <div class="flex gap-2">
                        <input
                            type="date"
                            class="input input-bordered input-sm flex-1"
                            on:input=move |ev| milestone_due.set(event_target_value(&ev))
                            prop:value=move || milestone_due.get()
                        />
                        <button type="submit" class="btn btn-primary btn-sm">"Add Milestone"</button>
                    </div>
                </form>
            </section>

            // 进度报告
            <section class="space-y-4">
                <h4 class="font-medium">"Progress Reports"</h4>
                <Show
                    when=move || !reports.with(Vec::is_empty)
                    fallback=|| view! { <p class="text-sm text-base-content/60">"No progress reports yet."</p> }
                >
                    <ul class="space-y-3">
                        <For
                            each=move || reports.get()
                            key=|r| r.id.clone()
                            children=|report| view! {
                                <li class="bg-base-200 p-3 rounded-lg">
                                    <p class="text-sm">{report.content}</p>
                                    <p class="text-xs text-base-content/60 mt-1">
                                        {date_or_na(report.created_at.as_ref())}
                                    </p>
                                </li>
                            }
                        />
                    </ul>
                </Show>

                <form on:submit=on_add_report class="space-y-2">
                    <textarea
                        placeholder="What did the team accomplish?"
                        class="textarea textarea-bordered textarea-sm w-full"
                        on:input=move |ev| report_content.set(event_target_value(&ev))
                        prop:value=move || report_content.get()
                    ></textarea>
                    <div class="flex gap-2">
                        <select
                            class="select select-bordered select-sm flex-1"
                            on:change=move |ev| report_milestone.set(event_target_value(&ev))
                            prop:value=move || report_milestone.get()
                        >
                            <option value="">"No milestone"</option>
                            <For
                                each=move || milestones.get()
                                key=|m| m.id.clone()
                                children=|m| view! { <option value=m.id>{m.title}</option> }
                            />
                        </select>
                        <button type="submit" class="btn btn-primary btn-sm">"Submit Report"</button>
                    </div>
                </form>
            </section>
        </div>
    }
}
