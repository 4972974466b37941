//! 项目详情页
//!
//! 后端没有可用的单项目查询，这里沿用列表接口并按路由 id 过滤。

mod communication;
mod drafts;
mod progress;
mod resources;

use leptos::prelude::*;
use leptos::task::spawn_local;
use scholars_shared::Project;

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, StatusBadge, date_or_na};
use crate::components::icons::ArrowLeft;
use crate::components::projects::{ASSIGN_FAILED, can_join};
use crate::web::route::AppRoute;
use crate::web::router::Link;
use communication::CommunicationTab;
use progress::ProgressTab;
use resources::ResourcesTab;

pub const NOT_FOUND: &str = "Project not found";
const LOAD_FAILED: &str = "Failed to load project";

/// 按 id 在列表中查找项目
pub fn find_project(projects: &[Project], id: &str) -> Result<Project, String> {
    projects
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .ok_or_else(|| NOT_FOUND.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetailTab {
    Overview,
    Communication,
    Progress,
    Resources,
}

impl DetailTab {
    pub const ALL: [DetailTab; 4] = [
        DetailTab::Overview,
        DetailTab::Communication,
        DetailTab::Progress,
        DetailTab::Resources,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            DetailTab::Overview => "Overview",
            DetailTab::Communication => "Communication",
            DetailTab::Progress => "Progress",
            DetailTab::Resources => "Resources",
        }
    }
}

#[component]
pub fn ProjectDetailPage(id: String) -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new(use_api());
    let user = auth.user();
    let project_id = StoredValue::new(id);

    let (project, set_project) = signal(Option::<Project>::None);
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let active_tab = RwSignal::new(DetailTab::Overview);

    let load_project = move || {
        let api = api.get_value();
        let id = project_id.get_value();
        spawn_local(async move {
            log::debug!("loading project {id}");
            match api.get_projects().await {
                Ok(projects) => match find_project(&projects, &id) {
                    Ok(found) => set_project.set(Some(found)),
                    Err(message) => {
                        log::warn!("project {id} not in list");
                        set_error_msg.set(Some(message));
                    }
                },
                Err(e) => {
                    log::error!("loading project {id} failed: {e}");
                    set_error_msg.set(Some(LOAD_FAILED.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    let on_join = move |_: leptos::ev::MouseEvent| {
        let api = api.get_value();
        let id = project_id.get_value();
        spawn_local(async move {
            log::info!("joining project {id}");
            match api.assign_to_project(&id).await {
                Ok(_) => load_project(),
                Err(e) => {
                    log::error!("joining project {id} failed: {e}");
                    set_error_msg.set(Some(ASSIGN_FAILED.to_string()));
                }
            }
        });
    };

    load_project();

    let role = Signal::derive(move || user.with(|u| u.as_ref().map(|u| u.role).unwrap_or_default()));
    let user_id = Signal::derive(move || user.with(|u| u.as_ref().map(|u| u.id.clone()).unwrap_or_default()));
    let report_error = Callback::new(move |message: String| set_error_msg.set(Some(message)));

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8">
            <Link to=AppRoute::Projects class="btn btn-ghost btn-sm gap-2 mb-4">
                <ArrowLeft attr:class="h-4 w-4" /> "Back to projects"
            </Link>

            <Show when=move || !loading.get() fallback=DetailSkeleton>
                {move || match project.get() {
                    None => view! { <ErrorBanner message=error_msg /> }.into_any(),
                    Some(p) => {
                        let status = p.status;
                        let title = p.title.clone();
                        let deadline = p.deadline;
                        view! {
                            <div class="mb-8 flex items-center justify-between gap-4">
                                <div>
                                    <h1 class="text-3xl font-bold">{title}</h1>
                                    <div class="mt-2 flex items-center gap-4">
                                        <StatusBadge status=status />
                                        {deadline.map(|d| view! {
                                            <span class="text-sm text-base-content/60">"Due: " {d.date_label()}</span>
                                        })}
                                    </div>
                                </div>
                                <Show when=move || can_join(role.get(), status)>
                                    <button class="btn btn-primary" on:click=on_join>"Join Project"</button>
                                </Show>
                            </div>

                            <div class="mb-6"><ErrorBanner message=error_msg /></div>

                            <div role="tablist" class="tabs tabs-bordered mb-6">
                                {DetailTab::ALL
                                    .into_iter()
                                    .map(|tab| view! {
                                        <button
                                            role="tab"
                                            class=move || if active_tab.get() == tab { "tab tab-active" } else { "tab" }
                                            on:click=move |_| active_tab.set(tab)
                                        >
                                            {tab.label()}
                                        </button>
                                    })
                                    .collect_view()}
                            </div>

                            <div class="card bg-base-100 shadow">
                                <div class="card-body">
                                    {move || match active_tab.get() {
                                        DetailTab::Overview => view! { <OverviewTab project=p.clone() /> }.into_any(),
                                        DetailTab::Communication => view! {
                                            <CommunicationTab
                                                project_id=project_id.get_value()
                                                user_id=user_id
                                                on_error=report_error
                                            />
                                        }.into_any(),
                                        DetailTab::Progress => view! {
                                            <ProgressTab project_id=project_id.get_value() />
                                        }.into_any(),
                                        DetailTab::Resources => view! {
                                            <ResourcesTab project_id=project_id.get_value() />
                                        }.into_any(),
                                    }}
                                </div>
                            </div>
                        }.into_any()
                    }
                }}
            </Show>
        </div>
    }
}

#[component]
fn OverviewTab(project: Project) -> impl IntoView {
    let requirements = (!project.requirements.is_empty()).then(|| {
        view! {
            <div class="mb-6">
                <h4 class="font-medium mb-3">"Requirements"</h4>
                <ul class="list-disc list-inside space-y-2 text-base-content/80">
                    {project.requirements.iter().map(|req| view! { <li>{req.clone()}</li> }).collect_view()}
                </ul>
            </div>
        }
    });

    view! {
        <h3 class="card-title mb-2">"Project Description"</h3>
        <p class="text-base-content/80 mb-6">{project.description.clone()}</p>
        {requirements}
        <div class="grid grid-cols-1 md:grid-cols-3 gap-6">
            <div class="bg-base-200 p-4 rounded-lg">
                <h5 class="font-medium">"Status"</h5>
                <p class="text-base-content/70 capitalize">{project.status.label()}</p>
            </div>
            <div class="bg-base-200 p-4 rounded-lg">
                <h5 class="font-medium">"Assigned Students"</h5>
                <p class="text-base-content/70">{project.assigned_students.len()}</p>
            </div>
            <div class="bg-base-200 p-4 rounded-lg">
                <h5 class="font-medium">"Created"</h5>
                <p class="text-base-content/70">{date_or_na(project.created_at.as_ref())}</p>
            </div>
        </div>
    }
}

#[component]
fn DetailSkeleton() -> impl IntoView {
    view! {
        <div class="space-y-4">
            <div class="skeleton h-8 w-1/2"></div>
            <div class="skeleton h-4 w-1/4"></div>
            <div class="skeleton h-40 w-full mt-8"></div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use scholars_shared::ProjectStatus;

    fn project(id: &str) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {id}"),
            description: String::new(),
            status: ProjectStatus::Open,
            requirements: Vec::new(),
            deadline: None,
            assigned_students: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn finds_project_by_id() {
        let projects = vec![project("a"), project("b"), project("c")];
        let found = find_project(&projects, "b").unwrap();
        assert_eq!(found.title, "Project b");
    }

    #[test]
    fn missing_id_is_not_found() {
        let projects = vec![project("a")];
        assert_eq!(find_project(&projects, "zzz"), Err(NOT_FOUND.to_string()));
        assert_eq!(find_project(&[], "a"), Err(NOT_FOUND.to_string()));
    }

    #[test]
    fn tabs_keep_display_order() {
        let labels: Vec<_> = DetailTab::ALL.iter().map(DetailTab::label).collect();
        assert_eq!(labels, ["Overview", "Communication", "Progress", "Resources"]);
    }
}
