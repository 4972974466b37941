use leptos::prelude::*;
use leptos::task::spawn_local;
use scholars_shared::{Project, ProjectStatus, Role};

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::common::{CardSkeleton, ErrorBanner, StatusBadge, Toast, date_or_na};
use crate::components::create_project_dialog::CreateProjectDialog;
use crate::components::icons::{Calendar, Clock, Users};
use crate::web::route::AppRoute;
use crate::web::router::Link;

const LOAD_FAILED: &str = "Failed to load projects";
pub const ASSIGN_FAILED: &str = "Failed to assign to project";

/// 非公益组织用户可以加入状态为 open 的项目
pub fn can_join(role: Role, status: ProjectStatus) -> bool {
    role.can_join_projects() && status == ProjectStatus::Open
}

#[component]
pub fn ProjectsPage() -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new(use_api());
    let user = auth.user();
    let role = Signal::derive(move || user.with(|u| u.as_ref().map(|u| u.role).unwrap_or_default()));

    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);
    let notification = RwSignal::new(Option::<(String, bool)>::None);

    let load_projects = move || {
        let api = api.get_value();
        spawn_local(async move {
            log::debug!("loading projects");
            match api.get_projects().await {
                Ok(data) => set_projects.set(data),
                Err(e) => {
                    log::error!("loading projects failed: {e}");
                    set_error_msg.set(Some(LOAD_FAILED.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    let handle_join = move |project_id: String| {
        let api = api.get_value();
        set_error_msg.set(None);
        spawn_local(async move {
            log::info!("joining project {project_id}");
            match api.assign_to_project(&project_id).await {
                Ok(_) => {
                    notification.set(Some(("You have joined the project".to_string(), false)));
                    load_projects();
                }
                Err(e) => {
                    log::error!("joining project {project_id} failed: {e}");
                    set_error_msg.set(Some(ASSIGN_FAILED.to_string()));
                }
            }
        });
    };

    let on_join = Callback::new(handle_join);

    // 初始加载
    load_projects();

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-6">
            <Toast notification=notification />

            <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-4">
                <div>
                    <h1 class="text-3xl font-bold">"Projects"</h1>
                    <p class="mt-2 text-sm text-base-content/70">
                        {move || if role.get().can_create_projects() {
                            "Manage your organization's projects"
                        } else {
                            "Discover projects to contribute to"
                        }}
                    </p>
                </div>
                <Show when=move || role.get().can_create_projects()>
                    <CreateProjectDialog label="Create Project" on_created=move |_| load_projects() />
                </Show>
            </div>

            <ErrorBanner message=error_msg />

            <Show
                when=move || !loading.get()
                fallback=|| view! { <div class="space-y-4"><CardSkeleton /></div> }
            >
                <Show
                    when=move || !projects.with(Vec::is_empty)
                    fallback=move || view! {
                        <div class="text-center py-12 text-base-content/60">
                            <h3 class="font-medium">"No projects available"</h3>
                            <p class="text-sm mt-1">
                                {if role.get_untracked().can_create_projects() {
                                    "Get started by creating your first project."
                                } else {
                                    "Check back later for new project opportunities."
                                }}
                            </p>
                        </div>
                    }
                >
                    <div class="space-y-4">
                        <For
                            each=move || projects.get()
                            key=|p| (p.id.clone(), p.status, p.assigned_students.len())
                            children=move |project| {
                                view! {
                                    <ProjectCard
                                        project=project
                                        role=role
                                        on_join=on_join
                                    />
                                }
                            }
                        />
                    </div>
                </Show>
            </Show>
        </div>
    }
}

#[component]
fn ProjectCard(project: Project, role: Signal<Role>, on_join: Callback<String>) -> impl IntoView {
    let Project {
        id,
        title,
        description,
        status,
        requirements,
        deadline,
        assigned_students,
        created_at,
    } = project;
    let joinable = move || can_join(role.get(), status);
    let join_id = id.clone();

    let requirements = (!requirements.is_empty()).then(|| {
        view! {
            <div class="mt-4">
                <h4 class="text-sm font-medium mb-2">"Requirements:"</h4>
                <ul class="list-disc list-inside text-sm text-base-content/70 space-y-1">
                    {requirements.into_iter().map(|req| view! { <li>{req}</li> }).collect_view()}
                </ul>
            </div>
        }
    });

    view! {
        <div class="card bg-base-100 shadow">
            <div class="card-body">
                <div class="flex items-start justify-between gap-4">
                    <div class="flex-1 min-w-0">
                        <div class="flex items-center gap-3">
                            <h3 class="card-title">{title}</h3>
                            <StatusBadge status=status />
                        </div>
                        <p class="mt-2 text-base-content/80">{description}</p>

                        {requirements}

                        <div class="mt-4 pt-4 border-t border-base-200 flex flex-wrap items-center gap-6 text-sm text-base-content/60">
                            {deadline.map(|d| view! {
                                <span class="flex items-center gap-1">
                                    <Calendar attr:class="h-4 w-4" /> "Due: " {d.date_label()}
                                </span>
                            })}
                            <span class="flex items-center gap-1">
                                <Users attr:class="h-4 w-4" />
                                {assigned_students.len()} " students assigned"
                            </span>
                            <span class="flex items-center gap-1">
                                <Clock attr:class="h-4 w-4" /> "Created " {date_or_na(created_at.as_ref())}
                            </span>
                        </div>
                    </div>

                    <div class="flex flex-col gap-2">
                        <Link to=AppRoute::ProjectDetail(id) class="btn btn-outline btn-sm">"View Details"</Link>
                        <Show when=joinable>
                            <button
                                class="btn btn-primary btn-sm"
                                on:click={
                                    let join_id = join_id.clone();
                                    move |_| on_join.run(join_id.clone())
                                }
                            >
                                "Join Project"
                            </button>
                        </Show>
                    </div>
                </div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn students_and_scholars_can_join_open_projects() {
        assert!(can_join(Role::Student, ProjectStatus::Open));
        assert!(can_join(Role::Scholar, ProjectStatus::Open));
        assert!(can_join(Role::Admin, ProjectStatus::Open));
    }

    #[test]
    fn nonprofits_never_join() {
        assert!(!can_join(Role::Nonprofit, ProjectStatus::Open));
    }

    #[test]
    fn closed_projects_cannot_be_joined() {
        assert!(!can_join(Role::Student, ProjectStatus::InProgress));
        assert!(!can_join(Role::Student, ProjectStatus::Completed));
    }
}
