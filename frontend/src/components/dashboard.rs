use chrono::Timelike;
use leptos::prelude::*;
use leptos::task::spawn_local;
use scholars_shared::{Project, ProjectStatus, Role};

use crate::api::use_api;
use crate::auth::use_auth;
use crate::components::common::{ErrorBanner, StatusBadge};
use crate::components::create_project_dialog::CreateProjectDialog;
use crate::components::icons::{CheckCircle, Clock, Folder};
use crate::web::route::AppRoute;
use crate::web::router::Link;

const LOAD_FAILED: &str = "Failed to load projects";
const RECENT_LIMIT: usize = 3;

// =========================================================
// 纯逻辑
// =========================================================

pub fn greeting_for_hour(hour: u32) -> &'static str {
    match hour {
        0..12 => "Good morning",
        12..18 => "Good afternoon",
        _ => "Good evening",
    }
}

/// 各状态的项目数量
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectStats {
    pub open: usize,
    pub in_progress: usize,
    pub completed: usize,
}

impl ProjectStats {
    pub fn from_projects(projects: &[Project]) -> Self {
        projects.iter().fold(Self::default(), |mut stats, p| {
            match p.status {
                ProjectStatus::Open => stats.open += 1,
                ProjectStatus::InProgress => stats.in_progress += 1,
                ProjectStatus::Completed => stats.completed += 1,
            }
            stats
        })
    }
}

/// 按后端返回顺序取前几个
pub fn recent_projects(projects: &[Project]) -> Vec<Project> {
    projects.iter().take(RECENT_LIMIT).cloned().collect()
}

/// 页头右侧的主操作
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderAction {
    NewProject,
    Profile,
}

pub fn header_action(role: Role) -> HeaderAction {
    if role.can_create_projects() {
        HeaderAction::NewProject
    } else {
        HeaderAction::Profile
    }
}

// =========================================================
// 视图
// =========================================================

#[component]
pub fn DashboardPage() -> impl IntoView {
    let auth = use_auth();
    let api = StoredValue::new(use_api());
    let user = auth.user();

    let (projects, set_projects) = signal(Vec::<Project>::new());
    let (loading, set_loading) = signal(true);
    let (error_msg, set_error_msg) = signal(Option::<String>::None);

    let load_projects = move || {
        let api = api.get_value();
        set_loading.set(true);
        spawn_local(async move {
            log::debug!("loading projects for dashboard");
            match api.get_projects().await {
                Ok(data) => {
                    set_projects.set(data);
                    set_error_msg.set(None);
                }
                Err(e) => {
                    log::error!("loading projects failed: {e}");
                    set_error_msg.set(Some(LOAD_FAILED.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    // 初始加载
    load_projects();

    let greeting = greeting_for_hour(chrono::Local::now().hour());
    let role = move || user.get().map(|u| u.role).unwrap_or_default();
    let stats = Memo::new(move |_| projects.with(|p| ProjectStats::from_projects(p)));

    view! {
        <div class="max-w-7xl mx-auto p-4 md:p-8 space-y-8">
            <Show when=move || !loading.get() || !projects.with(Vec::is_empty) fallback=DashboardSkeleton>
                // 页头
                <div class="flex flex-col sm:flex-row sm:items-center sm:justify-between gap-4">
                    <div>
                        <h1 class="text-3xl font-bold">
                            {greeting} ", "
                            {move || user.get().map(|u| u.full_name()).unwrap_or_default()}
                        </h1>
                        <p class="mt-2 text-sm text-base-content/70">
                            {move || role().dashboard_description()}
                        </p>
                    </div>
                    <div class="flex items-center gap-3">
                        <Link to=AppRoute::Projects class="btn btn-ghost">"View Projects"</Link>
                        {move || match header_action(role()) {
                            HeaderAction::NewProject => view! {
                                <CreateProjectDialog label="New Project" on_created=move |_| load_projects() />
                            }.into_any(),
                            HeaderAction::Profile => view! {
                                <Link to=AppRoute::Profile class="btn">"Profile"</Link>
                            }.into_any(),
                        }}
                    </div>
                </div>

                <ErrorBanner message=error_msg />

                // 统计
                <div class="stats shadow w-full stats-vertical md:stats-horizontal bg-base-100">
                    <div class="stat">
                        <div class="stat-figure text-success"><Folder attr:class="inline-block w-8 h-8" /></div>
                        <div class="stat-title">"Open Projects"</div>
                        <div class="stat-value text-success">{move || stats.get().open}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-warning"><Clock attr:class="inline-block w-8 h-8" /></div>
                        <div class="stat-title">"In Progress"</div>
                        <div class="stat-value text-warning">{move || stats.get().in_progress}</div>
                    </div>
                    <div class="stat">
                        <div class="stat-figure text-info"><CheckCircle attr:class="inline-block w-8 h-8" /></div>
                        <div class="stat-title">"Completed"</div>
                        <div class="stat-value text-info">{move || stats.get().completed}</div>
                    </div>
                </div>

                <div class="flex flex-col lg:flex-row lg:items-start gap-6">
                    // 快捷操作
                    <div class="lg:w-1/3 space-y-4">
                        <h3 class="text-lg font-medium">"Quick Actions"</h3>
                        <QuickAction
                            to=AppRoute::Projects
                            title="View All Projects"
                            description="Browse and manage all available projects"
                        />
                        <QuickAction
                            to=AppRoute::Profile
                            title="Update Profile"
                            description="Manage your account settings and preferences"
                        />
                    </div>

                    // 最近项目
                    <div class="lg:flex-1 card bg-base-100 shadow-xl">
                        <div class="card-body">
                            <div class="flex items-center justify-between mb-2">
                                <h3 class="card-title">"Recent Projects"</h3>
                                <Link to=AppRoute::Projects class="link link-primary text-sm">"View all"</Link>
                            </div>
                            <Show
                                when=move || !projects.with(Vec::is_empty)
                                fallback=|| view! {
                                    <div class="text-center py-8 text-base-content/60">
                                        <h3 class="font-medium">"No projects yet"</h3>
                                        <p class="text-sm mt-1">"Get started by exploring available projects."</p>
                                    </div>
                                }
                            >
                                <div class="space-y-4">
                                    <For
                                        each=move || projects.with(|p| recent_projects(p))
                                        key=|p| p.id.clone()
                                        children=move |project| view! { <RecentProjectRow project=project /> }
                                    />
                                </div>
                            </Show>
                        </div>
                    </div>
                </div>
            </Show>
        </div>
    }
}

#[component]
fn QuickAction(to: AppRoute, title: &'static str, description: &'static str) -> impl IntoView {
    view! {
        <Link to=to class="card bg-base-100 shadow hover:shadow-lg transition-shadow block">
            <div class="card-body p-4">
                <h4 class="font-medium">{title}</h4>
                <p class="text-sm text-base-content/60">{description}</p>
            </div>
        </Link>
    }
}

#[component]
fn RecentProjectRow(project: Project) -> impl IntoView {
    let deadline = project.deadline.map(|d| format!("Due: {}", d.date_label()));
    view! {
        <div class="border border-base-300 rounded-lg p-4 hover:border-primary transition-colors">
            <div class="flex items-center justify-between gap-4">
                <div class="flex-1 min-w-0">
                    <h4 class="text-sm font-medium">{project.title.clone()}</h4>
                    <p class="mt-1 text-sm text-base-content/60 line-clamp-2">{project.description.clone()}</p>
                    <div class="mt-2 flex items-center gap-4 text-xs text-base-content/60">
                        <StatusBadge status=project.status />
                        {deadline}
                    </div>
                </div>
                <Link to=AppRoute::ProjectDetail(project.id.clone()) class="btn btn-sm btn-ghost">"View"</Link>
            </div>
        </div>
    }
}

#[component]
fn DashboardSkeleton() -> impl IntoView {
    view! {
        <div class="space-y-4">
            <div class="skeleton h-8 w-1/4"></div>
            <div class="skeleton h-4 w-1/2"></div>
            <div class="grid grid-cols-1 md:grid-cols-3 gap-6 mt-8">
                <div class="skeleton h-24"></div>
                <div class="skeleton h-24"></div>
                <div class="skeleton h-24"></div>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn project(id: &str, status: ProjectStatus) -> Project {
        Project {
            id: id.to_string(),
            title: format!("Project {id}"),
            description: String::new(),
            status,
            requirements: Vec::new(),
            deadline: None,
            assigned_students: Vec::new(),
            created_at: None,
        }
    }

    #[test]
    fn greeting_boundaries() {
        assert_eq!(greeting_for_hour(0), "Good morning");
        assert_eq!(greeting_for_hour(11), "Good morning");
        assert_eq!(greeting_for_hour(12), "Good afternoon");
        assert_eq!(greeting_for_hour(17), "Good afternoon");
        assert_eq!(greeting_for_hour(18), "Good evening");
        assert_eq!(greeting_for_hour(23), "Good evening");
    }

    #[test]
    fn stats_count_each_status() {
        let projects = vec![
            project("a", ProjectStatus::Open),
            project("b", ProjectStatus::Open),
            project("c", ProjectStatus::InProgress),
            project("d", ProjectStatus::Completed),
        ];
        assert_eq!(
            ProjectStats::from_projects(&projects),
            ProjectStats {
                open: 2,
                in_progress: 1,
                completed: 1
            }
        );
        assert_eq!(ProjectStats::from_projects(&[]), ProjectStats::default());
    }

    #[test]
    fn recent_keeps_first_three_in_order() {
        let projects: Vec<_> = ["a", "b", "c", "d"]
            .iter()
            .map(|id| project(id, ProjectStatus::Open))
            .collect();
        let ids: Vec<_> = recent_projects(&projects).into_iter().map(|p| p.id).collect();
        assert_eq!(ids, vec!["a", "b", "c"]);
        assert_eq!(recent_projects(&projects[..1]).len(), 1);
    }

    #[test]
    fn only_nonprofits_get_new_project() {
        assert_eq!(header_action(Role::Nonprofit), HeaderAction::NewProject);
        for role in [Role::Student, Role::Scholar, Role::Admin, Role::Other] {
            assert_eq!(header_action(role), HeaderAction::Profile);
        }
    }
}
