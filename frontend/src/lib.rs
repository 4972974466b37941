//! Solution Scholars 前端应用
//!
//! 采用 Context-Driven 的高内聚低耦合架构：
//! - `web::route`: 路由定义（领域模型）
//! - `web::router`: 路由服务（核心引擎）
//! - `session` / `auth`: 会话状态与认证流程
//! - `api`: 后端 REST 接口
//! - `components`: UI 组件层

mod api;
mod auth;
pub mod config;
mod error;
pub mod logger;
mod session;

mod components {
    pub mod common;
    pub mod create_project_dialog;
    pub mod dashboard;
    pub mod icons;
    pub mod login;
    pub mod navigation;
    pub mod profile;
    pub mod project_detail;
    pub mod projects;
    pub mod register;
}

// 浏览器 API 封装：HTTP、LocalStorage、History 路由
pub(crate) mod web {
    pub mod http;
    pub mod route;
    pub mod router;
    pub mod storage;
}

use leptos::prelude::*;

use crate::api::{ScholarsApi, provide_api};
use crate::auth::{AuthContext, expire_session, init_auth};
use crate::components::common::FlashNotice;
use crate::components::dashboard::DashboardPage;
use crate::components::login::LoginPage;
use crate::components::navigation::Navigation;
use crate::components::profile::ProfilePage;
use crate::components::project_detail::ProjectDetailPage;
use crate::components::projects::ProjectsPage;
use crate::components::register::RegisterPage;
use crate::config::AppConfig;
use crate::web::http::FetchHttpClient;
use crate::web::route::AppRoute;
use crate::web::router::{Link, Router, RouterOutlet, RouterService};
use crate::web::storage::LocalStorage;

/// 受保护页面：顶部导航 + 页面内容
fn with_navigation(page: AnyView) -> AnyView {
    view! {
        <div class="min-h-screen bg-base-200">
            <Navigation />
            <main>{page}</main>
        </div>
    }
    .into_any()
}

/// 路由匹配函数
///
/// 根据 AppRoute 枚举返回对应的视图组件。
fn route_matcher(route: AppRoute) -> AnyView {
    match route {
        AppRoute::Login => view! { <LoginPage /> }.into_any(),
        AppRoute::Register => view! { <RegisterPage /> }.into_any(),
        AppRoute::Dashboard => with_navigation(view! { <DashboardPage /> }.into_any()),
        AppRoute::Projects => with_navigation(view! { <ProjectsPage /> }.into_any()),
        AppRoute::ProjectDetail(id) => with_navigation(view! { <ProjectDetailPage id=id /> }.into_any()),
        AppRoute::Profile => with_navigation(view! { <ProfilePage /> }.into_any()),
        AppRoute::NotFound => view! {
            <div class="flex items-center justify-center min-h-screen bg-base-200">
                <div class="text-center">
                    <h1 class="text-6xl font-bold text-error">"404"</h1>
                    <p class="text-xl mt-4">"Page not found"</p>
                    <Link to=AppRoute::Dashboard class="btn btn-primary mt-6">"Back to dashboard"</Link>
                </div>
            </div>
        }
        .into_any(),
    }
}

#[component]
pub fn App() -> impl IntoView {
    let config = AppConfig::from_build_env();

    // 1. 创建认证上下文
    let auth = AuthContext::new();
    provide_context(auth);

    // 2. 路由服务只依赖认证信号，不认识 AuthContext
    let router = RouterService::new(auth.is_authenticated_signal(), auth.is_loading_signal());

    // 3. API 客户端；401 时由这里决定跳转
    let api = ScholarsApi::new(config.api_base_url, FetchHttpClient, LocalStorage)
        .on_unauthorized(move || expire_session(&auth, |route| router.navigate_to(route)));

    // 4. 从 LocalStorage 恢复会话
    init_auth(&auth, api.session());

    provide_api(api);
    provide_context(FlashNotice::new());

    view! {
        <Router service=router>
            <RouterOutlet matcher=route_matcher />
        </Router>
    }
}
