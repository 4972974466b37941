//! 路由定义模块 - 领域模型
//!
//! 这是纯粹的业务逻辑层，不依赖于 DOM 或 web_sys。
//! 定义了应用的所有路由及其守卫规则。

use std::fmt::Display;

/// 应用路由枚举
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AppRoute {
    /// 登录页面
    #[default]
    Login,
    Register,
    /// 控制面板 (需要认证)
    Dashboard,
    Projects,
    /// `/projects/:id`
    ProjectDetail(String),
    Profile,
    /// 页面未找到
    NotFound,
}

impl AppRoute {
    /// 将 URL path 解析为路由枚举
    ///
    /// 尾部斜杠会被忽略；`/` 指向控制面板。
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim_end_matches('/');
        let segments: Vec<&str> = trimmed.split('/').skip(1).collect();

        match segments.as_slice() {
            [] => Self::Dashboard,
            ["login"] => Self::Login,
            ["register"] => Self::Register,
            ["dashboard"] => Self::Dashboard,
            ["projects"] => Self::Projects,
            ["projects", id] if !id.is_empty() => Self::ProjectDetail((*id).to_string()),
            ["profile"] => Self::Profile,
            _ => Self::NotFound,
        }
    }

    /// 获取路由对应的 URL path
    pub fn to_path(&self) -> String {
        match self {
            Self::Login => "/login".to_string(),
            Self::Register => "/register".to_string(),
            Self::Dashboard => "/dashboard".to_string(),
            Self::Projects => "/projects".to_string(),
            Self::ProjectDetail(id) => format!("/projects/{id}"),
            Self::Profile => "/profile".to_string(),
            Self::NotFound => "/404".to_string(),
        }
    }

    /// **核心守卫逻辑：定义该路由是否需要认证**
    pub fn requires_auth(&self) -> bool {
        matches!(
            self,
            Self::Dashboard | Self::Projects | Self::ProjectDetail(_) | Self::Profile
        )
    }

    /// 定义已认证用户是否应该离开此路由（登录、注册页）
    pub fn should_redirect_when_authenticated(&self) -> bool {
        matches!(self, Self::Login | Self::Register)
    }

    /// 获取认证失败时的重定向目标
    pub fn auth_failure_redirect() -> Self {
        Self::Login
    }

    /// 获取认证成功时的重定向目标（从登录页）
    pub fn auth_success_redirect() -> Self {
        Self::Dashboard
    }

    /// 应用守卫，返回实际应当显示的路由
    pub fn guard(self, is_authenticated: bool) -> Self {
        if self.requires_auth() && !is_authenticated {
            Self::auth_failure_redirect()
        } else if self.should_redirect_when_authenticated() && is_authenticated {
            Self::auth_success_redirect()
        } else {
            self
        }
    }

    /// 导航栏中属于同一分区的路由（详情页归入项目）
    pub fn section(&self) -> Self {
        match self {
            Self::ProjectDetail(_) => Self::Projects,
            other => other.clone(),
        }
    }
}

impl Display for AppRoute {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_path())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_known_paths() {
        assert_eq!(AppRoute::from_path("/login"), AppRoute::Login);
        assert_eq!(AppRoute::from_path("/register"), AppRoute::Register);
        assert_eq!(AppRoute::from_path("/dashboard"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path("/projects"), AppRoute::Projects);
        assert_eq!(
            AppRoute::from_path("/projects/65f1c0ab"),
            AppRoute::ProjectDetail("65f1c0ab".to_string())
        );
        assert_eq!(AppRoute::from_path("/profile"), AppRoute::Profile);
    }

    #[test]
    fn root_goes_to_dashboard() {
        assert_eq!(AppRoute::from_path("/"), AppRoute::Dashboard);
        assert_eq!(AppRoute::from_path(""), AppRoute::Dashboard);
    }

    #[test]
    fn trailing_slash_is_ignored() {
        assert_eq!(AppRoute::from_path("/projects/"), AppRoute::Projects);
        assert_eq!(
            AppRoute::from_path("/projects/p1/"),
            AppRoute::ProjectDetail("p1".to_string())
        );
    }

    #[test]
    fn unknown_paths_are_not_found() {
        assert_eq!(AppRoute::from_path("/admin"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/projects/p1/edit"), AppRoute::NotFound);
        assert_eq!(AppRoute::from_path("/projects/new/extra"), AppRoute::NotFound);
    }

    #[test]
    fn paths_round_trip() {
        for route in [
            AppRoute::Login,
            AppRoute::Register,
            AppRoute::Dashboard,
            AppRoute::Projects,
            AppRoute::ProjectDetail("abc".to_string()),
            AppRoute::Profile,
        ] {
            assert_eq!(AppRoute::from_path(&route.to_path()), route);
        }
    }

    #[test]
    fn unauthenticated_dashboard_redirects_to_login() {
        assert_eq!(
            AppRoute::from_path("/dashboard").guard(false),
            AppRoute::Login
        );
        assert_eq!(
            AppRoute::ProjectDetail("p1".to_string()).guard(false),
            AppRoute::Login
        );
        assert_eq!(AppRoute::Profile.guard(false), AppRoute::Login);
    }

    #[test]
    fn authenticated_user_leaves_login_and_register() {
        assert_eq!(AppRoute::Login.guard(true), AppRoute::Dashboard);
        assert_eq!(AppRoute::Register.guard(true), AppRoute::Dashboard);
        assert_eq!(AppRoute::Projects.guard(true), AppRoute::Projects);
    }

    #[test]
    fn not_found_is_public() {
        assert_eq!(AppRoute::NotFound.guard(false), AppRoute::NotFound);
        assert_eq!(AppRoute::NotFound.guard(true), AppRoute::NotFound);
    }

    #[test]
    fn detail_belongs_to_projects_section() {
        assert_eq!(
            AppRoute::ProjectDetail("p1".to_string()).section(),
            AppRoute::Projects
        );
        assert_eq!(AppRoute::Profile.section(), AppRoute::Profile);
    }
}
