//! 认证模块
//!
//! 管理用户认证状态，与路由系统解耦。
//! 路由服务通过注入的认证信号来检查认证状态。
//!
//! 状态转换由 `session::SessionState::apply` 完成，本模块只负责
//! 调用 API、写入持久化存储并派发 `SessionAction`。

use leptos::prelude::*;
use scholars_shared::{RegisterRequest, User};

use crate::api::ApiClient;
use crate::session::{SessionAction, SessionState, SessionStore};
use crate::web::http::HttpClient;
use crate::web::route::AppRoute;
use crate::web::storage::StorageAdapter;

pub const LOGIN_FAILED: &str = "Login failed";
pub const REGISTRATION_FAILED: &str = "Registration failed";

/// 认证上下文
///
/// 包含读写信号，由组合根创建并通过 Context 在组件间共享。
#[derive(Clone, Copy)]
pub struct AuthContext {
    /// 会话状态（只读）
    pub state: ReadSignal<SessionState>,
    /// 设置会话状态（写入）
    pub set_state: WriteSignal<SessionState>,
}

impl AuthContext {
    /// 创建新的认证上下文
    pub fn new() -> Self {
        let (state, set_state) = signal(SessionState::default());
        Self { state, set_state }
    }

    pub fn dispatch(&self, action: SessionAction) {
        self.set_state.update(|state| state.apply(action));
    }

    /// 当前用户
    pub fn user(&self) -> Signal<Option<User>> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.user.clone()))
    }

    /// 获取认证状态信号（用于路由服务注入）
    pub fn is_authenticated_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(SessionState::is_authenticated))
    }

    pub fn is_loading_signal(&self) -> Signal<bool> {
        let state = self.state;
        Signal::derive(move || state.with(|s| s.is_loading))
    }
}

impl Default for AuthContext {
    fn default() -> Self {
        Self::new()
    }
}

/// 从 Context 获取认证上下文
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().expect("AuthContext should be provided")
}

/// 初始化认证状态
///
/// 同步地从 LocalStorage 恢复会话，不发起网络请求。
pub fn init_auth<S: StorageAdapter>(ctx: &AuthContext, store: &SessionStore<S>) {
    ctx.dispatch(SessionAction::Restored(store.restore()));
}

/// 校验凭据并持久化会话
///
/// 失败时返回可直接展示的消息，且不写入存储。
pub async fn authenticate<C, S>(
    api: &ApiClient<C, S>,
    email: &str,
    password: &str,
) -> Result<User, String>
where
    C: HttpClient,
    S: StorageAdapter,
{
    log::info!("login attempt for {email}");

    let response = api.login(email, password).await.map_err(|e| {
        log::warn!("login failed for {email}: {e}");
        e.user_message(LOGIN_FAILED)
    })?;

    api.session()
        .persist(&response.token, &response.user)
        .map_err(|e| {
            log::error!("could not persist session: {e}");
            LOGIN_FAILED.to_string()
        })?;

    log::info!("logged in as {} ({})", response.user.email, response.user.role);
    Ok(response.user)
}

/// 登录并更新会话状态
pub async fn login<C, S>(
    ctx: &AuthContext,
    api: &ApiClient<C, S>,
    email: &str,
    password: &str,
) -> Result<(), String>
where
    C: HttpClient,
    S: StorageAdapter,
{
    let user = authenticate(api, email, password).await?;
    ctx.dispatch(SessionAction::LoggedIn(user));
    Ok(())
}

/// 注册新账户；不会登录调用者
pub async fn register<C, S>(api: &ApiClient<C, S>, request: &RegisterRequest) -> Result<(), String>
where
    C: HttpClient,
    S: StorageAdapter,
{
    log::info!("registering {} as {}", request.email, request.role);

    api.register(request).await.map(|_| ()).map_err(|e| {
        log::warn!("registration failed for {}: {e}", request.email);
        e.user_message(REGISTRATION_FAILED)
    })
}

/// 注销并清除状态
///
/// 导航将由路由服务的认证状态监听自动处理。
pub fn logout<S: StorageAdapter>(ctx: &AuthContext, store: &SessionStore<S>) {
    log::info!("logging out");
    store.clear();
    ctx.dispatch(SessionAction::LoggedOut);
}

/// 服务端拒绝令牌后的收尾
///
/// 存储已由 API 客户端清空，这里只重置内存状态并回到登录页。
pub fn expire_session(ctx: &AuthContext, navigate: impl Fn(AppRoute)) {
    log::warn!("session expired, returning to login");
    ctx.dispatch(SessionAction::LoggedOut);
    navigate(AppRoute::Login);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::{TOKEN_KEY, USER_KEY};
    use crate::web::http::MockHttpClient;
    use crate::web::storage::MemoryStorage;
    use scholars_shared::Role;
    use scholars_shared::protocol::HttpMethod;
    use serde_json::json;

    const BASE: &str = "http://api.test/api";

    fn setup() -> (ApiClient<MockHttpClient, MemoryStorage>, MockHttpClient, MemoryStorage) {
        let http = MockHttpClient::new();
        let storage = MemoryStorage::new();
        let api = ApiClient::new(BASE, http.clone(), storage.clone());
        (api, http, storage)
    }

    fn mock_login_ok(http: &MockHttpClient) {
        http.mock_response(
            HttpMethod::Post,
            &format!("{BASE}/auth/login"),
            200,
            json!({
                "token": "jwt-abc",
                "user": {
                    "_id": "u7",
                    "first_name": "Ada",
                    "last_name": "Lovelace",
                    "email": "scholar@demo.com",
                    "role": "scholar"
                }
            }),
        );
    }

    #[tokio::test]
    async fn login_success_persists_and_survives_reload() {
        let (api, http, storage) = setup();
        mock_login_ok(&http);

        let user = authenticate(&api, "scholar@demo.com", "demo123").await.unwrap();
        assert_eq!(user.role, Role::Scholar);
        assert_eq!(storage.raw(TOKEN_KEY).as_deref(), Some("jwt-abc"));

        // 刷新页面后，新的会话存储读到同一用户
        let mut state = SessionState::default();
        state.apply(SessionAction::Restored(
            SessionStore::new(storage.clone()).restore(),
        ));
        assert_eq!(state.user, Some(user));
        assert!(!state.is_loading);
    }

    #[tokio::test]
    async fn login_server_error_leaves_storage_untouched() {
        let (api, http, storage) = setup();
        storage.insert_raw("unrelated", "\"keep\"");
        let before = storage.snapshot();
        http.mock_response(
            HttpMethod::Post,
            &format!("{BASE}/auth/login"),
            500,
            json!({"error": "database down"}),
        );

        let err = authenticate(&api, "x@y.z", "pw").await.unwrap_err();
        assert_eq!(err, "database down");
        assert_eq!(storage.snapshot(), before);
    }

    #[tokio::test]
    async fn login_rejection_uses_backend_message_or_fallback() {
        let (api, http, storage) = setup();
        http.mock_response(
            HttpMethod::Post,
            &format!("{BASE}/auth/login"),
            401,
            json!({"message": "Invalid credentials"}),
        );
        let err = authenticate(&api, "x@y.z", "pw").await.unwrap_err();
        assert_eq!(err, "Invalid credentials");
        assert!(storage.is_empty());

        http.mock_response(HttpMethod::Post, &format!("{BASE}/auth/login"), 400, json!({}));
        let err = authenticate(&api, "x@y.z", "pw").await.unwrap_err();
        assert_eq!(err, LOGIN_FAILED);
    }

    #[tokio::test]
    async fn login_offline_returns_fallback() {
        let (api, http, storage) = setup();
        http.go_offline();

        let err = authenticate(&api, "x@y.z", "pw").await.unwrap_err();
        assert!(!err.is_empty());
        assert!(storage.is_empty());
    }

    #[tokio::test]
    async fn register_does_not_sign_in() {
        let (api, http, storage) = setup();
        http.mock_response(
            HttpMethod::Post,
            &format!("{BASE}/auth/register"),
            201,
            json!({"message": "User registered successfully"}),
        );

        let request = RegisterRequest {
            first_name: "Mae".to_string(),
            last_name: "Jemison".to_string(),
            email: "mae@example.org".to_string(),
            password: "secret1".to_string(),
            role: Role::Student,
        };
        register(&api, &request).await.unwrap();
        assert!(storage.is_empty());

        let body: serde_json::Value =
            serde_json::from_str(http.last_request().unwrap().body.as_deref().unwrap()).unwrap();
        assert_eq!(body["role"], json!("student"));
        assert_eq!(body["first_name"], json!("Mae"));
    }

    #[tokio::test]
    async fn register_failure_reports_message() {
        let (api, http, _storage) = setup();
        http.mock_response(
            HttpMethod::Post,
            &format!("{BASE}/auth/register"),
            400,
            json!({"message": "Email already exists"}),
        );
        let request = RegisterRequest {
            first_name: String::new(),
            last_name: String::new(),
            email: "dup@example.org".to_string(),
            password: "x".to_string(),
            role: Role::Nonprofit,
        };
        assert_eq!(
            register(&api, &request).await.unwrap_err(),
            "Email already exists"
        );

        http.go_offline();
        assert_eq!(
            register(&api, &request).await.unwrap_err(),
            REGISTRATION_FAILED
        );
    }

    #[test]
    fn restore_requires_both_keys() {
        let storage = MemoryStorage::new();
        storage.insert_raw(USER_KEY, r#"{"id":"u1","email":"a@b.c"}"#);
        assert!(SessionStore::new(storage).restore().is_none());
    }

    #[test]
    fn expired_session_logs_out_and_targets_login() {
        Owner::new().with(|| {
            let ctx = AuthContext::new();
            ctx.dispatch(SessionAction::LoggedIn(User {
                id: "u7".into(),
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                email: "scholar@demo.com".into(),
                role: Role::Scholar,
                office: None,
                phone: None,
                title: None,
                biography: None,
                interests: vec![],
                courses: vec![],
                created_at: None,
            }));
            assert!(ctx.state.get_untracked().is_authenticated());

            let visited = std::cell::RefCell::new(Vec::new());
            expire_session(&ctx, |route| visited.borrow_mut().push(route));

            assert!(!ctx.state.get_untracked().is_authenticated());
            assert_eq!(ctx.state.get_untracked().user, None);
            assert_eq!(visited.into_inner(), vec![AppRoute::Login]);
        });
    }
}
