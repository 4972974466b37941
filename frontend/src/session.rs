//! 会话模块
//!
//! 拆分为两部分：
//! - `SessionState` + `SessionAction`: 纯状态归约，不触碰任何存储
//! - `SessionStore`: 持久化副作用，负责 token / user 两个键的读写
//!
//! 两个键总是一起写入、一起清除。token 以原始字符串保存，user 以 JSON 保存。

use crate::web::storage::{StorageAdapter, StorageError};
use scholars_shared::User;

pub const TOKEN_KEY: &str = "token";
pub const USER_KEY: &str = "user";

// =========================================================
// 纯状态 (Reducer)
// =========================================================

/// 当前标签页的会话状态
#[derive(Debug, Clone, PartialEq)]
pub struct SessionState {
    /// 已认证用户
    pub user: Option<User>,
    /// 仅在首次从存储恢复之前为 true
    pub is_loading: bool,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            user: None,
            is_loading: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionAction {
    /// 启动时的恢复结果
    Restored(Option<User>),
    LoggedIn(User),
    LoggedOut,
}

impl SessionState {
    pub fn apply(&mut self, action: SessionAction) {
        match action {
            SessionAction::Restored(user) => {
                self.user = user;
                self.is_loading = false;
            }
            SessionAction::LoggedIn(user) => {
                self.user = Some(user);
                self.is_loading = false;
            }
            SessionAction::LoggedOut => {
                self.user = None;
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

// =========================================================
// 持久化 (Persistence)
// =========================================================

#[derive(Debug, Clone, Default)]
pub struct SessionStore<S> {
    storage: S,
}

impl<S: StorageAdapter> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self { storage }
    }

    pub fn token(&self) -> Option<String> {
        match self.storage.get_raw(TOKEN_KEY) {
            Ok(token) => token.filter(|t| !t.is_empty()),
            Err(e) => {
                log::warn!("ignoring unreadable session token: {e}");
                None
            }
        }
    }

    /// 从存储恢复用户
    ///
    /// 只有 token 与 user 同时存在时才恢复；user 损坏时记录错误并清除两个键。
    pub fn restore(&self) -> Option<User> {
        self.token()?;

        match self.storage.get::<User>(USER_KEY) {
            Ok(Some(user)) => {
                log::info!("session restored for {}", user.email);
                Some(user)
            }
            Ok(None) => None,
            Err(e @ StorageError::Corrupt { .. }) => {
                log::error!("discarding corrupt session data: {e}");
                self.clear();
                None
            }
            Err(e) => {
                log::warn!("session storage unavailable: {e}");
                None
            }
        }
    }

    pub fn persist(&self, token: &str, user: &User) -> Result<(), StorageError> {
        let result = self
            .storage
            .put_raw(TOKEN_KEY, token)
            .and_then(|_| self.storage.put(USER_KEY, user));
        if result.is_err() {
            // 不允许只写入一半
            self.clear();
        }
        result
    }

    pub fn clear(&self) {
        self.storage.delete(TOKEN_KEY);
        self.storage.delete(USER_KEY);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::web::storage::MemoryStorage;
    use scholars_shared::Role;

    fn sample_user() -> User {
        serde_json::from_value(serde_json::json!({
            "id": "u1",
            "first_name": "Grace",
            "last_name": "Hopper",
            "email": "student@demo.com",
            "role": "student"
        }))
        .unwrap()
    }

    fn initialized(store: &SessionStore<MemoryStorage>) -> SessionState {
        let mut state = SessionState::default();
        state.apply(SessionAction::Restored(store.restore()));
        state
    }

    #[test]
    fn default_state_is_loading_and_anonymous() {
        let state = SessionState::default();
        assert!(state.is_loading);
        assert!(!state.is_authenticated());
    }

    #[test]
    fn reducer_transitions() {
        let mut state = SessionState::default();
        state.apply(SessionAction::Restored(None));
        assert!(!state.is_loading);
        assert!(state.user.is_none());

        state.apply(SessionAction::LoggedIn(sample_user()));
        assert_eq!(state.user.as_ref().map(|u| u.role), Some(Role::Student));

        state.apply(SessionAction::LoggedOut);
        assert!(state.user.is_none());
        assert!(!state.is_loading);

        // 幂等
        state.apply(SessionAction::LoggedOut);
        assert!(state.user.is_none());
    }

    #[test]
    fn empty_storage_restores_nobody() {
        let storage = MemoryStorage::new();
        let state = initialized(&SessionStore::new(storage));
        assert!(state.user.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn token_without_user_restores_nobody() {
        let storage = MemoryStorage::new();
        storage.insert_raw(TOKEN_KEY, "abc");
        let state = initialized(&SessionStore::new(storage));
        assert!(state.user.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn user_without_token_restores_nobody() {
        let storage = MemoryStorage::new();
        storage.insert_raw(USER_KEY, &serde_json::to_string(&sample_user()).unwrap());
        let state = initialized(&SessionStore::new(storage));
        assert!(state.user.is_none());
        assert!(!state.is_loading);
    }

    #[test]
    fn empty_token_restores_nobody() {
        let storage = MemoryStorage::new();
        storage.insert_raw(TOKEN_KEY, "");
        storage.insert_raw(USER_KEY, &serde_json::to_string(&sample_user()).unwrap());
        let state = initialized(&SessionStore::new(storage));
        assert!(state.user.is_none());
    }

    #[test]
    fn corrupt_user_is_discarded() {
        let storage = MemoryStorage::new();
        storage.insert_raw(TOKEN_KEY, "abc");
        storage.insert_raw(USER_KEY, "{not json");
        let state = initialized(&SessionStore::new(storage.clone()));
        assert!(state.user.is_none());
        assert!(!state.is_loading);
        assert!(storage.is_empty());
    }

    #[test]
    fn persisted_pair_survives_reload() {
        let storage = MemoryStorage::new();
        SessionStore::new(storage.clone())
            .persist("abc", &sample_user())
            .unwrap();

        // token 不经 JSON 编码
        assert_eq!(storage.raw(TOKEN_KEY).as_deref(), Some("abc"));

        // 模拟页面刷新：新的 store 实例，同一份存储
        let reloaded = SessionStore::new(storage);
        assert_eq!(reloaded.token().as_deref(), Some("abc"));
        assert_eq!(reloaded.restore(), Some(sample_user()));
    }

    #[test]
    fn clear_removes_both_keys_and_is_idempotent() {
        let storage = MemoryStorage::new();
        let store = SessionStore::new(storage.clone());
        store.persist("abc", &sample_user()).unwrap();
        store.clear();
        assert!(storage.is_empty());
        store.clear();
        assert!(storage.is_empty());
    }
}
