use crate::web::http::HttpError;
use scholars_shared::ErrorBody;
use thiserror::Error;

/// API 层错误
///
/// 视图层只关心一件事：给用户显示什么。`user_message` 优先使用后端返回的
/// `message`，否则使用调用方给出的兜底文案。
#[derive(Debug, Error)]
pub enum ApiError {
    /// 401：会话已在 HTTP 层被清除
    #[error("unauthorized")]
    Unauthorized { message: Option<String> },
    /// 其他非 2xx 响应
    #[error("request failed with status {status}")]
    Status {
        status: u16,
        message: Option<String>,
    },
    #[error(transparent)]
    Network(#[from] HttpError),
    #[error("failed to encode request: {0}")]
    Encode(String),
    #[error("failed to decode response: {0}")]
    Decode(String),
}

impl ApiError {
    /// 从响应体中尽力提取后端错误消息
    pub(crate) fn from_status(status: u16, body: &str) -> Self {
        let message = serde_json::from_str::<ErrorBody>(body)
            .ok()
            .and_then(ErrorBody::into_message);
        if status == 401 {
            ApiError::Unauthorized { message }
        } else {
            ApiError::Status { status, message }
        }
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Unauthorized { .. } => Some(401),
            ApiError::Status { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Unauthorized { message } | ApiError::Status { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }

    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_backend_message() {
        let err = ApiError::from_status(400, r#"{"message": "Email already registered"}"#);
        assert_eq!(err.status(), Some(400));
        assert_eq!(err.user_message("Registration failed"), "Email already registered");
    }

    #[test]
    fn falls_back_when_body_is_not_json() {
        let err = ApiError::from_status(500, "<html>Internal Server Error</html>");
        assert!(err.server_message().is_none());
        assert_eq!(err.user_message("Login failed"), "Login failed");
    }

    #[test]
    fn status_401_maps_to_unauthorized() {
        let err = ApiError::from_status(401, r#"{"message": "Invalid credentials"}"#);
        assert!(matches!(err, ApiError::Unauthorized { .. }));
        assert_eq!(err.server_message(), Some("Invalid credentials"));
    }

    #[test]
    fn transport_errors_have_no_status() {
        let err = ApiError::from(HttpError::NetworkError("offline".to_string()));
        assert_eq!(err.status(), None);
        assert_eq!(err.user_message("Failed to load projects"), "Failed to load projects");
    }
}
