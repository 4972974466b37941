//! 后端 API 客户端
//!
//! 每个方法对应一个后端端点，不做业务逻辑。所有请求经过 `send`：
//! 附加 JSON 头与 Bearer token；401 时清除持久化会话并触发 `on_unauthorized`。

use std::sync::Arc;

use leptos::prelude::*;
use scholars_shared::protocol::{
    ApiRequest, AssignProjectRequest, CreateDemoAccountsRequest, CreateMilestoneRequest,
    CreateProgressReportRequest, GetProfileRequest, GetProjectRequest, ListMessagesRequest,
    ListMilestonesRequest, ListProgressReportsRequest, ListProjectResourcesRequest,
    ListProjectsRequest, ListResourcesRequest, SendMessageRequest,
};
use scholars_shared::{
    Ack, CreateProjectRequest, LoginRequest, LoginResponse, Message, Milestone, NewMilestone,
    NewProgressReport, NewResource, ProgressReport, Project, RegisterRequest, Resource, User,
};

use crate::error::ApiError;
use crate::session::SessionStore;
use crate::web::http::{FetchHttpClient, HttpClient, HttpRequest};
use crate::web::storage::{LocalStorage, StorageAdapter};

/// 401 事件处理器，由组合根注入
pub type UnauthorizedHandler = Arc<dyn Fn() + Send + Sync>;

#[derive(Clone)]
pub struct ApiClient<C, S> {
    base_url: String,
    http: C,
    session: SessionStore<S>,
    on_unauthorized: Option<UnauthorizedHandler>,
}

/// 浏览器中使用的具体类型
pub type ScholarsApi = ApiClient<FetchHttpClient, LocalStorage>;

impl<C, S> ApiClient<C, S>
where
    C: HttpClient,
    S: StorageAdapter,
{
    pub fn new(base_url: impl Into<String>, http: C, storage: S) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            base_url,
            http,
            session: SessionStore::new(storage),
            on_unauthorized: None,
        }
    }

    pub fn on_unauthorized(mut self, handler: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_unauthorized = Some(Arc::new(handler));
        self
    }

    pub fn session(&self) -> &SessionStore<S> {
        &self.session
    }

    fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    pub async fn send<R: ApiRequest>(&self, request: &R) -> Result<R::Response, ApiError> {
        let url = self.url(&request.path());
        let mut req =
            HttpRequest::new(&url, R::METHOD).with_header("Content-Type", "application/json");

        if let Some(token) = self.session.token() {
            req = req.with_header("Authorization", &format!("Bearer {token}"));
        }
        for (key, value) in request.query() {
            req = req.with_query(key, &value);
        }
        if R::METHOD.has_body() {
            let body =
                serde_json::to_string(request).map_err(|e| ApiError::Encode(e.to_string()))?;
            req = req.with_body(body);
        }

        log::debug!("{} {}", R::METHOD.as_str(), url);
        let res = self.http.send(req).await.map_err(|e| {
            log::error!("{} {} failed: {e}", R::METHOD.as_str(), url);
            ApiError::from(e)
        })?;
        log::debug!("{} {} -> {}", R::METHOD.as_str(), url, res.status);

        if res.status == 401 {
            log::warn!("unauthorized response from {url}, clearing session");
            self.session.clear();
            if let Some(handler) = &self.on_unauthorized {
                handler();
            }
            return Err(ApiError::from_status(res.status, &res.body));
        }

        if !res.ok() {
            return Err(ApiError::from_status(res.status, &res.body));
        }

        // 部分端点成功时返回空响应体
        let body = if res.body.trim().is_empty() {
            "{}"
        } else {
            res.body.as_str()
        };
        serde_json::from_str(body).map_err(|e| {
            log::error!("unexpected response body from {url}: {e}");
            ApiError::Decode(e.to_string())
        })
    }

    // =========================================================
    // 认证与用户
    // =========================================================

    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.send(&LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        })
        .await
    }

    pub async fn register(&self, request: &RegisterRequest) -> Result<Ack, ApiError> {
        self.send(request).await
    }

    pub async fn get_profile(&self) -> Result<User, ApiError> {
        Ok(self.send(&GetProfileRequest).await?.into_user())
    }

    pub async fn create_demo_accounts(&self) -> Result<Ack, ApiError> {
        self.send(&CreateDemoAccountsRequest {}).await
    }

    // =========================================================
    // 项目
    // =========================================================

    pub async fn get_projects(&self) -> Result<Vec<Project>, ApiError> {
        Ok(self.send(&ListProjectsRequest).await?.projects)
    }

    pub async fn create_project(&self, request: &CreateProjectRequest) -> Result<Project, ApiError> {
        Ok(self.send(request).await?.into_project())
    }

    /// 详情页仍然拉取完整列表后在客户端过滤，此端点暂无调用方
    #[allow(dead_code)]
    pub async fn get_project(&self, project_id: &str) -> Result<Project, ApiError> {
        let request = GetProjectRequest {
            project_id: project_id.to_string(),
        };
        Ok(self.send(&request).await?.into_project())
    }

    pub async fn assign_to_project(&self, project_id: &str) -> Result<Ack, ApiError> {
        self.send(&AssignProjectRequest {
            project_id: project_id.to_string(),
        })
        .await
    }

    pub async fn get_project_messages(&self, project_id: &str) -> Result<Vec<Message>, ApiError> {
        let request = ListMessagesRequest {
            project_id: project_id.to_string(),
        };
        Ok(self.send(&request).await?.messages)
    }

    pub async fn send_message(&self, project_id: &str, content: &str) -> Result<Ack, ApiError> {
        self.send(&SendMessageRequest {
            project_id: project_id.to_string(),
            content: content.to_string(),
        })
        .await
    }

    // =========================================================
    // 里程碑与进度报告
    // =========================================================

    pub async fn get_milestones(&self, project_id: &str) -> Result<Vec<Milestone>, ApiError> {
        let request = ListMilestonesRequest {
            project_id: project_id.to_string(),
        };
        Ok(self.send(&request).await?.milestones)
    }

    pub async fn create_milestone(
        &self,
        project_id: &str,
        milestone: NewMilestone,
    ) -> Result<Ack, ApiError> {
        self.send(&CreateMilestoneRequest {
            project_id: project_id.to_string(),
            milestone,
        })
        .await
    }

    pub async fn get_progress_reports(
        &self,
        project_id: &str,
    ) -> Result<Vec<ProgressReport>, ApiError> {
        let request = ListProgressReportsRequest {
            project_id: project_id.to_string(),
        };
        Ok(self.send(&request).await?.progress_reports)
    }

    pub async fn create_progress_report(
        &self,
        project_id: &str,
        report: NewProgressReport,
    ) -> Result<Ack, ApiError> {
        self.send(&CreateProgressReportRequest {
            project_id: project_id.to_string(),
            report,
        })
        .await
    }

    // =========================================================
    // 资源
    // =========================================================

    pub async fn get_project_resources(&self, project_id: &str) -> Result<Vec<Resource>, ApiError> {
        let request = ListProjectResourcesRequest {
            project_id: project_id.to_string(),
        };
        Ok(self.send(&request).await?.resources)
    }

    pub async fn get_resources(&self, search: &str) -> Result<Vec<Resource>, ApiError> {
        let request = ListResourcesRequest {
            search: search.to_string(),
        };
        Ok(self.send(&request).await?.resources)
    }

    pub async fn create_resource(&self, resource: &NewResource) -> Result<Ack, ApiError> {
        self.send(resource).await
    }
}

// =========================================================
// Context
// =========================================================

pub fn provide_api(api: ScholarsApi) {
    provide_context(api);
}

pub fn use_api() -> ScholarsApi {
    use_context::<ScholarsApi>().expect("ScholarsApi should be provided by App")
}

#[cfg(test)]
mod tests;
