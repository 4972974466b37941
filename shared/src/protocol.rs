use crate::{
    Ack, CreateProjectRequest, LoginRequest, LoginResponse, MessageList, MilestoneList,
    NewMilestone, NewProgressReport, NewResource, ProgressReportList, ProjectList,
    ProjectPayload, RegisterRequest, ResourceList, UserPayload,
};
use serde::{Deserialize, Serialize, de::DeserializeOwned};

/// HTTP Methods for API Requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// Whether the request value is sent as a JSON body.
    pub fn has_body(&self) -> bool {
        matches!(self, HttpMethod::Post)
    }
}

/// A trait that defines the request-response relationship and metadata for an API endpoint.
///
/// The request value itself is the JSON body for methods that carry one; path
/// parameters are `#[serde(skip)]` fields.
pub trait ApiRequest: Serialize {
    /// The response type returned by this request.
    type Response: DeserializeOwned;
    /// The HTTP method.
    const METHOD: HttpMethod;
    /// The URL path relative to the API base, e.g. `/projects/42/messages`.
    fn path(&self) -> String;
    /// Query string parameters, unencoded.
    fn query(&self) -> Vec<(&'static str, String)> {
        Vec::new()
    }
}

// =========================================================
// Auth & Accounts
// =========================================================

impl ApiRequest for LoginRequest {
    type Response = LoginResponse;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/login".to_string()
    }
}

impl ApiRequest for RegisterRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/auth/register".to_string()
    }
}

/// Fetch the authenticated user's profile
#[derive(Debug, Serialize, Deserialize)]
pub struct GetProfileRequest;

impl ApiRequest for GetProfileRequest {
    type Response = UserPayload;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/users/profile".to_string()
    }
}

/// Provision the fixed demo identities
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CreateDemoAccountsRequest {}

impl ApiRequest for CreateDemoAccountsRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/demo/create-accounts".to_string()
    }
}

// =========================================================
// Projects
// =========================================================

/// List all projects
#[derive(Debug, Serialize, Deserialize)]
pub struct ListProjectsRequest;

impl ApiRequest for ListProjectsRequest {
    type Response = ProjectList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/projects".to_string()
    }
}

impl ApiRequest for CreateProjectRequest {
    type Response = ProjectPayload;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/projects".to_string()
    }
}

/// Fetch one project by id
#[derive(Debug, Serialize, Deserialize)]
pub struct GetProjectRequest {
    #[serde(skip)]
    pub project_id: String,
}

impl ApiRequest for GetProjectRequest {
    type Response = ProjectPayload;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/projects/{}", self.project_id)
    }
}

/// Join the current user to a project
#[derive(Debug, Serialize, Deserialize)]
pub struct AssignProjectRequest {
    #[serde(skip)]
    pub project_id: String,
}

impl ApiRequest for AssignProjectRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/projects/{}/assign", self.project_id)
    }
}

// =========================================================
// Project Messages
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListMessagesRequest {
    #[serde(skip)]
    pub project_id: String,
}

impl ApiRequest for ListMessagesRequest {
    type Response = MessageList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/projects/{}/messages", self.project_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SendMessageRequest {
    #[serde(skip)]
    pub project_id: String,
    pub content: String,
}

impl ApiRequest for SendMessageRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/projects/{}/messages", self.project_id)
    }
}

// =========================================================
// Milestones & Progress Reports
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListMilestonesRequest {
    #[serde(skip)]
    pub project_id: String,
}

impl ApiRequest for ListMilestonesRequest {
    type Response = MilestoneList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/projects/{}/milestones", self.project_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateMilestoneRequest {
    #[serde(skip)]
    pub project_id: String,
    #[serde(flatten)]
    pub milestone: NewMilestone,
}

impl ApiRequest for CreateMilestoneRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/projects/{}/milestones", self.project_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ListProgressReportsRequest {
    #[serde(skip)]
    pub project_id: String,
}

impl ApiRequest for ListProgressReportsRequest {
    type Response = ProgressReportList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/projects/{}/progress-reports", self.project_id)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateProgressReportRequest {
    #[serde(skip)]
    pub project_id: String,
    #[serde(flatten)]
    pub report: NewProgressReport,
}

impl ApiRequest for CreateProgressReportRequest {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        format!("/projects/{}/progress-reports", self.project_id)
    }
}

// =========================================================
// Resources
// =========================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ListProjectResourcesRequest {
    #[serde(skip)]
    pub project_id: String,
}

impl ApiRequest for ListProjectResourcesRequest {
    type Response = ResourceList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        format!("/projects/{}/resources", self.project_id)
    }
}

/// Search the shared resource library; an empty search lists everything.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ListResourcesRequest {
    #[serde(skip)]
    pub search: String,
}

impl ApiRequest for ListResourcesRequest {
    type Response = ResourceList;
    const METHOD: HttpMethod = HttpMethod::Get;
    fn path(&self) -> String {
        "/resources".to_string()
    }
    fn query(&self) -> Vec<(&'static str, String)> {
        if self.search.is_empty() {
            Vec::new()
        } else {
            vec![("search", self.search.clone())]
        }
    }
}

impl ApiRequest for NewResource {
    type Response = Ack;
    const METHOD: HttpMethod = HttpMethod::Post;
    fn path(&self) -> String {
        "/resources".to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_parameters_are_not_serialized() {
        let req = SendMessageRequest {
            project_id: "p1".to_string(),
            content: "hello".to_string(),
        };
        assert_eq!(req.path(), "/projects/p1/messages");
        assert_eq!(serde_json::to_string(&req).unwrap(), r#"{"content":"hello"}"#);

        let assign = AssignProjectRequest {
            project_id: "p1".to_string(),
        };
        assert_eq!(assign.path(), "/projects/p1/assign");
        assert_eq!(serde_json::to_string(&assign).unwrap(), "{}");
    }

    #[test]
    fn bodyless_posts_send_empty_object() {
        assert_eq!(
            serde_json::to_string(&CreateDemoAccountsRequest::default()).unwrap(),
            "{}"
        );
    }

    #[test]
    fn flattened_milestone_body() {
        let req = CreateMilestoneRequest {
            project_id: "p1".to_string(),
            milestone: NewMilestone {
                title: "MVP".to_string(),
                description: "First cut".to_string(),
                due_date: None,
            },
        };
        let value: serde_json::Value = serde_json::to_value(&req).unwrap();
        assert_eq!(value["title"], "MVP");
        assert!(value.get("project_id").is_none());
        assert_eq!(req.path(), "/projects/p1/milestones");
    }

    #[test]
    fn resource_search_only_adds_query_when_present() {
        assert!(ListResourcesRequest::default().query().is_empty());
        let req = ListResourcesRequest {
            search: "grant writing".to_string(),
        };
        assert_eq!(req.query(), vec![("search", "grant writing".to_string())]);
        assert_eq!(req.path(), "/resources");
    }

    #[test]
    fn only_post_carries_a_body() {
        assert!(HttpMethod::Post.has_body());
        assert!(!HttpMethod::Get.has_body());
    }
}
