use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

pub mod date;
pub mod protocol;

pub use date::Timestamp;

// =========================================================
// 常量定义 (Constants)
// =========================================================

/// Password shared by every demo identity the backend provisions.
pub const DEMO_PASSWORD: &str = "demo123";

/// Demo identities created by `POST /demo/create-accounts`.
pub const DEMO_ACCOUNTS: [(Role, &str); 4] = [
    (Role::Student, "student@demo.com"),
    (Role::Scholar, "scholar@demo.com"),
    (Role::Nonprofit, "nonprofit@demo.com"),
    (Role::Admin, "admin@demo.com"),
];

// =========================================================
// 领域模型 (Domain Models)
// =========================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    Student,
    Scholar,
    Nonprofit,
    Admin,
    /// Any role string this client does not know about.
    #[default]
    #[serde(other)]
    Other,
}

impl Role {
    /// Roles a visitor may pick on the sign-up form.
    pub const REGISTERABLE: [Role; 3] = [Role::Student, Role::Scholar, Role::Nonprofit];

    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Student => "student",
            Role::Scholar => "scholar",
            Role::Nonprofit => "nonprofit",
            Role::Admin => "admin",
            Role::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Role::Student => "Student",
            Role::Scholar => "Scholar",
            Role::Nonprofit => "Nonprofit",
            Role::Admin => "Administrator",
            Role::Other => "Member",
        }
    }

    /// One-line tagline shown under the dashboard greeting.
    pub fn dashboard_description(&self) -> &'static str {
        match self {
            Role::Student => "Participate in real-world projects and gain practical experience",
            Role::Scholar => "Access structured support for hands-on learning projects",
            Role::Nonprofit => "Connect with academic resources to solve organizational challenges",
            Role::Admin => "Manage platform operations and user interactions",
            Role::Other => "Welcome to Solution Scholars",
        }
    }

    pub fn profile_description(&self) -> &'static str {
        match self {
            Role::Student => {
                "Student: Participate in real-world projects and gain practical experience."
            }
            Role::Scholar => "Scholar: Access structured support for hands-on learning projects.",
            Role::Nonprofit => "Nonprofit Representative: Connect with academic resources.",
            Role::Admin => "Administrator: Manage platform operations and user interactions.",
            Role::Other => "User",
        }
    }

    /// Only nonprofits post projects.
    pub fn can_create_projects(&self) -> bool {
        matches!(self, Role::Nonprofit)
    }

    /// Everybody who does not post projects may join an open one.
    pub fn can_join_projects(&self) -> bool {
        !self.can_create_projects()
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Role {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "student" => Ok(Role::Student),
            "scholar" => Ok(Role::Scholar),
            "nonprofit" => Ok(Role::Nonprofit),
            "admin" => Ok(Role::Admin),
            other => Err(format!("unknown role: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct User {
    #[serde(alias = "_id", default)]
    pub id: String,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub role: Role,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(
        rename = "desc",
        alias = "biography",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub biography: Option<String>,
    #[serde(default)]
    pub interests: Vec<String>,
    #[serde(default)]
    pub courses: Vec<String>,
    #[serde(
        default,
        deserialize_with = "date::lenient",
        skip_serializing_if = "Option::is_none"
    )]
    pub created_at: Option<Timestamp>,
}

impl User {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectStatus {
    #[default]
    Open,
    InProgress,
    Completed,
}

impl ProjectStatus {
    pub const ALL: [ProjectStatus; 3] = [
        ProjectStatus::Open,
        ProjectStatus::InProgress,
        ProjectStatus::Completed,
    ];

    /// Human form of the wire value, e.g. `in progress`.
    pub fn label(&self) -> &'static str {
        match self {
            ProjectStatus::Open => "open",
            ProjectStatus::InProgress => "in progress",
            ProjectStatus::Completed => "completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Project {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub status: ProjectStatus,
    #[serde(default)]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "date::lenient")]
    pub deadline: Option<Timestamp>,
    #[serde(default)]
    pub assigned_students: Vec<String>,
    #[serde(default, deserialize_with = "date::lenient")]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Message {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub sender_id: String,
    pub content: String,
    #[serde(default, deserialize_with = "date::lenient")]
    pub timestamp: Option<Timestamp>,
    #[serde(default)]
    pub project_id: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Milestone {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default, deserialize_with = "date::lenient")]
    pub due_date: Option<Timestamp>,
    #[serde(default)]
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct ProgressReport {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub project_id: String,
    #[serde(default)]
    pub author_id: Option<String>,
    pub content: String,
    #[serde(default)]
    pub milestone_id: Option<String>,
    #[serde(default, deserialize_with = "date::lenient")]
    pub created_at: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(remote = "Self")]
pub struct Resource {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(default)]
    pub project_id: Option<String>,
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default, deserialize_with = "date::lenient")]
    pub created_at: Option<Timestamp>,
}

/// 后端文档可能同时带 `_id` 与 `id`，此时以 `_id` 为准
fn prefer_document_id(mut value: serde_json::Value) -> serde_json::Value {
    if let Some(doc) = value.as_object_mut() {
        if doc.contains_key("_id") {
            doc.remove("id");
        }
    }
    value
}

// 派生实现挂在 `remote = "Self"` 的固有方法上，这里包一层 id 归一化
macro_rules! document_serde {
    ($($ty:ty),+ $(,)?) => {$(
        impl Serialize for $ty {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                <$ty>::serialize(self, serializer)
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let value = prefer_document_id(serde_json::Value::deserialize(deserializer)?);
                <$ty>::deserialize(value).map_err(serde::de::Error::custom)
            }
        }
    )+};
}

document_serde!(User, Project, Message, Milestone, ProgressReport, Resource);

// =========================================================
// 请求体 (Request Bodies)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegisterRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateProjectRequest {
    pub title: String,
    pub description: String,
    pub requirements: Vec<String>,
    pub deadline: Option<Timestamp>,
}

/// Splits the one-per-line requirements textarea, dropping blank lines.
pub fn parse_requirements(text: &str) -> Vec<String> {
    text.split('\n')
        .filter(|line| !line.trim().is_empty())
        .map(str::to_string)
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewMilestone {
    pub title: String,
    pub description: String,
    pub due_date: Option<Timestamp>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProgressReport {
    pub content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub milestone_id: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewResource {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
}

// =========================================================
// 响应体 (Response Bodies)
// =========================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: User,
}

/// Generic acknowledgement; every other field the backend sends is ignored.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ack {
    #[serde(default)]
    pub message: Option<String>,
}

/// Error payload the backend attaches to non-2xx responses.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.message
            .or(self.error)
            .filter(|m| !m.trim().is_empty())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProjectList {
    #[serde(default)]
    pub projects: Vec<Project>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MessageList {
    #[serde(default)]
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MilestoneList {
    #[serde(default)]
    pub milestones: Vec<Milestone>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProgressReportList {
    #[serde(default, alias = "reports")]
    pub progress_reports: Vec<ProgressReport>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ResourceList {
    #[serde(default)]
    pub resources: Vec<Resource>,
}

/// A single project, either bare or wrapped as `{ "project": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProjectPayload {
    Wrapped { project: Project },
    Bare(Project),
}

impl ProjectPayload {
    pub fn into_project(self) -> Project {
        match self {
            ProjectPayload::Wrapped { project } | ProjectPayload::Bare(project) => project,
        }
    }
}

/// A single user, either bare or wrapped as `{ "user": ... }`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UserPayload {
    Wrapped { user: User },
    Bare(User),
}

impl UserPayload {
    pub fn into_user(self) -> User {
        match self {
            UserPayload::Wrapped { user } | UserPayload::Bare(user) => user,
        }
    }
}
