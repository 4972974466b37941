use super::*;
use crate::session::{TOKEN_KEY, USER_KEY};
use crate::web::http::MockHttpClient;
use crate::web::storage::MemoryStorage;
use scholars_shared::protocol::HttpMethod;
use scholars_shared::{ProjectStatus, Role, Timestamp};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};

const BASE: &str = "http://api.test/api";

fn setup() -> (ApiClient<MockHttpClient, MemoryStorage>, MockHttpClient, MemoryStorage) {
    let http = MockHttpClient::new();
    let storage = MemoryStorage::new();
    let api = ApiClient::new(format!("{BASE}/"), http.clone(), storage.clone());
    (api, http, storage)
}

fn signed_in(storage: &MemoryStorage) {
    storage.insert_raw(TOKEN_KEY, "tok-123");
    storage.insert_raw(
        USER_KEY,
        &json!({"id": "u1", "email": "student@demo.com", "role": "student"}).to_string(),
    );
}

fn project_json(id: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": format!("Project {id}"),
        "description": "Help a food bank",
        "status": status,
        "requirements": ["Rust"],
        "assigned_students": [],
        "created_at": "2024-03-01T10:00:00Z"
    })
}

#[tokio::test]
async fn attaches_bearer_token_and_json_header() {
    let (api, http, storage) = setup();
    signed_in(&storage);
    http.mock_response(HttpMethod::Get, &format!("{BASE}/projects"), 200, json!({"projects": []}));

    api.get_projects().await.unwrap();

    let req = http.last_request().unwrap();
    assert_eq!(req.header("authorization"), Some("Bearer tok-123"));
    assert_eq!(req.header("Content-Type"), Some("application/json"));
    assert!(req.body.is_none());
}

#[tokio::test]
async fn omits_authorization_without_token() {
    let (api, http, _storage) = setup();
    http.mock_response(HttpMethod::Get, &format!("{BASE}/projects"), 200, json!({"projects": []}));

    api.get_projects().await.unwrap();

    assert!(http.last_request().unwrap().header("Authorization").is_none());
}

#[tokio::test]
async fn unauthorized_clears_session_and_fires_handler() {
    let (api, http, storage) = setup();
    signed_in(&storage);
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    let api = api.on_unauthorized(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/projects/p1/messages"),
        401,
        json!({"message": "Token expired"}),
    );

    let err = api.get_project_messages("p1").await.unwrap_err();

    assert!(matches!(err, ApiError::Unauthorized { .. }));
    assert_eq!(err.server_message(), Some("Token expired"));
    assert!(storage.is_empty());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn unauthorized_on_login_also_fires_handler() {
    let (api, http, storage) = setup();
    let fired = Arc::new(AtomicUsize::new(0));
    let counter = fired.clone();
    let api = api.on_unauthorized(move || {
        counter.fetch_add(1, Ordering::SeqCst);
    });
    http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/auth/login"),
        401,
        json!({"message": "Invalid credentials"}),
    );

    assert!(api.login("a@b.c", "nope").await.is_err());
    assert!(storage.is_empty());
    assert_eq!(fired.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn other_failures_keep_session() {
    let (api, http, storage) = setup();
    signed_in(&storage);
    http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/projects/p1/assign"),
        400,
        json!({"message": "Project is not open"}),
    );

    let err = api.assign_to_project("p1").await.unwrap_err();

    assert_eq!(err.status(), Some(400));
    assert_eq!(err.user_message("Failed to assign to project"), "Project is not open");
    assert_eq!(storage.raw(TOKEN_KEY).as_deref(), Some("tok-123"));
}

#[tokio::test]
async fn network_failure_maps_to_network_error() {
    let (api, http, _storage) = setup();
    http.go_offline();

    let err = api.get_projects().await.unwrap_err();
    assert!(matches!(err, ApiError::Network(_)));
}

#[tokio::test]
async fn malformed_body_maps_to_decode_error() {
    let (api, http, _storage) = setup();
    http.mock_response(HttpMethod::Get, &format!("{BASE}/projects"), 200, json!({"projects": 7}));

    let err = api.get_projects().await.unwrap_err();
    assert!(matches!(err, ApiError::Decode(_)));
}

#[tokio::test]
async fn project_list_decodes_and_tolerates_missing_key() {
    let (api, http, _storage) = setup();
    http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/projects"),
        200,
        json!({"projects": [project_json("p1", "open"), project_json("p2", "in_progress")]}),
    );
    let projects = api.get_projects().await.unwrap();
    assert_eq!(projects.len(), 2);
    assert_eq!(projects[1].status, ProjectStatus::InProgress);

    http.mock_response(HttpMethod::Get, &format!("{BASE}/projects"), 200, json!({}));
    assert!(api.get_projects().await.unwrap().is_empty());
}

#[tokio::test]
async fn login_posts_credentials() {
    let (api, http, _storage) = setup();
    http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/auth/login"),
        200,
        json!({
            "token": "fresh",
            "user": {"id": "u2", "email": "nonprofit@demo.com", "role": "nonprofit"}
        }),
    );

    let res = api.login("nonprofit@demo.com", "demo123").await.unwrap();
    assert_eq!(res.token, "fresh");
    assert_eq!(res.user.role, Role::Nonprofit);

    let body: serde_json::Value =
        serde_json::from_str(http.last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"email": "nonprofit@demo.com", "password": "demo123"}));
}

#[tokio::test]
async fn create_project_sends_requirements_and_deadline() {
    let (api, http, _storage) = setup();
    http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/projects"),
        201,
        json!({"project": project_json("p9", "open")}),
    );

    let request = CreateProjectRequest {
        title: "Literacy app".to_string(),
        description: "Reading games".to_string(),
        requirements: vec!["A".to_string(), "B".to_string(), "C".to_string()],
        deadline: Some(Timestamp::parse("2024-06-30").unwrap()),
    };
    let created = api.create_project(&request).await.unwrap();
    assert_eq!(created.id, "p9");

    let body: serde_json::Value =
        serde_json::from_str(http.last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body["requirements"], json!(["A", "B", "C"]));
    assert_eq!(body["deadline"], json!("2024-06-30T00:00:00.000Z"));
}

#[tokio::test]
async fn get_project_accepts_bare_payload() {
    let (api, http, _storage) = setup();
    http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/projects/p3"),
        200,
        project_json("p3", "completed"),
    );

    let project = api.get_project("p3").await.unwrap();
    assert_eq!(project.status, ProjectStatus::Completed);
}

#[tokio::test]
async fn send_message_posts_content_only() {
    let (api, http, _storage) = setup();
    http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/projects/p1/messages"),
        201,
        json!({"message": "Message sent"}),
    );

    api.send_message("p1", "hello team").await.unwrap();

    let body: serde_json::Value =
        serde_json::from_str(http.last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"content": "hello team"}));
}

#[tokio::test]
async fn demo_accounts_ack_ignores_extra_fields() {
    let (api, http, _storage) = setup();
    http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/demo/create-accounts"),
        200,
        json!({"message": "Demo accounts created", "accounts": 4}),
    );

    let ack = api.create_demo_accounts().await.unwrap();
    assert_eq!(ack.message.as_deref(), Some("Demo accounts created"));
    assert_eq!(http.last_request().unwrap().body.as_deref(), Some("{}"));
}

#[tokio::test]
async fn resource_search_uses_query_string() {
    let (api, http, _storage) = setup();
    http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/resources"),
        200,
        json!({"resources": [{"_id": "r1", "title": "Grant writing 101"}]}),
    );

    let found = api.get_resources("grant").await.unwrap();
    assert_eq!(found.len(), 1);
    assert_eq!(
        http.last_request().unwrap().query,
        vec![("search".to_string(), "grant".to_string())]
    );

    // 查询原样发送，不做裁剪
    api.get_resources(" grant writing ").await.unwrap();
    assert_eq!(
        http.last_request().unwrap().query,
        vec![("search".to_string(), " grant writing ".to_string())]
    );

    api.get_resources("").await.unwrap();
    assert!(http.last_request().unwrap().query.is_empty());
}

#[tokio::test]
async fn progress_endpoints_target_project_paths() {
    let (api, http, _storage) = setup();
    http.mock_response(
        HttpMethod::Get,
        &format!("{BASE}/projects/p1/milestones"),
        200,
        json!({"milestones": [{"_id": "m1", "title": "Kickoff", "completed": true}]}),
    );
    http.mock_response(
        HttpMethod::Post,
        &format!("{BASE}/projects/p1/progress-reports"),
        201,
        json!({"message": "created"}),
    );

    let milestones = api.get_milestones("p1").await.unwrap();
    assert!(milestones[0].completed);

    api.create_progress_report(
        "p1",
        NewProgressReport {
            content: "Finished wireframes".to_string(),
            milestone_id: Some("m1".to_string()),
        },
    )
    .await
    .unwrap();
    let body: serde_json::Value =
        serde_json::from_str(http.last_request().unwrap().body.as_deref().unwrap()).unwrap();
    assert_eq!(body, json!({"content": "Finished wireframes", "milestone_id": "m1"}));
}
