//! Integration tests for the HTTP surface.
//!
//! Full request/response cycle for each endpoint against an in-memory
//! backend and store.

use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use emp_cache::api::{create_router, AppState};
use emp_cache::backend::InMemoryBackend;
use emp_cache::model::{Department, Employee};
use emp_cache::policy::CachePolicy;
use emp_cache::service::{DeptService, EmployeeService};
use emp_cache::store::{EmployeeStore, InMemoryDepartmentStore, InMemoryEmployeeStore};
use serde_json::Value;
use tower::ServiceExt;

// == Helper Functions ==

async fn create_test_app() -> Router {
    let backend = InMemoryBackend::new();
    let emp_store = InMemoryEmployeeStore::new();
    let dept_store = InMemoryDepartmentStore::new();

    emp_store
        .insert(Employee {
            id: 1001,
            last_name: "Zhang".to_string(),
            email: "z@x.com".to_string(),
            gender: 1,
            department_id: 1,
        })
        .await
        .unwrap();
    dept_store.insert(Department {
        id: 1,
        name: "engineering".to_string(),
    });

    let state = AppState::new(
        EmployeeService::new(CachePolicy::new(backend.clone(), emp_store)),
        DeptService::new(backend, dept_store),
    );
    create_router(state)
}

async fn get(app: Router, uri: &str) -> (StatusCode, Vec<u8>) {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();

    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    (status, bytes.to_vec())
}

fn as_json(bytes: &[u8]) -> Value {
    serde_json::from_slice(bytes).unwrap()
}

// == GET /emp/{id} ==

#[tokio::test]
async fn test_get_employee_by_id() {
    let app = create_test_app().await;

    let (status, body) = get(app, "/emp/1001").await;
    assert_eq!(status, StatusCode::OK);

    let json = as_json(&body);
    assert_eq!(json["id"], 1001);
    assert_eq!(json["lastName"], "Zhang");
    assert_eq!(json["email"], "z@x.com");
    assert_eq!(json["dId"], 1);
}

#[tokio::test]
async fn test_get_employee_not_found() {
    let app = create_test_app().await;

    let (status, body) = get(app, "/emp/9999").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

#[tokio::test]
async fn test_get_employee_bad_id() {
    let app = create_test_app().await;

    let (status, _) = get(app, "/emp/notanumber").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == GET /emp (update) ==

#[tokio::test]
async fn test_update_employee() {
    let app = create_test_app().await;

    let (status, body) = get(
        app.clone(),
        "/emp?id=1001&lastName=Li&email=z@x.com&gender=1&dId=1",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["lastName"], "Li");

    // The read path now sees the updated row
    let (status, body) = get(app, "/emp/1001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["lastName"], "Li");
}

#[tokio::test]
async fn test_update_with_missing_fields_is_rejected() {
    let app = create_test_app().await;

    let (status, _) = get(app, "/emp?id=1001").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// == GET /delemp ==

#[tokio::test]
async fn test_delete_employee_returns_success_literal() {
    let app = create_test_app().await;

    let (status, body) = get(app.clone(), "/delemp?id=1001").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"success");

    let (status, _) = get(app, "/emp/1001").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_absent_employee_still_succeeds() {
    let app = create_test_app().await;

    let (status, body) = get(app, "/delemp?id=4242").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"success");
}

// == GET /emp/lastName/{lastName} ==

#[tokio::test]
async fn test_get_employee_by_last_name() {
    let app = create_test_app().await;

    let (status, body) = get(app, "/emp/lastName/Zhang").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["id"], 1001);
}

#[tokio::test]
async fn test_get_employee_by_last_name_not_found() {
    let app = create_test_app().await;

    let (status, body) = get(app, "/emp/lastName/Nobody").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert!(body.is_empty());
}

// == GET /dept/{id} ==

#[tokio::test]
async fn test_get_department() {
    let app = create_test_app().await;

    let (status, body) = get(app, "/dept/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(as_json(&body)["name"], "engineering");
}

// == GET /health ==

#[tokio::test]
async fn test_health() {
    let app = create_test_app().await;

    let (status, body) = get(app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, b"OK");
}
