//! Handler tests for the tasks domain
//!
//! These exercise the tasks router on its own, backed by the in-memory
//! repository:
//! - request deserialization and validation
//! - response bodies and status codes
//! - error responses

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use domain_tasks::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

fn app() -> Router {
    handlers::router(TaskService::new(InMemoryTaskRepository::new()))
}

async fn json_body<T: serde::de::DeserializeOwned>(body: Body) -> T {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn empty_request(method: &str, uri: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .body(Body::empty())
        .unwrap()
}

async fn create(app: &Router, title: &str) -> Task {
    let response = app
        .clone()
        .oneshot(json_request("POST", "/", json!({ "title": title })))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    json_body(response.into_body()).await
}

#[tokio::test]
async fn test_create_task_returns_201() {
    let app = app();

    let response = app
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "title": "Write docs", "description": "for the API" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["title"], "Write docs");
    assert_eq!(body["description"], "for the API");
    assert_eq!(body["completed"], false);
    assert!(body["id"].is_string());
    assert!(body["created_at"].is_string());
    assert!(body["updated_at"].is_string());
}

#[tokio::test]
async fn test_create_task_can_start_completed() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "title": "Already done", "completed": true }),
        ))
        .await
        .unwrap();

    let task: Task = json_body(response.into_body()).await;
    assert!(task.completed);
}

#[tokio::test]
async fn test_create_task_without_title_is_422() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "completed": true })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_task_with_blank_title_is_422_with_details() {
    let response = app()
        .oneshot(json_request("POST", "/", json!({ "title": "   " })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "VALIDATION_ERROR");
    assert!(body["details"]["title"].is_array());
}

#[tokio::test]
async fn test_create_task_with_non_boolean_completed_is_422() {
    let response = app()
        .oneshot(json_request(
            "POST",
            "/",
            json!({ "title": "ok", "completed": "yes" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let request = Request::builder()
        .method("POST")
        .uri("/")
        .header("content-type", "application/json")
        .body(Body::from("{\"title\": "))
        .unwrap();

    let response = app().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_get_task_roundtrip_and_unknown_id() {
    let app = app();
    let task = create(&app, "Find me").await;

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", task.id)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let fetched: Task = json_body(response.into_body()).await;
    assert_eq!(fetched, task);

    let response = app
        .clone()
        .oneshot(empty_request("GET", &format!("/{}", uuid::Uuid::now_v7())))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["error"], "NOT_FOUND");
}

#[tokio::test]
async fn test_malformed_id_is_404() {
    let response = app()
        .oneshot(empty_request("GET", "/not-a-uuid"))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_put_and_patch_update_provided_fields() {
    let app = app();
    let task = create(&app, "Original").await;

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", task.id),
            json!({ "completed": true }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated: Task = json_body(response.into_body()).await;
    assert!(updated.completed);
    assert_eq!(updated.title, "Original");

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", task.id),
            json!({ "title": "Renamed" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let patched: Task = json_body(response.into_body()).await;
    assert_eq!(patched.title, "Renamed");
    assert!(patched.completed);
}

#[tokio::test]
async fn test_update_with_invalid_field_is_422() {
    let app = app();
    let task = create(&app, "Original").await;

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/{}", task.id),
            json!({ "title": "" }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_update_unknown_task_is_404() {
    let response = app()
        .oneshot(json_request(
            "PUT",
            &format!("/{}", uuid::Uuid::now_v7()),
            json!({ "completed": true }),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_returns_204_then_404() {
    let app = app();
    let task = create(&app, "Short-lived").await;
    let uri = format!("/{}", task.id);

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert!(bytes.is_empty());

    let response = app
        .clone()
        .oneshot(empty_request("DELETE", &uri))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app.oneshot(empty_request("GET", &uri)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_returns_paged_body() {
    let app = app();
    for i in 0..12 {
        create(&app, &format!("task {}", i)).await;
    }

    let response = app
        .clone()
        .oneshot(empty_request("GET", "/?page=2"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["current_page"], 2);
    assert_eq!(body["per_page"], 10);
    assert_eq!(body["total"], 12);
    assert_eq!(body["last_page"], 2);
    assert_eq!(body["from"], 11);
    assert_eq!(body["to"], 12);
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["title"], "task 10");
}

#[tokio::test]
async fn test_list_empty_store() {
    let response = app().oneshot(empty_request("GET", "/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(body["data"], json!([]));
    assert_eq!(body["total"], 0);
    assert_eq!(body["last_page"], 1);
    assert_eq!(body["from"], Value::Null);
    assert_eq!(body["to"], Value::Null);
}

#[tokio::test]
async fn test_list_treats_page_below_one_as_first_page() {
    let app = app();
    create(&app, "only").await;

    let response = app
        .oneshot(empty_request("GET", "/?page=0&per_page=5"))
        .await
        .unwrap();

    let page: Page<Task> = json_body(response.into_body()).await;
    assert_eq!(page.current_page, 1);
    assert_eq!(page.per_page, 5);
    assert_eq!(page.data.len(), 1);
}

#[tokio::test]
async fn test_list_falls_back_to_defaults_for_non_integer_paging() {
    let app = app();
    create(&app, "only").await;

    for uri in ["/?page=abc", "/?page=", "/?page=1.5", "/?page=2x&per_page=lots"] {
        let response = app.clone().oneshot(empty_request("GET", uri)).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "GET {}", uri);

        let page: Page<Task> = json_body(response.into_body()).await;
        assert_eq!(page.current_page, 1, "GET {}", uri);
        assert_eq!(page.per_page, 10, "GET {}", uri);
        assert_eq!(page.data.len(), 1, "GET {}", uri);
    }
}

#[tokio::test]
async fn test_stats_uses_camel_case_keys() {
    let app = app();
    let task = create(&app, "one").await;
    create(&app, "two").await;

    app.clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/{}", task.id),
            json!({ "completed": true }),
        ))
        .await
        .unwrap();

    let response = app.oneshot(empty_request("GET", "/stats")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body: Value = json_body(response.into_body()).await;
    assert_eq!(
        body,
        json!({ "totalTasks": 2, "completedTasks": 1, "pendingTasks": 1 })
    );
}
