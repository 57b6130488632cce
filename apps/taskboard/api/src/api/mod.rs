use axum::{Router, routing::get};
use axum_helpers::{create_router, health_router};

pub mod health;
pub mod tasks;
pub mod user;

use crate::{frontend, openapi::ApiDoc, state::AppState};

/// API routes without the `/api` prefix; every sub-router has its state applied
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .nest("/tasks", tasks::router(state))
        .nest("/user", user::router(state))
}

/// `GET /ready` with the real dependency checks
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// The complete application: `/api`, the frontend, probes and docs
pub fn app(state: &AppState) -> eyre::Result<Router> {
    let site = frontend::router(&state.config.app_url)?
        .merge(health_router(state.config.app))
        .merge(ready_router(state.clone()));

    Ok(create_router::<ApiDoc>(
        routes(state),
        site,
        state.config.allowed_origins.clone(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Config, Environment};
    use axum::{
        body::Body,
        http::{Request, StatusCode, header},
        response::Response,
    };
    use axum_helpers::{ACCESS_TOKEN_TTL, JwtConfig};
    use core_config::{app_info, server::ServerConfig};
    use http_body_util::BodyExt;
    use serde_json::{Value, json};
    use tower::ServiceExt;

    fn test_state(app_url: &str) -> AppState {
        let config = Config {
            app: app_info!(),
            environment: Environment::Development,
            server: ServerConfig::default(),
            database: None,
            app_url: app_url.to_string(),
            allowed_origins: vec![axum::http::HeaderValue::from_static("http://localhost:8080")],
            jwt: JwtConfig::new("api-test-secret-0123456789abcdefghij").unwrap(),
        };
        AppState::new(config, None)
    }

    async fn send(app: &Router, request: Request<Body>) -> Response {
        app.clone().oneshot(request).await.unwrap()
    }

    async fn body_json(response: Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_user_requires_token() {
        let app = app(&test_state("http://localhost:8080")).unwrap();

        let response = send(&app, get("/api/user")).await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["error"], "UNAUTHORIZED");
    }

    #[tokio::test]
    async fn test_user_rejects_garbage_token() {
        let app = app(&test_state("http://localhost:8080")).unwrap();

        let request = Request::builder()
            .uri("/api/user")
            .header(header::AUTHORIZATION, "Bearer not-a-jwt")
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, request).await.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_user_returns_identity_from_token() {
        let state = test_state("http://localhost:8080");
        let token = state
            .jwt
            .issue_token("user-7", "ada@example.com", "Ada", ACCESS_TOKEN_TTL)
            .unwrap();
        let app = app(&state).unwrap();

        let request = Request::builder()
            .uri("/api/user")
            .header(header::AUTHORIZATION, format!("Bearer {}", token))
            .body(Body::empty())
            .unwrap();
        let response = send(&app, request).await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            body_json(response).await,
            json!({ "id": "user-7", "email": "ada@example.com", "name": "Ada" })
        );
    }

    #[tokio::test]
    async fn test_user_accepts_cookie_token() {
        let state = test_state("http://localhost:8080");
        let token = state
            .jwt
            .issue_token("user-8", "bob@example.com", "Bob", ACCESS_TOKEN_TTL)
            .unwrap();
        let app = app(&state).unwrap();

        let request = Request::builder()
            .uri("/api/user")
            .header(header::COOKIE, format!("theme=dark; access_token={}", token))
            .body(Body::empty())
            .unwrap();
        assert_eq!(send(&app, request).await.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_task_lifecycle_under_api_prefix() {
        let app = app(&test_state("http://localhost:8080")).unwrap();

        let create = Request::builder()
            .method("POST")
            .uri("/api/tasks")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"title":"Water plants"}"#))
            .unwrap();
        let response = send(&app, create).await;
        assert_eq!(response.status(), StatusCode::CREATED);
        let task = body_json(response).await;
        assert_eq!(task["title"], "Water plants");
        assert_eq!(task["completed"], false);

        let list = body_json(send(&app, get("/api/tasks")).await).await;
        assert_eq!(list["total"], 1);
        assert_eq!(list["data"][0]["id"], task["id"]);

        let stats = body_json(send(&app, get("/api/tasks/stats")).await).await;
        assert_eq!(
            stats,
            json!({ "totalTasks": 1, "completedTasks": 0, "pendingTasks": 1 })
        );
    }

    #[tokio::test]
    async fn test_probes_and_docs() {
        let app = app(&test_state("http://localhost:8080")).unwrap();

        let health = send(&app, get("/health")).await;
        assert_eq!(health.status(), StatusCode::OK);
        assert_eq!(body_json(health).await["name"], "taskboard_api");

        let ready = send(&app, get("/ready")).await;
        assert_eq!(ready.status(), StatusCode::OK);
        assert_eq!(body_json(ready).await["status"], "ready");

        let docs = body_json(send(&app, get("/api-docs/openapi.json")).await).await;
        assert!(docs["paths"]["/tasks/stats"].is_object());
        assert!(docs["paths"]["/user"].is_object());
        assert!(docs["components"]["securitySchemes"]["bearer_auth"].is_object());
    }

    #[tokio::test]
    async fn test_frontend_carries_app_url() {
        let app = app(&test_state("https://tasks.example.com")).unwrap();

        let response = send(&app, get("/")).await;
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let html = String::from_utf8(bytes.to_vec()).unwrap();
        assert!(html.contains(r#"window.APP_URL = "https://tasks.example.com";"#));
    }
}
