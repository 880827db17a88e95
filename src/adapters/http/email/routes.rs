//! Route configuration for email endpoints.

use axum::http::Method;
use axum::routing::post;
use axum::Router;

use crate::adapters::http::cors::{preflight, CorsPolicy};
use crate::adapters::http::state::AppState;

use super::handlers::{save_email, subscribe_email};

/// Creates the email router, mounted at `/api/email`.
pub fn email_router(cors: &CorsPolicy) -> Router<AppState> {
    let routes = Router::new()
        .route("/subscribe", post(subscribe_email).options(preflight))
        .route("/simple-save", post(save_email).options(preflight))
        .layer(cors.layer(&[Method::POST, Method::OPTIONS]));

    Router::new().nest("/api/email", routes)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::analysis::FailoverAnalyzer;
    use crate::adapters::memory::{InMemoryEngagementStore, StoreWrite};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::Arc;
    use tower::ServiceExt;

    fn app(store: &InMemoryEngagementStore) -> Router {
        let repo = Arc::new(store.clone());
        let state = AppState::new(
            Arc::new(FailoverAnalyzer::fallback_only()),
            repo.clone(),
            repo.clone(),
            repo,
        );
        email_router(&CorsPolicy::any()).with_state(state)
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn subscribe_returns_subscriber_id() {
        let store = InMemoryEngagementStore::new();

        let response = app(&store)
            .oneshot(post_json(
                "/api/email/subscribe",
                json!({"email": "fan@example.com", "mbti_type": "ENTP", "source": "results_page"}),
            ))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Successfully subscribed to updates");
        assert!(body["subscriber_id"].is_string());
        assert_eq!(store.event_count().await, 1);
    }

    #[tokio::test]
    async fn subscribe_requires_valid_email() {
        let store = InMemoryEngagementStore::new();

        let response = app(&store)
            .oneshot(post_json("/api/email/subscribe", json!({"mbti_type": "ENTP"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["message"], "Valid email address is required");
    }

    #[tokio::test]
    async fn subscribe_succeeds_when_storage_is_down() {
        let store = InMemoryEngagementStore::new();
        store.fail_on(StoreWrite::SubscriberUpsert).await;
        store.fail_on(StoreWrite::SubscriberInsert).await;
        store.fail_on(StoreWrite::EventInsert).await;

        let response = app(&store)
            .oneshot(post_json("/api/email/subscribe", json!({"email": "fan@example.com"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["success"], true);
        assert!(body.get("subscriber_id").is_none());
    }

    #[tokio::test]
    async fn simple_save_succeeds_when_storage_is_down() {
        let store = InMemoryEngagementStore::new();
        store.fail_on(StoreWrite::SubscriberInsert).await;

        let response = app(&store)
            .oneshot(post_json("/api/email/simple-save", json!({"email": "fan@example.com"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["message"], "Email saved successfully");
    }

    #[tokio::test]
    async fn simple_save_rejects_bad_email() {
        let store = InMemoryEngagementStore::new();

        let response = app(&store)
            .oneshot(post_json("/api/email/simple-save", json!({"email": "a b@c.d"})))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn preflight_advertises_post() {
        let store = InMemoryEngagementStore::new();
        let request = Request::builder()
            .method("OPTIONS")
            .uri("/api/email/simple-save")
            .header("origin", "https://app.example.com")
            .header("access-control-request-method", "POST")
            .body(Body::empty())
            .unwrap();

        let response = app(&store).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .get("access-control-allow-methods")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|m| m.contains("POST")));
    }
}
