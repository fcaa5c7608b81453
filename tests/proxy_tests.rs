use axum::{
    Json, Router,
    body::Body,
    http::{Request, StatusCode, header},
    routing::post,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use tower::ServiceExt;

use relay::api::create_router;
use relay::proxy::BackendProxy;

mod test_helpers {
    use super::*;

    /// Serve `router` on an ephemeral port and return its base URL.
    pub async fn spawn_backend(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    pub fn gateway_for(backend_url: &str) -> Router {
        create_router(Arc::new(BackendProxy::new(backend_url)))
    }

    pub fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    pub async fn body_json(response: axum::response::Response) -> Value {
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&bytes).unwrap()
    }
}

use test_helpers::*;

#[tokio::test]
async fn forwards_body_and_mirrors_success_response() {
    let backend = Router::new().route(
        "/api/v1/subscriptions",
        post(|Json(body): Json<Value>| async move {
            Json(json!({ "status": "subscribed", "received": body }))
        }),
    );
    let backend_url = spawn_backend(backend).await;
    let gateway = gateway_for(&backend_url);

    let payload = json!({ "email": "user@example.com", "query": "rust news" });
    let response = gateway
        .oneshot(post_json("/api/v1/subscriptions", &payload))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "subscribed");
    assert_eq!(body["received"], payload);
}

#[tokio::test]
async fn mirrors_backend_error_status_and_detail() {
    let backend = Router::new().route(
        "/api/v1/search",
        post(|| async {
            (
                StatusCode::BAD_REQUEST,
                Json(json!({ "detail": "Search query cannot be empty" })),
            )
        }),
    );
    let backend_url = spawn_backend(backend).await;
    let gateway = gateway_for(&backend_url);

    let response = gateway
        .oneshot(post_json("/api/v1/search", &json!({ "query": "" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Search query cannot be empty");
    assert!(body["error"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn plain_text_error_body_becomes_detail() {
    let backend = Router::new().route(
        "/api/v1/process-text",
        post(|| async { (StatusCode::UNPROCESSABLE_ENTITY, "unprocessable") }),
    );
    let backend_url = spawn_backend(backend).await;
    let gateway = gateway_for(&backend_url);

    let response = gateway
        .oneshot(post_json("/api/v1/process-text", &json!({ "text": "hi" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "unprocessable");
}

#[tokio::test]
async fn empty_error_body_falls_back_to_status_reason() {
    let backend = Router::new().route(
        "/api/v1/subscriptions",
        post(|| async { StatusCode::SERVICE_UNAVAILABLE }),
    );
    let backend_url = spawn_backend(backend).await;
    let gateway = gateway_for(&backend_url);

    let response = gateway
        .oneshot(post_json("/api/v1/subscriptions", &json!({})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = body_json(response).await;
    assert_eq!(body["detail"], "Service Unavailable");
}

#[tokio::test]
async fn unreachable_backend_returns_500_with_detail() {
    // Nothing listens on port 1.
    let gateway = gateway_for("http://127.0.0.1:1");

    let response = gateway
        .oneshot(post_json("/api/v1/subscriptions", &json!({ "query": "x" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body = body_json(response).await;
    assert!(body["error"].as_str().is_some_and(|s| !s.is_empty()));
    assert!(body["detail"].as_str().is_some_and(|s| !s.is_empty()));
}

#[tokio::test]
async fn process_text_route_mirrors_backend_result() {
    let backend = Router::new().route(
        "/api/v1/process-text",
        post(|| async { Json(json!({ "result": "!!! hello !!!" })) }),
    );
    let backend_url = spawn_backend(backend).await;
    let gateway = gateway_for(&backend_url);

    let response = gateway
        .oneshot(post_json("/api/v1/process-text", &json!({ "text": "hello" })))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["result"], "!!! hello !!!");
}

#[tokio::test]
async fn preflight_returns_permissive_cors_headers() {
    let gateway = gateway_for("http://127.0.0.1:1");

    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/v1/subscriptions")
        .body(Body::empty())
        .unwrap();
    let response = gateway.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let headers = response.headers();
    assert_eq!(
        headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
        "*"
    );
    let methods = headers
        .get(header::ACCESS_CONTROL_ALLOW_METHODS)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(methods.contains("POST"));
    assert!(methods.contains("OPTIONS"));
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let gateway = gateway_for("http://127.0.0.1:1");

    let request = Request::builder()
        .method("GET")
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let response = gateway.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body["timestamp"].as_str().is_some_and(|s| !s.is_empty()));
}
