use axum::{
    Json,
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode, header},
    response::{IntoResponse, Response},
};
use chrono::Utc;
use serde_json::{Value, json};
use std::sync::Arc;

use crate::error::GatewayError;
use crate::proxy::BackendProxy;

use super::models::HealthResponse;

pub async fn subscriptions_handler(
    State(proxy): State<Arc<BackendProxy>>,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    forward(&proxy, "/api/v1/subscriptions", &body).await
}

pub async fn process_text_handler(
    State(proxy): State<Arc<BackendProxy>>,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    forward(&proxy, "/api/v1/process-text", &body).await
}

pub async fn search_handler(
    State(proxy): State<Arc<BackendProxy>>,
    Json(body): Json<Value>,
) -> Result<Response, GatewayError> {
    forward(&proxy, "/api/v1/search", &body).await
}

async fn forward(
    proxy: &BackendProxy,
    path: &str,
    body: &Value,
) -> Result<Response, GatewayError> {
    let (status, body) = proxy.forward(path, body).await?;
    Ok((status, Json(body)).into_response())
}

/// Unconditional 200 for plain OPTIONS requests, with permissive CORS
/// headers matching the router's layer.
pub async fn preflight_handler() -> Response {
    let mut headers = HeaderMap::new();
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_ORIGIN,
        HeaderValue::from_static("*"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_METHODS,
        HeaderValue::from_static("GET, POST, PUT, DELETE, OPTIONS"),
    );
    headers.insert(
        header::ACCESS_CONTROL_ALLOW_HEADERS,
        HeaderValue::from_static("Content-Type, Authorization"),
    );
    (StatusCode::OK, headers).into_response()
}

pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        message: "relay is running".to_string(),
        timestamp: Utc::now().to_rfc3339(),
    })
}

pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "relay is running" }))
}
