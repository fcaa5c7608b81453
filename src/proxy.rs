use axum::http::StatusCode;
use reqwest::Client;
use serde_json::Value;

use crate::config::CONFIG;
use crate::error::GatewayError;

/// Forwards JSON payloads to the backend service. Stateless apart from the
/// shared reqwest connection pool, so a single instance is shared across
/// all in-flight requests.
#[derive(Debug, Clone)]
pub struct BackendProxy {
    http: Client,
    base_url: String,
}

impl BackendProxy {
    pub fn new(base_url: impl Into<String>) -> Self {
        BackendProxy {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    /// Create a proxy pointed at the configured backend.
    pub fn from_config() -> Self {
        Self::new(CONFIG.backend_base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Single best-effort POST of `body`, verbatim, to the backend path.
    /// Mirrors the backend's status and JSON body on success; a non-2xx
    /// status becomes `GatewayError::Backend` carrying that same status.
    /// No retries, no timeout beyond the connection's own.
    pub async fn forward(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<(StatusCode, Value), GatewayError> {
        let url = format!("{}{}", self.base_url, path);
        log::info!("forwarding request to {url}");

        let response = self.http.post(&url).json(body).send().await?;

        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            // Mirror, don't validate: an unparseable success body degrades
            // to an empty object.
            let body =
                serde_json::from_str(&text).unwrap_or_else(|_| Value::Object(Default::default()));
            Ok((status, body))
        } else {
            log::warn!("backend returned {status} for {url}");
            Err(GatewayError::Backend {
                status,
                detail: error_detail(status, &text),
            })
        }
    }
}

/// Best human-readable detail for a backend failure: the backend's own
/// `detail` field when its body parses as JSON, else the raw body, else the
/// status' canonical reason.
fn error_detail(status: StatusCode, body: &str) -> String {
    if let Ok(Value::Object(map)) = serde_json::from_str::<Value>(body) {
        if let Some(Value::String(detail)) = map.get("detail") {
            return detail.clone();
        }
    }
    if !body.trim().is_empty() {
        return body.trim().to_string();
    }
    status
        .canonical_reason()
        .unwrap_or("Unknown error")
        .to_string()
}
