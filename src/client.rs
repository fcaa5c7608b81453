use anyhow::{Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};

#[derive(Debug, Serialize, Deserialize)]
pub struct TextProcessRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct TextProcessResponse {
    pub result: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct SearchResponse {
    pub result: String,
}

/// Typed client for the gateway's API routes. Holds no per-call state, so
/// one instance can be shared freely.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        ApiClient {
            http: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub async fn process_text(&self, request: &TextProcessRequest) -> Result<TextProcessResponse> {
        self.post_json("/api/v1/process-text", request).await
    }

    pub async fn search(&self, request: &SearchRequest) -> Result<SearchResponse> {
        self.post_json("/api/v1/search", request).await
    }

    async fn post_json<Req, Resp>(&self, path: &str, request: &Req) -> Result<Resp>
    where
        Req: Serialize,
        Resp: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);

        let response = self
            .http
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(|e| anyhow!("Request failed: {e}"))?;

        if !response.status().is_success() {
            return Err(anyhow!(
                "Request failed with status {}",
                response.status().as_u16()
            ));
        }

        // Body is trusted to match the response envelope; no schema check.
        response
            .json::<Resp>()
            .await
            .map_err(|e| anyhow!("Request failed: {e}"))
    }
}
