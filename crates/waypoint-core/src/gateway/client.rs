//! HTTP client for the generative text endpoint.

use std::time::Duration;

use super::GatewayError;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Thin client for a `generateContent`-style text completion endpoint.
///
/// The provider is treated as an opaque prompt-in, text-out service; all
/// retry and fallback policy lives in the gateway, not here. Cloning is
/// cheap (the underlying connection pool is shared).
#[derive(Debug, Clone)]
pub struct ModelClient {
    http: reqwest::Client,
    base_url: String,
    model: String,
}

impl ModelClient {
    /// Create a client for the default endpoint and model.
    pub fn new() -> Self {
        Self::with_model(DEFAULT_MODEL)
    }

    /// Create a client for a specific model name.
    pub fn with_model(model: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::builder()
                .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .unwrap_or_default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            model: model.into(),
        }
    }

    /// Override the endpoint base URL (primarily for test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// The configured model name.
    pub fn model(&self) -> &str {
        &self.model
    }

    /// Send `prompt` to the model and return its raw response text.
    pub async fn generate(&self, api_key: &str, prompt: &str) -> Result<String, GatewayError> {
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url.trim_end_matches('/'),
            self.model,
            api_key
        );

        let payload = serde_json::json!({
            "contents": [
                { "parts": [ { "text": prompt } ] }
            ]
        });

        let response = self.http.post(&url).json(&payload).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(GatewayError::Upstream {
                status: status.as_u16(),
                message,
            });
        }

        let json: serde_json::Value = response.json().await?;
        json.get("candidates")
            .and_then(serde_json::Value::as_array)
            .and_then(|arr| arr.first())
            .and_then(|v| v.get("content"))
            .and_then(|v| v.get("parts"))
            .and_then(serde_json::Value::as_array)
            .and_then(|parts| parts.first())
            .and_then(|v| v.get("text"))
            .and_then(serde_json::Value::as_str)
            .map(String::from)
            .ok_or_else(|| {
                GatewayError::Malformed("response missing candidate text content".to_string())
            })
    }
}

impl Default for ModelClient {
    fn default() -> Self {
        Self::new()
    }
}
