//! OpenAI-compatible model client.
//!
//! Sends the whole prompt as one user message to
//! `POST {base_url}/chat/completions` and returns the first choice's text.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

pub mod types;

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use lingo_core::llm::client::ModelClient;
use lingo_types::config::LlmConfig;
use lingo_types::error::LlmError;

use self::types::{ChatCompletionMessage, ChatCompletionRequest, ChatCompletionResponse};

/// Client for any OpenAI-compatible chat-completions endpoint.
///
/// Constructed once at startup and shared by all requests; `reqwest::Client`
/// pools connections internally.
///
/// Does NOT derive Debug so the API key cannot leak through formatting.
pub struct OpenAiCompatClient {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
    max_tokens: u32,
    temperature: f32,
}

impl OpenAiCompatClient {
    /// Connect timeout for the backend. The overall call is bounded by the
    /// dispatcher, not here.
    const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Create a client from the `[llm]` config section.
    pub fn new(config: &LlmConfig, api_key: Option<SecretString>) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .connect_timeout(Self::CONNECT_TIMEOUT)
            .build()
            .map_err(|e| LlmError::Provider {
                message: format!("failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            client,
            api_key,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
            temperature: config.temperature,
        })
    }

    fn url(&self) -> String {
        format!("{}/chat/completions", self.base_url)
    }

    fn to_request(&self, prompt: &str) -> ChatCompletionRequest {
        ChatCompletionRequest {
            model: self.model.clone(),
            messages: vec![ChatCompletionMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            max_tokens: self.max_tokens,
            temperature: self.temperature,
        }
    }
}

impl ModelClient for OpenAiCompatClient {
    fn name(&self) -> &str {
        &self.model
    }

    async fn send_prompt(&self, prompt: &str) -> Result<String, LlmError> {
        let body = self.to_request(prompt);
        debug!(model = %self.model, prompt_chars = prompt.chars().count(), "Sending prompt");

        let mut request = self.client.post(self.url()).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key.expose_secret());
        }

        let response = request.send().await.map_err(|e| LlmError::Provider {
            message: format!("HTTP request failed: {e}"),
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(match status.as_u16() {
                401 | 403 => LlmError::AuthenticationFailed,
                _ => LlmError::Provider {
                    message: format!("HTTP {status}: {error_body}"),
                },
            });
        }

        let parsed: ChatCompletionResponse = response.json().await.map_err(|e| {
            LlmError::Deserialization(format!("failed to parse response: {e}"))
        })?;

        let choice = parsed.choices.into_iter().next().ok_or(LlmError::EmptyChoices)?;
        let content = choice.message.content.unwrap_or_default();

        debug!(model = %self.model, response_chars = content.chars().count(), "Received reply");
        Ok(content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::State;
    use axum::http::{HeaderMap, StatusCode};
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::{json, Value};
    use std::sync::{Arc, Mutex};

    #[derive(Clone)]
    struct StubBackend {
        status: StatusCode,
        body: Value,
        seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
    }

    async fn completions(
        State(stub): State<StubBackend>,
        headers: HeaderMap,
        Json(request): Json<Value>,
    ) -> (StatusCode, Json<Value>) {
        let auth = headers
            .get("authorization")
            .and_then(|v| v.to_str().ok())
            .map(str::to_string);
        stub.seen.lock().unwrap().push((auth, request));
        (stub.status, Json(stub.body.clone()))
    }

    /// Serve the stub on an ephemeral port; returns its `/v1` base URL.
    async fn spawn_backend(stub: StubBackend) -> String {
        let app = Router::new()
            .route("/v1/chat/completions", post(completions))
            .with_state(stub);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}/v1")
    }

    fn stub(status: StatusCode, body: Value) -> StubBackend {
        StubBackend {
            status,
            body,
            seen: Arc::new(Mutex::new(Vec::new())),
        }
    }

    fn client_for(base_url: String, api_key: Option<&str>) -> OpenAiCompatClient {
        let config = LlmConfig {
            base_url,
            model: "test-model".to_string(),
            ..Default::default()
        };
        OpenAiCompatClient::new(&config, api_key.map(|k| SecretString::from(k.to_string())))
            .unwrap()
    }

    #[tokio::test]
    async fn test_send_prompt_returns_first_choice() {
        let backend = stub(
            StatusCode::OK,
            json!({ "choices": [{ "message": { "role": "assistant", "content": "Hello!" } }] }),
        );
        let seen = Arc::clone(&backend.seen);
        let client = client_for(spawn_backend(backend).await, Some("sk-test"));

        let reply = client.send_prompt("Say hello").await.unwrap();
        assert_eq!(reply, "Hello!");

        let seen = seen.lock().unwrap();
        let (auth, request) = &seen[0];
        assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
        assert_eq!(request["model"], "test-model");
        assert_eq!(request["messages"][0]["role"], "user");
        assert_eq!(request["messages"][0]["content"], "Say hello");
        assert_eq!(request["max_tokens"], 512);
    }

    #[tokio::test]
    async fn test_no_api_key_sends_no_auth_header() {
        let backend = stub(
            StatusCode::OK,
            json!({ "choices": [{ "message": { "content": "ok" } }] }),
        );
        let seen = Arc::clone(&backend.seen);
        let client = client_for(spawn_backend(backend).await, None);

        client.send_prompt("hi").await.unwrap();
        assert!(seen.lock().unwrap()[0].0.is_none());
    }

    #[tokio::test]
    async fn test_null_content_is_empty_reply() {
        let backend = stub(
            StatusCode::OK,
            json!({ "choices": [{ "message": { "content": null } }] }),
        );
        let client = client_for(spawn_backend(backend).await, None);

        assert_eq!(client.send_prompt("hi").await.unwrap(), "");
    }

    #[tokio::test]
    async fn test_empty_choices_is_error() {
        let backend = stub(StatusCode::OK, json!({ "choices": [] }));
        let client = client_for(spawn_backend(backend).await, None);

        let err = client.send_prompt("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::EmptyChoices));
    }

    #[tokio::test]
    async fn test_unauthorized_maps_to_auth_failed() {
        let backend = stub(StatusCode::UNAUTHORIZED, json!({ "error": "bad key" }));
        let client = client_for(spawn_backend(backend).await, Some("sk-wrong"));

        let err = client.send_prompt("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::AuthenticationFailed));
    }

    #[tokio::test]
    async fn test_server_error_carries_body() {
        let backend = stub(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({ "error": "model not loaded" }),
        );
        let client = client_for(spawn_backend(backend).await, None);

        let err = client.send_prompt("hi").await.unwrap_err();
        let message = err.to_string();
        assert!(message.contains("500"));
        assert!(message.contains("model not loaded"));
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_provider_error() {
        // Bind then drop to get a port with nothing listening.
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);

        let client = client_for(format!("http://{addr}/v1"), None);
        let err = client.send_prompt("hi").await.unwrap_err();
        assert!(matches!(err, LlmError::Provider { .. }));
    }

    #[test]
    fn test_trailing_slash_trimmed() {
        let client = client_for("http://localhost:8081/v1/".to_string(), None);
        assert_eq!(client.url(), "http://localhost:8081/v1/chat/completions");
    }
}
