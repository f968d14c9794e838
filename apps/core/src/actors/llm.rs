use crate::actors::messages::{ActorError, AppError, CompletionRequest, LlmMessage};
use crate::actors::traits::LlmActor;
use crate::config::LlmConfig;
use async_trait::async_trait;
use reqwest::Client;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};
use tokio::time::timeout;
use tracing::{debug, info, warn};
use url::Url;

/// Upper bound on reply length requested from the model
const MAX_REPLY_TOKENS: u32 = 400;
/// Extra time the handle waits beyond the HTTP timeout before giving up on the actor
const HANDLE_GRACE: Duration = Duration::from_secs(5);

/// A handle to the `LlmActor`.
///
/// This struct provides a public, cloneable interface for sending messages to the
/// running LLM actor. It abstracts away the `mpsc::Sender`.
#[derive(Clone)]
pub struct LlmActorHandle {
    sender: mpsc::Sender<LlmMessage>,
    request_timeout: Duration,
}

impl LlmActorHandle {
    /// Creates a new `LlmActor` and returns a handle to it.
    ///
    /// This will spawn the `LlmActorRunner` in a new Tokio task.
    pub fn new(config: LlmConfig) -> Self {
        let (sender, receiver) = mpsc::channel(32);
        let request_timeout = Duration::from_secs(config.timeout_secs);
        let actor = LlmActorRunner::new(receiver, config);
        tokio::spawn(async move { actor.run().await });
        Self {
            sender,
            request_timeout,
        }
    }
}

#[async_trait]
impl LlmActor for LlmActorHandle {
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError> {
        let (send, recv) = oneshot::channel();
        let msg = LlmMessage::Complete {
            request,
            responder: send,
        };

        self.sender
            .send(msg)
            .await
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?;
        timeout(self.request_timeout + HANDLE_GRACE, recv)
            .await?
            .map_err(|e| AppError::Actor(ActorError::Internal(e.to_string())))?
    }
}

// --- Actor Runner (Internal Logic) ---
struct LlmActorRunner {
    receiver: mpsc::Receiver<LlmMessage>,
    client: Client,
    config: LlmConfig,
}

impl LlmActorRunner {
    fn new(receiver: mpsc::Receiver<LlmMessage>, config: LlmConfig) -> Self {
        if config.api_key.is_none() {
            warn!("LLM_API_KEY is not set; chat replies will use local supportive messages");
        }

        Self {
            receiver,
            client: Client::new(),
            config,
        }
    }

    async fn run(mut self) {
        info!("LlmActor started (model: {}, endpoint: {})", self.config.model, self.config.base_url);

        while let Some(msg) = self.receiver.recv().await {
            self.handle_message(msg).await;
        }

        info!("LlmActor stopped");
    }

    async fn handle_message(&mut self, msg: LlmMessage) {
        match msg {
            LlmMessage::Complete { request, responder } => {
                let result = self.chat_completion(request).await;
                let _ = responder.send(result);
            }
        }
    }

    /// `{base_url}/chat/completions`, keeping any path prefix such as `/v1`.
    fn endpoint(&self) -> Result<Url, AppError> {
        let base = Url::parse(&format!("{}/", self.config.base_url.trim_end_matches('/')))?;
        Ok(base.join("chat/completions")?)
    }

    async fn chat_completion(&self, request: CompletionRequest) -> Result<String, AppError> {
        let api_key = self.config.api_key.as_deref().ok_or_else(|| {
            AppError::Actor(ActorError::NotConfigured("LLM_API_KEY is not set".to_string()))
        })?;
        let endpoint = self.endpoint()?;

        let temperature = request.temperature.unwrap_or(self.config.temperature);
        let payload = serde_json::json!({
            "model": self.config.model,
            "messages": request.messages(),
            "temperature": temperature,
            "max_tokens": MAX_REPLY_TOKENS,
        });

        debug!("Sending chat completion with {} history turns", request.history.len());

        let request_future = self
            .client
            .post(endpoint)
            .bearer_auth(api_key)
            .json(&payload)
            .send();

        let res = timeout(Duration::from_secs(self.config.timeout_secs), request_future)
            .await
            .map_err(ActorError::from)??;

        let status = res.status();

        if !status.is_success() {
            let body = res.text().await.unwrap_or_default();
            return Err(AppError::Actor(ActorError::LlmError(format!(
                "Completion request failed with status {}: {}",
                status, body
            ))));
        }

        let json: serde_json::Value = res
            .json()
            .await
            .map_err(|e| AppError::Actor(ActorError::LlmError(e.to_string())))?;

        let content = json["choices"][0]["message"]["content"]
            .as_str()
            .map(str::trim)
            .unwrap_or("");

        if content.is_empty() {
            return Err(AppError::Actor(ActorError::LlmError(
                "Completion response contained no text".to_string(),
            )));
        }

        Ok(content.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::actors::messages::ChatTurn;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(base_url: String, api_key: Option<&str>) -> LlmConfig {
        LlmConfig {
            base_url,
            api_key: api_key.map(str::to_string),
            model: "test-model".to_string(),
            temperature: 0.5,
            timeout_secs: 5,
        }
    }

    fn request(message: &str) -> CompletionRequest {
        CompletionRequest {
            system_prompt: "You are supportive.".to_string(),
            history: vec![ChatTurn::user("earlier"), ChatTurn::assistant("reply")],
            user_message: message.to_string(),
            temperature: None,
        }
    }

    #[tokio::test]
    async fn test_llm_completion_success() {
        // 1. Arrange
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(test_config(mock_server.uri(), Some("sk-test")));

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(header("authorization", "Bearer sk-test"))
            .and(body_partial_json(json!({ "model": "test-model", "temperature": 0.5 })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "role": "assistant", "content": "  You are doing great.  " } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        // 2. Act
        let result = handle.complete(request("Hello")).await;

        // 3. Assert
        assert_eq!(result.unwrap(), "You are doing great.");
    }

    #[tokio::test]
    async fn test_llm_sends_full_conversation() {
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(test_config(mock_server.uri(), Some("sk-test")));

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({
                "messages": [
                    { "role": "system", "content": "You are supportive." },
                    { "role": "user", "content": "earlier" },
                    { "role": "assistant", "content": "reply" },
                    { "role": "user", "content": "Hello" }
                ]
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "ok" } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        assert_eq!(handle.complete(request("Hello")).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_llm_completion_server_error() {
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(test_config(mock_server.uri(), Some("sk-test")));

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
            .mount(&mock_server)
            .await;

        let result = handle.complete(request("Hello")).await;

        match result {
            Err(AppError::Actor(ActorError::LlmError(msg))) => {
                assert!(msg.contains("status 500"));
                assert!(msg.contains("Internal Server Error"));
            }
            other => panic!("Expected LlmError, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_llm_empty_content_is_error() {
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(test_config(mock_server.uri(), Some("sk-test")));

        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
            .mount(&mock_server)
            .await;

        let result = handle.complete(request("Hello")).await;
        assert!(matches!(result, Err(AppError::Actor(ActorError::LlmError(_)))));
    }

    #[tokio::test]
    async fn test_llm_keeps_base_url_path_prefix() {
        let mock_server = MockServer::start().await;
        let base_url = format!("{}/v1/", mock_server.uri());
        let handle = LlmActorHandle::new(test_config(base_url, Some("sk-test")));

        Mock::given(method("POST"))
            .and(path("/v1/chat/completions"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "choices": [{ "message": { "content": "ok" } }]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        assert_eq!(handle.complete(request("Hello")).await.unwrap(), "ok");
    }

    #[tokio::test]
    async fn test_llm_invalid_base_url_is_config_error() {
        let handle = LlmActorHandle::new(test_config("not a url".to_string(), Some("sk-test")));

        let result = handle.complete(request("Hello")).await;
        assert!(matches!(result, Err(AppError::Config(_))));
    }

    #[tokio::test]
    async fn test_llm_without_api_key_does_not_call_out() {
        let mock_server = MockServer::start().await;
        let handle = LlmActorHandle::new(test_config(mock_server.uri(), None));

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;

        let result = handle.complete(request("Hello")).await;
        assert!(matches!(result, Err(AppError::Actor(ActorError::NotConfigured(_)))));
    }
}
