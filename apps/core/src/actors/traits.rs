use crate::actors::messages::{AppError, CompletionRequest};
use async_trait::async_trait;

/// Defines the public interface for an LLM (Large Language Model) actor.
///
/// This trait abstracts the specific implementation of the LLM, allowing for different
/// backends (e.g., a hosted API, a local OpenAI-compatible server, a test mock) to be
/// used interchangeably.
#[async_trait]
pub trait LlmActor: Send + Sync + 'static {
    /// Generates a complete chat reply for the given conversation.
    async fn complete(&self, request: CompletionRequest) -> Result<String, AppError>;
}
