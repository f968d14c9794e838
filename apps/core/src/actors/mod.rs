//! Actor layer for the AI chat feature.
//!
//! - `llm`: actor owning the HTTP client for the chat-completions API
//! - `therapist`: sentiment-aware prompting with a local fallback
//! - `messages` / `traits`: channel messages and the `LlmActor` seam

pub mod llm;
pub mod messages;
pub mod therapist;
pub mod traits;
