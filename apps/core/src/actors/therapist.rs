//! AI therapist: wraps the LLM actor with sentiment-aware prompting and a
//! local fallback.

use crate::actors::messages::{ChatTurn, CompletionRequest};
use crate::actors::traits::LlmActor;
use crate::brain::{supportive_message, SentimentResult};
use crate::models::ChatMessage;
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// Number of earlier exchanges replayed to the model
const DEFAULT_HISTORY_TURNS: usize = 5;

const BASE_PROMPT: &str = "You are MindFlow, a warm and supportive wellness companion. \
You are not a licensed therapist and you never diagnose. \
Keep replies short (two to four sentences), empathetic and practical. \
When it helps, suggest simple coping techniques such as slow breathing, journaling or a short walk.";

const ATTENTION_PROMPT: &str = "The message suggests the user may be struggling. \
Gently encourage them to reach out to a trusted adult or a mental health professional, \
and remind them that local emergency services are available if they are in danger.";

/// Where a reply came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplySource {
    Model,
    Fallback,
}

#[derive(Debug, Clone)]
pub struct TherapistReply {
    pub text: String,
    pub source: ReplySource,
}

pub struct Therapist {
    llm: Arc<dyn LlmActor>,
    temperature: Option<f32>,
    history_turns: usize,
}

impl Therapist {
    pub fn new(llm: Arc<dyn LlmActor>) -> Self {
        Self {
            llm,
            temperature: None,
            history_turns: DEFAULT_HISTORY_TURNS,
        }
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// How many stored exchanges `reply` will replay.
    pub fn history_window(&self) -> usize {
        self.history_turns
    }

    /// System prompt carrying the analysis of the current message.
    pub fn system_prompt(analysis: &SentimentResult) -> String {
        let mut prompt = format!(
            "{}\n\nThe user's current message reads as {} with a likely emotion of {}.",
            BASE_PROMPT, analysis.sentiment, analysis.emotion
        );
        if analysis.needs_attention {
            prompt.push('\n');
            prompt.push_str(ATTENTION_PROMPT);
        }
        prompt
    }

    /// Turn stored chat messages (newest first) into model turns (oldest first).
    fn history_turns(&self, history: &[ChatMessage]) -> Vec<ChatTurn> {
        history
            .iter()
            .take(self.history_turns)
            .rev()
            .flat_map(|entry| {
                [
                    ChatTurn::user(entry.message.clone()),
                    ChatTurn::assistant(entry.response.clone()),
                ]
            })
            .collect()
    }

    /// Reply to `message`. Any model failure degrades to the supportive message.
    #[instrument(skip(self, message, history), fields(emotion = %analysis.emotion))]
    pub async fn reply(
        &self,
        message: &str,
        analysis: &SentimentResult,
        history: &[ChatMessage],
    ) -> TherapistReply {
        let request = CompletionRequest {
            system_prompt: Self::system_prompt(analysis),
            history: self.history_turns(history),
            user_message: message.to_string(),
            temperature: self.temperature,
        };

        match self.llm.complete(request).await {
            Ok(text) => {
                info!("Therapist reply generated by model");
                TherapistReply {
                    text,
                    source: ReplySource::Model,
                }
            }
            Err(e) => {
                warn!("Chat model unavailable, using fallback reply: {}", e);
                TherapistReply {
                    text: supportive_message(analysis),
                    source: ReplySource::Fallback,
                }
            }
        }
    }
}
