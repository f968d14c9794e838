//! # Brain Module
//!
//! Fast, non-LLM text analysis for MindFlow.
//! Scores user text BEFORE it is stored or forwarded to the chat model.
//!
//! ## Components
//! - `lexicon`: Polarity/subjectivity estimation from word lists
//! - `emotion`: Ordered keyword rules with a polarity fallback
//! - `sentiment`: Output data structures and thresholds
//! - `support`: Supportive message templates
//! - `analyzer`: Main orchestrator

pub mod analyzer;
pub mod emotion;
pub mod lexicon;
pub mod sentiment;
pub mod support;

pub use analyzer::SentimentAnalyzer;
pub use sentiment::SentimentResult;
pub use support::supportive_message;
