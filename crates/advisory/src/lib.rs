//! # Advisory
//!
//! Stroke awareness chat responder.
//!
//! Answers free-text questions from a static keyword-matched knowledge base. When a generative
//! text service is configured the responder asks it first, but any failure (network, quota,
//! timeout, empty answer) silently falls back to the static answer, so callers always get a
//! reply for a non-empty message.
//!
//! This crate is independent of risk scoring; it shares nothing with `stroke-core`.

mod config;
mod generator;
mod knowledge;
mod responder;

pub use config::AdvisoryConfig;
pub use generator::{GeminiClient, GenerateFuture, TextGenerator};
pub use responder::{static_response, AdvisoryResponder};

use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum AdvisoryError {
    #[error("no message provided")]
    EmptyMessage,
    #[error("generative request failed: {0}")]
    Http(#[from] reqwest::Error),
    #[error("generative service returned status {0}")]
    Upstream(u16),
    #[error("generative service returned no text")]
    EmptyGeneration,
    #[error("generative service timed out after {0:?}")]
    Timeout(Duration),
    #[error("invalid advisory configuration: {0}")]
    InvalidConfig(String),
}

pub type AdvisoryResult<T> = std::result::Result<T, AdvisoryError>;
