use crate::config::AdvisoryConfig;
use crate::generator::{GeminiClient, TextGenerator};
use crate::knowledge::{GREETING, SYSTEM_PROMPT, TOPICS};
use crate::{AdvisoryError, AdvisoryResult};
use std::sync::Arc;
use std::time::Duration;

/// Answer from the static knowledge base.
///
/// Matching is case-insensitive; messages with no matching keyword get the greeting.
pub fn static_response(message: &str) -> &'static str {
    let lowered = message.to_lowercase();
    TOPICS
        .iter()
        .find(|topic| topic.keywords.iter().any(|k| lowered.contains(k)))
        .map(|topic| topic.answer)
        .unwrap_or(GREETING)
}

/// Chat responder with optional generative augmentation.
#[derive(Clone)]
pub struct AdvisoryResponder {
    generator: Option<Arc<dyn TextGenerator>>,
    timeout: Duration,
}

impl std::fmt::Debug for AdvisoryResponder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryResponder")
            .field("generator", &self.generator.as_ref().map(|g| g.name()))
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for AdvisoryResponder {
    fn default() -> Self {
        Self::new()
    }
}

impl AdvisoryResponder {
    /// Static answers only.
    pub fn new() -> Self {
        Self {
            generator: None,
            timeout: crate::config::DEFAULT_GENAI_TIMEOUT,
        }
    }

    /// Prefer `generator`, falling back to the static answers when it fails or takes longer
    /// than `timeout`.
    pub fn with_generator(generator: Arc<dyn TextGenerator>, timeout: Duration) -> Self {
        Self {
            generator: Some(generator),
            timeout,
        }
    }

    /// Builds a Gemini-backed responder when an API key is configured, static otherwise.
    pub fn from_config(config: &AdvisoryConfig) -> Self {
        match &config.api_key {
            Some(key) => {
                tracing::info!(model = %config.model, "generative advisory enabled");
                Self::with_generator(
                    Arc::new(GeminiClient::new(key.clone(), config.model.clone())),
                    config.timeout,
                )
            }
            None => {
                tracing::info!("no generative API key configured; using static advisory answers");
                Self::new()
            }
        }
    }

    /// Whether a generator is configured.
    pub fn is_generative(&self) -> bool {
        self.generator.is_some()
    }

    /// Reply to a chat message.
    ///
    /// # Errors
    ///
    /// Returns [`AdvisoryError::EmptyMessage`] for a blank message. Generator failures never
    /// surface; they are logged and the static answer is returned instead.
    pub async fn respond(&self, message: &str) -> AdvisoryResult<String> {
        let message = message.trim();
        if message.is_empty() {
            return Err(AdvisoryError::EmptyMessage);
        }

        if let Some(generator) = &self.generator {
            // Asking about the service itself goes straight to the static answers.
            if !message.to_lowercase().contains("gemini") {
                match self.generate(generator.as_ref(), message).await {
                    Ok(text) => return Ok(text),
                    Err(e) => {
                        tracing::warn!(
                            generator = generator.name(),
                            "generative advisory failed, using static answer: {e}"
                        );
                    }
                }
            }
        }

        Ok(static_response(message).to_string())
    }

    async fn generate(
        &self,
        generator: &dyn TextGenerator,
        message: &str,
    ) -> AdvisoryResult<String> {
        let prompt = format!("{SYSTEM_PROMPT}{message}");
        let text = tokio::time::timeout(self.timeout, generator.generate(&prompt))
            .await
            .map_err(|_| AdvisoryError::Timeout(self.timeout))??;
        if text.trim().is_empty() {
            return Err(AdvisoryError::EmptyGeneration);
        }
        Ok(text)
    }
}
