use crate::{AdvisoryError, AdvisoryResult};
use std::time::Duration;

pub const DEFAULT_GENAI_MODEL: &str = "gemini-pro";
pub const DEFAULT_GENAI_TIMEOUT: Duration = Duration::from_secs(10);

/// Generative augmentation settings, resolved once at startup.
///
/// `api_key == None` disables augmentation entirely.
#[derive(Clone, PartialEq, Eq)]
pub struct AdvisoryConfig {
    pub api_key: Option<String>,
    pub model: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for AdvisoryConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdvisoryConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl Default for AdvisoryConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            model: DEFAULT_GENAI_MODEL.into(),
            timeout: DEFAULT_GENAI_TIMEOUT,
        }
    }
}

impl AdvisoryConfig {
    /// Build from optional raw environment values; blank values count as unset.
    pub fn from_env_values(
        api_key: Option<String>,
        model: Option<String>,
        timeout_secs: Option<String>,
    ) -> AdvisoryResult<Self> {
        let mut config = Self {
            api_key: non_blank(api_key),
            ..Self::default()
        };
        if let Some(model) = non_blank(model) {
            config.model = model;
        }
        if let Some(raw) = non_blank(timeout_secs) {
            let secs = raw.parse::<u64>().map_err(|_| {
                AdvisoryError::InvalidConfig(format!("timeout '{raw}' is not a whole number"))
            })?;
            if secs == 0 {
                return Err(AdvisoryError::InvalidConfig(
                    "timeout must be at least one second".into(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }
        Ok(config)
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
