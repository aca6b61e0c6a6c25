//! Configuration types.

use std::time::Duration;

use secrecy::SecretString;

use crate::error::ConfigError;

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// API key for the generative service.
    pub api_key: SecretString,
    /// Model used for structured text generation.
    pub text_model: String,
    /// Model used for image generation.
    pub image_model: String,
    /// Per-request HTTP timeout.
    pub request_timeout: Duration,
    /// Pause after an answer is selected, before advancing (visual feedback).
    pub answer_feedback_delay: Duration,
    /// Dwell on the results screen before the image offer appears.
    pub image_prompt_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_key: SecretString::from(String::new()),
            text_model: "gemini-2.5-flash".to_string(),
            image_model: "imagen-4.0-generate-001".to_string(),
            request_timeout: Duration::from_secs(30),
            answer_feedback_delay: Duration::from_millis(400),
            image_prompt_delay: Duration::from_secs(10),
        }
    }
}

impl AppConfig {
    /// Build the configuration from the environment.
    ///
    /// `GEMINI_API_KEY` is required; model names can be overridden with
    /// `NEON_QUIZ_TEXT_MODEL` and `NEON_QUIZ_IMAGE_MODEL`.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("GEMINI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("GEMINI_API_KEY".to_string()))?;

        let defaults = Self::default();
        let text_model = std::env::var("NEON_QUIZ_TEXT_MODEL")
            .unwrap_or_else(|_| defaults.text_model.clone());
        let image_model = std::env::var("NEON_QUIZ_IMAGE_MODEL")
            .unwrap_or_else(|_| defaults.image_model.clone());

        let request_timeout = match std::env::var("NEON_QUIZ_TIMEOUT_SECS") {
            Ok(raw) => {
                let secs: u64 = raw.parse().map_err(|_| ConfigError::InvalidValue {
                    key: "NEON_QUIZ_TIMEOUT_SECS".to_string(),
                    message: format!("expected an integer, got {raw:?}"),
                })?;
                Duration::from_secs(secs)
            }
            Err(_) => defaults.request_timeout,
        };

        Ok(Self {
            api_key: SecretString::from(api_key),
            text_model,
            image_model,
            request_timeout,
            ..defaults
        })
    }
}
