//! Provider trait for the generative service.

use async_trait::async_trait;

use crate::error::GenAiError;

/// The two operation kinds the application delegates to the external
/// generative service.
#[async_trait]
pub trait GenAiProvider: Send + Sync {
    /// Structured text generation: given an instruction and a target JSON
    /// shape, return a payload conforming to that shape.
    ///
    /// Implementations must validate/parse the service payload — a malformed
    /// payload is a failure, not a value.
    async fn generate_json(
        &self,
        prompt: &str,
        schema: &serde_json::Value,
    ) -> Result<serde_json::Value, GenAiError>;

    /// Image generation: given a scene description, return one square PNG.
    async fn generate_image(&self, prompt: &str) -> Result<Vec<u8>, GenAiError>;
}
