//! Generative AI integration.
//!
//! Two operation kinds, both delegated to Google's Generative Language API:
//! structured text generation (Gemini, JSON response schemas) and image
//! generation (Imagen). The `GenAiProvider` trait is the seam the controller
//! talks through, so tests substitute a scripted provider.

mod gemini;
pub mod prompts;
pub mod provider;

pub use gemini::GeminiClient;
pub use provider::GenAiProvider;

use std::sync::Arc;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;

use crate::config::AppConfig;
use crate::error::GenAiError;

/// Create the provider from configuration.
pub fn create_provider(config: &AppConfig) -> Result<Arc<dyn GenAiProvider>, GenAiError> {
    let client = GeminiClient::new(config)?;
    tracing::info!(
        "Using Gemini (text: {}, image: {})",
        config.text_model,
        config.image_model
    );
    Ok(Arc::new(client))
}

/// Embed PNG bytes as a `data:` URI for direct display.
pub fn png_data_uri(bytes: &[u8]) -> String {
    format!("data:image/png;base64,{}", BASE64.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_uri_has_png_header() {
        let uri = png_data_uri(&[1, 2, 3]);
        assert!(uri.starts_with("data:image/png;base64,"));
        assert_eq!(uri, "data:image/png;base64,AQID");
    }
}
