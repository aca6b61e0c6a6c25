//! Error types for Neon Quiz.

/// Top-level error type for the application.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Generation error: {0}")]
    GenAi(#[from] GenAiError),

    #[error("Session error: {0}")]
    Session(#[from] SessionError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Configuration-related errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid configuration value for {key}: {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors from the generative service binding.
///
/// A parse failure (valid HTTP, payload not matching the requested shape) is
/// surfaced the same way as a transport failure — the controller treats them
/// identically.
#[derive(Debug, thiserror::Error)]
pub enum GenAiError {
    #[error("{operation} request failed: {reason}")]
    RequestFailed { operation: String, reason: String },

    #[error("Invalid {operation} response: {reason}")]
    InvalidResponse { operation: String, reason: String },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Session state machine errors.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Cannot transition from {from} to {to}")]
    InvalidTransition { from: String, to: String },

    #[error("Operation requires the {expected} screen, currently on {actual}")]
    WrongScreen { expected: String, actual: String },

    #[error("No age band selected")]
    NoAgeSelected,

    #[error("No gender selected")]
    NoGenderSelected,

    #[error("No analysis result available")]
    NoReport,

    #[error("Answer index {index} out of range for {len} questions")]
    AnswerIndexOutOfRange { index: usize, len: usize },

    #[error("Option {option} out of range, questions have {max} options")]
    OptionOutOfRange { option: usize, max: usize },
}

/// Result type alias for the application.
pub type Result<T> = std::result::Result<T, Error>;
