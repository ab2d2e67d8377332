use thiserror::Error;

pub type Result<T> = std::result::Result<T, EduGenError>;

#[derive(Debug, Error)]
pub enum EduGenError {
    /// Topic is empty or whitespace only; the trigger is not allowed.
    #[error("topic must not be empty")]
    EmptyTopic,

    #[error("unknown topic suggestion: {0}")]
    UnknownSuggestion(String),

    /// A generation is already busy; concurrent triggers are rejected.
    #[error("a generation is already in flight")]
    GenerationInFlight,

    #[error("generation was cancelled")]
    Cancelled,

    #[error("no article has been generated yet")]
    NoDocument,

    #[error("unknown export format: {0}")]
    UnknownFormat(String),

    /// Recognized format without an exporter (PDF).
    #[error("export format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("generation task failed: {0}")]
    Task(String),

    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
