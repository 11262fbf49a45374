use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TranslationError {
    #[error("Completion request failed: {0}")]
    Request(String),

    #[error("Completion service returned status {0}")]
    Status(u16),

    #[error("Could not decode completion response: {0}")]
    Decode(String),

    #[error("Completion service returned no usable text")]
    EmptyCompletion,
}
