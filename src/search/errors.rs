use thiserror::Error;

use crate::executor::ExecutionError;
use crate::normalizer::TransformError;
use crate::translator::TranslationError;

/// Fatal pipeline failures. Feed errors never appear here; the
/// orchestrator absorbs them and continues with placeholder images.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum SearchError {
    #[error("Query cannot be empty")]
    EmptyQuery,

    #[error("Translation failed: {0}")]
    Translation(#[from] TranslationError),

    #[error("Query execution failed: {0}")]
    Execution(#[from] ExecutionError),

    #[error("Result transform failed: {0}")]
    Transform(#[from] TransformError),
}
