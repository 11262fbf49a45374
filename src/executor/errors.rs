use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExecutionError {
    #[error("ClickHouse error: {0}")]
    Store(String),

    #[error("Could not decode result row: {0}")]
    Decode(String),
}
