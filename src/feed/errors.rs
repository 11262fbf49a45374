use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum FeedFetchError {
    #[error("Feed request failed: {0}")]
    Request(String),

    #[error("Feed returned status {0}")]
    Status(u16),

    #[error("Could not decode feed snapshot: {0}")]
    Decode(String),
}
