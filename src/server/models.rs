use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    /// Optional so a body without the field maps to a 400, not a decode
    /// rejection.
    pub query: Option<String>,
}
