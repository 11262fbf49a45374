use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransformError {
    #[error("Column `{column}` holds a non-scalar value: {value}")]
    NonScalarValue { column: String, value: String },
}
