use thiserror::Error;

use crate::types::FilterKind;

#[derive(Debug, Error)]
pub enum FilterError {
    #[error("Invalid value {value:?} for {kind} filter")]
    InvalidValue { kind: FilterKind, value: String },

    #[error("Unknown filter kind: {0}")]
    UnknownKind(String),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

pub type Result<T> = std::result::Result<T, FilterError>;
