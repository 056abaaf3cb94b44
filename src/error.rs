use thiserror::Error;

pub type SelectorResult<T> = Result<T, SelectorError>;

#[derive(Debug, Error)]
pub enum SelectorError {
    #[error("invalid range: min={min}, max={max}")]
    InvalidRange { min: f64, max: f64 },

    #[error("invalid anchor: {0}")]
    InvalidAnchor(String),

    #[error("invalid config: {0}")]
    InvalidConfig(String),

    #[error("invalid data: {0}")]
    InvalidData(String),

    #[error("transport error: {0}")]
    Transport(String),
}
