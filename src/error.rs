#[derive(Debug, thiserror::Error)]
pub enum PriceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Computation error: {0}")]
    Computation(String),
}

impl PriceError {
    /// True for the "no data" outcome, as opposed to a rejected request.
    pub fn is_not_found(&self) -> bool {
        matches!(self, PriceError::NotFound(_))
    }

    /// True when the caller supplied a missing or invalid parameter.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, PriceError::InvalidArgument(_))
    }
}

pub type Result<T> = std::result::Result<T, PriceError>;
