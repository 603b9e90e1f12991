use thiserror::Error;

use crate::types::CatalogId;

#[derive(Debug, Error)]
pub enum TokenError {
    #[error("malformed token: {0}")]
    Malformed(String),

    #[error("malformed token encoding: {0}")]
    Base64(#[from] base64::DecodeError),

    #[error("malformed token payload: {0}")]
    Json(#[from] serde_json::Error),

    #[error("token was made for catalog {found}, current catalog is {expected}")]
    CatalogMismatch { expected: CatalogId, found: CatalogId },

    #[error("answer set is incomplete: {answered} of {expected} answered")]
    Incomplete { answered: usize, expected: usize },
}

impl TokenError {
    /// True for every failure of the transform or of the payload structure.
    pub const fn is_malformed(&self) -> bool {
        matches!(self, Self::Malformed(_) | Self::Base64(_) | Self::Json(_))
    }
}
