use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SurveyError {
    #[error("question position {position} is outside the catalog (len={len})")]
    PositionOutOfRange { position: usize, len: usize },

    #[error("unknown response: {0:?} (expected \"yes\" or \"no\")")]
    UnknownResponse(String),
}
