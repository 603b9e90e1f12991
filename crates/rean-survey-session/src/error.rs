use rean_survey_core::SurveyError;
use rean_survey_token::TokenError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("clipboard unavailable: {0}")]
    Unavailable(String),

    #[error("clipboard io error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("session is locked to a shared result")]
    Locked,

    #[error("survey is incomplete: {answered} of {expected} answered")]
    Incomplete { answered: usize, expected: usize },

    #[error("no result is visible to share")]
    NothingToShare,

    #[error(transparent)]
    Survey(#[from] SurveyError),

    #[error(transparent)]
    Token(#[from] TokenError),
}
