//! JSON-RPC 2.0 envelope for the survey daemon.

use rean_survey_session::SessionError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// Every method the daemon answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Initialize,
    Ping,
    Catalog,
    Resources,
    Resource,
    State,
    Answer,
    ShowResults,
    Result,
    Reset,
    Share,
    Load,
}

impl Method {
    pub fn parse(name: &str) -> Option<Self> {
        let method = match name {
            "initialize" => Self::Initialize,
            "ping" => Self::Ping,
            "survey/catalog" => Self::Catalog,
            "survey/resources" => Self::Resources,
            "survey/resource" => Self::Resource,
            "survey/state" => Self::State,
            "survey/answer" => Self::Answer,
            "survey/results" => Self::ShowResults,
            "survey/result" => Self::Result,
            "survey/reset" => Self::Reset,
            "survey/share" => Self::Share,
            "survey/load" => Self::Load,
            _ => return None,
        };
        Some(method)
    }
}

#[derive(Debug, Deserialize)]
pub struct RpcRequest {
    pub jsonrpc: String,
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

/// Failures reported to the client. Survey-specific codes live in the
/// implementation-defined `-32000..=-32099` range.
#[derive(Debug, Error)]
pub enum RpcError {
    #[error("parse error: {0}")]
    Parse(String),
    #[error("invalid stdio frame: {0}")]
    Frame(String),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("method not found: {0}")]
    MethodNotFound(String),
    #[error("invalid params: {0}")]
    InvalidParams(String),
    #[error("session is locked to a shared result")]
    Locked,
    #[error("survey is incomplete: {answered} of {expected} answered")]
    Incomplete { answered: usize, expected: usize },
    #[error("no result is visible to share")]
    NothingToShare,
    #[error("internal error: {0}")]
    Internal(String),
}

impl RpcError {
    pub const fn code(&self) -> i64 {
        match self {
            Self::Parse(_) | Self::Frame(_) => -32700,
            Self::InvalidRequest(_) => -32600,
            Self::MethodNotFound(_) => -32601,
            Self::InvalidParams(_) => -32602,
            Self::Internal(_) => -32603,
            Self::Locked => -32001,
            Self::Incomplete { .. } => -32002,
            Self::NothingToShare => -32003,
        }
    }
}

impl From<SessionError> for RpcError {
    fn from(err: SessionError) -> Self {
        match err {
            SessionError::Locked => Self::Locked,
            SessionError::Incomplete { answered, expected } => {
                Self::Incomplete { answered, expected }
            }
            SessionError::NothingToShare => Self::NothingToShare,
            SessionError::Survey(err) => Self::InvalidParams(err.to_string()),
            SessionError::Token(err) => Self::Internal(err.to_string()),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorObject {
    pub code: i64,
    pub message: String,
}

impl From<&RpcError> for ErrorObject {
    fn from(err: &RpcError) -> Self {
        Self {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Outcome {
    Result(Value),
    Error(ErrorObject),
}

#[derive(Debug, Serialize)]
pub struct RpcResponse {
    pub jsonrpc: &'static str,
    pub id: Value,
    #[serde(flatten)]
    pub outcome: Outcome,
}

impl RpcResponse {
    pub fn new(id: Value, outcome: Result<Value, RpcError>) -> Self {
        let outcome = match outcome {
            Ok(value) => Outcome::Result(value),
            Err(err) => Outcome::Error(ErrorObject::from(&err)),
        };
        Self {
            jsonrpc: "2.0",
            id,
            outcome,
        }
    }

    /// Reply to input that never became a request, so it has no id.
    pub fn rejected(err: &RpcError) -> Self {
        Self {
            jsonrpc: "2.0",
            id: Value::Null,
            outcome: Outcome::Error(err.into()),
        }
    }

    pub const fn result(&self) -> Option<&Value> {
        match &self.outcome {
            Outcome::Result(value) => Some(value),
            Outcome::Error(_) => None,
        }
    }

    pub const fn error(&self) -> Option<&ErrorObject> {
        match &self.outcome {
            Outcome::Error(err) => Some(err),
            Outcome::Result(_) => None,
        }
    }
}
