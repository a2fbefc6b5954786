use thiserror::Error;

/// Errors surfaced while evaluating context expressions.
///
/// Building a `ContextExpression` never fails; only the label matcher can
/// reject a token, and the CLI adds I/O and JSON failures on top.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MatchError {
    #[error("parse error: {0}")]
    Parse(String),

    #[error("io error: {0}")]
    Io(String),

    #[error("json error: {0}")]
    Json(String),
}

impl From<std::io::Error> for MatchError {
    fn from(e: std::io::Error) -> Self {
        MatchError::Io(e.to_string())
    }
}

impl From<serde_json::Error> for MatchError {
    fn from(e: serde_json::Error) -> Self {
        MatchError::Json(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, MatchError>;
