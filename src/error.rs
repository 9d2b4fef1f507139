use std::path::PathBuf;
use thiserror::Error;

/// Every failure the evaluation API can report. None of these are ever folded
/// into a score.
#[derive(Debug, Error)]
pub enum EvalError {
    #[error("bad argument: {0}")]
    BadArg(&'static str),
    #[error("networks not loaded")]
    NotReady,
    #[error("bad position: {0}")]
    BadPosition(String),
    #[error("side to move is in check")]
    InCheck,
    #[error("failed to load network {}: {reason}", path.display())]
    Load { path: PathBuf, reason: String },
    #[error("internal evaluation error: {0}")]
    Internal(String),
}

impl EvalError {
    /// Integer status code, compatible with the C wrapper's error codes.
    pub fn code(&self) -> i32 {
        match self {
            EvalError::BadArg(_) => -2,
            EvalError::Load { .. } => -3,
            EvalError::BadPosition(_) => -4,
            EvalError::InCheck => -5,
            EvalError::Internal(_) => -6,
            EvalError::NotReady => -7,
        }
    }

    pub(crate) fn load(path: impl Into<PathBuf>, err: anyhow::Error) -> Self {
        EvalError::Load { path: path.into(), reason: format!("{:#}", err) }
    }
}

pub type Result<T> = std::result::Result<T, EvalError>;
