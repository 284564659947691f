use crate::eval::vm::EvalError;
use crate::expression::error::ParseError;

/// Convenience result type used across exprfuzz.
pub type FuzzResult<T> = Result<T, FuzzError>;

/// Top-level error taxonomy used by the public APIs.
///
/// Generation and rendering are total; only parsing, evaluation and the
/// case driver can fail.
#[derive(thiserror::Error, Debug)]
pub enum FuzzError {
    /// Malformed reference-dialect input.
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// A fault raised by the reference evaluator (division or remainder by zero).
    #[error("evaluation error: {0}")]
    Evaluation(#[from] EvalError),

    /// The case driver could not produce a usable test case.
    #[error("generation error: {0}")]
    Generation(String),

    /// Invalid driver configuration.
    #[error("config error: {0}")]
    Config(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl FuzzError {
    /// Build a [`FuzzError::Generation`] value.
    pub fn generation(msg: impl Into<String>) -> Self {
        Self::Generation(msg.into())
    }

    /// Build a [`FuzzError::Config`] value.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// The evaluation fault behind this error, if any.
    pub fn as_eval_fault(&self) -> Option<&EvalError> {
        match self {
            Self::Evaluation(e) => Some(e),
            _ => None,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;
