//! Error types for scenario execution

use thiserror::Error;

use crate::driver::DriverError;

/// Result type alias using [`EngineError`]
pub type EngineResult<T> = std::result::Result<T, EngineError>;

/// Everything that can end a scenario run early.
///
/// All variants except [`EngineError::Setup`] are caught at the top of the
/// run loop and folded into a FAILED run result; `Setup` is raised before
/// any scenario has started, so no report exists for it.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("could not open browser session: {0}")]
    Setup(String),

    #[error(transparent)]
    Driver(#[from] DriverError),

    #[error("timed out after {timeout_ms} ms waiting for {what}")]
    WaitTimeout { what: String, timeout_ms: u64 },

    #[error("expected {expected:?}, found {observed:?}")]
    AssertionMismatch { expected: String, observed: String },

    #[error("not a money amount: {0:?}")]
    InvalidAmount(String),

    #[error("scenario definition error: {0}")]
    Scenario(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
