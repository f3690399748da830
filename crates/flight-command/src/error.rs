use thiserror::Error;

pub type Result<T, E = CommandError> = core::result::Result<T, E>;

#[derive(Debug, Error)]
pub enum CommandError {
    #[error("unknown intent: {0}")]
    UnknownIntent(String),
    #[error("unknown direction: {0}")]
    UnknownDirection(String),
    #[error("unknown relative change: {0}")]
    UnknownRelativeChange(String),
    #[error("execution failed: {0}")]
    Execution(String),
}
