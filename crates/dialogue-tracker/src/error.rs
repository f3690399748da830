use thiserror::Error;

pub type Result<T, E = TrackerError> = core::result::Result<T, E>;

/// Failures surfaced by the external collaborators.
///
/// The tracker itself has no failure path: malformed parser output degrades
/// to "no slot change" instead of erroring.
#[derive(Debug, Error)]
pub enum TrackerError {
    #[error("utterance parser failed: {0}")]
    Parser(String),
    #[error("command executor failed: {0}")]
    Executor(String),
}
