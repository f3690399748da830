use flight_command::{ExecutionOutcome, ParsedCommand};

use crate::context::ParserContext;
use crate::error::Result;

/// Maps raw utterance text to a structured command guess.
///
/// Implementations are lossy and may mis-detect the intent (ambiguous input
/// commonly collapses to `status`); the dialogue tracker is responsible for
/// repairing guesses against session context. `context` is the digest of
/// recent dialogue, absent on the first turn.
pub trait UtteranceParser {
    fn parse(&mut self, text: &str, context: Option<&ParserContext>) -> Result<ParsedCommand>;
}

/// Carries a fully merged command out to the vehicle.
pub trait CommandExecutor {
    fn execute(&mut self, command: &ParsedCommand) -> Result<ExecutionOutcome>;
}
