use std::collections::VecDeque;

use flight_command::{ExecutionOutcome, Intent, ParsedCommand};

use crate::context::ParserContext;
use crate::error::Result;
use crate::traits::{CommandExecutor, UtteranceParser};

/// A scripted parser. Each call pops the next queued command; an exhausted
/// script yields a bare `status` guess, the same shape a confused real parser
/// falls back to.
#[derive(Debug, Default)]
pub struct MockParser {
    script: VecDeque<ParsedCommand>,
}

impl MockParser {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn scripted(commands: impl IntoIterator<Item = ParsedCommand>) -> Self {
        Self {
            script: commands.into_iter().collect(),
        }
    }

    pub fn push(&mut self, command: ParsedCommand) {
        self.script.push_back(command);
    }
}

impl UtteranceParser for MockParser {
    fn parse(&mut self, text: &str, _context: Option<&ParserContext>) -> Result<ParsedCommand> {
        let command = self
            .script
            .pop_front()
            .unwrap_or_else(|| ParsedCommand::new(Intent::Status));
        Ok(command.with_source_text(text))
    }
}

/// An executor that records every command and reports success, or failure
/// when constructed with `failing()`.
#[derive(Debug, Default)]
pub struct MockExecutor {
    pub executed: Vec<ParsedCommand>,
    fail_all: bool,
}

impl MockExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            executed: Vec::new(),
            fail_all: true,
        }
    }
}

impl CommandExecutor for MockExecutor {
    fn execute(&mut self, command: &ParsedCommand) -> Result<ExecutionOutcome> {
        self.executed.push(command.clone());
        let intent = command.intent.map(|i| i.as_str()).unwrap_or("none");
        if self.fail_all {
            Ok(ExecutionOutcome::failed(format!("failed to execute {intent}")))
        } else {
            Ok(ExecutionOutcome::ok(format!("executed {intent}")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_parser_replays_script_then_defaults() {
        let mut parser = MockParser::scripted([ParsedCommand::new(Intent::Takeoff)]);

        let first = parser.parse("take off", None).unwrap();
        assert_eq!(first.intent, Some(Intent::Takeoff));
        assert_eq!(first.source_text.as_deref(), Some("take off"));

        let second = parser.parse("and then what", None).unwrap();
        assert_eq!(second.intent, Some(Intent::Status));
    }

    #[test]
    fn test_mock_executor_records_commands() {
        let mut executor = MockExecutor::new();
        let outcome = executor
            .execute(&ParsedCommand::new(Intent::Land))
            .unwrap();

        assert!(outcome.success);
        assert_eq!(executor.executed.len(), 1);

        let mut failing = MockExecutor::failing();
        let outcome = failing.execute(&ParsedCommand::new(Intent::Land)).unwrap();
        assert!(!outcome.success);
    }
}
