//! dialogue-tracker: conversational state for natural-language flight control
//!
//! This crate turns a sequence of conversational utterances into executable
//! flight commands. The [`DialogueTracker`] accumulates intent and parameter
//! slots across turns, detects corrections ("actually make it 12000"),
//! resolves references ("keep doing that"), and merges each fresh parse with
//! session state so elliptical follow-ups come out as complete commands.
//!
//! The utterance parser and the command executor are external collaborators
//! behind the [`UtteranceParser`] and [`CommandExecutor`] traits; mock
//! backends are provided so the full turn flow is testable without a speech
//! front end or a live vehicle link.
//!
//! Tracking is single-session and synchronous: one utterance in flight at a
//! time, all state in memory, nothing persisted.

mod scan;

mod correction;
pub use correction::{extract_parameter_update, is_correction};

mod entities;
pub use entities::{EntityKey, EntityKind, EntityReference, EntityTable};

mod coref;

mod slots;
pub use slots::{pending_slots, required_slots};

mod context;
pub use context::{ContextTurn, ParserContext, CONTEXT_FORMAT_VERSION, CONTEXT_RECENT_TURNS};

mod tracker;
pub use tracker::{DialogueTracker, StateSnapshot, TurnRecord};

mod traits;
pub use traits::{CommandExecutor, UtteranceParser};

mod mock;
pub use mock::{MockExecutor, MockParser};

mod error;
pub use error::{Result, TrackerError};

use flight_command::{ExecutionOutcome, ParsedCommand};

/// Everything one turn produced: the command that was executed, the
/// executor's report, and the post-turn state.
#[derive(Debug, Clone)]
pub struct TurnOutcome {
    pub command: ParsedCommand,
    pub outcome: ExecutionOutcome,
    pub state: StateSnapshot,
}

/// Run one utterance through the full turn flow.
///
/// Parse (with the session's context digest) -> merge with state -> execute
/// -> update state. The merge runs before the update so the executor gets a
/// best-effort complete command even on the first pass; `last_action` is
/// recorded only when the executor reports success.
pub fn process_turn<P, E>(
    tracker: &mut DialogueTracker,
    parser: &mut P,
    executor: &mut E,
    text: &str,
) -> Result<TurnOutcome>
where
    P: UtteranceParser,
    E: CommandExecutor,
{
    let context = tracker.parser_context();
    let mut parsed = parser.parse(text, context.as_ref())?;
    if parsed.source_text.is_none() {
        parsed.source_text = Some(text.to_string());
    }

    let merged = tracker.merge_parsed_with_state(&parsed);
    let outcome = executor.execute(&merged)?;

    tracker.update_state(&parsed, text);
    if outcome.success {
        if let Some(intent) = merged.intent {
            tracker.set_last_action(intent);
        }
    }

    Ok(TurnOutcome {
        command: merged,
        outcome,
        state: tracker.get_state(),
    })
}
