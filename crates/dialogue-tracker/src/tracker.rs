//! Dialogue state tracking across conversation turns.
//!
//! One tracker per conversation session, in memory only. Each turn merges the
//! parser's (possibly partial, possibly wrong) command into accumulated
//! state: corrections re-point at the active intent, coreferences resolve
//! against recorded entities, and the slot store keeps every parameter seen
//! so far. A turn is applied to a draft of the session state and committed in
//! one assignment, so an interrupted turn leaves no half-applied state.

use time::OffsetDateTime;
use tracing::{debug, info};

use flight_command::{CommandParams, Intent, ParsedCommand, SlotKey};

use crate::context::{ContextTurn, ParserContext, CONTEXT_FORMAT_VERSION, CONTEXT_RECENT_TURNS};
use crate::coref;
use crate::correction;
use crate::entities::{self, EntityTable};
use crate::scan;
use crate::slots;

/// One processed turn, as recorded in history.
///
/// `intent` and `params` are the parser's output before correction handling
/// and coreference resolution, so history reflects what was said, not what
/// was concluded.
#[derive(Debug, Clone, PartialEq)]
pub struct TurnRecord {
    pub turn: u32,
    pub raw_text: String,
    pub intent: Option<Intent>,
    pub params: CommandParams,
    pub timestamp: OffsetDateTime,
}

/// The live session state. Only ever replaced wholesale: per turn via the
/// draft commit, or entirely on reset.
#[derive(Debug, Clone, Default)]
pub(crate) struct SessionState {
    pub current_intent: Option<Intent>,
    pub slots: CommandParams,
    pub pending_slots: Vec<SlotKey>,
    pub entity_references: EntityTable,
    pub history: Vec<TurnRecord>,
    pub last_action: Option<Intent>,
    pub turn_count: u32,
}

/// Read-only view of the session state.
#[derive(Debug, Clone, PartialEq, serde::Serialize)]
pub struct StateSnapshot {
    pub current_intent: Option<Intent>,
    pub slots: CommandParams,
    pub pending_slots: Vec<SlotKey>,
    pub turn_count: u32,
    pub last_action: Option<Intent>,
    pub has_context: bool,
}

/// Tracks dialogue state across multiple conversation turns.
#[derive(Debug, Default)]
pub struct DialogueTracker {
    state: SessionState,
}

impl DialogueTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `text` reads as a correction of a previous command. Exposed so
    /// callers can branch before running a full update.
    pub fn is_correction(&self, text: &str) -> bool {
        correction::is_correction(text)
    }

    /// Apply one turn: record history, handle corrections, merge parameters,
    /// resolve references, and recompute pending slots.
    ///
    /// The whole turn lands atomically; the returned snapshot is the
    /// post-turn state.
    pub fn update_state(&mut self, parsed: &ParsedCommand, raw_text: &str) -> StateSnapshot {
        let mut draft = self.state.clone();

        draft.turn_count += 1;
        draft.history.push(TurnRecord {
            turn: draft.turn_count,
            raw_text: raw_text.to_string(),
            intent: parsed.intent,
            params: parsed.params.clone(),
            timestamp: OffsetDateTime::now_utc(),
        });

        let tokens = scan::tokens(raw_text);
        let mut intent = parsed.intent;

        if correction::is_correction(raw_text) {
            // Correction turns often omit or confuse the intent; trust the
            // session over the parser's guess.
            if (intent.is_none() || intent == Some(Intent::Status)) && draft.current_intent.is_some()
            {
                intent = draft.current_intent;
            }

            // In-text updates first, then the parser's explicit values on top.
            if let Some((key, value)) =
                correction::extract_parameter_update(raw_text, draft.current_intent)
            {
                debug!(slot = key.as_str(), value, "correction updates slot");
                draft.slots.set_numeric(key, value);
            }
            draft.slots.merge_non_null(&parsed.params);

            if intent.is_some() {
                draft.current_intent = intent;
            }
        } else {
            if intent.is_some() {
                draft.current_intent = intent;
            }
            draft.slots.merge_non_null(&parsed.params);
        }

        entities::extract_entities(
            &mut draft.entity_references,
            &tokens,
            &parsed.params,
            draft.turn_count,
        );

        // Resolution fills only what the parser left null this turn; the
        // merge below then writes the filled values into the store.
        let resolved = coref::resolve_coreferences(&draft, &tokens, &parsed.params);
        draft.slots.merge_non_null(&resolved);

        draft.pending_slots = slots::pending_slots(draft.current_intent, &draft.slots);

        debug!(
            turn = draft.turn_count,
            intent = draft.current_intent.map(|i| i.as_str()).unwrap_or("none"),
            pending = draft.pending_slots.len(),
            "dialogue state updated"
        );

        self.state = draft;
        self.get_state()
    }

    /// Merge a fresh parse with accumulated state into the command handed to
    /// the executor. Runs before `update_state`, so even a first-pass partial
    /// parse comes out as complete as the session allows.
    pub fn merge_parsed_with_state(&self, parsed: &ParsedCommand) -> ParsedCommand {
        let mut merged = parsed.clone();

        let is_correction = merged
            .source_text
            .as_deref()
            .is_some_and(correction::is_correction);
        if is_correction
            && (merged.intent.is_none() || merged.intent == Some(Intent::Status))
            && self.state.current_intent.is_some()
        {
            merged.intent = self.state.current_intent;
        }

        if merged.intent.is_none() {
            merged.intent = self.state.current_intent;
        }

        merged.params.fill_missing_from(&self.state.slots);
        merged
    }

    /// Read-only snapshot of the current state.
    pub fn get_state(&self) -> StateSnapshot {
        StateSnapshot {
            current_intent: self.state.current_intent,
            slots: self.state.slots.clone(),
            pending_slots: self.state.pending_slots.clone(),
            turn_count: self.state.turn_count,
            last_action: self.state.last_action,
            has_context: !self.state.history.is_empty(),
        }
    }

    /// Context digest for the parser; `None` before the first turn.
    pub fn parser_context(&self) -> Option<ParserContext> {
        if self.state.history.is_empty() {
            return None;
        }

        let recent = self
            .state
            .history
            .iter()
            .rev()
            .take(CONTEXT_RECENT_TURNS)
            .rev()
            .map(|record| ContextTurn {
                turn: record.turn,
                raw_text: record.raw_text.clone(),
                intent: record.intent,
                params: record.params.clone(),
            })
            .collect();

        Some(ParserContext {
            version: CONTEXT_FORMAT_VERSION,
            recent_turns: recent,
            current_intent: self.state.current_intent,
            filled_slots: self.state.slots.clone(),
            pending_slots: self.state.pending_slots.clone(),
        })
    }

    /// Record the most recently executed intent after a reported success.
    pub fn set_last_action(&mut self, intent: Intent) {
        self.state.last_action = Some(intent);
    }

    /// Drop all session state, atomically returning to the initial state.
    pub fn reset_state(&mut self) {
        info!("dialogue state reset");
        self.state = SessionState::default();
    }

    /// Turn records accumulated this session, oldest first.
    pub fn history(&self) -> &[TurnRecord] {
        &self.state.history
    }
}
