//! Conversation context handed to the utterance parser.
//!
//! The parser sees a digest of recent dialogue so elliptical follow-ups parse
//! against the right command. The digest is an explicit value built from a
//! state snapshot, rendered in a versioned plain-text format; it is purely
//! informational and is never parsed back by this system.
//!
//! Render format (version 1):
//!
//! ```text
//! [context v1]
//! Turn 1: User said 'climb to 10000 feet' -> Intent: change_altitude, Parameters: {"altitude_ft":10000.0}
//! Current intent: change_altitude
//! Filled slots: {"altitude_ft":10000.0}
//! Pending slots: []
//! ```

use serde::Serialize;

use flight_command::{CommandParams, Intent, SlotKey};

/// Version of the rendered digest format.
pub const CONTEXT_FORMAT_VERSION: u8 = 1;

/// How many recent turns the digest includes.
pub const CONTEXT_RECENT_TURNS: usize = 3;

/// One recent turn as the parser sees it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ContextTurn {
    pub turn: u32,
    pub raw_text: String,
    pub intent: Option<Intent>,
    pub params: CommandParams,
}

/// Digest of the dialogue state for the parser.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParserContext {
    pub version: u8,
    pub recent_turns: Vec<ContextTurn>,
    pub current_intent: Option<Intent>,
    pub filled_slots: CommandParams,
    pub pending_slots: Vec<SlotKey>,
}

impl ParserContext {
    /// Render the digest as prompt-ready text.
    pub fn render(&self) -> String {
        let mut parts = vec![format!("[context v{}]", self.version)];

        for turn in &self.recent_turns {
            let intent = turn.intent.map(|i| i.as_str()).unwrap_or("none");
            let params = serde_json::to_string(&turn.params).unwrap_or_default();
            parts.push(format!(
                "Turn {}: User said '{}' -> Intent: {}, Parameters: {}",
                turn.turn, turn.raw_text, intent, params
            ));
        }

        if let Some(intent) = self.current_intent {
            parts.push(format!("Current intent: {intent}"));
        }
        if !self.filled_slots.is_empty() {
            let slots = serde_json::to_string(&self.filled_slots).unwrap_or_default();
            parts.push(format!("Filled slots: {slots}"));
        }
        if !self.pending_slots.is_empty() {
            let pending: Vec<&str> = self.pending_slots.iter().map(|k| k.as_str()).collect();
            parts.push(format!("Pending slots: [{}]", pending.join(", ")));
        }

        parts.join("\n")
    }
}
