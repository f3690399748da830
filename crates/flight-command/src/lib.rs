//! flight-command: shared command vocabulary for natural-language flight control
//!
//! This crate defines the structured commands exchanged between the utterance
//! parser, the dialogue tracker, and the command executor: the closed intent
//! set, the slot vocabulary, and the execution result type. Parsers are lossy,
//! so every parameter is optional and unrecognized wire values degrade to
//! `None` rather than rejecting a command.

mod types;
pub use types::{
    CommandParams, ExecutionOutcome, Intent, ParsedCommand, RelativeChange, SlotKey, TurnDirection,
};

mod error;
pub use error::{CommandError, Result};
