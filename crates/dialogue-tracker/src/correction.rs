//! Correction detection and in-text parameter updates.
//!
//! A correction turn amends the previous command instead of issuing a new
//! one ("actually make it 12000"). Detection is a case-insensitive substring
//! match so multi-word cues like "make it" and "scratch that" register.
//! Single words like "change" also legitimately appear in fresh commands;
//! that false-positive rate is an accepted limitation of the heuristic.

use flight_command::{Intent, SlotKey};

use crate::scan;

const CORRECTION_PHRASES: &[&str] = &[
    "actually",
    "correction",
    "change",
    "update",
    "make it",
    "instead",
    "rather",
    "no wait",
    "scratch that",
    "never mind",
    "cancel",
    "abort",
    "wrong",
    "not that",
];

const ALTITUDE_KEYWORDS: &[&str] = &["altitude", "height", "feet", "ft"];
const SPEED_KEYWORDS: &[&str] = &["speed", "knots", "kts"];
const HEADING_KEYWORDS: &[&str] = &["heading", "direction", "turn", "degrees"];

/// Whether `text` reads as an amendment of a previous command.
pub fn is_correction(text: &str) -> bool {
    let lower = text.to_lowercase();
    CORRECTION_PHRASES.iter().any(|phrase| lower.contains(phrase))
}

/// Route the first number in a correction utterance to a slot.
///
/// Decision table, first match wins:
/// 1. an altitude keyword is present  -> `altitude_ft`
/// 2. a speed keyword is present      -> `speed_value`
/// 3. a heading keyword is present    -> `heading_deg`
/// 4. no keyword: route by the active intent
///
/// Returns `None` when the text has no number, or no keyword matches and the
/// active intent takes no numeric slot. Numbers after the first are ignored.
pub fn extract_parameter_update(
    text: &str,
    current_intent: Option<Intent>,
) -> Option<(SlotKey, f64)> {
    let tokens = scan::tokens(text);
    let value = scan::first_number(&tokens)?;

    let key = if scan::has_any_token(&tokens, ALTITUDE_KEYWORDS) {
        SlotKey::AltitudeFt
    } else if scan::has_any_token(&tokens, SPEED_KEYWORDS) {
        SlotKey::SpeedValue
    } else if scan::has_any_token(&tokens, HEADING_KEYWORDS) {
        SlotKey::HeadingDeg
    } else {
        match current_intent? {
            Intent::ChangeAltitude => SlotKey::AltitudeFt,
            Intent::ChangeSpeed => SlotKey::SpeedValue,
            Intent::ChangeDirection => SlotKey::HeadingDeg,
            _ => return None,
        }
    };

    Some((key, value))
}
