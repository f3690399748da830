//! Coreference resolution for pronouns and deictic references.
//!
//! Pure over the session state: resolution produces a new parameter set and
//! never touches the entity table. Within one turn the passes run in a fixed
//! order ("it", then ordinals, then "that") and each pass only fills
//! parameters still null, so the first resolution to claim a slot wins.

use flight_command::{CommandParams, SlotKey};

use crate::entities::EntityKey;
use crate::scan::{self, Ordinal};
use crate::tracker::SessionState;

/// Resolve references in `text` against the session, filling nulls in
/// `params`. Values the parser provided are never replaced.
pub(crate) fn resolve_coreferences(
    state: &SessionState,
    tokens: &[String],
    params: &CommandParams,
) -> CommandParams {
    let mut resolved = params.clone();

    // "it": an elliptical follow-up on the active intent ("do it"). Only
    // fires when the parser extracted nothing at all; backfills the numeric
    // slots from the store.
    if scan::has_token(tokens, "it") && state.current_intent.is_some() && params.is_empty() {
        for key in SlotKey::NUMERIC {
            if resolved.numeric(key).is_none() {
                if let Some(value) = state.slots.numeric(key) {
                    resolved.set_numeric(key, value);
                }
            }
        }
    }

    // Ordinals: only "first" resolves, from the opening turn's parameters.
    // second/third/last are recognized but reserved.
    if let Some(ordinal) = scan::ordinal(tokens) {
        match ordinal {
            Ordinal::First => {
                if let Some(first_turn) = state.history.first() {
                    resolved.fill_missing_from(&first_turn.params);
                }
            }
            Ordinal::Second | Ordinal::Third | Ordinal::Last => {}
        }
    }

    // "that": the most recently mentioned values.
    if scan::has_token(tokens, "that") {
        let last_values = [
            (SlotKey::AltitudeFt, EntityKey::LastAltitude),
            (SlotKey::SpeedValue, EntityKey::LastSpeed),
            (SlotKey::HeadingDeg, EntityKey::LastHeading),
        ];
        for (slot, entity) in last_values {
            if resolved.numeric(slot).is_none() {
                if let Some(value) = state.entity_references.get(&entity).and_then(|r| r.value) {
                    resolved.set_numeric(slot, value);
                }
            }
        }
    }

    // "there": recognized but reserved until waypoint targets are consumable.
    let _ = scan::has_token(tokens, "there");

    resolved
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{EntityKind, EntityReference};
    use crate::tracker::{SessionState, TurnRecord};
    use flight_command::Intent;
    use time::OffsetDateTime;

    fn state_with_slots(intent: Intent, slots: CommandParams) -> SessionState {
        SessionState {
            current_intent: Some(intent),
            slots,
            ..SessionState::default()
        }
    }

    fn resolve(state: &SessionState, text: &str, params: &CommandParams) -> CommandParams {
        resolve_coreferences(state, &scan::tokens(text), params)
    }

    #[test]
    fn test_it_backfills_from_slots_when_parse_is_empty() {
        let state = state_with_slots(
            Intent::ChangeAltitude,
            CommandParams::new().with_altitude(10000.0).with_speed(220.0),
        );

        let resolved = resolve(&state, "do it", &CommandParams::new());
        assert_eq!(resolved.altitude_ft, Some(10000.0));
        assert_eq!(resolved.speed_value, Some(220.0));
    }

    #[test]
    fn test_it_is_inert_when_parse_has_values() {
        let state = state_with_slots(
            Intent::ChangeAltitude,
            CommandParams::new().with_altitude(10000.0).with_speed(220.0),
        );

        let params = CommandParams::new().with_altitude(12000.0);
        let resolved = resolve(&state, "make it 12000", &params);
        assert_eq!(resolved.altitude_ft, Some(12000.0));
        // Parse was non-empty, so nothing else is pulled in
        assert_eq!(resolved.speed_value, None);
    }

    #[test]
    fn test_it_requires_an_active_intent() {
        let state = SessionState {
            slots: CommandParams::new().with_altitude(10000.0),
            ..SessionState::default()
        };

        let resolved = resolve(&state, "do it", &CommandParams::new());
        assert!(resolved.is_empty());
    }

    #[test]
    fn test_that_backfills_from_last_mentions() {
        let mut state = SessionState::default();
        state.entity_references.insert(
            EntityKey::LastSpeed,
            EntityReference {
                kind: EntityKind::Parameter,
                value: Some(220.0),
                mentioned_in_turn: 1,
            },
        );

        let resolved = resolve(&state, "keep doing that", &CommandParams::new());
        assert_eq!(resolved.speed_value, Some(220.0));
        assert_eq!(resolved.altitude_ft, None);
    }

    #[test]
    fn test_that_never_replaces_explicit_values() {
        let mut state = SessionState::default();
        state.entity_references.insert(
            EntityKey::LastAltitude,
            EntityReference {
                kind: EntityKind::Parameter,
                value: Some(10000.0),
                mentioned_in_turn: 1,
            },
        );

        let params = CommandParams::new().with_altitude(12000.0);
        let resolved = resolve(&state, "take that up to 12000 feet", &params);
        assert_eq!(resolved.altitude_ft, Some(12000.0));
    }

    #[test]
    fn test_first_one_uses_opening_turn() {
        let mut state = SessionState::default();
        state.history.push(TurnRecord {
            turn: 1,
            raw_text: "climb to 9000 feet".to_string(),
            intent: Some(Intent::ChangeAltitude),
            params: CommandParams::new().with_altitude(9000.0),
            timestamp: OffsetDateTime::UNIX_EPOCH,
        });
        state.history.push(TurnRecord {
            turn: 2,
            raw_text: "climb to 12000 feet".to_string(),
            intent: Some(Intent::ChangeAltitude),
            params: CommandParams::new().with_altitude(12000.0),
            timestamp: OffsetDateTime::UNIX_EPOCH,
        });

        let resolved = resolve(&state, "go back to the first one", &CommandParams::new());
        assert_eq!(resolved.altitude_ft, Some(9000.0));
    }

    #[test]
    fn test_second_and_last_are_reserved() {
        let mut state = SessionState::default();
        state.history.push(TurnRecord {
            turn: 1,
            raw_text: "climb to 9000 feet".to_string(),
            intent: Some(Intent::ChangeAltitude),
            params: CommandParams::new().with_altitude(9000.0),
            timestamp: OffsetDateTime::UNIX_EPOCH,
        });

        assert!(resolve(&state, "the second one", &CommandParams::new()).is_empty());
        assert!(resolve(&state, "the last one", &CommandParams::new()).is_empty());
    }

    #[test]
    fn test_there_is_reserved() {
        let state = state_with_slots(
            Intent::ChangeAltitude,
            CommandParams::new().with_altitude(10000.0),
        );
        assert!(resolve(&state, "fly there", &CommandParams::new()).is_empty());
    }

    #[test]
    fn test_it_wins_over_that_per_slot() {
        // "it" resolves first; "that" may only claim slots still null
        let mut state = state_with_slots(
            Intent::ChangeAltitude,
            CommandParams::new().with_altitude(10000.0),
        );
        state.entity_references.insert(
            EntityKey::LastAltitude,
            EntityReference {
                kind: EntityKind::Parameter,
                value: Some(8000.0),
                mentioned_in_turn: 1,
            },
        );
        state.entity_references.insert(
            EntityKey::LastSpeed,
            EntityReference {
                kind: EntityKind::Parameter,
                value: Some(220.0),
                mentioned_in_turn: 1,
            },
        );

        let resolved = resolve(&state, "do it like that", &CommandParams::new());
        assert_eq!(resolved.altitude_ft, Some(10000.0));
        // Speed was not in the slot store, so "that" fills it
        assert_eq!(resolved.speed_value, Some(220.0));
    }
}
