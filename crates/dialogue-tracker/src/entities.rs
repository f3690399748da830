//! Entity references accumulated for coreference resolution.
//!
//! The tracker records which entities the conversation has touched (the
//! aircraft, named waypoints, the last numeric values seen) so later turns
//! can say "that" or "it" and still resolve. References are lookup material
//! only; nothing executes from this table.

use std::collections::HashMap;

use flight_command::CommandParams;

use crate::scan;

const AIRCRAFT_WORDS: &[&str] = &["aircraft", "plane"];
const WAYPOINT_TRIGGERS: &[&str] = &["waypoint", "point", "location"];

/// What a reference denotes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Aircraft,
    Waypoint,
    Parameter,
}

/// Lookup key for a recorded reference.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum EntityKey {
    Aircraft,
    LastAltitude,
    LastSpeed,
    LastHeading,
    Waypoint(String),
}

/// A recorded reference: what it is, its value if numeric, and the turn it
/// was last mentioned in.
#[derive(Debug, Clone, PartialEq)]
pub struct EntityReference {
    pub kind: EntityKind,
    pub value: Option<f64>,
    pub mentioned_in_turn: u32,
}

pub type EntityTable = HashMap<EntityKey, EntityReference>;

/// Record the entities a turn mentions, overwriting earlier mentions.
///
/// `params` are the freshly parsed parameters for the turn, before any
/// coreference resolution.
pub fn extract_entities(
    references: &mut EntityTable,
    tokens: &[String],
    params: &CommandParams,
    turn: u32,
) {
    if scan::has_any_token(tokens, AIRCRAFT_WORDS) {
        references.insert(
            EntityKey::Aircraft,
            EntityReference {
                kind: EntityKind::Aircraft,
                value: None,
                mentioned_in_turn: turn,
            },
        );
    }

    // Waypoints are captured for a richer command space; nothing consumes
    // them yet.
    if let Some(name) = scan::token_after_any(tokens, WAYPOINT_TRIGGERS) {
        references.insert(
            EntityKey::Waypoint(name.to_string()),
            EntityReference {
                kind: EntityKind::Waypoint,
                value: None,
                mentioned_in_turn: turn,
            },
        );
    }

    let numeric_mentions = [
        (EntityKey::LastAltitude, params.altitude_ft),
        (EntityKey::LastSpeed, params.speed_value),
        (EntityKey::LastHeading, params.heading_deg),
    ];
    for (key, value) in numeric_mentions {
        if let Some(value) = value {
            references.insert(
                key,
                EntityReference {
                    kind: EntityKind::Parameter,
                    value: Some(value),
                    mentioned_in_turn: turn,
                },
            );
        }
    }
}
