use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CommandError;

/// Command types the aircraft understands.
///
/// Wire names are snake_case (`change_speed`, `set_brakes`, ...). `FromStr`
/// additionally accepts the `take_off` spelling some parsers produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ChangeSpeed,
    ChangeAltitude,
    ChangeDirection,
    Takeoff,
    Land,
    Status,
    SetBrakes,
    ReleaseBrakes,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::ChangeSpeed => "change_speed",
            Intent::ChangeAltitude => "change_altitude",
            Intent::ChangeDirection => "change_direction",
            Intent::Takeoff => "takeoff",
            Intent::Land => "land",
            Intent::Status => "status",
            Intent::SetBrakes => "set_brakes",
            Intent::ReleaseBrakes => "release_brakes",
        }
    }
}

impl fmt::Display for Intent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Intent {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "change_speed" => Ok(Intent::ChangeSpeed),
            "change_altitude" => Ok(Intent::ChangeAltitude),
            "change_direction" => Ok(Intent::ChangeDirection),
            "takeoff" | "take_off" => Ok(Intent::Takeoff),
            "land" => Ok(Intent::Land),
            "status" => Ok(Intent::Status),
            "set_brakes" => Ok(Intent::SetBrakes),
            "release_brakes" => Ok(Intent::ReleaseBrakes),
            other => Err(CommandError::UnknownIntent(other.to_string())),
        }
    }
}

/// Direction values for `change_direction` commands.
///
/// `Left`/`Right` are relative turns; the cardinal directions map to absolute
/// headings downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TurnDirection {
    Left,
    Right,
    North,
    South,
    East,
    West,
}

impl TurnDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            TurnDirection::Left => "left",
            TurnDirection::Right => "right",
            TurnDirection::North => "north",
            TurnDirection::South => "south",
            TurnDirection::East => "east",
            TurnDirection::West => "west",
        }
    }
}

impl fmt::Display for TurnDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TurnDirection {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "left" => Ok(TurnDirection::Left),
            "right" => Ok(TurnDirection::Right),
            "north" => Ok(TurnDirection::North),
            "south" => Ok(TurnDirection::South),
            "east" => Ok(TurnDirection::East),
            "west" => Ok(TurnDirection::West),
            other => Err(CommandError::UnknownDirection(other.to_string())),
        }
    }
}

/// Relative altitude change requested alongside `altitude_ft`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelativeChange {
    Increase,
    Decrease,
}

impl RelativeChange {
    pub fn as_str(&self) -> &'static str {
        match self {
            RelativeChange::Increase => "increase",
            RelativeChange::Decrease => "decrease",
        }
    }
}

impl fmt::Display for RelativeChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RelativeChange {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "increase" | "climb" => Ok(RelativeChange::Increase),
            "decrease" | "descend" => Ok(RelativeChange::Decrease),
            other => Err(CommandError::UnknownRelativeChange(other.to_string())),
        }
    }
}

/// Names of the command parameters.
///
/// This is the closed slot vocabulary shared by the parser, the dialogue
/// tracker, and the executor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotKey {
    SpeedValue,
    AltitudeFt,
    HeadingDeg,
    Direction,
    Relative,
}

impl SlotKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotKey::SpeedValue => "speed_value",
            SlotKey::AltitudeFt => "altitude_ft",
            SlotKey::HeadingDeg => "heading_deg",
            SlotKey::Direction => "direction",
            SlotKey::Relative => "relative",
        }
    }

    /// The three numeric slots, in the order they are reported.
    pub const NUMERIC: [SlotKey; 3] = [SlotKey::AltitudeFt, SlotKey::SpeedValue, SlotKey::HeadingDeg];
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Parameter values attached to a command.
///
/// Every field is optional: a parser reports only what the utterance carried,
/// and the dialogue tracker fills the rest from session state. Unrecognized
/// string values for `direction`/`relative` deserialize to `None` rather than
/// failing the whole command.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CommandParams {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed_value: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_ft: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_deg: Option<f64>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_direction"
    )]
    pub direction: Option<TurnDirection>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_relative"
    )]
    pub relative: Option<RelativeChange>,
}

impl CommandParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_speed(mut self, knots: f64) -> Self {
        self.speed_value = Some(knots);
        self
    }

    pub fn with_altitude(mut self, feet: f64) -> Self {
        self.altitude_ft = Some(feet);
        self
    }

    pub fn with_heading(mut self, degrees: f64) -> Self {
        self.heading_deg = Some(degrees);
        self
    }

    pub fn with_direction(mut self, direction: TurnDirection) -> Self {
        self.direction = Some(direction);
        self
    }

    pub fn with_relative(mut self, relative: RelativeChange) -> Self {
        self.relative = Some(relative);
        self
    }

    /// True when no field carries a value.
    pub fn is_empty(&self) -> bool {
        self.speed_value.is_none()
            && self.altitude_ft.is_none()
            && self.heading_deg.is_none()
            && self.direction.is_none()
            && self.relative.is_none()
    }

    /// True when the named slot carries a value.
    pub fn is_filled(&self, key: SlotKey) -> bool {
        match key {
            SlotKey::SpeedValue => self.speed_value.is_some(),
            SlotKey::AltitudeFt => self.altitude_ft.is_some(),
            SlotKey::HeadingDeg => self.heading_deg.is_some(),
            SlotKey::Direction => self.direction.is_some(),
            SlotKey::Relative => self.relative.is_some(),
        }
    }

    /// Read a numeric slot. Returns `None` for the non-numeric slots.
    pub fn numeric(&self, key: SlotKey) -> Option<f64> {
        match key {
            SlotKey::SpeedValue => self.speed_value,
            SlotKey::AltitudeFt => self.altitude_ft,
            SlotKey::HeadingDeg => self.heading_deg,
            SlotKey::Direction | SlotKey::Relative => None,
        }
    }

    /// Write a numeric slot. Writes to the non-numeric slots are ignored.
    pub fn set_numeric(&mut self, key: SlotKey, value: f64) {
        match key {
            SlotKey::SpeedValue => self.speed_value = Some(value),
            SlotKey::AltitudeFt => self.altitude_ft = Some(value),
            SlotKey::HeadingDeg => self.heading_deg = Some(value),
            SlotKey::Direction | SlotKey::Relative => {}
        }
    }

    /// Copy every non-`None` field of `incoming` over `self`.
    ///
    /// A `None` in `incoming` never clears an existing value.
    pub fn merge_non_null(&mut self, incoming: &CommandParams) {
        if incoming.speed_value.is_some() {
            self.speed_value = incoming.speed_value;
        }
        if incoming.altitude_ft.is_some() {
            self.altitude_ft = incoming.altitude_ft;
        }
        if incoming.heading_deg.is_some() {
            self.heading_deg = incoming.heading_deg;
        }
        if incoming.direction.is_some() {
            self.direction = incoming.direction;
        }
        if incoming.relative.is_some() {
            self.relative = incoming.relative;
        }
    }

    /// Fill every `None` field of `self` from `other`.
    ///
    /// Fields already set on `self` are never overwritten.
    pub fn fill_missing_from(&mut self, other: &CommandParams) {
        if self.speed_value.is_none() {
            self.speed_value = other.speed_value;
        }
        if self.altitude_ft.is_none() {
            self.altitude_ft = other.altitude_ft;
        }
        if self.heading_deg.is_none() {
            self.heading_deg = other.heading_deg;
        }
        if self.direction.is_none() {
            self.direction = other.direction;
        }
        if self.relative.is_none() {
            self.relative = other.relative;
        }
    }
}

/// A command as produced by an utterance parser.
///
/// `intent` is `None` when the parser could not name a command; the dialogue
/// tracker resolves it from session context. `source_text` carries the raw
/// utterance the parse came from so downstream merge logic can re-examine it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedCommand {
    #[serde(default, deserialize_with = "lenient_intent")]
    pub intent: Option<Intent>,
    #[serde(default, rename = "parameters")]
    pub params: CommandParams,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_text: Option<String>,
}

impl ParsedCommand {
    pub fn new(intent: Intent) -> Self {
        Self {
            intent: Some(intent),
            params: CommandParams::default(),
            source_text: None,
        }
    }

    /// A command with no usable intent, as a confused parser reports it.
    pub fn unresolved() -> Self {
        Self::default()
    }

    pub fn with_params(mut self, params: CommandParams) -> Self {
        self.params = params;
        self
    }

    pub fn with_source_text(mut self, text: impl Into<String>) -> Self {
        self.source_text = Some(text.into());
        self
    }
}

/// Result reported by a command executor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub success: bool,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

impl ExecutionOutcome {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }

    pub fn ok_with_data(message: impl Into<String>, data: serde_json::Value) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
        }
    }
}

// Parsers are unreliable; an unrecognized intent or enum string degrades to
// `None` instead of rejecting the whole command.
fn lenient_intent<'de, D>(deserializer: D) -> Result<Option<Intent>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().filter(|s| !s.is_empty()).and_then(|s| {
        s.parse::<Intent>()
            .map_err(|_| tracing::warn!("unknown intent from parser: {}", s))
            .ok()
    }))
}

fn lenient_direction<'de, D>(deserializer: D) -> Result<Option<TurnDirection>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().filter(|s| !s.is_empty()).and_then(|s| {
        s.parse::<TurnDirection>()
            .map_err(|_| tracing::warn!("unknown direction from parser: {}", s))
            .ok()
    }))
}

fn lenient_relative<'de, D>(deserializer: D) -> Result<Option<RelativeChange>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().filter(|s| !s.is_empty()).and_then(|s| {
        s.parse::<RelativeChange>()
            .map_err(|_| tracing::warn!("unknown relative change from parser: {}", s))
            .ok()
    }))
}
