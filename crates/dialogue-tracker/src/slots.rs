//! Required-slot table and pending-slot computation.

use flight_command::{CommandParams, Intent, SlotKey};

/// Required parameters per intent.
///
/// `change_direction` lists both `heading_deg` and `direction` even though a
/// turn typically needs only one of them; callers treat the pending list as
/// advisory, not blocking.
pub fn required_slots(intent: Intent) -> &'static [SlotKey] {
    match intent {
        Intent::ChangeSpeed => &[SlotKey::SpeedValue],
        Intent::ChangeAltitude => &[SlotKey::AltitudeFt],
        Intent::ChangeDirection => &[SlotKey::HeadingDeg, SlotKey::Direction],
        Intent::Takeoff
        | Intent::Land
        | Intent::Status
        | Intent::SetBrakes
        | Intent::ReleaseBrakes => &[],
    }
}

/// Required slots for `intent` not yet present in `slots`, in table order.
pub fn pending_slots(intent: Option<Intent>, slots: &CommandParams) -> Vec<SlotKey> {
    let Some(intent) = intent else {
        return Vec::new();
    };
    required_slots(intent)
        .iter()
        .copied()
        .filter(|key| !slots.is_filled(*key))
        .collect()
}
