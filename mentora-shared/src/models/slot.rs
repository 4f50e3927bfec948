use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A tutor-published, bookable time interval.
///
/// Identifiers are opaque strings minted by the backend; the client never
/// generates or rewrites them.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilitySlot {
    pub id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
}

impl AvailabilitySlot {
    /// A slot can be offered for booking iff it is unbooked and has not ended.
    pub fn is_bookable(&self, now: DateTime<Utc>) -> bool {
        !self.is_booked && self.end_time > now
    }
}

/// Payload for publishing a new slot. The backend assigns the identifier.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSlotRequest {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
    pub is_booked: bool,
}
