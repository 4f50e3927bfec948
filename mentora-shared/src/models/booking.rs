use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Booking status in the lifecycle. `Completed` and `Cancelled` are terminal
/// for non-admin actors.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Pending,
    Confirmed,
    Completed,
    Cancelled,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Pending,
        BookingStatus::Confirmed,
        BookingStatus::Completed,
        BookingStatus::Cancelled,
    ];

    pub fn is_terminal(self) -> bool {
        matches!(self, BookingStatus::Completed | BookingStatus::Cancelled)
    }

    /// Human-facing label used in notices.
    pub fn label(self) -> &'static str {
        match self {
            BookingStatus::Pending => "Pending",
            BookingStatus::Confirmed => "Confirmed",
            BookingStatus::Completed => "Completed",
            BookingStatus::Cancelled => "Cancelled",
        }
    }
}

/// Time window of the slot a booking reserves, embedded in booking payloads.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SlotWindow {
    pub start_time: DateTime<Utc>,
    pub end_time: DateTime<Utc>,
}

/// Review attached to a booking, if one exists. At most one per booking.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRef {
    pub id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}

/// A student's reservation of a slot, carrying a lifecycle status.
///
/// The backend owns this record; the client holds render-only copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: String,
    pub student_id: String,
    pub tutor_id: String,
    pub slot_id: String,
    pub status: BookingStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot: Option<SlotWindow>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewRef>,
}

impl Booking {
    /// Whether the booked session is already over. A booking with no slot
    /// window counts as upcoming.
    pub fn is_past(&self, now: DateTime<Utc>) -> bool {
        self.slot
            .as_ref()
            .map(|slot| slot.end_time < now)
            .unwrap_or(false)
    }
}

/// Payload for `POST /bookings`. The backend assigns id, tutor and PENDING.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateBookingRequest {
    pub student_id: String,
    pub slot_id: String,
}

/// Payload for `PATCH /bookings/status/{id}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateStatusRequest {
    pub status: BookingStatus,
}
