use serde::{Deserialize, Serialize};

/// Payload for `POST /reviews`. Only creatable for a COMPLETED booking that
/// carries no review yet; the backend enforces the same rule.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub booking_id: String,
    pub tutor_id: String,
    pub rating: u8,
    pub comment: String,
}

/// A created review as returned by the backend. Immutable thereafter.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    pub id: String,
    pub booking_id: String,
    pub tutor_id: String,
    pub rating: u8,
    #[serde(default)]
    pub comment: Option<String>,
}
