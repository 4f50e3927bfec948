use mentora_shared::CreateReviewRequest;

/// Star rating constrained to the 1..=5 range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rating(u8);

impl Rating {
    pub const MIN: u8 = 1;
    pub const MAX: u8 = 5;

    pub fn new(value: u8) -> Result<Self, ReviewError> {
        if (Self::MIN..=Self::MAX).contains(&value) {
            Ok(Self(value))
        } else {
            Err(ReviewError::RatingOutOfRange(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl Default for Rating {
    /// The review form opens preset to five stars.
    fn default() -> Self {
        Self(Self::MAX)
    }
}

/// An in-progress review for a completed booking. The draft outlives a
/// failed submission so the user can retry without retyping.
#[derive(Debug, Clone)]
pub struct ReviewDraft {
    pub booking_id: String,
    pub tutor_id: String,
    rating: Rating,
    comment: String,
}

impl ReviewDraft {
    pub fn new(booking_id: impl Into<String>, tutor_id: impl Into<String>) -> Self {
        Self {
            booking_id: booking_id.into(),
            tutor_id: tutor_id.into(),
            rating: Rating::default(),
            comment: String::new(),
        }
    }

    pub fn set_rating(&mut self, value: u8) -> Result<(), ReviewError> {
        self.rating = Rating::new(value)?;
        Ok(())
    }

    pub fn rating(&self) -> u8 {
        self.rating.value()
    }

    pub fn set_comment(&mut self, text: impl Into<String>) {
        self.comment = text.into();
    }

    pub fn comment(&self) -> &str {
        &self.comment
    }

    pub fn to_request(&self) -> CreateReviewRequest {
        CreateReviewRequest {
            booking_id: self.booking_id.clone(),
            tutor_id: self.tutor_id.clone(),
            rating: self.rating.value(),
            comment: self.comment.clone(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReviewError {
    #[error("rating {0} is outside the 1-5 range")]
    RatingOutOfRange(u8),
}
