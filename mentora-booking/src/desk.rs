use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use mentora_core::{ApiError, BookingApi, ReviewApi};
use mentora_shared::{Booking, BookingStatus, DashboardStats, Notice, SessionUser};

use crate::dashboard::stats_from_bookings;
use crate::lifecycle::{check_transition, permitted_actions, BookingAction, TransitionError};
use crate::review::ReviewDraft;

/// Answer to the "are you sure" prompt that must precede a deletion.
/// Modeled as data so the coordinator stays free of interactive I/O.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Confirmation {
    Confirmed,
    Dismissed,
}

#[derive(Debug, Default)]
struct DeskState {
    bookings: Vec<Booking>,
    notices: Vec<Notice>,
}

/// Booking list and action dispatcher for one signed-in viewer.
///
/// Holds the render-only copy of the viewer's bookings; every mutation is
/// validated against the lifecycle table before a request is dispatched and
/// applied locally only after the backend acknowledged it.
pub struct BookingDesk<B> {
    backend: Arc<B>,
    state: Mutex<DeskState>,
}

impl<B> BookingDesk<B>
where
    B: BookingApi + ReviewApi,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Mutex::new(DeskState::default()),
        }
    }

    /// Snapshot of the local booking list, in backend order.
    pub fn bookings(&self) -> Vec<Booking> {
        self.state.lock().unwrap().bookings.clone()
    }

    /// Pending notices, handing ownership to the render layer.
    pub fn drain_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.lock().unwrap().notices)
    }

    /// Actions the viewer may take on a booking, per the lifecycle table.
    /// Unknown bookings get none.
    pub fn actions_for(
        &self,
        viewer: &SessionUser,
        booking_id: &str,
        now: DateTime<Utc>,
    ) -> Vec<BookingAction> {
        let state = self.state.lock().unwrap();
        state
            .bookings
            .iter()
            .find(|booking| booking.id == booking_id)
            .map(|booking| permitted_actions(viewer.role, booking, now))
            .unwrap_or_default()
    }

    /// Counters derived locally from the loaded list, so list views can
    /// render stats without another round trip.
    pub fn local_stats(&self, now: DateTime<Utc>) -> DashboardStats {
        let state = self.state.lock().unwrap();
        stats_from_bookings(&state.bookings, now)
    }

    /// Replaces the local list with the backend's view for this user.
    /// On failure the previous list is retained and a notice is surfaced.
    pub async fn load_bookings(&self, viewer: &SessionUser) -> Result<usize, DeskError> {
        match self.backend.bookings(viewer.role, &viewer.id).await {
            Ok(bookings) => {
                let count = bookings.len();
                self.state.lock().unwrap().bookings = bookings;
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(user = %viewer.id, error = %err, "failed to load bookings");
                self.push_notice(Notice::error("Could not load bookings"));
                Err(DeskError::Backend(err))
            }
        }
    }

    /// Moves a booking to `new_status`, checking legality against the
    /// transition table before any request leaves the client. The local
    /// status flips only after the backend acknowledged the change.
    pub async fn update_status(
        &self,
        viewer: &SessionUser,
        booking_id: &str,
        new_status: BookingStatus,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        {
            let state = self.state.lock().unwrap();
            let booking = state
                .bookings
                .iter()
                .find(|booking| booking.id == booking_id)
                .ok_or_else(|| DeskError::NotFound(booking_id.to_string()))?;
            check_transition(viewer.role, booking.status, new_status, booking.is_past(now))?;
        }

        match self.backend.update_status(booking_id, new_status).await {
            Ok(_) => {
                let mut state = self.state.lock().unwrap();
                if let Some(booking) = state
                    .bookings
                    .iter_mut()
                    .find(|booking| booking.id == booking_id)
                {
                    booking.status = new_status;
                }
                state.notices.push(Notice::success(format!(
                    "Booking {}",
                    new_status.label().to_ascii_lowercase()
                )));
                Ok(())
            }
            Err(err) => {
                tracing::warn!(booking = booking_id, error = %err, "status update rejected");
                self.push_notice(Notice::error(
                    err.surface_message("Could not update booking"),
                ));
                Err(DeskError::Backend(err))
            }
        }
    }

    /// Deletes a booking record. Admin only, and never without an explicit
    /// confirmation; a dismissed prompt is a silent no-op.
    pub async fn delete_booking(
        &self,
        viewer: &SessionUser,
        booking_id: &str,
        confirmation: Confirmation,
    ) -> Result<(), DeskError> {
        if viewer.role != mentora_shared::UserRole::Admin {
            return Err(DeskError::DeleteForbidden);
        }
        if confirmation == Confirmation::Dismissed {
            tracing::debug!(booking = booking_id, "deletion dismissed at the prompt");
            return Ok(());
        }

        match self.backend.delete_booking(booking_id).await {
            Ok(()) => {
                let mut state = self.state.lock().unwrap();
                state.bookings.retain(|booking| booking.id != booking_id);
                state.notices.push(Notice::success("Booking deleted"));
                Ok(())
            }
            Err(err) => {
                self.push_notice(Notice::error(
                    err.surface_message("Could not delete booking"),
                ));
                Err(DeskError::Backend(err))
            }
        }
    }

    /// Opens a review draft for a completed, not-yet-reviewed booking.
    pub fn open_review(
        &self,
        viewer: &SessionUser,
        booking_id: &str,
        now: DateTime<Utc>,
    ) -> Result<ReviewDraft, DeskError> {
        let state = self.state.lock().unwrap();
        let booking = state
            .bookings
            .iter()
            .find(|booking| booking.id == booking_id)
            .ok_or_else(|| DeskError::NotFound(booking_id.to_string()))?;

        if !permitted_actions(viewer.role, booking, now).contains(&BookingAction::LeaveReview) {
            return Err(DeskError::ReviewNotPermitted);
        }
        Ok(ReviewDraft::new(&booking.id, &booking.tutor_id))
    }

    /// Submits a review draft. Success triggers a full refetch, since the new
    /// review changes aggregates the client cannot derive locally; on failure
    /// the draft stays valid for a retry.
    pub async fn submit_review(
        &self,
        viewer: &SessionUser,
        draft: &ReviewDraft,
        now: DateTime<Utc>,
    ) -> Result<(), DeskError> {
        {
            let state = self.state.lock().unwrap();
            let booking = state
                .bookings
                .iter()
                .find(|booking| booking.id == draft.booking_id)
                .ok_or_else(|| DeskError::NotFound(draft.booking_id.clone()))?;
            if !permitted_actions(viewer.role, booking, now).contains(&BookingAction::LeaveReview) {
                return Err(DeskError::ReviewNotPermitted);
            }
        }

        match self.backend.create_review(&draft.to_request()).await {
            Ok(review) => {
                tracing::info!(booking = %draft.booking_id, review = %review.id, "review submitted");
                self.push_notice(Notice::success("Review submitted"));
                // Refetch failures surface their own notice.
                let _ = self.load_bookings(viewer).await;
                Ok(())
            }
            Err(err) => {
                self.push_notice(Notice::error(
                    err.surface_message("Could not submit review"),
                ));
                Err(DeskError::Backend(err))
            }
        }
    }

    fn push_notice(&self, notice: Notice) {
        self.state.lock().unwrap().notices.push(notice);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DeskError {
    #[error("booking not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    NotPermitted(#[from] TransitionError),

    #[error("deletion requires the admin role")]
    DeleteForbidden,

    #[error("this booking cannot be reviewed")]
    ReviewNotPermitted,

    #[error(transparent)]
    Backend(#[from] ApiError),
}
