use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};

use mentora_core::{ApiError, SlotApi};
use mentora_shared::{AvailabilitySlot, CreateSlotRequest, Notice};

#[derive(Default)]
struct PlannerState {
    slots: Vec<AvailabilitySlot>,
    notices: Vec<Notice>,
}

/// A tutor's own availability: publishing new slots and retiring old ones.
/// Mutations refetch the list afterwards, since the backend may reorder or
/// merge windows.
pub struct AvailabilityPlanner<B> {
    backend: Arc<B>,
    state: Mutex<PlannerState>,
}

impl<B> AvailabilityPlanner<B>
where
    B: SlotApi,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Mutex::new(PlannerState::default()),
        }
    }

    pub fn slots(&self) -> Vec<AvailabilitySlot> {
        self.state.lock().unwrap().slots.clone()
    }

    pub fn drain_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.lock().unwrap().notices)
    }

    /// On failure the previous list is retained; unlike the student-facing
    /// board, stale rows here are not clickable into a payment flow.
    pub async fn load_own_slots(&self) -> Result<usize, PlanError> {
        match self.backend.own_slots().await {
            Ok(slots) => {
                let count = slots.len();
                self.state.lock().unwrap().slots = slots;
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(error = %err, "failed to load own slots");
                self.push_notice(Notice::error("Could not load your slots"));
                Err(PlanError::Backend(err))
            }
        }
    }

    /// Publishes a new availability window. The end-after-start check runs
    /// locally; an inverted window never produces a request.
    pub async fn publish_slot(
        &self,
        start_time: DateTime<Utc>,
        end_time: DateTime<Utc>,
    ) -> Result<AvailabilitySlot, PlanError> {
        if end_time <= start_time {
            self.push_notice(Notice::error("End time must be after start time"));
            return Err(PlanError::EndNotAfterStart);
        }

        let request = CreateSlotRequest {
            start_time,
            end_time,
            is_booked: false,
        };
        match self.backend.create_slot(&request).await {
            Ok(slot) => {
                tracing::info!(slot = %slot.id, "published availability slot");
                self.push_notice(Notice::success("Slot has been created"));
                let _ = self.load_own_slots().await;
                Ok(slot)
            }
            Err(err) => {
                self.push_notice(Notice::error(err.surface_message("Could not create slot")));
                Err(PlanError::Backend(err))
            }
        }
    }

    pub async fn remove_slot(&self, slot_id: &str) -> Result<(), PlanError> {
        match self.backend.delete_slot(slot_id).await {
            Ok(()) => {
                self.push_notice(Notice::success("Deleted"));
                let _ = self.load_own_slots().await;
                Ok(())
            }
            Err(err) => {
                tracing::warn!(slot = slot_id, error = %err, "slot deletion rejected");
                self.push_notice(Notice::error(err.surface_message("Could not delete slot")));
                Err(PlanError::Backend(err))
            }
        }
    }

    fn push_notice(&self, notice: Notice) {
        self.state.lock().unwrap().notices.push(notice);
    }
}

#[derive(Debug, thiserror::Error)]
pub enum PlanError {
    #[error("end time must be after start time")]
    EndNotAfterStart,

    #[error(transparent)]
    Backend(#[from] ApiError),
}
