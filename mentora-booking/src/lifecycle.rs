use chrono::{DateTime, Utc};

use mentora_shared::{Booking, BookingStatus, UserRole};

/// An action a UI surface may offer for a booking. Which ones apply is
/// decided here and nowhere else, so list and detail views cannot drift.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BookingAction {
    /// Tutor accepts a pending request (PENDING -> CONFIRMED).
    Accept,
    /// Tutor declines a pending request (PENDING -> CANCELLED).
    Decline,
    /// Student withdraws (PENDING or CONFIRMED -> CANCELLED).
    Cancel,
    /// Either party closes out a finished session (CONFIRMED -> COMPLETED,
    /// only once the slot's end time has passed).
    MarkCompleted,
    /// Student reviews a completed, not-yet-reviewed session.
    LeaveReview,
    /// Admin override to an arbitrary status, guards bypassed.
    SetStatus(BookingStatus),
    /// Admin removal of the booking record.
    Delete,
}

impl BookingAction {
    /// Status this action moves the booking to, if it is a transition.
    pub fn target_status(self) -> Option<BookingStatus> {
        match self {
            BookingAction::Accept => Some(BookingStatus::Confirmed),
            BookingAction::Decline | BookingAction::Cancel => Some(BookingStatus::Cancelled),
            BookingAction::MarkCompleted => Some(BookingStatus::Completed),
            BookingAction::SetStatus(status) => Some(status),
            BookingAction::LeaveReview | BookingAction::Delete => None,
        }
    }
}

/// Actions legal for `role` on `booking` at `now`. Total over role x status;
/// the matches are deliberately exhaustive so a new role or status fails to
/// compile until this table is updated.
pub fn permitted_actions(
    role: UserRole,
    booking: &Booking,
    now: DateTime<Utc>,
) -> Vec<BookingAction> {
    let past_due = booking.is_past(now);

    match role {
        UserRole::Tutor => match booking.status {
            BookingStatus::Pending => vec![BookingAction::Accept, BookingAction::Decline],
            BookingStatus::Confirmed if past_due => vec![BookingAction::MarkCompleted],
            BookingStatus::Confirmed => Vec::new(),
            BookingStatus::Completed | BookingStatus::Cancelled => Vec::new(),
        },
        UserRole::Student => match booking.status {
            BookingStatus::Pending => vec![BookingAction::Cancel],
            BookingStatus::Confirmed => {
                let mut actions = vec![BookingAction::Cancel];
                if past_due {
                    actions.push(BookingAction::MarkCompleted);
                }
                actions
            }
            BookingStatus::Completed if booking.review.is_none() => {
                vec![BookingAction::LeaveReview]
            }
            BookingStatus::Completed | BookingStatus::Cancelled => Vec::new(),
        },
        // The admin override is an escape hatch, not a security boundary:
        // the backend validates these transitions independently.
        UserRole::Admin => {
            let mut actions: Vec<BookingAction> = BookingStatus::ALL
                .into_iter()
                .filter(|status| *status != booking.status)
                .map(BookingAction::SetStatus)
                .collect();
            actions.push(BookingAction::Delete);
            actions
        }
    }
}

/// Whether `role` may move a booking from `from` to `to`. `past_due` gates
/// the completion transition. Consulted before any status-change request is
/// dispatched.
pub fn transition_allowed(
    role: UserRole,
    from: BookingStatus,
    to: BookingStatus,
    past_due: bool,
) -> bool {
    if from == to {
        return false;
    }
    let completion = from == BookingStatus::Confirmed && to == BookingStatus::Completed && past_due;
    match role {
        UserRole::Admin => true,
        UserRole::Tutor => {
            matches!(
                (from, to),
                (BookingStatus::Pending, BookingStatus::Confirmed)
                    | (BookingStatus::Pending, BookingStatus::Cancelled)
            ) || completion
        }
        UserRole::Student => {
            matches!(
                (from, to),
                (BookingStatus::Pending, BookingStatus::Cancelled)
                    | (BookingStatus::Confirmed, BookingStatus::Cancelled)
            ) || completion
        }
    }
}

#[derive(Debug, thiserror::Error)]
#[error("transition {from:?} -> {to:?} is not permitted for role {role:?}")]
pub struct TransitionError {
    pub role: UserRole,
    pub from: BookingStatus,
    pub to: BookingStatus,
}

/// Checked form of [`transition_allowed`] for callers that want an error.
pub fn check_transition(
    role: UserRole,
    from: BookingStatus,
    to: BookingStatus,
    past_due: bool,
) -> Result<(), TransitionError> {
    if transition_allowed(role, from, to, past_due) {
        Ok(())
    } else {
        Err(TransitionError { role, from, to })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use mentora_shared::{ReviewRef, SlotWindow};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
    }

    fn booking(status: BookingStatus, ended_hours_ago: i64) -> Booking {
        let end_time = now() - Duration::hours(ended_hours_ago);
        Booking {
            id: "b1".into(),
            student_id: "u1".into(),
            tutor_id: "t1".into(),
            slot_id: "s1".into(),
            status,
            slot: Some(SlotWindow {
                start_time: end_time - Duration::hours(1),
                end_time,
            }),
            review: None,
        }
    }

    #[test]
    fn student_on_pending_may_only_cancel() {
        let actions = permitted_actions(UserRole::Student, &booking(BookingStatus::Pending, -24), now());
        assert_eq!(actions, vec![BookingAction::Cancel]);
        assert!(!actions.contains(&BookingAction::Accept));
    }

    #[test]
    fn tutor_on_pending_may_accept_or_decline() {
        let actions = permitted_actions(UserRole::Tutor, &booking(BookingStatus::Pending, -24), now());
        assert_eq!(actions, vec![BookingAction::Accept, BookingAction::Decline]);
    }

    #[test]
    fn completion_is_offered_only_after_the_slot_ends() {
        for role in [UserRole::Student, UserRole::Tutor] {
            let past = permitted_actions(role, &booking(BookingStatus::Confirmed, 2), now());
            assert!(past.contains(&BookingAction::MarkCompleted), "{role:?}");

            let upcoming = permitted_actions(role, &booking(BookingStatus::Confirmed, -2), now());
            assert!(!upcoming.contains(&BookingAction::MarkCompleted), "{role:?}");
        }
    }

    #[test]
    fn terminal_states_offer_nothing_to_non_admins() {
        for role in [UserRole::Student, UserRole::Tutor] {
            for status in [BookingStatus::Cancelled] {
                assert!(permitted_actions(role, &booking(status, 2), now()).is_empty());
            }
        }
        // Completed offers nothing to tutors; students may still review.
        assert!(permitted_actions(UserRole::Tutor, &booking(BookingStatus::Completed, 2), now())
            .is_empty());
    }

    #[test]
    fn review_is_offered_once_per_booking() {
        let mut completed = booking(BookingStatus::Completed, 2);
        let actions = permitted_actions(UserRole::Student, &completed, now());
        assert_eq!(actions, vec![BookingAction::LeaveReview]);

        completed.review = Some(ReviewRef {
            id: "r1".into(),
            rating: 5,
            comment: None,
        });
        assert!(permitted_actions(UserRole::Student, &completed, now()).is_empty());
    }

    #[test]
    fn admin_may_force_any_other_status_and_delete() {
        let actions = permitted_actions(UserRole::Admin, &booking(BookingStatus::Completed, 2), now());
        assert!(actions.contains(&BookingAction::SetStatus(BookingStatus::Pending)));
        assert!(actions.contains(&BookingAction::SetStatus(BookingStatus::Cancelled)));
        assert!(actions.contains(&BookingAction::Delete));
        assert!(!actions.contains(&BookingAction::SetStatus(BookingStatus::Completed)));
    }

    #[test]
    fn transition_table_matches_offered_actions() {
        // Non-admin legality is exactly the action set's transitions.
        assert!(transition_allowed(
            UserRole::Tutor,
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            false
        ));
        assert!(!transition_allowed(
            UserRole::Student,
            BookingStatus::Pending,
            BookingStatus::Confirmed,
            false
        ));
        assert!(transition_allowed(
            UserRole::Student,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            true
        ));
        assert!(!transition_allowed(
            UserRole::Student,
            BookingStatus::Confirmed,
            BookingStatus::Completed,
            false
        ));
        assert!(!transition_allowed(
            UserRole::Tutor,
            BookingStatus::Completed,
            BookingStatus::Pending,
            true
        ));
        // Admin bypasses every guard except the no-op move.
        assert!(transition_allowed(
            UserRole::Admin,
            BookingStatus::Cancelled,
            BookingStatus::Confirmed,
            false
        ));
        assert!(!transition_allowed(
            UserRole::Admin,
            BookingStatus::Pending,
            BookingStatus::Pending,
            false
        ));
    }
}
