use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use chrono::{DateTime, Utc};
use tokio::sync::oneshot;

use mentora_core::{ApiError, SlotApi};
use mentora_shared::{AvailabilitySlot, Booking, CreateBookingRequest, Notice, SessionUser};

/// Outcome of a booking attempt. Only `Failed` carries a backend error;
/// the other non-`Booked` variants are local refusals that never produced
/// a request.
#[derive(Debug)]
pub enum BookingAttempt {
    Booked(Booking),
    /// No signed-in user; booking needs an identity.
    NotAuthenticated,
    /// The slot is already marked booked locally.
    AlreadyBooked,
    /// The slot id is not in the loaded list.
    UnknownSlot,
    /// A request for this same slot is still outstanding.
    AlreadyInFlight,
    /// A newer attempt on another slot superseded this one mid-flight.
    Aborted,
    Failed(ApiError),
}

/// Slots with an end time still ahead of `now`. Booked slots stay in,
/// rendered as taken; what has fully elapsed is dropped.
pub fn filter_future_slots(
    slots: &[AvailabilitySlot],
    now: DateTime<Utc>,
) -> Vec<AvailabilitySlot> {
    slots
        .iter()
        .filter(|slot| slot.end_time > now)
        .cloned()
        .collect()
}

#[derive(Default)]
struct BoardState {
    slots: Vec<AvailabilitySlot>,
    notices: Vec<Notice>,
    in_flight: HashSet<String>,
    /// Abort handle for the most recent outstanding attempt. Starting a new
    /// attempt fires it, so at most one booking request settles visibly.
    abort: Option<(String, oneshot::Sender<()>)>,
}

/// A tutor's availability as seen by a browsing student, with the guarded
/// path from "click a slot" to a booked session.
pub struct SlotBoard<B> {
    backend: Arc<B>,
    state: Mutex<BoardState>,
}

impl<B> SlotBoard<B>
where
    B: SlotApi,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            state: Mutex::new(BoardState::default()),
        }
    }

    pub fn slots(&self) -> Vec<AvailabilitySlot> {
        self.state.lock().unwrap().slots.clone()
    }

    pub fn visible_slots(&self, now: DateTime<Utc>) -> Vec<AvailabilitySlot> {
        filter_future_slots(&self.state.lock().unwrap().slots, now)
    }

    pub fn drain_notices(&self) -> Vec<Notice> {
        std::mem::take(&mut self.state.lock().unwrap().notices)
    }

    /// Replaces the board with the tutor's current availability. A failed
    /// load clears the board rather than leaving stale slots clickable.
    pub async fn load_slots(&self, tutor_id: &str) -> Result<usize, ApiError> {
        match self.backend.slots_for_tutor(tutor_id).await {
            Ok(slots) => {
                let count = slots.len();
                self.state.lock().unwrap().slots = slots;
                Ok(count)
            }
            Err(err) => {
                tracing::warn!(tutor = tutor_id, error = %err, "failed to load slots");
                let mut state = self.state.lock().unwrap();
                state.slots.clear();
                state
                    .notices
                    .push(Notice::error("Could not load available slots"));
                Err(err)
            }
        }
    }

    /// Attempts to book `slot_id` for the signed-in student. All guards run
    /// before any request leaves the client; the local slot flips to booked
    /// only once the backend has accepted.
    pub async fn book_slot(
        &self,
        session: Option<&SessionUser>,
        slot_id: &str,
    ) -> BookingAttempt {
        let Some(user) = session else {
            self.push_notice(Notice::error("Please log in to book a session"));
            return BookingAttempt::NotAuthenticated;
        };

        let abort_rx = {
            let mut state = self.state.lock().unwrap();
            let Some(slot) = state.slots.iter().find(|slot| slot.id == slot_id) else {
                return BookingAttempt::UnknownSlot;
            };
            if slot.is_booked {
                state
                    .notices
                    .push(Notice::error("This slot is already booked"));
                return BookingAttempt::AlreadyBooked;
            }
            if state.in_flight.contains(slot_id) {
                tracing::debug!(slot = slot_id, "booking already in flight, ignoring");
                return BookingAttempt::AlreadyInFlight;
            }

            if let Some((superseded, tx)) = state.abort.take() {
                tracing::debug!(slot = %superseded, "superseding an outstanding booking attempt");
                let _ = tx.send(());
            }

            state.in_flight.insert(slot_id.to_string());
            let (tx, rx) = oneshot::channel();
            state.abort = Some((slot_id.to_string(), tx));
            rx
        };

        let request = CreateBookingRequest {
            student_id: user.id.clone(),
            slot_id: slot_id.to_string(),
        };

        let outcome = tokio::select! {
            // Resolves on an explicit abort and when the sender is dropped.
            _ = abort_rx => None,
            result = self.backend.create_booking(&request) => Some(result),
        };

        let mut state = self.state.lock().unwrap();
        state.in_flight.remove(slot_id);
        if let Some((pending, _)) = &state.abort {
            if pending == slot_id {
                state.abort = None;
            }
        }

        match outcome {
            None => BookingAttempt::Aborted,
            Some(Ok(booking)) => {
                if let Some(slot) = state.slots.iter_mut().find(|slot| slot.id == slot_id) {
                    slot.is_booked = true;
                }
                state.notices.push(Notice::success("Booking confirmed"));
                BookingAttempt::Booked(booking)
            }
            Some(Err(err)) => {
                tracing::warn!(slot = slot_id, error = %err, "booking rejected");
                state.notices.push(Notice::error(
                    err.surface_message("Could not book this slot"),
                ));
                BookingAttempt::Failed(err)
            }
        }
    }

    /// Aborts the outstanding attempt, if any. Used on teardown; the aborted
    /// attempt resolves silently.
    pub fn abort_pending(&self) {
        if let Some((slot, tx)) = self.state.lock().unwrap().abort.take() {
            tracing::debug!(slot = %slot, "aborting outstanding booking attempt");
            let _ = tx.send(());
        }
    }

    fn push_notice(&self, notice: Notice) {
        self.state.lock().unwrap().notices.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{Duration, TimeZone};
    use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
    use tokio::sync::Semaphore;

    use mentora_core::ApiResult;
    use mentora_shared::{BookingStatus, CreateSlotRequest, UserRole};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 10, 12, 0, 0).unwrap()
    }

    fn slot(id: &str, starts_in_hours: i64, is_booked: bool) -> AvailabilitySlot {
        let start_time = now() + Duration::hours(starts_in_hours);
        AvailabilitySlot {
            id: id.into(),
            start_time,
            end_time: start_time + Duration::hours(1),
            is_booked,
        }
    }

    fn student() -> SessionUser {
        SessionUser {
            id: "u1".into(),
            role: UserRole::Student,
        }
    }

    struct MockSlots {
        slots: Mutex<Vec<AvailabilitySlot>>,
        fail_load: AtomicBool,
        fail_booking: AtomicBool,
        gated: AtomicBool,
        gate: Semaphore,
        booking_calls: AtomicU64,
    }

    impl MockSlots {
        fn with_slots(slots: Vec<AvailabilitySlot>) -> Arc<Self> {
            Arc::new(Self {
                slots: Mutex::new(slots),
                fail_load: AtomicBool::new(false),
                fail_booking: AtomicBool::new(false),
                gated: AtomicBool::new(false),
                gate: Semaphore::new(0),
                booking_calls: AtomicU64::new(0),
            })
        }
    }

    #[async_trait]
    impl SlotApi for MockSlots {
        async fn slots_for_tutor(&self, _tutor_id: &str) -> ApiResult<Vec<AvailabilitySlot>> {
            if self.fail_load.load(Ordering::SeqCst) {
                return Err(ApiError::Transport("connection refused".into()));
            }
            Ok(self.slots.lock().unwrap().clone())
        }

        async fn own_slots(&self) -> ApiResult<Vec<AvailabilitySlot>> {
            Ok(self.slots.lock().unwrap().clone())
        }

        async fn create_slot(&self, request: &CreateSlotRequest) -> ApiResult<AvailabilitySlot> {
            Ok(AvailabilitySlot {
                id: "new".into(),
                start_time: request.start_time,
                end_time: request.end_time,
                is_booked: request.is_booked,
            })
        }

        async fn delete_slot(&self, _slot_id: &str) -> ApiResult<()> {
            Ok(())
        }

        async fn create_booking(&self, request: &CreateBookingRequest) -> ApiResult<Booking> {
            self.booking_calls.fetch_add(1, Ordering::SeqCst);
            if self.gated.load(Ordering::SeqCst) {
                self.gate.acquire().await.unwrap().forget();
            }
            if self.fail_booking.load(Ordering::SeqCst) {
                return Err(ApiError::Api {
                    status: 409,
                    message: Some("Slot already booked".into()),
                });
            }
            Ok(Booking {
                id: "b1".into(),
                student_id: request.student_id.clone(),
                tutor_id: "t1".into(),
                slot_id: request.slot_id.clone(),
                status: BookingStatus::Pending,
                slot: None,
                review: None,
            })
        }
    }

    async fn wait_for_calls(backend: &MockSlots, count: u64) {
        for _ in 0..200 {
            if backend.booking_calls.load(Ordering::SeqCst) >= count {
                return;
            }
            tokio::time::sleep(std::time::Duration::from_millis(5)).await;
        }
        panic!("backend never saw {count} booking call(s)");
    }

    #[tokio::test]
    async fn booking_requires_a_signed_in_user() {
        let backend = MockSlots::with_slots(vec![slot("s1", 4, false)]);
        let board = SlotBoard::new(backend.clone());
        board.load_slots("t1").await.unwrap();

        let attempt = board.book_slot(None, "s1").await;
        assert!(matches!(attempt, BookingAttempt::NotAuthenticated));
        assert_eq!(backend.booking_calls.load(Ordering::SeqCst), 0);

        let notices = board.drain_notices();
        assert_eq!(notices, vec![Notice::error("Please log in to book a session")]);
    }

    #[tokio::test]
    async fn booked_and_unknown_slots_are_refused_locally() {
        let backend = MockSlots::with_slots(vec![slot("s1", 4, true)]);
        let board = SlotBoard::new(backend.clone());
        board.load_slots("t1").await.unwrap();

        let attempt = board.book_slot(Some(&student()), "s1").await;
        assert!(matches!(attempt, BookingAttempt::AlreadyBooked));
        assert_eq!(
            board.drain_notices(),
            vec![Notice::error("This slot is already booked")]
        );

        let attempt = board.book_slot(Some(&student()), "missing").await;
        assert!(matches!(attempt, BookingAttempt::UnknownSlot));
        assert!(board.drain_notices().is_empty());

        assert_eq!(backend.booking_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn accepted_booking_flips_the_slot() {
        let backend = MockSlots::with_slots(vec![slot("s1", 4, false)]);
        let board = SlotBoard::new(backend.clone());
        board.load_slots("t1").await.unwrap();

        let attempt = board.book_slot(Some(&student()), "s1").await;
        let BookingAttempt::Booked(booking) = attempt else {
            panic!("expected a booking, got {attempt:?}");
        };
        assert_eq!(booking.slot_id, "s1");
        assert_eq!(booking.status, BookingStatus::Pending);

        assert!(board.slots()[0].is_booked);
        assert_eq!(board.drain_notices(), vec![Notice::success("Booking confirmed")]);
    }

    #[tokio::test]
    async fn rejected_booking_leaves_the_slot_open() {
        let backend = MockSlots::with_slots(vec![slot("s1", 4, false)]);
        backend.fail_booking.store(true, Ordering::SeqCst);
        let board = SlotBoard::new(backend.clone());
        board.load_slots("t1").await.unwrap();

        let attempt = board.book_slot(Some(&student()), "s1").await;
        assert!(matches!(attempt, BookingAttempt::Failed(ApiError::Api { status: 409, .. })));

        assert!(!board.slots()[0].is_booked);
        // The backend's own message wins over the generic fallback.
        assert_eq!(
            board.drain_notices(),
            vec![Notice::error("Slot already booked")]
        );

        // The board is usable again immediately.
        backend.fail_booking.store(false, Ordering::SeqCst);
        let attempt = board.book_slot(Some(&student()), "s1").await;
        assert!(matches!(attempt, BookingAttempt::Booked(_)));
    }

    #[tokio::test]
    async fn second_click_on_an_in_flight_slot_is_ignored() {
        let backend = MockSlots::with_slots(vec![slot("s1", 4, false)]);
        backend.gated.store(true, Ordering::SeqCst);
        let board = Arc::new(SlotBoard::new(backend.clone()));
        board.load_slots("t1").await.unwrap();

        let first = {
            let board = board.clone();
            tokio::spawn(async move { board.book_slot(Some(&student()), "s1").await })
        };
        wait_for_calls(&backend, 1).await;

        let second = board.book_slot(Some(&student()), "s1").await;
        assert!(matches!(second, BookingAttempt::AlreadyInFlight));
        assert_eq!(backend.booking_calls.load(Ordering::SeqCst), 1);

        backend.gate.add_permits(1);
        let first = first.await.unwrap();
        assert!(matches!(first, BookingAttempt::Booked(_)));
        assert_eq!(board.drain_notices(), vec![Notice::success("Booking confirmed")]);
    }

    #[tokio::test]
    async fn newer_attempt_supersedes_the_outstanding_one() {
        let backend = MockSlots::with_slots(vec![slot("s1", 4, false), slot("s2", 6, false)]);
        backend.gated.store(true, Ordering::SeqCst);
        let board = Arc::new(SlotBoard::new(backend.clone()));
        board.load_slots("t1").await.unwrap();

        let first = {
            let board = board.clone();
            tokio::spawn(async move { board.book_slot(Some(&student()), "s1").await })
        };
        wait_for_calls(&backend, 1).await;

        let second = {
            let board = board.clone();
            tokio::spawn(async move { board.book_slot(Some(&student()), "s2").await })
        };

        // The first attempt resolves silently, without waiting on its gate.
        let first = first.await.unwrap();
        assert!(matches!(first, BookingAttempt::Aborted));
        assert!(!board.slots()[0].is_booked);

        wait_for_calls(&backend, 2).await;
        backend.gate.add_permits(1);
        let second = second.await.unwrap();
        assert!(matches!(second, BookingAttempt::Booked(_)));

        // Only the surviving attempt produced a notice.
        assert_eq!(board.drain_notices(), vec![Notice::success("Booking confirmed")]);
        assert!(board.slots()[1].is_booked);
    }

    #[tokio::test]
    async fn explicit_abort_resolves_silently() {
        let backend = MockSlots::with_slots(vec![slot("s1", 4, false)]);
        backend.gated.store(true, Ordering::SeqCst);
        let board = Arc::new(SlotBoard::new(backend.clone()));
        board.load_slots("t1").await.unwrap();

        let attempt = {
            let board = board.clone();
            tokio::spawn(async move { board.book_slot(Some(&student()), "s1").await })
        };
        wait_for_calls(&backend, 1).await;

        board.abort_pending();
        let attempt = attempt.await.unwrap();
        assert!(matches!(attempt, BookingAttempt::Aborted));
        assert!(board.drain_notices().is_empty());
        assert!(!board.slots()[0].is_booked);
    }

    #[tokio::test]
    async fn failed_load_clears_the_board() {
        let backend = MockSlots::with_slots(vec![slot("s1", 4, false)]);
        let board = SlotBoard::new(backend.clone());
        board.load_slots("t1").await.unwrap();
        assert_eq!(board.slots().len(), 1);

        backend.fail_load.store(true, Ordering::SeqCst);
        assert!(board.load_slots("t1").await.is_err());
        assert!(board.slots().is_empty());
        assert_eq!(
            board.drain_notices(),
            vec![Notice::error("Could not load available slots")]
        );
    }

    #[test]
    fn future_filter_keeps_booked_but_drops_elapsed() {
        let slots = vec![slot("past", -3, false), slot("soon", 2, true), slot("later", 5, false)];
        let visible = filter_future_slots(&slots, now());
        let ids: Vec<&str> = visible.iter().map(|slot| slot.id.as_str()).collect();
        assert_eq!(ids, vec!["soon", "later"]);

        // Booked slots stay visible but are not bookable.
        assert!(!visible[0].is_bookable(now()));
        assert!(visible[1].is_bookable(now()));
    }
}
