use chrono::{DateTime, Utc};

use mentora_shared::{Booking, BookingStatus, DashboardStats};

/// Counters a list view can derive from bookings it already holds. Earnings
/// and distinct-student counts need backend data, so they stay `None` here;
/// the dashboard endpoint fills them in.
pub fn stats_from_bookings(bookings: &[Booking], now: DateTime<Utc>) -> DashboardStats {
    let mut stats = DashboardStats {
        total_bookings: bookings.len() as u32,
        ..DashboardStats::default()
    };

    for booking in bookings {
        match booking.status {
            BookingStatus::Pending | BookingStatus::Confirmed => {
                if !booking.is_past(now) {
                    stats.upcoming_bookings += 1;
                }
            }
            BookingStatus::Completed => stats.completed_bookings += 1,
            BookingStatus::Cancelled => {}
        }
    }

    stats
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};
    use mentora_shared::SlotWindow;

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
    fn counts_split_by_status_and_time() {
        let bookings = vec![
            booking(BookingStatus::Pending, -24),
            booking(BookingStatus::Confirmed, -2),
            // Confirmed but already over: not upcoming, not completed yet.
            booking(BookingStatus::Confirmed, 2),
            booking(BookingStatus::Completed, 48),
            booking(BookingStatus::Cancelled, -6),
        ];

        let stats = stats_from_bookings(&bookings, now());
        assert_eq!(stats.total_bookings, 5);
        assert_eq!(stats.upcoming_bookings, 2);
        assert_eq!(stats.completed_bookings, 1);
        assert_eq!(stats.total_earnings, None);
        assert_eq!(stats.total_students, None);
    }

    #[test]
    fn booking_without_a_window_counts_as_upcoming() {
        let mut detached = booking(BookingStatus::Confirmed, 2);
        detached.slot = None;

        let stats = stats_from_bookings(&[detached], now());
        assert_eq!(stats.upcoming_bookings, 1);
    }

    #[test]
    fn empty_list_yields_zeroes() {
        let stats = stats_from_bookings(&[], now());
        assert_eq!(stats, DashboardStats::default());
    }
}
