pub mod dashboard;
pub mod desk;
pub mod lifecycle;
pub mod review;

pub use dashboard::stats_from_bookings;
pub use desk::{BookingDesk, Confirmation, DeskError};
pub use lifecycle::{check_transition, permitted_actions, transition_allowed, BookingAction};
pub use review::{Rating, ReviewDraft, ReviewError};
