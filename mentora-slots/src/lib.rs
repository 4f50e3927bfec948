pub mod board;
pub mod planner;

pub use board::{filter_future_slots, BookingAttempt, SlotBoard};
pub use planner::{AvailabilityPlanner, PlanError};
