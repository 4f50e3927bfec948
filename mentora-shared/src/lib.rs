pub mod models;

pub use models::booking::{
    Booking, BookingStatus, CreateBookingRequest, ReviewRef, SlotWindow, UpdateStatusRequest,
};
pub use models::catalog::{Category, TutorProfile, TutorQuery};
pub use models::dashboard::{BookingItem, BookingPhase, DashboardSnapshot, DashboardStats};
pub use models::identity::{SessionUser, UserRole};
pub use models::notice::{Notice, NoticeLevel};
pub use models::review::{CreateReviewRequest, Review};
pub use models::slot::{AvailabilitySlot, CreateSlotRequest};
