use async_trait::async_trait;

use mentora_shared::{
    AvailabilitySlot, Booking, BookingStatus, Category, CreateBookingRequest, CreateReviewRequest,
    CreateSlotRequest, DashboardSnapshot, Review, TutorProfile, TutorQuery, UserRole,
};

use crate::error::ApiResult;

/// Availability-slot access: the student-facing slot listing plus the
/// tutor-side publishing surface. Booking creation lives here because it is
/// the act of taking a slot.
#[async_trait]
pub trait SlotApi: Send + Sync {
    /// `GET /availability-slots/tutor/{tutorId}`. Order is the backend's.
    async fn slots_for_tutor(&self, tutor_id: &str) -> ApiResult<Vec<AvailabilitySlot>>;

    /// `GET /availability-slots`, the signed-in tutor's own slots.
    async fn own_slots(&self) -> ApiResult<Vec<AvailabilitySlot>>;

    /// `POST /availability-slots`.
    async fn create_slot(&self, request: &CreateSlotRequest) -> ApiResult<AvailabilitySlot>;

    /// `DELETE /availability-slots/{id}`.
    async fn delete_slot(&self, slot_id: &str) -> ApiResult<()>;

    /// `POST /bookings`. The backend resolves conflicts and assigns PENDING.
    async fn create_booking(&self, request: &CreateBookingRequest) -> ApiResult<Booking>;
}

/// Booking list access and lifecycle mutations.
#[async_trait]
pub trait BookingApi: Send + Sync {
    /// `GET /bookings?role={role}&userId={id}`, filtered server-side.
    async fn bookings(&self, role: UserRole, user_id: &str) -> ApiResult<Vec<Booking>>;

    /// `PATCH /bookings/status/{bookingId}`. The server is the source of
    /// truth and may reject a transition the client considered legal.
    async fn update_status(&self, booking_id: &str, status: BookingStatus) -> ApiResult<Booking>;

    /// `DELETE /bookings/{bookingId}` (admin only, enforced server-side too).
    async fn delete_booking(&self, booking_id: &str) -> ApiResult<()>;

    /// `GET /bookings/dashboard` for the signed-in user.
    async fn dashboard(&self) -> ApiResult<DashboardSnapshot>;
}

/// Review submission.
#[async_trait]
pub trait ReviewApi: Send + Sync {
    /// `POST /reviews`.
    async fn create_review(&self, request: &CreateReviewRequest) -> ApiResult<Review>;
}

/// Read-only marketplace catalog.
#[async_trait]
pub trait CatalogApi: Send + Sync {
    /// `GET /tutor-profiles`, empty query values omitted.
    async fn tutors(&self, query: &TutorQuery) -> ApiResult<Vec<TutorProfile>>;

    /// `GET /tutor-profiles/{id}`.
    async fn tutor_details(&self, tutor_id: &str) -> ApiResult<TutorProfile>;

    /// `GET /categories`.
    async fn categories(&self) -> ApiResult<Vec<Category>>;
}
