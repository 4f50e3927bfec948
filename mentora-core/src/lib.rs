pub mod api;
pub mod error;
pub mod session;

pub use api::{BookingApi, CatalogApi, ReviewApi, SlotApi};
pub use error::{ApiError, ApiResult};
pub use session::{SessionProvider, StaticSessionProvider};
