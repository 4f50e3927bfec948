use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use uuid::Uuid;

use mentora_core::{ApiError, ApiResult, BookingApi, CatalogApi, ReviewApi, SlotApi};
use mentora_shared::{
    AvailabilitySlot, Booking, BookingStatus, Category, CreateBookingRequest, CreateReviewRequest,
    CreateSlotRequest, DashboardSnapshot, Review, TutorProfile, TutorQuery, UpdateStatusRequest,
    UserRole,
};

use crate::app_config::BackendConfig;

/// Error body shape the backend uses; `message` and `error` both occur in
/// the wild depending on the handler.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    error: Option<String>,
}

fn transport(err: reqwest::Error) -> ApiError {
    ApiError::Transport(err.to_string())
}

async fn decode<T: DeserializeOwned>(response: Response) -> ApiResult<T> {
    response
        .json()
        .await
        .map_err(|err| ApiError::Parse(err.to_string()))
}

/// HTTP adapter for the marketplace backend. Sessions ride on cookies, so
/// the cookie store stays enabled and one `RestBackend` spans a sign-in.
pub struct RestBackend {
    http: Client,
    base_url: String,
}

impl RestBackend {
    pub fn new(config: &BackendConfig) -> ApiResult<Self> {
        let http = Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()
            .map_err(transport)?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Sends the request and turns a non-2xx answer into `ApiError::Api`,
    /// salvaging the server's own message from the body when there is one.
    async fn execute(
        &self,
        method: &str,
        path: &str,
        builder: RequestBuilder,
    ) -> ApiResult<Response> {
        let request_id = Uuid::new_v4();
        tracing::debug!(%request_id, method, path, "dispatching request");
        let response = builder.send().await.map_err(transport)?;
        let status = response.status();
        tracing::debug!(%request_id, status = status.as_u16(), "response received");

        if status.is_success() {
            return Ok(response);
        }
        let message = response
            .json::<ErrorBody>()
            .await
            .ok()
            .and_then(|body| body.message.or(body.error));
        Err(ApiError::Api {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl SlotApi for RestBackend {
    async fn slots_for_tutor(&self, tutor_id: &str) -> ApiResult<Vec<AvailabilitySlot>> {
        let path = format!("/availability-slots/tutor/{tutor_id}");
        let response = self.execute("GET", &path, self.http.get(self.url(&path))).await?;
        decode(response).await
    }

    async fn own_slots(&self) -> ApiResult<Vec<AvailabilitySlot>> {
        let path = "/availability-slots";
        let response = self.execute("GET", path, self.http.get(self.url(path))).await?;
        decode(response).await
    }

    async fn create_slot(&self, request: &CreateSlotRequest) -> ApiResult<AvailabilitySlot> {
        let path = "/availability-slots";
        let response = self
            .execute("POST", path, self.http.post(self.url(path)).json(request))
            .await?;
        decode(response).await
    }

    async fn delete_slot(&self, slot_id: &str) -> ApiResult<()> {
        let path = format!("/availability-slots/{slot_id}");
        self.execute("DELETE", &path, self.http.delete(self.url(&path)))
            .await?;
        Ok(())
    }

    async fn create_booking(&self, request: &CreateBookingRequest) -> ApiResult<Booking> {
        let path = "/bookings";
        let response = self
            .execute("POST", path, self.http.post(self.url(path)).json(request))
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl BookingApi for RestBackend {
    async fn bookings(&self, role: UserRole, user_id: &str) -> ApiResult<Vec<Booking>> {
        let path = "/bookings";
        let builder = self
            .http
            .get(self.url(path))
            .query(&[("role", role.as_str()), ("userId", user_id)]);
        let response = self.execute("GET", path, builder).await?;
        decode(response).await
    }

    async fn update_status(&self, booking_id: &str, status: BookingStatus) -> ApiResult<Booking> {
        let path = format!("/bookings/status/{booking_id}");
        let body = UpdateStatusRequest { status };
        let response = self
            .execute("PATCH", &path, self.http.patch(self.url(&path)).json(&body))
            .await?;
        decode(response).await
    }

    async fn delete_booking(&self, booking_id: &str) -> ApiResult<()> {
        let path = format!("/bookings/{booking_id}");
        self.execute("DELETE", &path, self.http.delete(self.url(&path)))
            .await?;
        Ok(())
    }

    async fn dashboard(&self) -> ApiResult<DashboardSnapshot> {
        let path = "/bookings/dashboard";
        let response = self.execute("GET", path, self.http.get(self.url(path))).await?;
        decode(response).await
    }
}

#[async_trait]
impl ReviewApi for RestBackend {
    async fn create_review(&self, request: &CreateReviewRequest) -> ApiResult<Review> {
        let path = "/reviews";
        let response = self
            .execute("POST", path, self.http.post(self.url(path)).json(request))
            .await?;
        decode(response).await
    }
}

#[async_trait]
impl CatalogApi for RestBackend {
    async fn tutors(&self, query: &TutorQuery) -> ApiResult<Vec<TutorProfile>> {
        let path = "/tutor-profiles";
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(search) = query.search.as_deref() {
            if !search.is_empty() {
                params.push(("search", search.to_string()));
            }
        }
        if let Some(is_featured) = query.is_featured {
            params.push(("isFeatured", is_featured.to_string()));
        }
        let response = self
            .execute("GET", path, self.http.get(self.url(path)).query(&params))
            .await?;
        decode(response).await
    }

    async fn tutor_details(&self, tutor_id: &str) -> ApiResult<TutorProfile> {
        let path = format!("/tutor-profiles/{tutor_id}");
        let response = self.execute("GET", &path, self.http.get(self.url(&path))).await?;
        decode(response).await
    }

    async fn categories(&self) -> ApiResult<Vec<Category>> {
        let path = "/categories";
        let response = self.execute("GET", path, self.http.get(self.url(path))).await?;
        decode(response).await
    }
}
