use std::sync::Arc;

use mentora_core::{ApiError, CatalogApi};
use mentora_shared::{Category, TutorProfile, TutorQuery};

/// Read-only browsing of tutor profiles and categories. Stateless by
/// design; the listings change rarely and callers cache what they render.
pub struct TutorDirectory<B> {
    backend: Arc<B>,
}

impl<B> TutorDirectory<B>
where
    B: CatalogApi,
{
    pub fn new(backend: Arc<B>) -> Self {
        Self { backend }
    }

    pub async fn browse(&self, query: &TutorQuery) -> Result<Vec<TutorProfile>, DirectoryError> {
        let tutors = self.backend.tutors(query).await?;
        tracing::debug!(count = tutors.len(), "tutor listing fetched");
        Ok(tutors)
    }

    pub async fn featured(&self) -> Result<Vec<TutorProfile>, DirectoryError> {
        self.browse(&TutorQuery::featured()).await
    }

    /// Full profile for one tutor. A backend 404 becomes `TutorNotFound`, so
    /// callers can render a "no such tutor" page instead of a raw failure.
    pub async fn tutor_details(&self, tutor_id: &str) -> Result<TutorProfile, DirectoryError> {
        if tutor_id.is_empty() {
            return Err(DirectoryError::MissingId);
        }
        match self.backend.tutor_details(tutor_id).await {
            Ok(profile) => Ok(profile),
            Err(ApiError::Api { status: 404, .. }) => {
                Err(DirectoryError::TutorNotFound(tutor_id.to_string()))
            }
            Err(err) => Err(DirectoryError::Backend(err)),
        }
    }

    pub async fn categories(&self) -> Result<Vec<Category>, DirectoryError> {
        Ok(self.backend.categories().await?)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    #[error("a tutor id is required")]
    MissingId,

    #[error("no tutor profile with id {0}")]
    TutorNotFound(String),

    #[error(transparent)]
    Backend(#[from] ApiError),
}
