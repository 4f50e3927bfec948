use serde::{Deserialize, Serialize};

/// Subject category, e.g. "Mathematics".
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub name: String,
}

/// Public tutor profile as listed in the marketplace directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TutorProfile {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub headline: Option<String>,
    #[serde(default)]
    pub hourly_rate: Option<f64>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub total_reviews: Option<u32>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub is_featured: bool,
}

/// Listing filter. Empty or unset values are omitted from the request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TutorQuery {
    pub search: Option<String>,
    pub is_featured: Option<bool>,
}

impl TutorQuery {
    pub fn search(term: impl Into<String>) -> Self {
        Self {
            search: Some(term.into()),
            is_featured: None,
        }
    }

    pub fn featured() -> Self {
        Self {
            search: None,
            is_featured: Some(true),
        }
    }
}
