use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A product category in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: String,
    pub title: String,
    pub created_at: DateTime<Utc>,
}

/// Payload for creating a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryCreate {
    #[serde(default)]
    pub title: String,
}

/// Payload for updating a category.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CategoryPatch {
    pub title: Option<String>,
}
