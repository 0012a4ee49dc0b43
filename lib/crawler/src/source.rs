//! Collaborator interface between the crawler and whatever fetches and
//! extracts source pages.

use crate::error::{FetchError, ResolveError};
use async_trait::async_trait;
use coread_core::{ItemId, ReviewerId};
use serde::{Deserialize, Serialize};

/// One row of a reviewer's reading list, as extracted from the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemEntry {
    pub item_id: ItemId,
    pub title: String,
    pub total_ratings: i64,
    /// Raw qualitative label. `None` when the reader left the item unrated.
    #[serde(default)]
    pub rating_label: Option<String>,
}

/// A reviewer's page: their name and every item on their reading list.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReviewerPage {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

/// A reviewer listed on an item page. Sources that cannot read the
/// canonical id off the page leave `reviewer_id` empty; the crawler then
/// resolves it from the profile URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemReviewer {
    #[serde(default)]
    pub reviewer_id: Option<ReviewerId>,
    pub profile_url: String,
}

/// Fetch-and-extract collaborator. Implementations own networking, retries
/// and page structure; the crawler only sees typed records.
#[async_trait]
pub trait ReviewSource: Send + Sync + 'static {
    async fn fetch_reviewer_items(&self, reviewer: &ReviewerId) -> Result<ReviewerPage, FetchError>;

    async fn fetch_item_reviewers(&self, item: &ItemId) -> Result<Vec<ItemReviewer>, FetchError>;

    async fn resolve_reviewer(&self, profile_url: &str) -> Result<ReviewerId, ResolveError>;
}
