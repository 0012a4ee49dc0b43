//! Offline review source
//!
//! Serves reviewer and item pages from a JSON snapshot instead of the live
//! site. The CLI crawls snapshots exported ahead of time; tests build them
//! in code. Pages can be marked private or broken and can carry an
//! artificial latency, which is how fetch failures and slow pages are
//! reproduced.

use crate::error::{FetchError, ResolveError};
use crate::source::{ItemEntry, ItemReviewer, ReviewSource, ReviewerPage};
use async_trait::async_trait;
use coread_core::{ItemId, NodeKey, ReviewerId};
use parking_lot::Mutex;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PageAccess {
    #[default]
    Public,
    /// Served as `FetchError::AccessDenied`.
    Private,
    /// Served as `FetchError::Malformed`.
    Broken,
}

impl PageAccess {
    fn check(self) -> Result<(), FetchError> {
        match self {
            PageAccess::Public => Ok(()),
            PageAccess::Private => Err(FetchError::AccessDenied),
            PageAccess::Broken => Err(FetchError::Malformed("unparseable page".to_string())),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotReviewer {
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub access: PageAccess,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub items: Vec<ItemEntry>,
}

impl SnapshotReviewer {
    pub fn new(display_name: impl Into<String>) -> Self {
        Self {
            display_name: display_name.into(),
            ..Self::default()
        }
    }

    pub fn profile(mut self, url: impl Into<String>) -> Self {
        self.profile_url = Some(url.into());
        self
    }

    /// Add an item with a raw rating label.
    pub fn rated(mut self, item: impl Into<ItemId>, title: impl Into<String>, label: &str) -> Self {
        self.items.push(ItemEntry {
            item_id: item.into(),
            title: title.into(),
            total_ratings: 0,
            rating_label: Some(label.to_string()),
        });
        self
    }

    /// Add an item the reviewer shelved without rating.
    pub fn unrated(mut self, item: impl Into<ItemId>, title: impl Into<String>) -> Self {
        self.items.push(ItemEntry {
            item_id: item.into(),
            title: title.into(),
            total_ratings: 0,
            rating_label: None,
        });
        self
    }

    pub fn entry(mut self, entry: ItemEntry) -> Self {
        self.items.push(entry);
        self
    }

    pub fn access(mut self, access: PageAccess) -> Self {
        self.access = access;
        self
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SnapshotItem {
    #[serde(default)]
    pub access: PageAccess,
    #[serde(default)]
    pub delay_ms: u64,
    #[serde(default)]
    pub reviewers: Vec<ItemReviewer>,
}

impl SnapshotItem {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn listed(mut self, reviewer: impl Into<ReviewerId>, profile_url: impl Into<String>) -> Self {
        self.reviewers.push(ItemReviewer {
            reviewer_id: Some(reviewer.into()),
            profile_url: profile_url.into(),
        });
        self
    }

    /// List a reviewer by profile URL only.
    pub fn listed_by_url(mut self, profile_url: impl Into<String>) -> Self {
        self.reviewers.push(ItemReviewer {
            reviewer_id: None,
            profile_url: profile_url.into(),
        });
        self
    }

    pub fn access(mut self, access: PageAccess) -> Self {
        self.access = access;
        self
    }

    pub fn delay_ms(mut self, ms: u64) -> Self {
        self.delay_ms = ms;
        self
    }
}

/// Serialized form of a snapshot file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub reviewers: HashMap<ReviewerId, SnapshotReviewer>,
    #[serde(default)]
    pub items: HashMap<ItemId, SnapshotItem>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_reviewer(mut self, id: impl Into<ReviewerId>, reviewer: SnapshotReviewer) -> Self {
        self.reviewers.insert(id.into(), reviewer);
        self
    }

    pub fn with_item(mut self, id: impl Into<ItemId>, item: SnapshotItem) -> Self {
        self.items.insert(id.into(), item);
        self
    }
}

/// [`ReviewSource`] backed by an in-memory [`Snapshot`].
#[derive(Debug)]
pub struct SnapshotSource {
    snapshot: Snapshot,
    profiles: HashMap<String, ReviewerId>,
    fetches: Mutex<HashMap<NodeKey, usize>>,
}

impl SnapshotSource {
    pub fn new(snapshot: Snapshot) -> Self {
        let profiles = snapshot
            .reviewers
            .iter()
            .filter_map(|(id, reviewer)| {
                reviewer
                    .profile_url
                    .as_ref()
                    .map(|url| (url.clone(), id.clone()))
            })
            .collect();

        Self {
            snapshot,
            profiles,
            fetches: Mutex::new(HashMap::new()),
        }
    }

    /// Load a snapshot from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> coread_core::Result<Self> {
        let data = std::fs::read_to_string(path)?;
        let snapshot: Snapshot = serde_json::from_str(&data)?;
        Ok(Self::new(snapshot))
    }

    /// How many times the page for `key` was requested.
    pub fn fetches(&self, key: &NodeKey) -> usize {
        self.fetches.lock().get(key).copied().unwrap_or(0)
    }

    pub fn total_fetches(&self) -> usize {
        self.fetches.lock().values().sum()
    }

    fn record(&self, key: NodeKey) {
        *self.fetches.lock().entry(key).or_insert(0) += 1;
    }
}

async fn simulate_latency(delay_ms: u64) {
    if delay_ms > 0 {
        tokio::time::sleep(Duration::from_millis(delay_ms)).await;
    }
}

#[async_trait]
impl ReviewSource for SnapshotSource {
    async fn fetch_reviewer_items(&self, reviewer: &ReviewerId) -> Result<ReviewerPage, FetchError> {
        self.record(NodeKey::Reviewer(reviewer.clone()));
        let page = self
            .snapshot
            .reviewers
            .get(reviewer)
            .ok_or(FetchError::NotFound)?;
        simulate_latency(page.delay_ms).await;
        page.access.check()?;

        Ok(ReviewerPage {
            display_name: page.display_name.clone(),
            items: page.items.clone(),
        })
    }

    async fn fetch_item_reviewers(&self, item: &ItemId) -> Result<Vec<ItemReviewer>, FetchError> {
        self.record(NodeKey::Item(item.clone()));
        let page = self.snapshot.items.get(item).ok_or(FetchError::NotFound)?;
        simulate_latency(page.delay_ms).await;
        page.access.check()?;
        Ok(page.reviewers.clone())
    }

    async fn resolve_reviewer(&self, profile_url: &str) -> Result<ReviewerId, ResolveError> {
        self.profiles
            .get(profile_url)
            .cloned()
            .ok_or_else(|| ResolveError::NotFound(profile_url.to_string()))
    }
}
