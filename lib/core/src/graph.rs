//! Review graph store
//!
//! Bipartite graph of reviewers and items joined by rated reviews. All state
//! sits behind one `RwLock`; the batch merge methods apply a whole fetch
//! result under a single write guard, so readers never observe a reviewer
//! vector that is only partly merged.

use crate::model::{Item, ItemId, Review, ReviewerId};
use crate::rating::Rating;
use crate::{Error, Result};
use ahash::{AHashMap, AHashSet};
use parking_lot::RwLock;

/// A reviewer's ratings keyed by item.
pub type RatingVector = AHashMap<ItemId, Rating>;

#[derive(Debug, Clone)]
pub struct ReviewerNode {
    pub id: ReviewerId,
    /// Empty when the source could not resolve a name.
    pub display_name: String,
    pub profile_url: Option<String>,
    reviews: RatingVector,
    similarity: Option<f32>,
}

impl ReviewerNode {
    fn new(id: ReviewerId) -> Self {
        Self {
            id,
            display_name: String::new(),
            profile_url: None,
            reviews: RatingVector::default(),
            similarity: None,
        }
    }

    #[inline]
    pub fn ratings(&self) -> &RatingVector {
        &self.reviews
    }

    #[inline]
    pub fn similarity(&self) -> Option<f32> {
        self.similarity
    }

    #[inline]
    pub fn review_count(&self) -> usize {
        self.reviews.len()
    }

    fn update_profile(&mut self, display_name: Option<&str>, profile_url: Option<&str>) {
        if let Some(name) = display_name.filter(|n| !n.is_empty()) {
            self.display_name = name.to_string();
        }
        if let Some(url) = profile_url.filter(|u| !u.is_empty()) {
            self.profile_url = Some(url.to_string());
        }
    }
}

#[derive(Debug, Default)]
struct GraphInner {
    reviewers: AHashMap<ReviewerId, ReviewerNode>,
    items: AHashMap<ItemId, Item>,
    reviewers_of: AHashMap<ItemId, AHashSet<ReviewerId>>,
}

impl GraphInner {
    fn reviewer_mut(&mut self, id: &ReviewerId) -> &mut ReviewerNode {
        self.reviewers
            .entry(id.clone())
            .or_insert_with(|| ReviewerNode::new(id.clone()))
    }

    fn add_review(&mut self, reviewer: &ReviewerId, item: Item, rating: Rating) -> Option<Rating> {
        let item_id = item.id().clone();
        // Items are immutable: the first construction seen wins.
        self.items.entry(item_id.clone()).or_insert(item);
        self.reviewers_of
            .entry(item_id.clone())
            .or_default()
            .insert(reviewer.clone());
        self.reviewer_mut(reviewer).reviews.insert(item_id, rating)
    }
}

/// Append-only reviewer/item graph shared by all crawl workers.
#[derive(Debug, Default)]
pub struct ReviewGraph {
    inner: RwLock<GraphInner>,
}

impl ReviewGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a reviewer node, filling in any profile fields provided.
    pub fn upsert_reviewer(&self, id: &ReviewerId, display_name: Option<&str>, profile_url: Option<&str>) {
        self.inner
            .write()
            .reviewer_mut(id)
            .update_profile(display_name, profile_url);
    }

    /// Record `reviewer` rating `item`. Both nodes are created if missing.
    /// A second call for the same pair overwrites the rating and returns the
    /// previous one.
    pub fn add_review(&self, reviewer: &ReviewerId, item: Item, rating: Rating) -> Option<Rating> {
        self.inner.write().add_review(reviewer, item, rating)
    }

    /// Merge one reviewer page atomically. Later entries for the same item
    /// overwrite earlier ones. Returns the size of the reviewer's vector
    /// after the merge.
    pub fn merge_reviewer_items<I>(&self, reviewer: &ReviewerId, display_name: &str, reviews: I) -> usize
    where
        I: IntoIterator<Item = (Item, Rating)>,
    {
        let mut inner = self.inner.write();
        inner.reviewer_mut(reviewer).update_profile(Some(display_name), None);
        for (item, rating) in reviews {
            inner.add_review(reviewer, item, rating);
        }
        inner.reviewers[reviewer].reviews.len()
    }

    /// Merge one item page atomically: every listed reviewer becomes a node
    /// and is recorded as a reviewer of `item`. The item must already exist.
    /// Returns how many reviewer nodes were new to the graph.
    pub fn merge_item_reviewers<I>(&self, item: &ItemId, reviewers: I) -> Result<usize>
    where
        I: IntoIterator<Item = (ReviewerId, Option<String>)>,
    {
        let mut inner = self.inner.write();
        if !inner.items.contains_key(item) {
            return Err(Error::UnknownItem(item.to_string()));
        }

        let mut added = 0;
        for (reviewer, profile_url) in reviewers {
            if !inner.reviewers.contains_key(&reviewer) {
                added += 1;
            }
            inner
                .reviewer_mut(&reviewer)
                .update_profile(None, profile_url.as_deref());
            inner
                .reviewers_of
                .entry(item.clone())
                .or_default()
                .insert(reviewer);
        }
        Ok(added)
    }

    /// The reviewer's ratings, empty for an unknown reviewer.
    pub fn vector_for(&self, reviewer: &ReviewerId) -> RatingVector {
        self.inner
            .read()
            .reviewers
            .get(reviewer)
            .map(|node| node.reviews.clone())
            .unwrap_or_default()
    }

    pub fn reviewers_of(&self, item: &ItemId) -> AHashSet<ReviewerId> {
        self.inner
            .read()
            .reviewers_of
            .get(item)
            .cloned()
            .unwrap_or_default()
    }

    /// Full reviews of a reviewer, ordered by item id.
    pub fn reviews_of(&self, reviewer: &ReviewerId) -> Vec<Review> {
        let inner = self.inner.read();
        let Some(node) = inner.reviewers.get(reviewer) else {
            return Vec::new();
        };
        let mut reviews: Vec<Review> = node
            .reviews
            .iter()
            .filter_map(|(item_id, rating)| {
                inner
                    .items
                    .get(item_id)
                    .map(|item| Review::new(item.clone(), *rating))
            })
            .collect();
        reviews.sort_by(|a, b| a.item.id().cmp(b.item.id()));
        reviews
    }

    pub fn reviewer(&self, id: &ReviewerId) -> Option<ReviewerNode> {
        self.inner.read().reviewers.get(id).cloned()
    }

    pub fn item(&self, id: &ItemId) -> Option<Item> {
        self.inner.read().items.get(id).cloned()
    }

    /// Snapshot of every reviewer node.
    pub fn reviewers(&self) -> Vec<ReviewerNode> {
        self.inner.read().reviewers.values().cloned().collect()
    }

    pub fn record_similarity(&self, reviewer: &ReviewerId, similarity: Option<f32>) -> Result<()> {
        let mut inner = self.inner.write();
        let node = inner
            .reviewers
            .get_mut(reviewer)
            .ok_or_else(|| Error::UnknownReviewer(reviewer.to_string()))?;
        node.similarity = similarity;
        Ok(())
    }

    pub fn reviewer_count(&self) -> usize {
        self.inner.read().reviewers.len()
    }

    pub fn item_count(&self) -> usize {
        self.inner.read().items.len()
    }

    pub fn review_count(&self) -> usize {
        self.inner
            .read()
            .reviewers
            .values()
            .map(|node| node.reviews.len())
            .sum()
    }
}
