//! Reviewer ranking
//!
//! Scores every discovered reviewer against the seed and orders the ones with
//! a reportable similarity. Ordering depends only on the scores, never on the
//! order in which the crawl discovered reviewers.

use crate::distance::{rating_similarity, Similarity};
use coread_core::{RatingVector, ReviewGraph, ReviewerId, ReviewerNode};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use tracing::warn;

/// A reviewer scored against the seed. `similarity` is `None` when the two
/// vectors share no item.
#[derive(Debug, Clone, Serialize)]
pub struct ScoredReviewer {
    pub id: ReviewerId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    pub similarity: Option<f32>,
    pub overlap: usize,
}

impl ScoredReviewer {
    fn from_node(node: &ReviewerNode, similarity: Option<Similarity>) -> Self {
        Self {
            id: node.id.clone(),
            display_name: node.display_name.clone(),
            profile_url: node.profile_url.clone(),
            similarity: similarity.map(|s| s.score),
            overlap: similarity.map(|s| s.overlap).unwrap_or(0),
        }
    }
}

/// A reviewer in the primary ranked list.
#[derive(Debug, Clone, Serialize)]
pub struct RankedResult {
    pub id: ReviewerId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    pub similarity: f32,
    pub overlap: usize,
}

/// Final ranker output.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Ranking {
    /// Reportable reviewers, most similar first.
    pub ranked: Vec<RankedResult>,
    /// Reviewers with no overlap or with fewer shared items than required,
    /// ordered by identity.
    pub insufficient_overlap: Vec<ScoredReviewer>,
}

impl Ranking {
    pub fn ids(&self) -> Vec<&ReviewerId> {
        self.ranked.iter().map(|r| &r.id).collect()
    }
}

/// Orders scored reviewers by similarity, then overlap size, then identity.
#[derive(Debug, Clone)]
pub struct Ranker {
    min_overlap: usize,
}

impl Default for Ranker {
    fn default() -> Self {
        Self::new(1)
    }
}

impl Ranker {
    /// Create a ranker that reports a score only when at least `min_overlap`
    /// items are shared. Values below 1 are raised to 1.
    pub fn new(min_overlap: usize) -> Self {
        Self {
            min_overlap: min_overlap.max(1),
        }
    }

    pub fn min_overlap(&self) -> usize {
        self.min_overlap
    }

    /// Score every reviewer except the seed against the seed vector.
    pub fn score(
        &self,
        seed: &ReviewerId,
        seed_vector: &RatingVector,
        reviewers: &[ReviewerNode],
    ) -> Vec<ScoredReviewer> {
        reviewers
            .par_iter()
            .filter(|node| &node.id != seed)
            .map(|node| ScoredReviewer::from_node(node, rating_similarity(seed_vector, node.ratings())))
            .collect()
    }

    /// Split scored reviewers into the ranked list and the
    /// insufficient-overlap list, then sort both.
    pub fn rank(&self, scored: Vec<ScoredReviewer>) -> Ranking {
        let (reportable, mut insufficient): (Vec<_>, Vec<_>) = scored
            .into_iter()
            .partition(|s| s.similarity.is_some() && s.overlap >= self.min_overlap);

        let mut ranked: Vec<RankedResult> = reportable
            .into_iter()
            .filter_map(|s| {
                s.similarity.map(|similarity| RankedResult {
                    id: s.id,
                    display_name: s.display_name,
                    profile_url: s.profile_url,
                    similarity,
                    overlap: s.overlap,
                })
            })
            .collect();

        ranked.sort_by(compare_ranked);
        insufficient.sort_by(|a, b| a.id.cmp(&b.id));

        Ranking {
            ranked,
            insufficient_overlap: insufficient,
        }
    }

    /// Score all reviewers in `graph` against `seed`, record each defined
    /// similarity on its node and return the ranking.
    pub fn rank_graph(&self, graph: &ReviewGraph, seed: &ReviewerId) -> Ranking {
        let seed_vector = graph.vector_for(seed);
        let scored = self.score(seed, &seed_vector, &graph.reviewers());
        for s in &scored {
            if let Err(e) = graph.record_similarity(&s.id, s.similarity) {
                warn!(reviewer = %s.id, error = %e, "Could not record similarity");
            }
        }
        self.rank(scored)
    }
}

fn compare_ranked(a: &RankedResult, b: &RankedResult) -> Ordering {
    b.similarity
        .total_cmp(&a.similarity)
        .then_with(|| b.overlap.cmp(&a.overlap))
        .then_with(|| a.id.cmp(&b.id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use coread_core::{Item, ItemId, Rating};

    fn scored(id: &str, similarity: Option<f32>, overlap: usize) -> ScoredReviewer {
        ScoredReviewer {
            id: ReviewerId::from(id),
            display_name: format!("reader {}", id),
            profile_url: None,
            similarity,
            overlap,
        }
    }

    fn ids(ranking: &Ranking) -> Vec<&str> {
        ranking.ranked.iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn test_similarity_then_overlap() {
        let ranker = Ranker::default();
        let ranking = ranker.rank(vec![
            scored("1", Some(0.9), 2),
            scored("2", Some(0.9), 5),
            scored("3", Some(0.95), 1),
        ]);
        assert_eq!(ids(&ranking), vec!["3", "2", "1"]);
    }

    #[test]
    fn test_identity_tie_break() {
        let ranker = Ranker::default();
        let ranking = ranker.rank(vec![
            scored("b", Some(0.5), 2),
            scored("c", Some(0.5), 2),
            scored("a", Some(0.5), 2),
        ]);
        assert_eq!(ids(&ranking), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_undefined_reported_separately() {
        let ranker = Ranker::default();
        let ranking = ranker.rank(vec![
            scored("z", None, 0),
            scored("x", Some(0.0), 3),
            scored("y", None, 0),
        ]);
        assert_eq!(ids(&ranking), vec!["x"]);
        let insufficient: Vec<_> = ranking.insufficient_overlap.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(insufficient, vec!["y", "z"]);
    }

    #[test]
    fn test_min_overlap_threshold() {
        let ranker = Ranker::new(3);
        let ranking = ranker.rank(vec![scored("1", Some(1.0), 1), scored("2", Some(0.6), 3)]);
        assert_eq!(ids(&ranking), vec!["2"]);
        assert_eq!(ranking.insufficient_overlap.len(), 1);
        assert_eq!(Ranker::new(0).min_overlap(), 1);
    }

    #[test]
    fn test_rank_graph_skips_seed_and_records() {
        let graph = ReviewGraph::new();
        let seed = ReviewerId::from("seed");
        let item = |id: &str| Item::new(ItemId::from(id), id, 1).unwrap();
        let stars = |n: u8| Rating::new(n).unwrap();

        graph.merge_reviewer_items(&seed, "Seed", vec![(item("A"), stars(5)), (item("B"), stars(3))]);
        graph.merge_reviewer_items(&ReviewerId::from("twin"), "Twin", vec![(item("A"), stars(5)), (item("B"), stars(3))]);
        graph.merge_reviewer_items(&ReviewerId::from("far"), "Far", vec![(item("A"), stars(1))]);
        graph.upsert_reviewer(&ReviewerId::from("ghost"), None, None);

        let ranking = Ranker::default().rank_graph(&graph, &seed);
        assert_eq!(ids(&ranking), vec!["twin", "far"]);
        assert_eq!(ranking.insufficient_overlap[0].id.as_str(), "ghost");
        assert_eq!(graph.reviewer(&ReviewerId::from("twin")).unwrap().similarity(), Some(1.0));
        assert_eq!(graph.reviewer(&seed).unwrap().similarity(), None);
    }
}
