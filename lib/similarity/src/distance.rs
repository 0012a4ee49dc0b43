//! Rating-vector similarity
//!
//! Similarity is one minus the mean absolute rating difference over the items
//! both reviewers rated, scaled by the widest possible gap on a 1..=5 scale.
//! Scores lie in [0.0, 1.0] where 1.0 means identical ratings on every shared
//! item. With no shared item there is no evidence and the score is undefined.

use coread_core::{RatingVector, MAX_RATING, MIN_RATING};
use serde::Serialize;

/// Largest per-item rating difference.
pub const MAX_RATING_DISTANCE: f32 = (MAX_RATING - MIN_RATING) as f32;

/// A defined similarity together with the size of the overlap it is based on.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Similarity {
    pub score: f32,
    pub overlap: usize,
}

/// Number of items rated in both vectors.
pub fn overlap(a: &RatingVector, b: &RatingVector) -> usize {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.keys().filter(|item| large.contains_key(*item)).count()
}

/// Compute the similarity of `candidate` to `seed`.
///
/// # Returns
/// `None` when the vectors share no item, otherwise a score in [0.0, 1.0]
pub fn rating_similarity(seed: &RatingVector, candidate: &RatingVector) -> Option<Similarity> {
    let (small, large) = if seed.len() <= candidate.len() {
        (seed, candidate)
    } else {
        (candidate, seed)
    };

    let mut shared = 0usize;
    let mut total_distance = 0u32;
    for (item, rating) in small {
        if let Some(other) = large.get(item) {
            shared += 1;
            total_distance += u32::from(rating.distance(*other));
        }
    }

    if shared == 0 {
        return None;
    }

    let score = 1.0 - total_distance as f32 / (MAX_RATING_DISTANCE * shared as f32);
    Some(Similarity {
        score: score.clamp(0.0, 1.0),
        overlap: shared,
    })
}
