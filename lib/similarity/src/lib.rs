//! # coread Similarity
//!
//! Scores reviewers against a seed reviewer by comparing the ratings they
//! gave to the same items, and ranks the results.
//!
//! ## Example
//!
//! ```rust
//! use coread_core::{ItemId, Rating, RatingVector};
//! use coread_similarity::rating_similarity;
//!
//! let r = |n| Rating::new(n).unwrap();
//! let seed: RatingVector = [(ItemId::from("A"), r(5)), (ItemId::from("B"), r(3)), (ItemId::from("C"), r(4))]
//!     .into_iter()
//!     .collect();
//! let candidate: RatingVector = [(ItemId::from("A"), r(5)), (ItemId::from("B"), r(1)), (ItemId::from("D"), r(2))]
//!     .into_iter()
//!     .collect();
//!
//! let sim = rating_similarity(&seed, &candidate).unwrap();
//! assert_eq!(sim.overlap, 2);
//! assert!((sim.score - 0.75).abs() < 1e-6);
//! ```

pub mod distance;
pub mod rerank;

pub use distance::{overlap, rating_similarity, Similarity, MAX_RATING_DISTANCE};
pub use rerank::{RankedResult, Ranker, Ranking, ScoredReviewer};
