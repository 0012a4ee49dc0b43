//! # coread Core
//!
//! Core library for coread.
//!
//! This crate provides the data model shared by the crawler and the
//! similarity engine:
//!
//! - [`Rating`] and [`normalize`] - qualitative labels to a 1..=5 scale
//! - [`Item`], [`Review`], [`ReviewerId`], [`ItemId`] - validated graph records
//! - [`ReviewGraph`] - lock-guarded bipartite reviewer/item graph
//! - [`VisitedRegistry`] - atomic at-most-once claims on identities
//!
//! ## Example
//!
//! ```rust
//! use coread_core::{normalize, Item, ItemId, ReviewGraph, ReviewerId};
//!
//! let graph = ReviewGraph::new();
//! let reader = ReviewerId::from("91520258");
//! let item = Item::new(ItemId::from("/book/show/5907"), "The Hobbit", 4_000_000).unwrap();
//!
//! if let Some(rating) = normalize("really liked it") {
//!     graph.add_review(&reader, item, rating);
//! }
//! assert_eq!(graph.vector_for(&reader).len(), 1);
//! ```

pub mod error;
pub mod graph;
pub mod model;
pub mod rating;
pub mod visited;

pub use error::{Error, Result};
pub use graph::{RatingVector, ReviewGraph, ReviewerNode};
pub use model::{Item, ItemId, NodeKey, Review, ReviewerId};
pub use rating::{normalize, Rating, MAX_RATING, MIN_RATING};
pub use visited::{ClaimOutcome, VisitedRegistry};
