//! # coread
//!
//! Finds readers who share your reading history.
//!
//! Starting from a seed reader, coread crawls the bipartite graph of readers
//! and the items they rated, scores every reader it meets by how closely
//! their ratings agree with the seed's on shared items, and ranks them.
//!
//! ## Quick Start
//!
//! ### As a CLI
//!
//! ```bash
//! coread --snapshot shelves.json https://example.org/user/show/91520258 --max-depth 2
//! ```
//!
//! ### As a Library
//!
//! ```rust,no_run
//! use coread::prelude::*;
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SnapshotSource::from_json_file("shelves.json")?;
//! let crawler = Crawler::new(source, CrawlConfig::default())?;
//! let report = crawler.run("91520258").await?;
//! println!("{}", report.render_text());
//! # Ok(())
//! # }
//! ```
//!
//! ## Crate Structure
//!
//! - `coread-core` - ratings, items, the review graph and the visited registry
//! - `coread-similarity` - overlap similarity and reviewer ranking
//! - `coread-crawler` - review source trait, frontier and crawl scheduler
//!
//! ## Similarity
//!
//! For the items both readers rated, similarity is
//! `1 - sum(|seed - other|) / (4 * shared)`: 1.0 for identical ratings, 0.0
//! for opposite ends of the 1..=5 scale on every shared item. Readers with no
//! shared item have no score and are listed separately.

// Re-export core types
pub use coread_core::{
    normalize, ClaimOutcome, Error, Item, ItemId, NodeKey, Rating, RatingVector, Result, Review,
    ReviewGraph, ReviewerId, ReviewerNode, VisitedRegistry,
};

// Re-export similarity
pub use coread_similarity::{rating_similarity, RankedResult, Ranker, Ranking, ScoredReviewer, Similarity};

// Re-export crawler
pub use coread_crawler::{
    CrawlConfig, CrawlError, CrawlReport, CrawlStats, Crawler, FetchError, FrontierTask, ResolveError,
    ReviewSource, Snapshot, SnapshotSource,
};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::{
        normalize, rating_similarity, CrawlConfig, CrawlError, CrawlReport, Crawler, Item, ItemId, Rating,
        Ranker, Ranking, ReviewGraph, ReviewSource, ReviewerId, Snapshot, SnapshotSource,
    };
}
