//! # coread Crawler
//!
//! Walks the reviewer/item graph outward from a seed reviewer:
//!
//! - [`ReviewSource`] - the fetch-and-extract collaborator the crawler calls
//! - [`Frontier`] - claimed-once task queue bounded by depth and node budget
//! - [`Crawler`] - bounded-concurrency scheduler with per-fetch timeout and a
//!   global deadline, producing a ranked [`CrawlReport`]
//! - [`SnapshotSource`] - offline source serving pages from a JSON snapshot
//!
//! ## Example
//!
//! ```rust,no_run
//! use coread_crawler::{CrawlConfig, Crawler, SnapshotSource};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let source = SnapshotSource::from_json_file("snapshot.json")?;
//! let crawler = Crawler::new(source, CrawlConfig::default().with_max_depth(2))?;
//! let report = crawler.run("https://example.org/user/show/91520258").await?;
//! for reader in &report.ranking.ranked {
//!     println!("{} {:.2}", reader.id, reader.similarity);
//! }
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod crawler;
pub mod error;
pub mod frontier;
pub mod report;
pub mod snapshot;
pub mod source;
pub mod task;

pub use config::CrawlConfig;
pub use crawler::Crawler;
pub use error::{CrawlError, CrawlResult, FetchError, ResolveError};
pub use frontier::{Frontier, FrontierStats};
pub use report::{CrawlReport, CrawlStats, SeedSummary, TaskFailure};
pub use snapshot::{PageAccess, Snapshot, SnapshotItem, SnapshotReviewer, SnapshotSource};
pub use source::{ItemEntry, ItemReviewer, ReviewSource, ReviewerPage};
pub use task::{FrontierTask, SubmitOutcome, TaskState};
