//! Crawler error types

use thiserror::Error;

/// Failure reported by a [`ReviewSource`](crate::ReviewSource) fetch. Every
/// variant fails only the task that triggered it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    #[error("fetch timed out")]
    Timeout,

    #[error("page not found")]
    NotFound,

    #[error("access denied")]
    AccessDenied,

    #[error("malformed page: {0}")]
    Malformed(String),
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("no reviewer behind profile {0}")]
    NotFound(String),

    #[error("profile fetch failed: {0}")]
    Fetch(#[from] FetchError),
}

#[derive(Error, Debug)]
pub enum CrawlError {
    #[error("Seed reviewer could not be resolved from {reference}: {source}")]
    SeedUnresolved {
        reference: String,
        #[source]
        source: ResolveError,
    },


    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Ranking task failed: {0}")]
    Ranking(#[from] tokio::task::JoinError),

    #[error(transparent)]
    Core(#[from] coread_core::Error),
}

pub type CrawlResult<T> = std::result::Result<T, CrawlError>;
