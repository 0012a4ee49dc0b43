//! Crawl scheduler
//!
//! A coordinator owns the frontier and keeps at most `concurrency` expansion
//! tasks in flight on a `JoinSet`. Each task calls the review source, merges
//! the result into the shared graph and hands the identities it discovered
//! back to the coordinator, which submits them as children at `depth + 1`.
//! The crawl ends once the queue is empty and every in-flight task has
//! settled, or early when the global deadline closes the frontier.

use crate::config::CrawlConfig;
use crate::error::{CrawlError, CrawlResult, FetchError, ResolveError};
use crate::frontier::Frontier;
use crate::report::{CrawlReport, CrawlStats, SeedSummary, TaskFailure};
use crate::source::ReviewSource;
use crate::task::FrontierTask;
use coread_core::{normalize, Item, ItemId, NodeKey, ReviewGraph, ReviewerId};
use coread_similarity::Ranker;
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::{debug, error, info, instrument, warn};

/// Result of one task, reported back to the coordinator.
struct TaskOutcome {
    task: FrontierTask,
    result: Result<Vec<FrontierTask>, FetchError>,
}

/// Per-task execution context, cloned into each spawned task.
struct Expander<S> {
    source: Arc<S>,
    graph: Arc<ReviewGraph>,
    fetch_timeout: Duration,
}

impl<S> Clone for Expander<S> {
    fn clone(&self) -> Self {
        Self {
            source: self.source.clone(),
            graph: self.graph.clone(),
            fetch_timeout: self.fetch_timeout,
        }
    }
}

impl<S: ReviewSource> Expander<S> {
    async fn execute(self, task: FrontierTask) -> TaskOutcome {
        let result = match &task.target {
            NodeKey::Reviewer(id) => self.expand_reviewer(id, task.depth).await,
            NodeKey::Item(id) => self.expand_item(id, task.depth).await,
        };
        TaskOutcome { task, result }
    }

    async fn fetch<T, F>(&self, fut: F) -> Result<T, FetchError>
    where
        F: Future<Output = Result<T, FetchError>>,
    {
        tokio::time::timeout(self.fetch_timeout, fut)
            .await
            .unwrap_or(Err(FetchError::Timeout))
    }

    async fn resolve(&self, profile_url: &str) -> Result<ReviewerId, ResolveError> {
        tokio::time::timeout(self.fetch_timeout, self.source.resolve_reviewer(profile_url))
            .await
            .unwrap_or(Err(ResolveError::Fetch(FetchError::Timeout)))
    }

    /// Fetch a reviewer's reading list, keep the rated and valid entries and
    /// merge them as one batch. Every rated item becomes a child task.
    async fn expand_reviewer(&self, id: &ReviewerId, depth: u32) -> Result<Vec<FrontierTask>, FetchError> {
        let page = self.fetch(self.source.fetch_reviewer_items(id)).await?;

        let listed = page.items.len();
        let mut reviews = Vec::with_capacity(listed);
        for entry in page.items {
            let Some(rating) = entry.rating_label.as_deref().and_then(normalize) else {
                continue;
            };
            match Item::new(entry.item_id, &entry.title, entry.total_ratings) {
                Ok(item) => reviews.push((item, rating)),
                Err(e) => warn!(reviewer = %id, error = %e, "Skipping invalid item record"),
            }
        }

        let children = reviews
            .iter()
            .map(|(item, _)| FrontierTask::item(item.id().clone(), depth + 1))
            .collect();
        let rated = self
            .graph
            .merge_reviewer_items(id, &page.display_name, reviews);

        debug!(reviewer = %id, depth, listed, rated, "Reviewer expanded");
        Ok(children)
    }

    /// Fetch the reviewers of an item, resolving any listed only by profile
    /// URL. An entry that cannot be resolved is skipped on its own.
    async fn expand_item(&self, id: &ItemId, depth: u32) -> Result<Vec<FrontierTask>, FetchError> {
        let listed = self.fetch(self.source.fetch_item_reviewers(id)).await?;

        let mut reviewers = Vec::with_capacity(listed.len());
        for entry in listed {
            let reviewer = match entry.reviewer_id {
                Some(reviewer) => reviewer,
                None => match self.resolve(&entry.profile_url).await {
                    Ok(reviewer) => reviewer,
                    Err(e) => {
                        warn!(item = %id, profile = %entry.profile_url, error = %e, "Skipping unresolvable reviewer");
                        continue;
                    }
                },
            };
            reviewers.push((reviewer, Some(entry.profile_url)));
        }

        let children = reviewers
            .iter()
            .map(|(reviewer, _)| FrontierTask::reviewer(reviewer.clone(), depth + 1))
            .collect();
        let added = self
            .graph
            .merge_item_reviewers(id, reviewers)
            .map_err(|e| FetchError::Malformed(e.to_string()))?;

        debug!(item = %id, depth, added, "Item expanded");
        Ok(children)
    }
}

/// Crawls the review graph outward from a seed reviewer and ranks every
/// reviewer it finds by similarity to the seed.
pub struct Crawler<S> {
    source: Arc<S>,
    config: CrawlConfig,
}

impl<S: ReviewSource> Crawler<S> {
    pub fn new(source: S, config: CrawlConfig) -> CrawlResult<Self> {
        Self::with_shared_source(Arc::new(source), config)
    }

    pub fn with_shared_source(source: Arc<S>, config: CrawlConfig) -> CrawlResult<Self> {
        config.validate()?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &CrawlConfig {
        &self.config
    }

    /// Resolve a seed reference: a profile URL goes through the source, a
    /// bare identifier is taken as the canonical reviewer id.
    async fn resolve_seed(&self, reference: &str) -> CrawlResult<ReviewerId> {
        let reference = reference.trim();
        let unresolved = |source| CrawlError::SeedUnresolved {
            reference: reference.to_string(),
            source,
        };

        if reference.is_empty() {
            return Err(unresolved(ResolveError::NotFound(String::new())));
        }
        if !reference.contains("://") {
            return Ok(ReviewerId::from(reference));
        }

        tokio::time::timeout(self.config.fetch_timeout(), self.source.resolve_reviewer(reference))
            .await
            .unwrap_or(Err(ResolveError::Fetch(FetchError::Timeout)))
            .map_err(unresolved)
    }

    /// Run one crawl from `seed_reference` and rank the result.
    ///
    /// Only a seed reference that cannot be resolved is an error. Every
    /// fetch failure, the seed's own page included, is recorded in the
    /// report; a seed without a readable page ranks nobody.
    #[instrument(skip(self), fields(max_depth = self.config.max_depth, max_nodes = self.config.max_nodes))]
    pub async fn run(&self, seed_reference: &str) -> CrawlResult<CrawlReport> {
        let started = Instant::now();
        let seed = self.resolve_seed(seed_reference).await?;
        let seed_key = NodeKey::Reviewer(seed.clone());
        info!(seed = %seed, "Starting crawl");

        let graph = Arc::new(ReviewGraph::new());
        let seed_url = seed_reference.contains("://").then(|| seed_reference.trim());
        graph.upsert_reviewer(&seed, None, seed_url);

        let expander = Expander {
            source: self.source.clone(),
            graph: graph.clone(),
            fetch_timeout: self.config.fetch_timeout(),
        };

        let mut frontier = Frontier::new(self.config.max_depth, self.config.max_nodes);
        frontier.submit(FrontierTask::reviewer(seed.clone(), 0));

        let deadline = tokio::time::sleep_until(started + self.config.deadline());
        tokio::pin!(deadline);

        let mut in_flight: JoinSet<TaskOutcome> = JoinSet::new();
        let mut failures = Vec::new();
        let mut completed = 0usize;
        let mut deadline_hit = false;

        loop {
            while in_flight.len() < self.config.concurrency {
                let Some(task) = frontier.pop() else { break };
                in_flight.spawn(expander.clone().execute(task));
            }
            if in_flight.is_empty() {
                break;
            }

            let joined = tokio::select! {
                joined = in_flight.join_next() => joined,
                _ = &mut deadline, if !deadline_hit => {
                    deadline_hit = true;
                    let abandoned = frontier.close();
                    warn!(abandoned, in_flight = in_flight.len(), "Crawl deadline reached, settling in-flight tasks");
                    continue;
                }
            };
            let Some(joined) = joined else { break };

            let outcome = match joined {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!(error = %e, "Crawl task aborted");
                    continue;
                }
            };

            match outcome.result {
                Ok(children) => {
                    frontier.complete(&outcome.task.target);
                    completed += 1;
                    for child in children {
                        frontier.submit(child);
                    }
                }
                Err(e) => {
                    frontier.fail(&outcome.task.target);
                    if outcome.task.target == seed_key {
                        error!(seed = %seed, error = %e, "Seed page could not be fetched, nothing to rank against");
                    } else {
                        warn!(task = %outcome.task, error = %e, "Crawl task failed");
                    }
                    failures.push(TaskFailure {
                        target: outcome.task.target,
                        depth: outcome.task.depth,
                        error: e.to_string(),
                    });
                }
            }
        }

        for task in frontier.fail_orphans() {
            warn!(task = %task, "Crawl task aborted without reporting back");
            failures.push(TaskFailure {
                target: task.target,
                depth: task.depth,
                error: "task aborted".to_string(),
            });
        }

        let ranker = Ranker::new(self.config.min_overlap);
        let ranking = {
            let graph = graph.clone();
            let seed = seed.clone();
            tokio::task::spawn_blocking(move || ranker.rank_graph(&graph, &seed)).await?
        };

        let seed_node = graph.reviewer(&seed);
        let seed_summary = SeedSummary {
            id: seed.clone(),
            display_name: seed_node
                .as_ref()
                .map(|node| node.display_name.clone())
                .unwrap_or_default(),
            profile_url: seed_node.and_then(|node| node.profile_url),
            reviews: graph.reviews_of(&seed),
        };

        let stats = CrawlStats {
            completed,
            failed: failures.len(),
            frontier: frontier.stats().clone(),
            claimed_nodes: frontier.claimed_count(),
            reviewers: graph.reviewer_count(),
            items: graph.item_count(),
            reviews: graph.review_count(),
            deadline_hit,
            elapsed_ms: started.elapsed().as_millis() as u64,
        };

        info!(
            ranked = ranking.ranked.len(),
            completed = stats.completed,
            failed = stats.failed,
            claimed = stats.claimed_nodes,
            deadline_hit,
            "Crawl finished"
        );

        Ok(CrawlReport {
            seed: seed_summary,
            ranking,
            stats,
            failures,
        })
    }
}
