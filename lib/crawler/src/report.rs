//! Crawl output: the seed summary, the ranking and what the crawl did.

use crate::frontier::FrontierStats;
use coread_core::{NodeKey, Review, ReviewerId};
use coread_similarity::Ranking;
use serde::Serialize;
use std::fmt::Write;

#[derive(Debug, Clone, Serialize)]
pub struct SeedSummary {
    pub id: ReviewerId,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub profile_url: Option<String>,
    pub reviews: Vec<Review>,
}

/// A task that ended in failure, kept for the report.
#[derive(Debug, Clone, Serialize)]
pub struct TaskFailure {
    pub target: NodeKey,
    pub depth: u32,
    pub error: String,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct CrawlStats {
    pub completed: usize,
    pub failed: usize,
    #[serde(flatten)]
    pub frontier: FrontierStats,
    pub claimed_nodes: usize,
    pub reviewers: usize,
    pub items: usize,
    pub reviews: usize,
    pub deadline_hit: bool,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, Serialize)]
pub struct CrawlReport {
    pub seed: SeedSummary,
    pub ranking: Ranking,
    pub stats: CrawlStats,
    pub failures: Vec<TaskFailure>,
}

impl CrawlReport {
    /// Plain-text rendering for terminal output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let name = if self.seed.display_name.is_empty() {
            self.seed.id.as_str()
        } else {
            self.seed.display_name.as_str()
        };

        let _ = writeln!(out, "{} reviews:", name);
        for review in &self.seed.reviews {
            let _ = writeln!(out, "  {}", review);
        }

        let _ = writeln!(out);
        let _ = writeln!(out, "Similar readers ({}):", self.ranking.ranked.len());
        for (rank, reader) in self.ranking.ranked.iter().enumerate() {
            let label = if reader.display_name.is_empty() {
                reader.id.as_str()
            } else {
                reader.display_name.as_str()
            };
            let _ = writeln!(
                out,
                "  {:>3}. {:<30} similarity {:.3} over {} shared | {}",
                rank + 1,
                label,
                reader.similarity,
                reader.overlap,
                reader.profile_url.as_deref().unwrap_or("-"),
            );
        }

        if !self.ranking.insufficient_overlap.is_empty() {
            let _ = writeln!(
                out,
                "Insufficient overlap: {} readers",
                self.ranking.insufficient_overlap.len()
            );
        }

        let stats = &self.stats;
        let _ = writeln!(
            out,
            "Crawl: {} tasks completed, {} failed, {} nodes claimed, {} pruned by depth, {} by budget{} in {} ms",
            stats.completed,
            stats.failed,
            stats.claimed_nodes,
            stats.frontier.pruned_depth,
            stats.frontier.pruned_budget,
            if stats.deadline_hit { ", deadline reached" } else { "" },
            stats.elapsed_ms,
        );
        out
    }
}
