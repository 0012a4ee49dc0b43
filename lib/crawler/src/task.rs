use coread_core::{ItemId, NodeKey, ReviewerId};
use serde::Serialize;
use std::fmt;

/// A unit of crawl work: expand the reviewer or item named by `target`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FrontierTask {
    pub target: NodeKey,
    pub depth: u32,
}

impl FrontierTask {
    pub fn reviewer(id: ReviewerId, depth: u32) -> Self {
        Self {
            target: NodeKey::Reviewer(id),
            depth,
        }
    }

    pub fn item(id: ItemId, depth: u32) -> Self {
        Self {
            target: NodeKey::Item(id),
            depth,
        }
    }
}

impl fmt::Display for FrontierTask {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}@{}", self.target, self.depth)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskState {
    Queued,
    InProgress,
    Completed,
    Failed,
    /// Still queued when the crawl deadline closed the frontier.
    Abandoned,
}

impl TaskState {
    pub fn is_terminal(self) -> bool {
        matches!(self, TaskState::Completed | TaskState::Failed | TaskState::Abandoned)
    }
}

/// Why `submit` did or did not enqueue a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Queued,
    AlreadyClaimed,
    DepthExceeded,
    BudgetExhausted,
    Closed,
}
