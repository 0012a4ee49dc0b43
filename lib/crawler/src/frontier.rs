//! Crawl frontier
//!
//! FIFO queue of expansion tasks guarded by the visited registry. A task is
//! only enqueued after its identity has been claimed, so each reviewer and
//! item is expanded at most once. Depth and node budget bound the otherwise
//! unbounded reviewer/item graph.

use crate::task::{FrontierTask, SubmitOutcome, TaskState};
use ahash::AHashMap;
use coread_core::{ClaimOutcome, NodeKey, VisitedRegistry};
use serde::Serialize;
use std::collections::VecDeque;
use tracing::debug;

/// Counters for submissions the frontier turned away or dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct FrontierStats {
    pub queued: usize,
    pub duplicates: usize,
    pub pruned_depth: usize,
    pub pruned_budget: usize,
    pub rejected_closed: usize,
    pub abandoned: usize,
}

/// Lifecycle entry for a claimed identity.
#[derive(Debug, Clone, Copy)]
struct TaskSlot {
    state: TaskState,
    depth: u32,
}

pub struct Frontier {
    registry: VisitedRegistry,
    queue: VecDeque<FrontierTask>,
    states: AHashMap<NodeKey, TaskSlot>,
    max_depth: u32,
    max_nodes: usize,
    closed: bool,
    stats: FrontierStats,
}

impl Frontier {
    pub fn new(max_depth: u32, max_nodes: usize) -> Self {
        Self {
            registry: VisitedRegistry::new(),
            queue: VecDeque::new(),
            states: AHashMap::new(),
            max_depth,
            max_nodes,
            closed: false,
            stats: FrontierStats::default(),
        }
    }

    /// Enqueue `task` if it is within depth, within budget and unclaimed.
    /// Depth-rejected identities stay unclaimed.
    pub fn submit(&mut self, task: FrontierTask) -> SubmitOutcome {
        if self.closed {
            self.stats.rejected_closed += 1;
            return SubmitOutcome::Closed;
        }
        if task.depth > self.max_depth {
            self.stats.pruned_depth += 1;
            debug!(task = %task, max_depth = self.max_depth, "Depth limit reached, not expanding");
            return SubmitOutcome::DepthExceeded;
        }

        match self.registry.try_claim_within(&task.target, self.max_nodes) {
            ClaimOutcome::AlreadyClaimed => {
                self.stats.duplicates += 1;
                SubmitOutcome::AlreadyClaimed
            }
            ClaimOutcome::BudgetExhausted => {
                self.stats.pruned_budget += 1;
                debug!(task = %task, max_nodes = self.max_nodes, "Node budget exhausted, not expanding");
                SubmitOutcome::BudgetExhausted
            }
            ClaimOutcome::Claimed => {
                self.states.insert(
                    task.target.clone(),
                    TaskSlot {
                        state: TaskState::Queued,
                        depth: task.depth,
                    },
                );
                self.queue.push_back(task);
                self.stats.queued += 1;
                SubmitOutcome::Queued
            }
        }
    }

    /// Dequeue the next task and mark it in progress.
    pub fn pop(&mut self) -> Option<FrontierTask> {
        let task = self.queue.pop_front()?;
        self.settle(&task.target, TaskState::InProgress);
        Some(task)
    }

    pub fn complete(&mut self, target: &NodeKey) {
        self.settle(target, TaskState::Completed);
    }

    /// Mark a task failed. Its identity stays claimed, so it is never retried.
    pub fn fail(&mut self, target: &NodeKey) {
        self.settle(target, TaskState::Failed);
    }

    /// Terminal states are final; a late report cannot revive a task.
    fn settle(&mut self, target: &NodeKey, state: TaskState) {
        if let Some(slot) = self.states.get_mut(target) {
            if !slot.state.is_terminal() {
                slot.state = state;
            }
        }
    }

    /// Fail every task still marked in progress and return them with the
    /// depth they were submitted at. Only a worker that died without
    /// reporting back leaves one behind.
    pub fn fail_orphans(&mut self) -> Vec<FrontierTask> {
        let mut orphans = Vec::new();
        for (target, slot) in self.states.iter_mut() {
            if slot.state == TaskState::InProgress {
                slot.state = TaskState::Failed;
                orphans.push(FrontierTask {
                    target: target.clone(),
                    depth: slot.depth,
                });
            }
        }
        orphans.sort_by(|a, b| a.depth.cmp(&b.depth));
        orphans
    }

    /// Stop accepting tasks and drop whatever is still queued. Returns the
    /// number of tasks abandoned.
    pub fn close(&mut self) -> usize {
        self.closed = true;
        let mut abandoned = 0;
        for task in self.queue.drain(..) {
            if let Some(slot) = self.states.get_mut(&task.target) {
                slot.state = TaskState::Abandoned;
            }
            abandoned += 1;
        }
        self.stats.abandoned += abandoned;
        abandoned
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn state(&self, target: &NodeKey) -> Option<TaskState> {
        self.states.get(target).map(|slot| slot.state)
    }

    /// Tasks dequeued but not yet completed or failed.
    pub fn in_progress(&self) -> usize {
        self.states
            .values()
            .filter(|slot| slot.state == TaskState::InProgress)
            .count()
    }

    pub fn claimed_count(&self) -> usize {
        self.registry.claimed_count()
    }

    pub fn stats(&self) -> &FrontierStats {
        &self.stats
    }
}
