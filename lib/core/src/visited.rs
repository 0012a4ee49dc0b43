//! Visited registry
//!
//! Records every reviewer and item identity that has been claimed for
//! expansion. The check and the insert happen under a single lock, so two
//! workers racing on the same identity can never both win the claim.

use crate::model::NodeKey;
use ahash::AHashSet;
use parking_lot::Mutex;

/// Result of a budget-aware claim.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClaimOutcome {
    /// The identity was unclaimed and is now owned by the caller.
    Claimed,
    /// Someone claimed the identity earlier.
    AlreadyClaimed,
    /// The registry already holds `budget` identities.
    BudgetExhausted,
}

#[derive(Debug, Default)]
pub struct VisitedRegistry {
    claimed: Mutex<AHashSet<NodeKey>>,
}

impl VisitedRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim `key`. Returns `true` exactly once per identity.
    pub fn try_claim(&self, key: &NodeKey) -> bool {
        let mut claimed = self.claimed.lock();
        if claimed.contains(key) {
            return false;
        }
        claimed.insert(key.clone())
    }

    /// Claim `key` unless it is already claimed or `budget` identities have
    /// been claimed in total.
    pub fn try_claim_within(&self, key: &NodeKey, budget: usize) -> ClaimOutcome {
        let mut claimed = self.claimed.lock();
        if claimed.contains(key) {
            return ClaimOutcome::AlreadyClaimed;
        }
        if claimed.len() >= budget {
            return ClaimOutcome::BudgetExhausted;
        }
        claimed.insert(key.clone());
        ClaimOutcome::Claimed
    }

    pub fn is_claimed(&self, key: &NodeKey) -> bool {
        self.claimed.lock().contains(key)
    }

    pub fn claimed_count(&self) -> usize {
        self.claimed.lock().len()
    }
}
