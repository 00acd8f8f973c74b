// Shared Ledger - a cloneable handle for concurrent callers
//
// A new block's index and previous hash depend on the chain tail, so the
// whole read-tail / hash / append / persist sequence runs under one lock.

use crate::ledger::block::{Block, VoteData};
use crate::ledger::chain::{ChainError, ChainStats, LedgerError, VoteLedger};
use crate::ledger::tally::Tally;
use crate::storage::SnapshotStore;
use parking_lot::Mutex;
use std::sync::Arc;

/// Thread-safe handle to a single vote ledger
pub struct SharedLedger<S: SnapshotStore> {
    inner: Arc<Mutex<VoteLedger<S>>>,
}

impl<S: SnapshotStore> Clone for SharedLedger<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: SnapshotStore> SharedLedger<S> {
    /// Wrap an opened ledger
    pub fn new(ledger: VoteLedger<S>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(ledger)),
        }
    }

    /// Run a closure with exclusive access to the ledger
    pub fn with_ledger<R>(&self, f: impl FnOnce(&mut VoteLedger<S>) -> R) -> R {
        let mut ledger = self.inner.lock();
        f(&mut ledger)
    }

    pub fn add_vote(&self, vote: &VoteData) -> Block {
        self.inner.lock().add_vote(vote)
    }

    pub fn add_vote_if_not_voted(&self, vote: &VoteData) -> Result<Block, LedgerError> {
        self.inner.lock().add_vote_if_not_voted(vote)
    }

    pub fn has_voted(&self, voter_id: &str, phone_number: &str, election_id: &str) -> bool {
        self.inner.lock().has_voted(voter_id, phone_number, election_id)
    }

    pub fn verify_chain(&self) -> Result<(), ChainError> {
        self.inner.lock().verify_chain()
    }

    pub fn is_chain_valid(&self) -> bool {
        self.inner.lock().is_chain_valid()
    }

    pub fn election_results(&self, election_id: &str) -> Tally {
        self.inner.lock().election_results(election_id)
    }

    pub fn total_votes(&self) -> u64 {
        self.inner.lock().total_votes()
    }

    /// Copy of the chain at this instant
    pub fn chain(&self) -> Vec<Block> {
        self.inner.lock().chain().to_vec()
    }

    pub fn reset_chain(&self) {
        self.inner.lock().reset_chain();
    }

    pub fn stats(&self) -> ChainStats {
        self.inner.lock().stats()
    }
}
