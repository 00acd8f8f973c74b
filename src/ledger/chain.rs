// Vote Ledger - the append-only, hash-chained record of cast votes
//
// One writer owns the chain in memory and mirrors it to a snapshot store
// after every change. Persistence is best effort: a failed write is logged
// and the in-memory chain stays authoritative.

use crate::config::LedgerConfig;
use crate::ledger::block::{now_timestamp, Block, VoteData};
use crate::ledger::hash;
use crate::ledger::tally::Tally;
use crate::storage::{SnapshotCodec, SnapshotError, SnapshotStore, StoreError};
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that can occur during ledger operations
#[derive(Error, Debug)]
pub enum LedgerError {
    #[error("Voter has already voted in election {election_id}")]
    AlreadyVoted { election_id: String },

    #[error("Storage failed: {0}")]
    Store(#[from] StoreError),

    #[error("Snapshot failed: {0}")]
    Snapshot(#[from] SnapshotError),
}

/// First integrity violation found while walking the chain
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ChainError {
    #[error("Block {index} hash does not match its contents")]
    HashMismatch { index: usize },

    #[error("Block {index} does not link to the hash of block {}", .index - 1)]
    BrokenLink { index: usize },

    #[error("Block at position {index} carries index {found}")]
    IndexMismatch { index: usize, found: u64 },
}

impl ChainError {
    /// Position of the offending block
    pub fn index(&self) -> usize {
        match self {
            ChainError::HashMismatch { index }
            | ChainError::BrokenLink { index }
            | ChainError::IndexMismatch { index, .. } => *index,
        }
    }
}

/// Summary of the chain for dashboards
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChainStats {
    pub total_blocks: usize,
    pub total_votes: u64,
    pub is_valid: bool,
    pub last_block_time: String,
    /// Receipt-style short form of the latest block hash
    pub latest_hash: String,
}

/// The vote ledger engine
pub struct VoteLedger<S: SnapshotStore> {
    /// Ordered blocks, genesis first; never empty
    chain: Vec<Block>,
    store: S,
    config: LedgerConfig,
}

impl<S: SnapshotStore> VoteLedger<S> {
    /// Open a ledger on a store
    ///
    /// Adopts the stored snapshot when one exists and decodes to a non-empty
    /// chain. A missing, empty, unreadable or corrupted snapshot is replaced
    /// by a fresh genesis block, which is persisted immediately.
    pub fn open(store: S, config: LedgerConfig) -> Self {
        let mut ledger = Self {
            chain: Vec::new(),
            store,
            config,
        };

        match ledger.load_snapshot() {
            Some(chain) => {
                info!(blocks = chain.len(), "loaded vote chain snapshot");
                ledger.chain = chain;
            }
            None => ledger.create_genesis_block(),
        }

        ledger
    }

    /// Open a ledger with the default configuration
    pub fn with_store(store: S) -> Self {
        Self::open(store, LedgerConfig::default())
    }

    fn load_snapshot(&self) -> Option<Vec<Block>> {
        let bytes = match self.store.read(&self.config.snapshot_key) {
            Ok(Some(bytes)) => bytes,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "failed to read vote chain snapshot");
                return None;
            }
        };

        match SnapshotCodec::decode(&bytes) {
            Ok(chain) if chain.is_empty() => None,
            Ok(chain) => Some(chain),
            Err(e) => {
                warn!(error = %e, "discarding unreadable vote chain snapshot");
                None
            }
        }
    }

    fn create_genesis_block(&mut self) {
        self.chain.push(Block::genesis(now_timestamp()));
        info!("created genesis block");
        self.persist();
    }

    /// Write the current chain to the store
    pub fn save_snapshot(&self) -> Result<(), LedgerError> {
        let bytes = SnapshotCodec::encode(&self.chain)?;
        self.store.write(&self.config.snapshot_key, &bytes)?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save_snapshot() {
            warn!(error = %e, blocks = self.chain.len(), "failed to persist vote chain");
        }
    }

    /// Get the store backing this ledger
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Get the ledger configuration
    pub fn config(&self) -> &LedgerConfig {
        &self.config
    }

    /// Hash a voter's identifying fields with this ledger's pepper
    pub fn voter_hash(&self, voter_id: &str, phone_number: &str) -> String {
        hash::voter_hash(self.config.voter_pepper.as_deref(), voter_id, phone_number)
    }

    /// Get the most recent block
    pub fn latest_block(&self) -> &Block {
        // open() and reset_chain() both leave at least the genesis block
        self.chain
            .last()
            .expect("vote chain always holds the genesis block")
    }

    /// Append a vote to the chain
    ///
    /// Duplicates are not rejected here; see [`VoteLedger::has_voted`] and
    /// [`VoteLedger::add_vote_if_not_voted`].
    pub fn add_vote(&mut self, vote: &VoteData) -> Block {
        let voter_hash = self.voter_hash(&vote.voter_id, &vote.phone_number);
        let previous = self.latest_block();
        let index = match previous.index.checked_add(1) {
            Some(index) => index,
            None => {
                warn!(
                    tail_index = previous.index,
                    "chain tail index cannot be incremented, using chain length"
                );
                self.chain.len() as u64
            }
        };
        let block = Block::new(
            index,
            now_timestamp(),
            voter_hash,
            vote.election_id.as_str(),
            vote.candidate_id.as_str(),
            previous.hash.as_str(),
        );

        debug!(
            index = block.index,
            election_id = %block.election_id,
            "appending vote block"
        );
        self.chain.push(block.clone());
        self.persist();

        block
    }

    /// Append a vote unless the voter already voted in that election
    pub fn add_vote_if_not_voted(&mut self, vote: &VoteData) -> Result<Block, LedgerError> {
        if self.has_voted(&vote.voter_id, &vote.phone_number, &vote.election_id) {
            return Err(LedgerError::AlreadyVoted {
                election_id: vote.election_id.clone(),
            });
        }
        Ok(self.add_vote(vote))
    }

    /// Check whether a voter already has a block in an election
    pub fn has_voted(&self, voter_id: &str, phone_number: &str, election_id: &str) -> bool {
        let voter_hash = self.voter_hash(voter_id, phone_number);
        self.chain
            .iter()
            .any(|block| block.voter_hash == voter_hash && block.election_id == election_id)
    }

    /// Walk the chain and report the first integrity violation
    ///
    /// Genesis is not checked. Every later block must recompute to its
    /// stored hash, point at its predecessor's hash and carry its position
    /// as its index.
    pub fn verify_chain(&self) -> Result<(), ChainError> {
        self.walk_chain(true)
    }

    /// Whether every block after genesis matches its hash and links to its
    /// predecessor
    ///
    /// Index positions are only checked by [`VoteLedger::verify_chain`].
    pub fn is_chain_valid(&self) -> bool {
        self.walk_chain(false).is_ok()
    }

    fn walk_chain(&self, check_index: bool) -> Result<(), ChainError> {
        for (offset, pair) in self.chain.windows(2).enumerate() {
            let index = offset + 1;
            let (previous, current) = (&pair[0], &pair[1]);

            if !current.has_valid_hash() {
                return Err(ChainError::HashMismatch { index });
            }
            if current.previous_hash != previous.hash {
                return Err(ChainError::BrokenLink { index });
            }
            if check_index && current.index != index as u64 {
                return Err(ChainError::IndexMismatch {
                    index,
                    found: current.index,
                });
            }
        }
        Ok(())
    }

    /// Count votes per candidate in an election
    pub fn election_results(&self, election_id: &str) -> Tally {
        let mut tally = Tally::new();
        for block in self.votes().filter(|block| block.election_id == election_id) {
            tally.record(&block.candidate_id);
        }
        tally
    }

    /// Number of votes on the chain (genesis excluded)
    pub fn total_votes(&self) -> u64 {
        (self.chain.len() - 1) as u64
    }

    /// Full chain, genesis first
    pub fn chain(&self) -> &[Block] {
        &self.chain
    }

    /// Iterate over vote blocks only
    pub fn votes(&self) -> impl Iterator<Item = &Block> {
        self.chain.iter().filter(|block| !block.is_genesis())
    }

    /// Discard every block and start over from a new genesis block
    ///
    /// Also clears the persisted snapshot and the vote status flag.
    pub fn reset_chain(&mut self) {
        let discarded = self.total_votes();
        self.chain.clear();

        for key in [&self.config.snapshot_key, &self.config.vote_status_key] {
            if let Err(e) = self.store.remove(key) {
                warn!(error = %e, key = %key, "failed to clear stored record");
            }
        }

        self.create_genesis_block();
        info!(discarded, "vote chain has been reset to genesis state");
    }

    /// Get statistics about the chain
    pub fn stats(&self) -> ChainStats {
        let latest = self.latest_block();
        ChainStats {
            total_blocks: self.chain.len(),
            total_votes: self.total_votes(),
            is_valid: self.is_chain_valid(),
            last_block_time: latest.timestamp.clone(),
            latest_hash: latest.receipt_hash(),
        }
    }
}
