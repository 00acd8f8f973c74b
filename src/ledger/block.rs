// Block - one immutable entry of the vote chain

use crate::ledger::hash;
use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Fixed hash of the genesis block
pub const GENESIS_HASH: &str = "0000GENESIS0000";

/// Election and candidate id carried by the genesis block
pub const GENESIS_MARKER: &str = "genesis";

/// Sentinel used for the genesis voter hash and previous hash
pub const NULL_HASH: &str = "0";

/// Number of hash characters shown on a vote receipt
const RECEIPT_HASH_LEN: usize = 10;

/// Number of characters kept on each side of an abbreviated hash
const ABBREVIATED_SIDE_LEN: usize = 8;

/// Current time as an ISO-8601 UTC timestamp with millisecond precision
pub(crate) fn now_timestamp() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Raw vote submission, before the voter's identity is hashed away
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteData {
    pub voter_id: String,
    /// Only used to derive the voter hash, never stored
    pub phone_number: String,
    pub election_id: String,
    pub candidate_id: String,
}

impl VoteData {
    pub fn new(
        voter_id: impl Into<String>,
        phone_number: impl Into<String>,
        election_id: impl Into<String>,
        candidate_id: impl Into<String>,
    ) -> Self {
        Self {
            voter_id: voter_id.into(),
            phone_number: phone_number.into(),
            election_id: election_id.into(),
            candidate_id: candidate_id.into(),
        }
    }
}

/// A ledger entry: either the genesis marker or one recorded vote
///
/// Field names are the persisted JSON names.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    pub index: u64,
    pub timestamp: String,
    pub voter_hash: String,
    pub election_id: String,
    pub candidate_id: String,
    pub verified: bool,
    pub previous_hash: String,
    pub hash: String,
}

impl Block {
    /// Create the genesis block
    pub fn genesis(timestamp: impl Into<String>) -> Self {
        Self {
            index: 0,
            timestamp: timestamp.into(),
            voter_hash: NULL_HASH.to_string(),
            election_id: GENESIS_MARKER.to_string(),
            candidate_id: GENESIS_MARKER.to_string(),
            verified: true,
            previous_hash: NULL_HASH.to_string(),
            hash: GENESIS_HASH.to_string(),
        }
    }

    /// Create a verified vote block and seal it with its hash
    pub fn new(
        index: u64,
        timestamp: impl Into<String>,
        voter_hash: impl Into<String>,
        election_id: impl Into<String>,
        candidate_id: impl Into<String>,
        previous_hash: impl Into<String>,
    ) -> Self {
        let mut block = Self {
            index,
            timestamp: timestamp.into(),
            voter_hash: voter_hash.into(),
            election_id: election_id.into(),
            candidate_id: candidate_id.into(),
            verified: true,
            previous_hash: previous_hash.into(),
            hash: String::new(),
        };
        block.hash = block.calculate_hash();
        block
    }

    /// Whether this is the genesis block
    pub fn is_genesis(&self) -> bool {
        self.index == 0
    }

    /// Recompute the hash from the block's own fields
    pub fn calculate_hash(&self) -> String {
        hash::block_hash(
            self.index,
            &self.timestamp,
            &self.voter_hash,
            &self.election_id,
            &self.candidate_id,
            self.verified,
            &self.previous_hash,
        )
    }

    /// Check the stored hash against a fresh computation
    pub fn has_valid_hash(&self) -> bool {
        self.hash == self.calculate_hash()
    }

    /// Shortened hash handed to voters as a receipt, e.g. `3f9a01bc7d...`
    pub fn receipt_hash(&self) -> String {
        let prefix: String = self.hash.chars().take(RECEIPT_HASH_LEN).collect();
        format!("{}...", prefix)
    }

    /// Head and tail of the hash for explorer-style listings
    pub fn abbreviated_hash(&self) -> String {
        let chars: Vec<char> = self.hash.chars().collect();
        if chars.len() <= ABBREVIATED_SIDE_LEN * 2 {
            return self.hash.clone();
        }
        let head: String = chars[..ABBREVIATED_SIDE_LEN].iter().collect();
        let tail: String = chars[chars.len() - ABBREVIATED_SIDE_LEN..].iter().collect();
        format!("{}...{}", head, tail)
    }
}
