use crate::ledger::VoteData;
use serde::{Deserialize, Serialize};

/// Namespaced ledger id of a numeric election, e.g. `election_1`
pub fn election_key(election: u32) -> String {
    format!("election_{}", election)
}

/// Namespaced ledger id of a numeric candidate, e.g. `candidate_101`
pub fn candidate_key(candidate: u32) -> String {
    format!("candidate_{}", candidate)
}

/// A ballot as submitted by the voting front end
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteRequest {
    pub voter_id: String,
    pub phone_number: String,
    pub election: u32,
    pub candidate: u32,
}

impl VoteRequest {
    pub fn new(
        voter_id: impl Into<String>,
        phone_number: impl Into<String>,
        election: u32,
        candidate: u32,
    ) -> Self {
        Self {
            voter_id: voter_id.into(),
            phone_number: phone_number.into(),
            election,
            candidate,
        }
    }

    /// Ledger form of this ballot
    pub fn to_vote_data(&self) -> VoteData {
        VoteData::new(
            self.voter_id.as_str(),
            self.phone_number.as_str(),
            election_key(self.election),
            candidate_key(self.candidate),
        )
    }
}

/// Convenience flag recording the last ballot cast through this store
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteStatus {
    pub voted: bool,
    pub election_id: u32,
    pub candidate_id: u32,
}

/// What a voter is handed after casting a ballot
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteReceipt {
    /// Human-facing reference, `VOTE-` followed by six digits
    pub vote_id: String,
    pub block_index: u64,
    /// Shortened block hash
    pub block_hash: String,
}
