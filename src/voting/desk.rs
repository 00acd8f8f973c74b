// Vote Desk - where ballots enter the ledger
//
// Validates the request, applies the duplicate policy, appends the vote,
// records the vote status flag and hands back a receipt.

use crate::ledger::{LedgerError, SharedLedger, VoteLedger};
use crate::storage::SnapshotStore;
use crate::voting::request::{election_key, VoteReceipt, VoteRequest, VoteStatus};
use rand::Rng;
use thiserror::Error;
use tracing::{info, warn};

/// Errors from casting a vote
#[derive(Error, Debug)]
pub enum VoteError {
    #[error("Voter ID must not be empty")]
    EmptyVoterId,

    #[error(transparent)]
    Ledger(#[from] LedgerError),
}

/// How the desk treats a voter who already voted in the election
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DuplicatePolicy {
    /// Append anyway; duplicates stay detectable through `has_voted`
    #[default]
    Allow,
    /// Refuse the ballot with [`LedgerError::AlreadyVoted`]
    Reject,
}

/// Front door of the ledger for vote submissions
pub struct VoteDesk<S: SnapshotStore> {
    ledger: SharedLedger<S>,
    policy: DuplicatePolicy,
}

impl<S: SnapshotStore> VoteDesk<S> {
    /// Create a desk over a shared ledger
    pub fn new(ledger: SharedLedger<S>, policy: DuplicatePolicy) -> Self {
        Self { ledger, policy }
    }

    /// Get the duplicate policy
    pub fn policy(&self) -> DuplicatePolicy {
        self.policy
    }

    /// Get the underlying ledger handle
    pub fn ledger(&self) -> &SharedLedger<S> {
        &self.ledger
    }

    /// Cast a ballot
    pub fn cast(&self, request: &VoteRequest) -> Result<VoteReceipt, VoteError> {
        if request.voter_id.trim().is_empty() {
            return Err(VoteError::EmptyVoterId);
        }
        let vote = request.to_vote_data();
        let policy = self.policy;

        let block = self.ledger.with_ledger(|ledger| {
            let block = match policy {
                DuplicatePolicy::Allow => ledger.add_vote(&vote),
                DuplicatePolicy::Reject => ledger.add_vote_if_not_voted(&vote)?,
            };
            record_status(ledger, request);
            Ok::<_, LedgerError>(block)
        })?;

        info!(
            index = block.index,
            election_id = %block.election_id,
            "vote recorded"
        );

        Ok(VoteReceipt {
            vote_id: format!("VOTE-{}", rand::thread_rng().gen_range(100_000..1_000_000)),
            block_index: block.index,
            block_hash: block.receipt_hash(),
        })
    }

    /// Check whether the requesting voter already voted in the requested election
    pub fn has_voted(&self, request: &VoteRequest) -> bool {
        self.ledger.has_voted(
            &request.voter_id,
            &request.phone_number,
            &election_key(request.election),
        )
    }

    /// Read the vote status flag; unreadable flags count as absent
    pub fn status(&self) -> Option<VoteStatus> {
        self.ledger.with_ledger(|ledger| {
            let key = &ledger.config().vote_status_key;
            match ledger.store().read(key) {
                Ok(Some(bytes)) => match serde_json::from_slice(&bytes) {
                    Ok(status) => Some(status),
                    Err(e) => {
                        warn!(error = %e, "ignoring unreadable vote status");
                        None
                    }
                },
                Ok(None) => None,
                Err(e) => {
                    warn!(error = %e, "failed to read vote status");
                    None
                }
            }
        })
    }
}

fn record_status<S: SnapshotStore>(ledger: &VoteLedger<S>, request: &VoteRequest) {
    let status = VoteStatus {
        voted: true,
        election_id: request.election,
        candidate_id: request.candidate,
    };
    let result = serde_json::to_vec(&status)
        .map_err(|e| e.to_string())
        .and_then(|bytes| {
            ledger
                .store()
                .write(&ledger.config().vote_status_key, &bytes)
                .map_err(|e| e.to_string())
        });

    if let Err(e) = result {
        warn!(error = %e, "failed to record vote status");
    }
}
