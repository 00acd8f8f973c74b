// Ledger configuration

/// Default name of the record holding the chain snapshot
pub const DEFAULT_SNAPSHOT_KEY: &str = "voteChain";

/// Default name of the record holding the "has voted" convenience flag
pub const DEFAULT_VOTE_STATUS_KEY: &str = "vote-status";

/// Configuration for a vote ledger
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LedgerConfig {
    /// Store key of the serialized chain
    pub snapshot_key: String,
    /// Store key of the vote status flag, cleared on reset
    pub vote_status_key: String,
    /// Secret mixed into every voter hash; `None` keeps the unkeyed digest
    pub voter_pepper: Option<String>,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            snapshot_key: DEFAULT_SNAPSHOT_KEY.to_string(),
            vote_status_key: DEFAULT_VOTE_STATUS_KEY.to_string(),
            voter_pepper: None,
        }
    }
}

impl LedgerConfig {
    /// Create a config with default keys and no pepper
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the snapshot key
    pub fn with_snapshot_key(mut self, key: impl Into<String>) -> Self {
        self.snapshot_key = key.into();
        self
    }

    /// Set the vote status key
    pub fn with_vote_status_key(mut self, key: impl Into<String>) -> Self {
        self.vote_status_key = key.into();
        self
    }

    /// Key the voter hash with a secret pepper
    pub fn with_voter_pepper(mut self, pepper: impl Into<String>) -> Self {
        self.voter_pepper = Some(pepper.into());
        self
    }
}
