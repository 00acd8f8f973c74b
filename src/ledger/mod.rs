// Ledger module - THE VOTE CHAIN
// Handles block construction, hashing, chain verification and tallies

mod block;
mod chain;
pub mod hash;
mod shared;
mod tally;

pub use block::{Block, VoteData, GENESIS_HASH, GENESIS_MARKER, NULL_HASH};
pub use chain::{ChainError, ChainStats, LedgerError, VoteLedger};
pub use shared::SharedLedger;
pub use tally::Tally;
