// votechain - a tamper-evident, append-only vote ledger
//
// Votes are recorded as blocks in a SHA-256 hash chain. Any edit to a past
// block breaks the chain, repeat voters are detectable by their anonymized
// voter hash, and tallies come from a scan of the chain.

pub mod config;
pub mod ledger;
pub mod storage;
pub mod voting;

pub use config::LedgerConfig;
pub use ledger::{Block, SharedLedger, Tally, VoteData, VoteLedger};
