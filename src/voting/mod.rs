// Voting module - BALLOT SUBMISSION
// Turns front-end ballots into ledger votes and hands out receipts

mod desk;
mod request;

pub use desk::{DuplicatePolicy, VoteDesk, VoteError};
pub use request::{candidate_key, election_key, VoteReceipt, VoteRequest, VoteStatus};
