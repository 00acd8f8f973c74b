// Vote Desk Tests
// Tests for ballot submission, duplicate policy, status flags and receipts

use votechain::ledger::{LedgerError, SharedLedger, VoteLedger};
use votechain::storage::{MemoryStore, SnapshotStore};
use votechain::voting::{DuplicatePolicy, VoteDesk, VoteError, VoteRequest, VoteStatus};

fn desk_on(store: &MemoryStore, policy: DuplicatePolicy) -> VoteDesk<MemoryStore> {
    let ledger = VoteLedger::with_store(store.clone());
    VoteDesk::new(SharedLedger::new(ledger), policy)
}

#[test]
fn test_cast_appends_namespaced_vote() {
    let store = MemoryStore::new();
    let desk = desk_on(&store, DuplicatePolicy::Allow);

    let receipt = desk
        .cast(&VoteRequest::new("V12345", "1234567890", 1, 101))
        .unwrap();

    let chain = desk.ledger().chain();
    let block = &chain[1];
    assert_eq!(block.election_id, "election_1");
    assert_eq!(block.candidate_id, "candidate_101");
    assert_eq!(receipt.block_index, 1);
    assert_eq!(receipt.block_hash, format!("{}...", &block.hash[..10]));
}

#[test]
fn test_cast_records_vote_status() {
    let store = MemoryStore::new();
    let desk = desk_on(&store, DuplicatePolicy::Allow);
    assert!(desk.status().is_none());

    desk.cast(&VoteRequest::new("V67890", "9876543210", 2, 202))
        .unwrap();

    assert_eq!(
        desk.status(),
        Some(VoteStatus {
            voted: true,
            election_id: 2,
            candidate_id: 202,
        })
    );
}

#[test]
fn test_reset_clears_vote_status() {
    let store = MemoryStore::new();
    let desk = desk_on(&store, DuplicatePolicy::Allow);
    desk.cast(&VoteRequest::new("V67890", "9876543210", 2, 202))
        .unwrap();

    desk.ledger().reset_chain();

    assert!(desk.status().is_none());
    assert!(!store.contains("vote-status"));
    assert_eq!(desk.ledger().total_votes(), 0);
}

#[test]
fn test_unreadable_status_counts_as_absent() {
    let store = MemoryStore::new();
    let desk = desk_on(&store, DuplicatePolicy::Allow);
    store.write("vote-status", b"garbage").unwrap();

    assert!(desk.status().is_none());
}

#[test]
fn test_allow_policy_keeps_duplicates_detectable() {
    let store = MemoryStore::new();
    let desk = desk_on(&store, DuplicatePolicy::Allow);
    let request = VoteRequest::new("TEST", "0000000000", 1, 101);

    assert!(!desk.has_voted(&request));
    desk.cast(&request).unwrap();
    assert!(desk.has_voted(&request));

    desk.cast(&request).unwrap();
    assert_eq!(desk.ledger().total_votes(), 2);
}

#[test]
fn test_reject_policy_refuses_second_ballot() {
    let store = MemoryStore::new();
    let desk = desk_on(&store, DuplicatePolicy::Reject);
    assert_eq!(desk.policy(), DuplicatePolicy::Reject);

    desk.cast(&VoteRequest::new("VOTER-2", "2222222222", 1, 101))
        .unwrap();
    let second = desk.cast(&VoteRequest::new("VOTER-2", "2222222222", 1, 102));

    assert!(matches!(
        second,
        Err(VoteError::Ledger(LedgerError::AlreadyVoted { .. }))
    ));
    assert_eq!(desk.ledger().total_votes(), 1);
    assert_eq!(desk.ledger().election_results("election_1").get("candidate_102"), 0);

    // Another election is still open to this voter
    desk.cast(&VoteRequest::new("VOTER-2", "2222222222", 2, 201))
        .unwrap();
    assert_eq!(desk.ledger().total_votes(), 2);
}

#[test]
fn test_rejected_ballot_leaves_status_untouched() {
    let store = MemoryStore::new();
    let desk = desk_on(&store, DuplicatePolicy::Reject);
    desk.cast(&VoteRequest::new("V1", "1", 1, 101)).unwrap();

    let _ = desk.cast(&VoteRequest::new("V1", "1", 1, 103));

    assert_eq!(desk.status().map(|s| s.candidate_id), Some(101));
}
