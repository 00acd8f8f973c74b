// Shared Ledger Tests
// Tests for serialized appends from several threads

use std::thread;
use votechain::ledger::{SharedLedger, VoteData, VoteLedger};
use votechain::storage::MemoryStore;

#[test]
fn test_concurrent_appends_keep_chain_valid() {
    let store = MemoryStore::new();
    let shared = SharedLedger::new(VoteLedger::with_store(store.clone()));

    let handles: Vec<_> = (0..8)
        .map(|t| {
            let ledger = shared.clone();
            thread::spawn(move || {
                for i in 0..25 {
                    ledger.add_vote(&VoteData::new(
                        format!("V{}-{}", t, i),
                        "9876543210",
                        "election_1",
                        format!("candidate_{}", i % 3),
                    ));
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().unwrap();
    }

    assert_eq!(shared.total_votes(), 200);
    assert!(shared.is_chain_valid());

    let chain = shared.chain();
    for (position, block) in chain.iter().enumerate() {
        assert_eq!(block.index, position as u64);
    }

    let reloaded = VoteLedger::with_store(store);
    assert_eq!(reloaded.chain(), chain.as_slice());
}

#[test]
fn test_shared_reset() {
    let shared = SharedLedger::new(VoteLedger::with_store(MemoryStore::new()));
    shared.add_vote(&VoteData::new("V1", "1", "election_1", "candidate_1"));

    shared.reset_chain();

    assert_eq!(shared.total_votes(), 0);
    assert!(shared.verify_chain().is_ok());
    assert_eq!(shared.stats().total_blocks, 1);
}
