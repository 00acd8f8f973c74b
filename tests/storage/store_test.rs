// Store Tests
// Tests for the snapshot store backends behind the common trait

use tempfile::TempDir;
use votechain::storage::{FileStore, MemoryStore, SledStore, SnapshotStore};

/// Behaviour every backend must share
fn exercise_store(store: &dyn SnapshotStore) {
    assert_eq!(store.read("voteChain").unwrap(), None);

    store.write("voteChain", b"first").unwrap();
    assert_eq!(store.read("voteChain").unwrap(), Some(b"first".to_vec()));

    store.write("voteChain", b"second").unwrap();
    assert_eq!(store.read("voteChain").unwrap(), Some(b"second".to_vec()));

    store.write("vote-status", b"{}").unwrap();
    store.remove("voteChain").unwrap();
    assert_eq!(store.read("voteChain").unwrap(), None);
    assert_eq!(store.read("vote-status").unwrap(), Some(b"{}".to_vec()));

    // Removing twice is fine
    store.remove("voteChain").unwrap();
}

// ============================================================================
// BACKENDS
// ============================================================================

#[test]
fn test_memory_store_contract() {
    exercise_store(&MemoryStore::new());
}

#[test]
fn test_sled_store_contract() {
    let temp_dir = TempDir::new().unwrap();
    exercise_store(&SledStore::open(temp_dir.path()).unwrap());
}

#[test]
fn test_file_store_contract() {
    let temp_dir = TempDir::new().unwrap();
    exercise_store(&FileStore::open(temp_dir.path().join("nested/dir")).unwrap());
}

#[test]
fn test_boxed_store_contract() {
    let store: Box<dyn SnapshotStore> = Box::new(MemoryStore::new());
    exercise_store(&store);
}

// ============================================================================
// DURABILITY
// ============================================================================

#[test]
fn test_sled_store_persists_across_reopens() {
    let temp_dir = TempDir::new().unwrap();

    {
        let store = SledStore::open(temp_dir.path()).unwrap();
        store.write("voteChain", b"chain-bytes").unwrap();
    }

    {
        let store = SledStore::open(temp_dir.path()).unwrap();
        assert_eq!(
            store.read("voteChain").unwrap(),
            Some(b"chain-bytes".to_vec())
        );
    }
}

#[test]
fn test_file_store_persists_across_reopens() {
    let temp_dir = TempDir::new().unwrap();

    FileStore::open(temp_dir.path())
        .unwrap()
        .write("voteChain", b"chain-bytes")
        .unwrap();

    let store = FileStore::open(temp_dir.path()).unwrap();
    assert_eq!(
        store.read("voteChain").unwrap(),
        Some(b"chain-bytes".to_vec())
    );
}
