// Snapshot codec - the persisted form of a vote chain
//
// Current format: {"version": 1, "chain": [Block, ...]}
// Legacy format:  [Block, ...] (no envelope), still accepted on read

use crate::ledger::Block;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Version written into every new snapshot
pub const SNAPSHOT_VERSION: u32 = 1;

/// Errors that can occur during snapshot encoding/decoding
#[derive(Error, Debug)]
pub enum SnapshotError {
    #[error("Failed to encode snapshot: {0}")]
    EncodeError(String),

    #[error("Failed to decode snapshot: {0}")]
    DecodeError(String),

    #[error("Unsupported snapshot version: {found}")]
    UnsupportedVersion { found: u32 },
}

#[derive(Serialize)]
struct SnapshotRef<'a> {
    version: u32,
    chain: &'a [Block],
}

#[derive(Deserialize)]
struct VersionedSnapshot {
    version: u32,
    chain: Vec<Block>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum StoredSnapshot {
    Versioned(VersionedSnapshot),
    Legacy(Vec<Block>),
}

/// Codec for serializing/deserializing chain snapshots
pub struct SnapshotCodec;

impl SnapshotCodec {
    /// Encode a chain to snapshot bytes
    pub fn encode(chain: &[Block]) -> Result<Vec<u8>, SnapshotError> {
        serde_json::to_vec(&SnapshotRef {
            version: SNAPSHOT_VERSION,
            chain,
        })
        .map_err(|e| SnapshotError::EncodeError(e.to_string()))
    }

    /// Decode a chain from snapshot bytes in either format
    pub fn decode(bytes: &[u8]) -> Result<Vec<Block>, SnapshotError> {
        let stored: StoredSnapshot = serde_json::from_slice(bytes)
            .map_err(|e| SnapshotError::DecodeError(e.to_string()))?;

        match stored {
            StoredSnapshot::Versioned(snapshot) if snapshot.version > SNAPSHOT_VERSION => {
                Err(SnapshotError::UnsupportedVersion {
                    found: snapshot.version,
                })
            }
            StoredSnapshot::Versioned(snapshot) => Ok(snapshot.chain),
            StoredSnapshot::Legacy(chain) => Ok(chain),
        }
    }
}
