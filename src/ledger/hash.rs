// Hashing - one-way digests for voter anonymization and block integrity
//
// Both digests are hex-encoded SHA-256 over a plain concatenation of the
// inputs. The concatenation order is part of the on-disk format: changing it
// invalidates every stored chain.

use sha2::{Digest, Sha256};

/// Derive the anonymized voter hash from a voter's identifying fields
///
/// With a pepper the digest is `SHA-256(pepper || voter_id || phone_number)`,
/// without one it is `SHA-256(voter_id || phone_number)`.
pub fn voter_hash(pepper: Option<&str>, voter_id: &str, phone_number: &str) -> String {
    let mut hasher = Sha256::new();
    if let Some(pepper) = pepper {
        hasher.update(pepper.as_bytes());
    }
    hasher.update(voter_id.as_bytes());
    hasher.update(phone_number.as_bytes());
    hex::encode(hasher.finalize())
}

/// Compute the hash of a block from its fields
pub fn block_hash(
    index: u64,
    timestamp: &str,
    voter_hash: &str,
    election_id: &str,
    candidate_id: &str,
    verified: bool,
    previous_hash: &str,
) -> String {
    let mut hasher = Sha256::new();
    hasher.update(index.to_string().as_bytes());
    hasher.update(timestamp.as_bytes());
    hasher.update(voter_hash.as_bytes());
    hasher.update(election_id.as_bytes());
    hasher.update(candidate_id.as_bytes());
    hasher.update(if verified { b"true".as_slice() } else { b"false".as_slice() });
    hasher.update(previous_hash.as_bytes());
    hex::encode(hasher.finalize())
}
