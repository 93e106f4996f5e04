//! Checksum calculation for observation snapshots.

use sha2::{Digest, Sha256};

/// Calculate SHA-256 checksum of serialized snapshot content.
///
/// Used to tag log lines so two runs over the same data can be matched up.
pub fn calculate_checksum(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    hex::encode(hasher.finalize())
}
