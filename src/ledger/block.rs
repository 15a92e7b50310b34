use chrono::Utc;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::hash::BlockHasher;

/// Maximum stored payload length in bytes; longer payloads are truncated.
pub const MAX_DATA_LEN: usize = 128;

/// Timestamp format stamped onto every block.
const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Nonces are drawn uniformly from `[0, NONCE_BOUND)`.
const NONCE_BOUND: u64 = 1000;

/// Represents one sealed entry in the ledger
///
/// Every field is fixed at seal time; a block is never mutated after it
/// becomes visible in a chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Zero-based position of the block in the chain
    pub index: u64,

    /// Wall-clock creation time, formatted `YYYY-MM-DD HH:MM:SS` (UTC)
    pub timestamp: String,

    /// Caller-supplied payload, truncated to [`MAX_DATA_LEN`] bytes
    pub data: String,

    /// Digest of the preceding block, or `"0"` for the genesis block
    pub previous_hash: String,

    /// Digest of this block (calculated last, over all other fields)
    pub hash: String,

    /// Arbitrary value mixed into the digest; no difficulty rule applies
    pub nonce: u64,
}

impl Block {
    /// Seals a new block
    ///
    /// Truncates the payload, stamps the current time, draws a nonce, and
    /// computes the digest over the finished fields. This operation cannot
    /// fail; capacity checks belong to the chain, not the block.
    ///
    /// # Arguments
    ///
    /// * `index` - The position the block will occupy in the chain
    /// * `data` - The payload to store
    /// * `previous_hash` - The digest of the block at `index - 1`
    /// * `hasher` - The digest strategy to seal with
    ///
    /// # Returns
    ///
    /// A fully-populated, henceforth-immutable Block
    pub fn seal(index: u64, data: &str, previous_hash: String, hasher: &dyn BlockHasher) -> Self {
        let block = Block {
            index,
            timestamp: Utc::now().format(TIMESTAMP_FORMAT).to_string(),
            data: truncate_data(data),
            previous_hash,
            hash: String::new(),
            nonce: rand::thread_rng().gen_range(0..NONCE_BOUND),
        };

        let hash = hasher.digest(block.index, &block.data, block.nonce, &block.previous_hash);

        Block { hash, ..block }
    }
}

/// Clamps a payload to [`MAX_DATA_LEN`] bytes, cutting on a character
/// boundary so truncation never produces invalid UTF-8.
fn truncate_data(data: &str) -> String {
    if data.len() <= MAX_DATA_LEN {
        return data.to_string();
    }

    let mut end = MAX_DATA_LEN;
    while !data.is_char_boundary(end) {
        end -= 1;
    }

    data[..end].to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ledger::hash::Sha256Hasher;

    #[test]
    fn test_seal_populates_all_fields() {
        let block = Block::seal(0, "genesis", "0".to_string(), &Sha256Hasher);

        assert_eq!(block.index, 0);
        assert_eq!(block.data, "genesis");
        assert_eq!(block.previous_hash, "0");
        assert!(block.nonce < NONCE_BOUND);
        assert!(!block.timestamp.is_empty());
        assert!(!block.hash.is_empty());
    }

    #[test]
    fn test_seal_digest_matches_stored_fields() {
        let block = Block::seal(3, "entry", "deadbeef".to_string(), &Sha256Hasher);

        let recomputed =
            Sha256Hasher.digest(block.index, &block.data, block.nonce, &block.previous_hash);
        assert_eq!(block.hash, recomputed);
    }

    #[test]
    fn test_seal_truncates_long_payloads() {
        let long = "x".repeat(MAX_DATA_LEN + 50);
        let block = Block::seal(0, &long, "0".to_string(), &Sha256Hasher);

        assert_eq!(block.data.len(), MAX_DATA_LEN);
    }

    #[test]
    fn test_truncation_respects_char_boundaries() {
        // 'é' is two bytes; 64 of them straddle the 128-byte limit exactly,
        // so add one more byte to force a cut inside a character.
        let payload = format!("a{}", "é".repeat(64));
        let truncated = truncate_data(&payload);

        assert!(truncated.len() <= MAX_DATA_LEN);
        assert!(truncated.is_char_boundary(truncated.len()));
        assert_eq!(truncated.len(), MAX_DATA_LEN - 1);
    }

    #[test]
    fn test_short_payload_kept_verbatim() {
        assert_eq!(truncate_data("hello"), "hello");
        assert_eq!(truncate_data(""), "");
    }
}
