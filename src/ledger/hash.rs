use sha2::{Digest, Sha256};

/// Strategy for deriving a block's identity digest from its content fields.
///
/// Implementations must be pure and deterministic: the same four inputs
/// always produce the same digest. The previous block's digest is part of
/// the hashed input, which is what makes the chain tamper-evident.
pub trait BlockHasher: Send + Sync {
    /// Computes the digest for a block with the given fields.
    fn digest(&self, index: u64, data: &str, nonce: u64, previous_hash: &str) -> String;
}

/// SHA-256 digest over the canonical byte encoding of the block fields.
///
/// This is the default hasher.
#[derive(Debug, Default, Clone, Copy)]
pub struct Sha256Hasher;

impl BlockHasher for Sha256Hasher {
    fn digest(&self, index: u64, data: &str, nonce: u64, previous_hash: &str) -> String {
        let mut hasher = Sha256::new();

        hasher.update(index.to_be_bytes());
        hasher.update(data.as_bytes());
        hasher.update(nonce.to_be_bytes());
        hasher.update(previous_hash.as_bytes());

        hex::encode(hasher.finalize())
    }
}

/// Weighted additive checksum, rendered as unpadded lowercase hex.
///
/// Not collision-resistant; useful for tests and for parity with ledgers
/// produced by the legacy simulator.
#[derive(Debug, Default, Clone, Copy)]
pub struct FoldHasher;

impl BlockHasher for FoldHasher {
    fn digest(&self, index: u64, data: &str, nonce: u64, _previous_hash: &str) -> String {
        let mut acc: u64 = 0;

        for byte in data.bytes() {
            acc = acc.wrapping_add(u64::from(byte).wrapping_mul(31));
        }
        acc = acc.wrapping_add(index.wrapping_mul(17));
        acc = acc.wrapping_add(nonce.wrapping_mul(13));

        format!("{:x}", acc)
    }
}
