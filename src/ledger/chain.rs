use std::sync::{Arc, Mutex};

use log::{info, warn};
use thiserror::Error;

use super::block::Block;
use super::hash::{BlockHasher, Sha256Hasher};

/// Sentinel previous-hash carried by the genesis block.
pub const GENESIS_HASH: &str = "0";

/// Default number of blocks a ledger will hold.
pub const DEFAULT_CAPACITY: usize = 20;

/// Errors that can occur during ledger operations
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("Ledger capacity exceeded: {capacity} blocks")]
    CapacityExceeded { capacity: usize },
}

/// An append-only, capacity-bounded chain of hash-linked blocks
///
/// The ledger owns its block sequence exclusively; callers only ever see
/// clones of sealed blocks. Appends are serialized through an internal
/// lock, so handles may be cloned and shared across threads.
#[derive(Clone)]
pub struct Ledger {
    /// The chain of blocks, in index order
    blocks: Arc<Mutex<Vec<Block>>>,

    /// Maximum number of blocks this ledger will accept
    capacity: usize,

    /// Digest strategy used to seal and verify blocks
    hasher: Arc<dyn BlockHasher>,
}

impl std::fmt::Debug for Ledger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ledger")
            .field("len", &self.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl Default for Ledger {
    fn default() -> Self {
        Self::new()
    }
}

impl Ledger {
    /// Creates an empty ledger with the default capacity and SHA-256 digests
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Creates an empty ledger with an explicit capacity
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_hasher(capacity, Arc::new(Sha256Hasher))
    }

    /// Creates an empty ledger with an explicit capacity and digest strategy
    pub fn with_hasher(capacity: usize, hasher: Arc<dyn BlockHasher>) -> Self {
        Ledger {
            blocks: Arc::new(Mutex::new(Vec::new())),
            capacity,
            hasher,
        }
    }

    /// Appends a new block carrying the given payload
    ///
    /// The new block links to the digest of the current last block, or to
    /// the genesis sentinel when the ledger is empty. On failure the ledger
    /// is left untouched.
    ///
    /// # Arguments
    ///
    /// * `data` - The payload to store (truncated if over the length limit)
    ///
    /// # Returns
    ///
    /// Result with the index of the newly appended block
    pub fn append(&self, data: &str) -> Result<u64, LedgerError> {
        let mut blocks = self.blocks.lock().unwrap();

        if blocks.len() >= self.capacity {
            warn!("append rejected: ledger is at capacity ({})", self.capacity);
            return Err(LedgerError::CapacityExceeded {
                capacity: self.capacity,
            });
        }

        let previous_hash = match blocks.last() {
            Some(last) => last.hash.clone(),
            None => GENESIS_HASH.to_string(),
        };

        let block = Block::seal(blocks.len() as u64, data, previous_hash, self.hasher.as_ref());
        let index = block.index;
        blocks.push(block);

        info!("block {} appended ({} / {} slots used)", index, blocks.len(), self.capacity);
        Ok(index)
    }

    /// Gets the block at the given index
    ///
    /// # Returns
    ///
    /// A clone of the stored block, or None when the index is out of range
    pub fn get(&self, index: u64) -> Option<Block> {
        let blocks = self.blocks.lock().unwrap();
        blocks.get(index as usize).cloned()
    }

    /// Gets the current number of blocks
    pub fn len(&self) -> usize {
        self.blocks.lock().unwrap().len()
    }

    /// Returns true when the ledger holds no blocks
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Gets the maximum number of blocks this ledger will accept
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Gets a snapshot of the whole chain, in index order
    ///
    /// # Returns
    ///
    /// A vector of clones of all blocks currently in the ledger
    pub fn blocks(&self) -> Vec<Block> {
        self.blocks.lock().unwrap().clone()
    }

    /// Validates the ledger
    ///
    /// Walks the chain recomputing every block's digest from its stored
    /// fields and checking the genesis sentinel, index contiguity, and the
    /// previous-hash linkage. Detects any tampering with stored blocks.
    ///
    /// # Returns
    ///
    /// true if every block passes, false otherwise
    pub fn verify(&self) -> bool {
        let blocks = self.blocks.lock().unwrap();

        for (i, block) in blocks.iter().enumerate() {
            if block.index != i as u64 {
                return false;
            }

            let expected =
                self.hasher
                    .digest(block.index, &block.data, block.nonce, &block.previous_hash);
            if block.hash != expected {
                return false;
            }

            let linked = match i {
                0 => block.previous_hash == GENESIS_HASH,
                _ => block.previous_hash == blocks[i - 1].hash,
            };
            if !linked {
                return false;
            }
        }

        true
    }
}
