//! Block structure and the embedded proof-of-work miner.

use crate::hash::{hash_parts, Hash};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};
use thiserror::Error;
use tracing::debug;

/// Maximum proof-of-work difficulty: a 256-bit digest renders as 64 hex
/// characters, so no digest can carry a longer all-zero prefix.
pub const MAX_DIFFICULTY: u32 = 64;

/// Errors that can occur while sealing a block.
#[derive(Debug, Error)]
pub enum BlockError {
    #[error("difficulty out of range (maximum {max}, got {got})")]
    DifficultyOutOfRange { max: u32, got: u32 },
}

pub type Result<T> = std::result::Result<T, BlockError>;

/// A single record in the ledger.
///
/// A block is created as an unsealed candidate (nonce 0, hash unset),
/// mutated only by [`Block::mine`], and never modified again once the
/// ledger has appended it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Block {
    /// Position in the chain (0 for genesis).
    pub index: u64,
    /// Unix timestamp in seconds. Recorded for the report, never validated.
    pub timestamp: u64,
    /// Arbitrary payload carried by the block.
    pub payload: String,
    /// Hash of the previous block (`Hash::ZERO` only for genesis).
    pub prev_hash: Hash,
    /// Counter varied during mining.
    pub nonce: u64,
    /// Digest of this block's own content (`Hash::ZERO` until sealed).
    pub hash: Hash,
}

impl Block {
    /// Create a new unsealed candidate block.
    pub fn new(index: u64, payload: impl Into<String>, prev_hash: Hash) -> Self {
        Self {
            index,
            timestamp: Self::current_timestamp(),
            payload: payload.into(),
            prev_hash,
            nonce: 0,
            hash: Hash::ZERO,
        }
    }

    /// Create the genesis block. Its hash is computed immediately; genesis
    /// is exempt from proof-of-work.
    pub fn genesis() -> Self {
        let mut block = Self {
            index: 0,
            timestamp: Self::current_timestamp(),
            payload: "Genesis Block".to_owned(),
            prev_hash: Hash::ZERO,
            nonce: 0,
            hash: Hash::ZERO,
        };
        block.hash = block.seal_hash();
        block
    }

    /// Get the current Unix timestamp.
    pub fn current_timestamp() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .expect("time went backwards")
            .as_secs()
    }

    /// Digest of the block's content: (index, timestamp, payload,
    /// prev_hash, nonce). The payload is length-prefixed so field
    /// boundaries cannot alias. The miner and every validator must call
    /// this identically for verification to be reproducible.
    pub fn seal_hash(&self) -> Hash {
        hash_parts(&[
            &self.index.to_le_bytes(),
            &self.timestamp.to_le_bytes(),
            &(self.payload.len() as u64).to_le_bytes(),
            self.payload.as_bytes(),
            self.prev_hash.as_bytes(),
            &self.nonce.to_le_bytes(),
        ])
    }

    /// Search for the lowest nonce (scanning upward from the current one)
    /// whose content digest carries `difficulty` leading zero hex
    /// characters, then store that nonce and digest in place.
    ///
    /// Blocking and fully deterministic; expected iterations grow as
    /// 16^difficulty. Difficulty 0 accepts immediately at nonce 0.
    pub fn mine(&mut self, difficulty: u32) -> Result<()> {
        if difficulty > MAX_DIFFICULTY {
            return Err(BlockError::DifficultyOutOfRange {
                max: MAX_DIFFICULTY,
                got: difficulty,
            });
        }

        self.hash = self.seal_hash();
        while !self.hash.meets_difficulty(difficulty) {
            self.nonce += 1;
            self.hash = self.seal_hash();
        }

        debug!(hash = %self.hash, nonce = self.nonce, "block mined");
        Ok(())
    }

    /// Recompute the content digest and compare it with the stored hash.
    pub fn verify_seal(&self) -> bool {
        self.seal_hash() == self.hash
    }

    /// Check if this is the genesis block.
    pub fn is_genesis(&self) -> bool {
        self.index == 0 && self.prev_hash == Hash::ZERO
    }
}
