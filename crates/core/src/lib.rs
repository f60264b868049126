//! Core ledger primitives for quorumchain.
//!
//! This crate provides the fundamental types used throughout the ledger:
//! - Blake3 hashing with a proof-of-work difficulty predicate
//! - Blocks and the nonce-search miner embedded in them

pub mod block;
pub mod hash;

// Re-export commonly used types at the crate root
pub use block::{Block, BlockError, MAX_DIFFICULTY};
pub use hash::{hash, hash_parts, Hash, H256};
