//! Quorum consensus for quorumchain.
//!
//! This crate decides whether a mined candidate block may be appended:
//! - Pluggable per-participant validation strategies (honest, faulty,
//!   byzantine)
//! - A fixed-size quorum that tallies agreements and applies the strict
//!   two-thirds majority rule
//!
//! # Example
//!
//! ```rust
//! use quorumchain_consensus::Quorum;
//! use quorumchain_core::{Block, Hash};
//!
//! let quorum = Quorum::honest(6).unwrap();
//!
//! let mut candidate = Block::new(1, "payload", Hash::ZERO);
//! candidate.mine(2).unwrap();
//!
//! let vote = quorum.propose(&candidate);
//! assert!(vote.accepted());
//! ```

pub mod quorum;
pub mod validator;

// Re-export commonly used types
pub use quorum::{Quorum, QuorumError, Vote};
pub use validator::{Byzantine, Faulty, Honest, Validate};
