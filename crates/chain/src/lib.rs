//! Ledger orchestration for quorumchain.
//!
//! This crate ties the pieces together: candidates are built against the
//! current tip, mined through the proof-of-work gate, put to the quorum
//! vote, and appended only on acceptance.
//!
//! # Example
//!
//! ```rust
//! use quorumchain_chain::{Ledger, Submission};
//! use quorumchain_consensus::Quorum;
//!
//! let mut ledger = Ledger::new(Quorum::honest(6).unwrap());
//!
//! match ledger.submit("First Block", 4).unwrap() {
//!     Submission::Accepted { hash, index } => {
//!         println!("block {index} appended: {hash}");
//!     }
//!     Submission::Rejected { vote } => {
//!         println!("rejected with {} of {} agreements", vote.agreements, vote.participants);
//!     }
//! }
//!
//! ledger.verify().unwrap();
//! ```

pub mod ledger;

// Re-export commonly used types
pub use ledger::{Ledger, LedgerError, Submission};
