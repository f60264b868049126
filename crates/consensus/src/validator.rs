//! Validation strategies for quorum participants.
//!
//! Every participant runs one strategy against a mined candidate. The
//! trait seam is what makes dissent expressible at all: an all-honest
//! quorum is unanimous on any candidate, so the faulty and byzantine
//! variants exist to exercise the rejection paths.

use quorumchain_core::Block;

/// A participant's validation strategy.
pub trait Validate {
    /// Whether this participant agrees that the candidate may be appended.
    fn validate(&self, candidate: &Block) -> bool;
}

/// Recomputes the candidate's content digest and agrees iff it matches
/// the stored hash.
#[derive(Debug, Clone, Copy, Default)]
pub struct Honest;

impl Validate for Honest {
    fn validate(&self, candidate: &Block) -> bool {
        candidate.verify_seal()
    }
}

/// A crashed participant. Never agrees.
#[derive(Debug, Clone, Copy, Default)]
pub struct Faulty;

impl Validate for Faulty {
    fn validate(&self, _candidate: &Block) -> bool {
        false
    }
}

/// An adversarial participant: inverts the honest verdict, approving
/// invalid candidates and rejecting valid ones.
#[derive(Debug, Clone, Copy, Default)]
pub struct Byzantine;

impl Validate for Byzantine {
    fn validate(&self, candidate: &Block) -> bool {
        !candidate.verify_seal()
    }
}
