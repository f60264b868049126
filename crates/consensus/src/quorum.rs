//! Quorum vote over a fixed participant set.
//!
//! A candidate block is put to a synchronous vote: every participant runs
//! its validation strategy once, agreements are tallied, and the candidate
//! is accepted iff strictly more than two-thirds of the participants agree
//! (the usual byzantine-fault-tolerant threshold).

use crate::validator::{Honest, Validate};
use quorumchain_core::Block;
use thiserror::Error;
use tracing::{debug, info};

/// Errors that can occur when assembling a quorum.
#[derive(Debug, Error)]
pub enum QuorumError {
    #[error("quorum needs at least one participant")]
    Empty,
}

pub type Result<T> = std::result::Result<T, QuorumError>;

/// Outcome of a single vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Vote {
    /// Participants that agreed with the candidate.
    pub agreements: usize,
    /// Total participants consulted.
    pub participants: usize,
}

impl Vote {
    /// The strict two-thirds majority rule: accepted iff
    /// `agreements > floor(2 * participants / 3)`.
    pub fn accepted(&self) -> bool {
        self.agreements > 2 * self.participants / 3
    }
}

/// A fixed set of validating participants.
///
/// The set is decided at construction and immutable thereafter.
/// Participants hold no state across votes; every proposal is validated
/// from scratch.
pub struct Quorum {
    participants: Vec<Box<dyn Validate>>,
}

impl Quorum {
    /// Create a quorum from the given validation strategies.
    pub fn new(participants: Vec<Box<dyn Validate>>) -> Result<Self> {
        if participants.is_empty() {
            return Err(QuorumError::Empty);
        }
        Ok(Self { participants })
    }

    /// Create a quorum of `count` honest participants.
    pub fn honest(count: usize) -> Result<Self> {
        Self::new(
            (0..count)
                .map(|_| Box::new(Honest) as Box<dyn Validate>)
                .collect(),
        )
    }

    /// Number of participants in the quorum.
    pub fn participant_count(&self) -> usize {
        self.participants.len()
    }

    /// Agreement count a candidate must strictly exceed to be accepted.
    pub fn threshold(&self) -> usize {
        2 * self.participants.len() / 3
    }

    /// Put a fully-mined candidate to the vote.
    ///
    /// Synchronous and complete in one call: every participant is
    /// consulted exactly once and the tally is final.
    pub fn propose(&self, candidate: &Block) -> Vote {
        let mut agreements = 0;
        for (id, participant) in self.participants.iter().enumerate() {
            let agreed = participant.validate(candidate);
            debug!(participant = id, agreed, "validation verdict");
            if agreed {
                agreements += 1;
            }
        }

        let vote = Vote {
            agreements,
            participants: self.participants.len(),
        };
        if vote.accepted() {
            info!(
                agreements,
                participants = vote.participants,
                hash = %candidate.hash,
                "block accepted by quorum"
            );
        } else {
            info!(
                agreements,
                participants = vote.participants,
                hash = %candidate.hash,
                "block rejected by quorum"
            );
        }
        vote
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validator::{Byzantine, Faulty};
    use quorumchain_core::Hash;

    fn mined_block() -> Block {
        let mut block = Block::new(1, "candidate", Hash::ZERO);
        block.mine(1).unwrap();
        block
    }

    fn mixed_quorum(honest: usize, faulty: usize, byzantine: usize) -> Quorum {
        let mut participants: Vec<Box<dyn Validate>> = Vec::new();
        participants.extend((0..honest).map(|_| Box::new(Honest) as Box<dyn Validate>));
        participants.extend((0..faulty).map(|_| Box::new(Faulty) as Box<dyn Validate>));
        participants.extend((0..byzantine).map(|_| Box::new(Byzantine) as Box<dyn Validate>));
        Quorum::new(participants).unwrap()
    }

    #[test]
    fn test_empty_quorum_rejected() {
        assert!(matches!(Quorum::new(Vec::new()), Err(QuorumError::Empty)));
        assert!(matches!(Quorum::honest(0), Err(QuorumError::Empty)));
    }

    #[test]
    fn test_honest_quorum_accepts_mined_candidate() {
        let quorum = Quorum::honest(6).unwrap();
        let vote = quorum.propose(&mined_block());

        assert_eq!(vote.agreements, 6);
        assert!(vote.accepted());
    }

    #[test]
    fn test_honest_quorum_rejects_tampered_candidate() {
        let quorum = Quorum::honest(6).unwrap();
        let mut block = mined_block();
        block.payload = "forged".to_owned();

        assert!(!quorum.propose(&block).accepted());
    }

    #[test]
    fn test_threshold_with_six_participants() {
        // floor(2 * 6 / 3) = 4, so at least 5 agreements are required.
        let quorum = Quorum::honest(6).unwrap();
        assert_eq!(quorum.threshold(), 4);

        assert!(Vote { agreements: 5, participants: 6 }.accepted());
        assert!(!Vote { agreements: 4, participants: 6 }.accepted());
    }

    #[test]
    fn test_minority_dissent_does_not_flip_outcome() {
        // 5 honest of 6: one crashed participant, still above threshold.
        let quorum = mixed_quorum(5, 1, 0);
        let vote = quorum.propose(&mined_block());
        assert_eq!(vote.agreements, 5);
        assert!(vote.accepted());

        // Byzantine dissenter behaves the same against a valid candidate.
        let quorum = mixed_quorum(5, 0, 1);
        assert!(quorum.propose(&mined_block()).accepted());
    }

    #[test]
    fn test_dissent_at_threshold_rejects() {
        // 4 honest of 6 is exactly the threshold, not strictly above it.
        let quorum = mixed_quorum(4, 2, 0);
        let vote = quorum.propose(&mined_block());
        assert_eq!(vote.agreements, 4);
        assert!(!vote.accepted());
    }

    #[test]
    fn test_single_participant_quorum() {
        // 1 > floor(2/3) = 0: one honest participant decides alone.
        let quorum = Quorum::honest(1).unwrap();
        assert!(quorum.propose(&mined_block()).accepted());
    }

    #[test]
    fn test_byzantine_majority_accepts_invalid_candidate() {
        let quorum = mixed_quorum(1, 0, 5);
        let mut block = mined_block();
        block.payload = "forged".to_owned();

        // 5 of 6 byzantine participants approve the bad seal.
        let vote = quorum.propose(&block);
        assert_eq!(vote.agreements, 5);
        assert!(vote.accepted());
    }
}
