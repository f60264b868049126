//! The append-only ledger and its submission pipeline.
//!
//! Every submission resolves fully before the next one is considered:
//! build the candidate against the current tip, mine it to completion,
//! put it to the quorum vote, then append or discard. Appending is the
//! only way the chain changes; there is no removal.

use quorumchain_consensus::{Quorum, Vote};
use quorumchain_core::{Block, BlockError, Hash};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that can occur during ledger operations.
#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("block error: {0}")]
    Block(#[from] BlockError),

    #[error("genesis block is malformed")]
    BadGenesis,

    #[error("block {index} does not match its recomputed digest")]
    SealMismatch { index: u64 },

    #[error("block {index} does not link to its predecessor's hash")]
    BrokenLink { index: u64 },

    #[error("block at position {position} carries index {index}")]
    IndexMismatch { position: u64, index: u64 },
}

pub type Result<T> = std::result::Result<T, LedgerError>;

/// Outcome of a block submission. Quorum rejection is a normal result,
/// not an error; the caller decides whether to resubmit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Submission {
    /// The candidate was appended and is the new tip.
    Accepted {
        /// Digest of the appended block.
        hash: Hash,
        /// Its position in the chain.
        index: u64,
    },
    /// The quorum turned the candidate down; the ledger is unchanged.
    Rejected {
        /// The tally that fell short.
        vote: Vote,
    },
}

impl Submission {
    /// Whether the candidate made it into the chain.
    pub fn is_accepted(&self) -> bool {
        matches!(self, Submission::Accepted { .. })
    }
}

/// An in-memory, append-only, hash-linked chain of blocks guarded by a
/// quorum vote. Single-writer: all mutation goes through `&mut self`.
pub struct Ledger {
    blocks: Vec<Block>,
    quorum: Quorum,
}

impl Ledger {
    /// Create a ledger with the genesis block already in place.
    pub fn new(quorum: Quorum) -> Self {
        Self {
            blocks: vec![Block::genesis()],
            quorum,
        }
    }

    /// Number of blocks in the chain (always at least 1).
    pub fn len(&self) -> usize {
        self.blocks.len()
    }

    /// A ledger is never empty; kept for the conventional pairing.
    pub fn is_empty(&self) -> bool {
        false
    }

    /// The current tail block.
    pub fn tip(&self) -> &Block {
        self.blocks.last().expect("ledger always holds genesis")
    }

    /// Get a block by its position in the chain.
    pub fn get(&self, index: u64) -> Option<&Block> {
        self.blocks.get(index as usize)
    }

    /// Iterate over the chain from genesis to tip.
    pub fn blocks(&self) -> impl Iterator<Item = &Block> {
        self.blocks.iter()
    }

    /// The quorum consulted for every candidate.
    pub fn quorum(&self) -> &Quorum {
        &self.quorum
    }

    /// Build, mine, and submit a candidate block for the given payload.
    ///
    /// Mining blocks the caller until a satisfying nonce is found, so the
    /// whole mine-vote-append sequence runs under one exclusive borrow.
    /// An out-of-range difficulty is an error; a quorum rejection is not.
    pub fn submit(&mut self, payload: impl Into<String>, difficulty: u32) -> Result<Submission> {
        let mut candidate = Block::new(self.blocks.len() as u64, payload, self.tip().hash);
        candidate.mine(difficulty)?;

        let vote = self.quorum.propose(&candidate);
        if !vote.accepted() {
            warn!(
                index = candidate.index,
                agreements = vote.agreements,
                participants = vote.participants,
                "candidate discarded after failed vote"
            );
            return Ok(Submission::Rejected { vote });
        }

        let hash = candidate.hash;
        let index = candidate.index;
        self.blocks.push(candidate);
        debug!(index, %hash, "block appended");
        Ok(Submission::Accepted { hash, index })
    }

    /// Verify the integrity of the whole chain: genesis shape, every
    /// block's seal, predecessor linkage, and positional indices.
    pub fn verify(&self) -> Result<()> {
        let genesis = &self.blocks[0];
        if !genesis.is_genesis() || !genesis.verify_seal() {
            return Err(LedgerError::BadGenesis);
        }

        for (position, block) in self.blocks.iter().enumerate() {
            if block.index != position as u64 {
                return Err(LedgerError::IndexMismatch {
                    position: position as u64,
                    index: block.index,
                });
            }
            if !block.verify_seal() {
                return Err(LedgerError::SealMismatch { index: block.index });
            }
            if position > 0 && block.prev_hash != self.blocks[position - 1].hash {
                return Err(LedgerError::BrokenLink { index: block.index });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quorumchain_consensus::{Faulty, Validate};

    fn honest_ledger(participants: usize) -> Ledger {
        Ledger::new(Quorum::honest(participants).unwrap())
    }

    fn rejecting_ledger() -> Ledger {
        let participants: Vec<Box<dyn Validate>> =
            (0..3).map(|_| Box::new(Faulty) as Box<dyn Validate>).collect();
        Ledger::new(Quorum::new(participants).unwrap())
    }

    #[test]
    fn test_new_ledger_holds_genesis() {
        let ledger = honest_ledger(6);

        assert_eq!(ledger.len(), 1);
        assert!(!ledger.is_empty());
        assert!(ledger.tip().is_genesis());
        assert!(ledger.verify().is_ok());
    }

    #[test]
    fn test_submit_appends_on_acceptance() {
        let mut ledger = honest_ledger(6);

        let outcome = ledger.submit("First Block", 2).unwrap();
        assert!(outcome.is_accepted());

        assert_eq!(ledger.len(), 2);
        let block = ledger.get(1).unwrap();
        assert_eq!(block.payload, "First Block");
        assert_eq!(block.prev_hash, ledger.get(0).unwrap().hash);
        assert!(block.hash.meets_difficulty(2));
    }

    #[test]
    fn test_submit_links_consecutive_blocks() {
        let mut ledger = honest_ledger(3);
        ledger.submit("one", 1).unwrap();
        ledger.submit("two", 1).unwrap();
        ledger.submit("three", 0).unwrap();

        assert_eq!(ledger.len(), 4);
        for i in 1..ledger.len() {
            let prev = ledger.get(i as u64 - 1).unwrap();
            let block = ledger.get(i as u64).unwrap();
            assert_eq!(block.prev_hash, prev.hash);
            assert_eq!(block.index, i as u64);
        }
        assert!(ledger.verify().is_ok());
    }

    #[test]
    fn test_rejection_leaves_ledger_unchanged() {
        let mut ledger = rejecting_ledger();
        let tip_before = ledger.tip().hash;

        let outcome = ledger.submit("never lands", 1).unwrap();
        match outcome {
            Submission::Rejected { vote } => {
                assert_eq!(vote.agreements, 0);
                assert_eq!(vote.participants, 3);
            }
            Submission::Accepted { .. } => panic!("faulty quorum accepted a block"),
        }

        assert_eq!(ledger.len(), 1);
        assert_eq!(ledger.tip().hash, tip_before);
        assert!(ledger.verify().is_ok());
    }

    #[test]
    fn test_submit_propagates_difficulty_error() {
        let mut ledger = honest_ledger(3);

        let err = ledger.submit("out of range", 65).unwrap_err();
        assert!(matches!(err, LedgerError::Block(_)));
        assert_eq!(ledger.len(), 1);
    }

    #[test]
    fn test_verify_detects_tampered_payload() {
        let mut ledger = honest_ledger(3);
        ledger.submit("honest payload", 1).unwrap();

        ledger.blocks[1].payload = "rewritten".to_owned();

        assert!(matches!(
            ledger.verify(),
            Err(LedgerError::SealMismatch { index: 1 })
        ));
    }

    #[test]
    fn test_verify_detects_broken_link() {
        let mut ledger = honest_ledger(3);
        ledger.submit("one", 1).unwrap();
        ledger.submit("two", 1).unwrap();

        // Re-seal block 1 so only the linkage from block 2 is stale.
        ledger.blocks[1].payload = "rewritten".to_owned();
        ledger.blocks[1].hash = ledger.blocks[1].seal_hash();

        assert!(matches!(
            ledger.verify(),
            Err(LedgerError::BrokenLink { index: 2 })
        ));
    }

    #[test]
    fn test_verify_detects_forged_genesis() {
        let mut ledger = honest_ledger(3);
        ledger.blocks[0].payload = "not genesis anymore".to_owned();

        assert!(matches!(ledger.verify(), Err(LedgerError::BadGenesis)));
    }

    #[test]
    fn test_verify_detects_index_mismatch() {
        let mut ledger = honest_ledger(3);
        ledger.submit("one", 0).unwrap();

        ledger.blocks[1].index = 7;
        ledger.blocks[1].hash = ledger.blocks[1].seal_hash();

        assert!(matches!(
            ledger.verify(),
            Err(LedgerError::IndexMismatch { position: 1, index: 7 })
        ));
    }

    #[test]
    fn test_single_honest_participant_always_extends() {
        // The consensus-free flavor: one honest validator accepts every
        // correctly mined candidate.
        let mut ledger = honest_ledger(1);
        for i in 0..5 {
            let outcome = ledger.submit(format!("block {i}"), 1).unwrap();
            assert!(outcome.is_accepted());
        }
        assert_eq!(ledger.len(), 6);
        assert!(ledger.verify().is_ok());
    }
}
