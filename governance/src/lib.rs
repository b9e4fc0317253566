//! Stake-weighted governance for the Tessera ledger.
//!
//! When a proposal's voting period closes, every node runs the same
//! deterministic tally over an immutable stake snapshot: delegators who
//! voted directly override their validators for exactly their own shares,
//! validators vote whatever remains unclaimed, and the quorum / threshold /
//! veto rules turn the four sums into a decision.
//!
//! Any divergence between independently running nodes is a consensus fault,
//! so nothing here may depend on floating point, hash iteration order, or
//! the clock.

pub mod decision;
pub mod engine;
pub mod error;
pub mod params;
pub mod proposal;
pub mod tally;
pub mod vote;

pub use decision::{decide, TallyOutcome};
pub use engine::{DelegationSource, StakeSnapshot, TallyEngine, TallySink, VoteStore};
pub use error::GovernanceError;
pub use params::TallyParams;
pub use proposal::{Proposal, ProposalStatus};
pub use tally::{accumulate, TallyResult, ValidatorTallyInfo};
pub use vote::{Delegation, Vote, VoteOption};
