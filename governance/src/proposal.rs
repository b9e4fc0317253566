//! Proposal final records.

use crate::decision::TallyOutcome;
use crate::error::GovernanceError;
use crate::tally::TallyResult;
use serde::{Deserialize, Serialize};
use tessera_types::ProposalId;

/// Status of a governance proposal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ProposalStatus {
    /// Votes are still being collected.
    VotingPeriod,
    /// Passed and scheduled for execution.
    Passed,
    /// Quorum reached but the proposal did not pass.
    Rejected,
    /// Rejected by veto.
    RejectedWithVeto,
    /// Voting period closed without reaching quorum.
    QuorumNotMet,
}

impl From<TallyOutcome> for ProposalStatus {
    fn from(outcome: TallyOutcome) -> Self {
        match outcome {
            TallyOutcome::Pass => Self::Passed,
            TallyOutcome::Reject => Self::Rejected,
            TallyOutcome::RejectWithVeto => Self::RejectedWithVeto,
            TallyOutcome::InsufficientQuorum => Self::QuorumNotMet,
        }
    }
}

/// The record a persistence collaborator keeps for a proposal.
///
/// The final tally is written exactly once, when the voting period
/// closes, and is immutable from then on.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Proposal {
    pub id: ProposalId,
    pub status: ProposalStatus,
    pub final_tally: Option<TallyResult>,
}

impl Proposal {
    pub fn new(id: ProposalId) -> Self {
        Self {
            id,
            status: ProposalStatus::VotingPeriod,
            final_tally: None,
        }
    }

    /// Attach the final tally and terminal status.
    pub fn finalize(
        &mut self,
        result: TallyResult,
        outcome: TallyOutcome,
    ) -> Result<(), GovernanceError> {
        if self.final_tally.is_some() {
            return Err(GovernanceError::AlreadyFinalized(self.id));
        }
        self.status = outcome.into();
        self.final_tally = Some(result);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finalize_sets_status_and_tally() {
        let mut proposal = Proposal::new(ProposalId::new(7));
        assert_eq!(proposal.status, ProposalStatus::VotingPeriod);

        proposal
            .finalize(TallyResult::empty(), TallyOutcome::Pass)
            .unwrap();
        assert_eq!(proposal.status, ProposalStatus::Passed);
        assert!(proposal.final_tally.is_some());
    }

    #[test]
    fn finalize_twice_is_an_error() {
        let mut proposal = Proposal::new(ProposalId::new(7));
        proposal
            .finalize(TallyResult::empty(), TallyOutcome::Reject)
            .unwrap();
        assert!(matches!(
            proposal.finalize(TallyResult::empty(), TallyOutcome::Pass),
            Err(GovernanceError::AlreadyFinalized(_))
        ));
    }

    #[test]
    fn every_outcome_maps_to_a_terminal_status() {
        assert_eq!(ProposalStatus::from(TallyOutcome::Pass), ProposalStatus::Passed);
        assert_eq!(
            ProposalStatus::from(TallyOutcome::Reject),
            ProposalStatus::Rejected
        );
        assert_eq!(
            ProposalStatus::from(TallyOutcome::RejectWithVeto),
            ProposalStatus::RejectedWithVeto
        );
        assert_eq!(
            ProposalStatus::from(TallyOutcome::InsufficientQuorum),
            ProposalStatus::QuorumNotMet
        );
    }
}
