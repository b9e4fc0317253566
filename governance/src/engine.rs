//! Tally orchestration across the collaborator boundaries.
//!
//! The engine owns no state. It reads a stake snapshot, the recorded
//! ballots, and (lazily) the delegations of voters, runs the pure two-pass
//! tally, applies the decision rules, and hands the result to the sink
//! exactly once. It runs inside the close-of-voting state transition, so
//! every collaborator failure is fatal to that transition and propagated.

use crate::decision::{decide, TallyOutcome};
use crate::error::GovernanceError;
use crate::params::TallyParams;
use crate::tally::{accumulate, TallyResult, ValidatorTallyInfo};
use crate::vote::{Delegation, Vote};
use std::collections::BTreeMap;
use tessera_types::{Address, Dec, ProposalId, TokenAmount};

/// Read access to the bonded validator set at tally time.
pub trait StakeSnapshot {
    /// Every bonded validator with its bonded tokens and outstanding
    /// delegator shares. Queried once per tally run.
    fn bonded_validators(&self) -> Result<Vec<(Address, TokenAmount, Dec)>, GovernanceError>;

    /// Total bonded tokens across the whole validator set; the quorum
    /// denominator.
    fn total_bonded_tokens(&self) -> Result<TokenAmount, GovernanceError>;
}

/// Read access to the ballots recorded for a proposal.
///
/// The store enforces one ballot per voter (last write wins) and is
/// expected to purge the records after a successful tally.
pub trait VoteStore {
    fn votes(&self, proposal: ProposalId) -> Result<Vec<Vote>, GovernanceError>;
}

/// Read access to a delegator's share positions, in a stable order.
///
/// Queried only for delegators that actually voted; silent delegators
/// never hit the store.
pub trait DelegationSource {
    fn delegations(&self, delegator: &Address) -> Result<Vec<Delegation>, GovernanceError>;
}

/// Receives the one externally observable write of a tally run.
pub trait TallySink {
    fn persist(
        &mut self,
        proposal: ProposalId,
        result: &TallyResult,
        outcome: TallyOutcome,
    ) -> Result<(), GovernanceError>;
}

/// Runs the end-of-voting-period tally for one proposal.
pub struct TallyEngine;

impl TallyEngine {
    /// Tally `proposal` against the supplied snapshot and persist the
    /// outcome.
    ///
    /// Deterministic over its inputs: identical snapshots produce
    /// bit-identical results on every node, whatever order the
    /// collaborators return their records in.
    pub fn tally_proposal(
        &self,
        proposal: ProposalId,
        snapshot: &impl StakeSnapshot,
        votes: &impl VoteStore,
        delegations: &impl DelegationSource,
        params: &TallyParams,
        sink: &mut impl TallySink,
    ) -> Result<(TallyResult, TallyOutcome), GovernanceError> {
        params.validate()?;

        // Per-run arena; dropped when the tally finishes.
        let mut validators: BTreeMap<Address, ValidatorTallyInfo> = BTreeMap::new();
        for (address, bonded, shares) in snapshot.bonded_validators()? {
            validators.insert(
                address.clone(),
                ValidatorTallyInfo::new(address, bonded, shares),
            );
        }

        let ballots = votes.votes(proposal)?;
        tracing::debug!(
            %proposal,
            ballots = ballots.len(),
            validators = validators.len(),
            "tallying proposal"
        );

        // Fetch delegations only for voters that are not validator
        // operators.
        let mut delegation_map: BTreeMap<Address, Vec<Delegation>> = BTreeMap::new();
        for ballot in &ballots {
            if validators.contains_key(&ballot.voter)
                || delegation_map.contains_key(&ballot.voter)
            {
                continue;
            }
            delegation_map.insert(
                ballot.voter.clone(),
                delegations.delegations(&ballot.voter)?,
            );
        }

        let result = accumulate(&ballots, &delegation_map, &mut validators);
        let total_bonded = snapshot.total_bonded_tokens()?;
        let outcome = decide(&result, total_bonded, params);

        tracing::info!(%proposal, %outcome, tally = %result, "voting period closed");

        sink.persist(proposal, &result, outcome)?;
        Ok((result, outcome))
    }
}
