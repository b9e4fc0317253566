//! Two-pass stake-weighted vote tally.
//!
//! Pass 1 attributes voting power to delegators who voted directly,
//! deducting their shares from the validators they delegate to. Pass 2
//! attributes each voting validator's remaining undeducted shares to the
//! validator's own choice. Stake behind silent validators and silent
//! delegators is simply absent from the result; it still counts toward
//! the quorum denominator.
//!
//! The computation is infallible: dangling references and zero-share
//! validators are excluded, never reported, so a tally always completes.

use crate::vote::{Delegation, Vote, VoteOption};
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tessera_types::{Address, Dec, TokenAmount};

/// Per-validator bookkeeping for a single tally run.
///
/// Built fresh from the stake snapshot when a voting period closes and
/// discarded as soon as the run finishes; never persisted.
#[derive(Clone, Debug)]
pub struct ValidatorTallyInfo {
    /// Operator address of the validator.
    pub address: Address,
    /// Total tokens backing the validator.
    pub bonded_tokens: TokenAmount,
    /// Total outstanding shares issued by the validator.
    pub delegator_shares: Dec,
    /// Shares already attributed to delegators' own ballots in this run.
    /// Invariant: `delegator_deductions <= delegator_shares`.
    pub delegator_deductions: Dec,
    /// The operator's own ballot, if cast.
    pub vote: Option<VoteOption>,
}

impl ValidatorTallyInfo {
    pub fn new(address: Address, bonded_tokens: TokenAmount, delegator_shares: Dec) -> Self {
        Self {
            address,
            bonded_tokens,
            delegator_shares,
            delegator_deductions: Dec::zero(),
            vote: None,
        }
    }
}

/// Final token-weighted sums for one proposal.
///
/// The only output of a tally run that outlives it; attached to the
/// proposal's final record and immutable thereafter.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyResult {
    pub yes: TokenAmount,
    pub abstain: TokenAmount,
    pub no: TokenAmount,
    pub no_with_veto: TokenAmount,
}

impl TallyResult {
    pub fn empty() -> Self {
        Self {
            yes: TokenAmount::ZERO,
            abstain: TokenAmount::ZERO,
            no: TokenAmount::ZERO,
            no_with_veto: TokenAmount::ZERO,
        }
    }

    pub fn new(
        yes: TokenAmount,
        abstain: TokenAmount,
        no: TokenAmount,
        no_with_veto: TokenAmount,
    ) -> Self {
        Self {
            yes,
            abstain,
            no,
            no_with_veto,
        }
    }

    /// Total tokens attributed across all four options.
    ///
    /// Bounded by the total bonded supply, so the sum cannot overflow in
    /// any snapshot a collaborator can actually supply; saturates anyway.
    pub fn total(&self) -> TokenAmount {
        self.yes
            .saturating_add(self.abstain)
            .saturating_add(self.no)
            .saturating_add(self.no_with_veto)
    }

    fn add(&mut self, option: VoteOption, tokens: TokenAmount) {
        let slot = match option {
            VoteOption::Yes => &mut self.yes,
            VoteOption::Abstain => &mut self.abstain,
            VoteOption::No => &mut self.no,
            VoteOption::NoWithVeto => &mut self.no_with_veto,
        };
        *slot = slot.saturating_add(tokens);
    }
}

impl fmt::Display for TallyResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "yes={} abstain={} no={} no_with_veto={}",
            self.yes.raw(),
            self.abstain.raw(),
            self.no.raw(),
            self.no_with_veto.raw()
        )
    }
}

/// Convert `shares` of a validator's pool to whole tokens, truncating.
///
/// Truncation (never rounding) guarantees the attributions across one
/// validator can never exceed its bonded pool. Shares claimed beyond the
/// outstanding total are clamped, matching the exclusion policy for
/// inconsistent snapshots.
fn tokens_for_shares(shares: &Dec, bonded: TokenAmount, total_shares: &Dec) -> TokenAmount {
    if total_shares.is_zero() {
        return TokenAmount::ZERO;
    }
    let claimed = if shares > total_shares {
        total_shares
    } else {
        shares
    };
    // Both operands carry the same fixed-point scale, so it cancels.
    let quotient = claimed.units() * BigUint::from(bonded.raw()) / total_shares.units();
    // claimed <= total_shares, so the quotient is at most `bonded`.
    TokenAmount::new(u128::try_from(quotient).unwrap_or(bonded.raw()))
}

/// Accumulate all recorded ballots into per-option token sums.
///
/// `delegations` maps each delegator voter to its share positions;
/// `validators` is the per-run arena keyed by operator address. Processing
/// order never affects the result: each sum is a commutative total over
/// disjoint attributions.
pub fn accumulate(
    votes: &[Vote],
    delegations: &BTreeMap<Address, Vec<Delegation>>,
    validators: &mut BTreeMap<Address, ValidatorTallyInfo>,
) -> TallyResult {
    let mut result = TallyResult::empty();

    // Classify ballots: operators of bonded validators are counted in
    // pass 2, every other voter is a delegator.
    let mut delegator_votes: Vec<&Vote> = Vec::new();
    for vote in votes {
        match validators.get_mut(&vote.voter) {
            Some(info) => info.vote = Some(vote.option),
            None => delegator_votes.push(vote),
        }
    }

    // Pass 1: delegators vote their own shares, deducting them from the
    // validators they delegate to.
    for vote in delegator_votes {
        let Some(positions) = delegations.get(&vote.voter) else {
            continue;
        };
        for delegation in positions {
            // Delegations to unbonded or unknown validators carry no power.
            let Some(info) = validators.get_mut(&delegation.validator) else {
                continue;
            };
            if info.delegator_shares.is_zero() {
                continue;
            }
            // A delegation can only vote shares the validator still has
            // unclaimed. Clamping against the remainder (not the full
            // outstanding total) keeps `delegator_deductions <=
            // delegator_shares` even when several delegations over-claim.
            let remaining = info
                .delegator_shares
                .saturating_sub(&info.delegator_deductions);
            let claimed = if delegation.shares > remaining {
                remaining
            } else {
                delegation.shares.clone()
            };
            if claimed.is_zero() {
                continue;
            }
            let tokens = tokens_for_shares(&claimed, info.bonded_tokens, &info.delegator_shares);
            result.add(vote.option, tokens);
            info.delegator_deductions = &info.delegator_deductions + &claimed;
        }
    }

    // Pass 2: validators vote whatever their delegators have not claimed.
    for info in validators.values() {
        let Some(option) = info.vote else { continue };
        let tokens = if info.delegator_shares.is_zero() {
            // No shares outstanding: the operator votes the full pool.
            info.bonded_tokens
        } else {
            let remaining = info
                .delegator_shares
                .saturating_sub(&info.delegator_deductions);
            tokens_for_shares(&remaining, info.bonded_tokens, &info.delegator_shares)
        };
        result.add(option, tokens);
    }

    result
}
