//! Quorum / threshold / veto evaluation of a finished tally.
//!
//! All fraction comparisons are done by cross-multiplication over
//! unbounded integers; the decision is consensus-critical and must come
//! out bit-identical on every node, so floating point is never involved.

use crate::params::TallyParams;
use crate::tally::TallyResult;
use num_bigint::BigUint;
use serde::{Deserialize, Serialize};
use std::fmt;
use tessera_types::{Dec, TokenAmount};

/// Final decision for a proposal once its voting period has closed.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TallyOutcome {
    /// Quorum reached and yes votes exceed the threshold.
    Pass,
    /// Quorum reached but yes votes did not exceed the threshold.
    Reject,
    /// Strong-reject votes exceeded the veto threshold.
    RejectWithVeto,
    /// Participation fell short of quorum (or nobody voted at all).
    InsufficientQuorum,
}

impl TallyOutcome {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Reject => "reject",
            Self::RejectWithVeto => "reject_with_veto",
            Self::InsufficientQuorum => "insufficient_quorum",
        }
    }
}

impl fmt::Display for TallyOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Exact test for `numerator / denominator < frac`.
fn ratio_lt(numerator: u128, denominator: u128, frac: &Dec) -> bool {
    let scale = Dec::one();
    BigUint::from(numerator) * scale.units() < frac.units() * BigUint::from(denominator)
}

/// Exact test for `numerator / denominator > frac`.
fn ratio_gt(numerator: u128, denominator: u128, frac: &Dec) -> bool {
    let scale = Dec::one();
    BigUint::from(numerator) * scale.units() > frac.units() * BigUint::from(denominator)
}

/// Apply the quorum, veto, and threshold rules, in that order.
///
/// Participation exactly equal to the quorum is sufficient (strict `<`
/// rejects); the veto and yes thresholds must be strictly exceeded.
pub fn decide(
    result: &TallyResult,
    total_bonded: TokenAmount,
    params: &TallyParams,
) -> TallyOutcome {
    let total_votes = result.total().raw();

    // Rule 1: nobody voted, or participation below quorum. With an empty
    // bonded set participation is defined as zero.
    if total_votes == 0 {
        return TallyOutcome::InsufficientQuorum;
    }
    let below_quorum = if total_bonded.is_zero() {
        !params.quorum.is_zero()
    } else {
        ratio_lt(total_votes, total_bonded.raw(), &params.quorum)
    };
    if below_quorum {
        return TallyOutcome::InsufficientQuorum;
    }

    // Rule 2: veto outranks everything past quorum.
    if ratio_gt(result.no_with_veto.raw(), total_votes, &params.veto_threshold) {
        return TallyOutcome::RejectWithVeto;
    }

    // Rule 3: yes fraction among non-abstaining power. An all-abstain
    // tally has no defined fraction and is treated as zero.
    let non_abstain = total_votes - result.abstain.raw();
    if non_abstain > 0 && ratio_gt(result.yes.raw(), non_abstain, &params.threshold) {
        return TallyOutcome::Pass;
    }

    TallyOutcome::Reject
}
