//! Ballots and delegations as recorded for one proposal.

use serde::{Deserialize, Serialize};
use std::fmt;
use tessera_types::{Address, Dec};

/// A voter's chosen option. Exactly one option per ballot; no split votes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum VoteOption {
    Yes,
    Abstain,
    No,
    NoWithVeto,
}

impl VoteOption {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::Abstain => "abstain",
            Self::No => "no",
            Self::NoWithVeto => "no_with_veto",
        }
    }
}

impl fmt::Display for VoteOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A single cast ballot.
///
/// The voter is either a bonded validator's operator or a delegator; the
/// tally classifies by looking the address up in the bonded validator set,
/// not by the ballot itself. The vote store guarantees at most one ballot
/// per voter per proposal (a later vote overwrites the earlier one).
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Vote {
    pub voter: Address,
    pub option: VoteOption,
}

impl Vote {
    pub fn new(voter: Address, option: VoteOption) -> Self {
        Self { voter, option }
    }
}

/// A delegator's share claim against one validator's bonded pool.
///
/// Shares convert to tokens at the validator's current
/// `bonded_tokens / delegator_shares` ratio.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delegation {
    pub delegator: Address,
    pub validator: Address,
    pub shares: Dec,
}

impl Delegation {
    pub fn new(delegator: Address, validator: Address, shares: Dec) -> Self {
        Self {
            delegator,
            validator,
            shares,
        }
    }
}
