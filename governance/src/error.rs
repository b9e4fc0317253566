use tessera_types::ProposalId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum GovernanceError {
    #[error("stake snapshot unavailable: {0}")]
    SnapshotUnavailable(String),

    #[error("vote store failure for proposal {0}: {1}")]
    VoteStore(ProposalId, String),

    #[error("delegation lookup failed for {0}")]
    DelegationLookup(String),

    #[error("failed to persist tally result for proposal {0}: {1}")]
    PersistFailed(ProposalId, String),

    #[error("invalid tally parameter {name}: {value}")]
    InvalidParam { name: &'static str, value: String },

    #[error("proposal {0} already has a final tally")]
    AlreadyFinalized(ProposalId),
}
