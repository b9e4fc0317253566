//! Governance tally parameters.

use crate::error::GovernanceError;
use serde::{Deserialize, Serialize};
use tessera_types::Dec;

/// Quorum / threshold / veto fractions applied at decision time.
///
/// Read from the parameter store when a voting period closes; the engine
/// never caches them across invocations, so a parameter change takes
/// effect for every tally after it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TallyParams {
    /// Minimum fraction of total bonded tokens that must have voted.
    pub quorum: Dec,
    /// Fraction of non-abstaining power that must vote yes to pass.
    pub threshold: Dec,
    /// Maximum tolerated fraction of strong-reject votes.
    pub veto_threshold: Dec,
}

impl TallyParams {
    pub fn new(quorum: Dec, threshold: Dec, veto_threshold: Dec) -> Self {
        Self {
            quorum,
            threshold,
            veto_threshold,
        }
    }

    /// Check that every fraction lies in [0, 1].
    pub fn validate(&self) -> Result<(), GovernanceError> {
        let one = Dec::one();
        for (name, value) in [
            ("quorum", &self.quorum),
            ("threshold", &self.threshold),
            ("veto_threshold", &self.veto_threshold),
        ] {
            if *value > one {
                return Err(GovernanceError::InvalidParam {
                    name,
                    value: value.to_string(),
                });
            }
        }
        Ok(())
    }
}

impl Default for TallyParams {
    fn default() -> Self {
        Self {
            quorum: Dec::from_ratio(334, 1000),
            threshold: Dec::from_ratio(1, 2),
            veto_threshold: Dec::from_ratio(334, 1000),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let params = TallyParams::default();
        assert!(params.validate().is_ok());
        assert_eq!(params.quorum.to_string(), "0.334");
        assert_eq!(params.threshold.to_string(), "0.5");
        assert_eq!(params.veto_threshold.to_string(), "0.334");
    }

    #[test]
    fn fraction_above_one_is_rejected() {
        let mut params = TallyParams::default();
        params.threshold = Dec::from_ratio(3, 2);
        assert!(matches!(
            params.validate(),
            Err(GovernanceError::InvalidParam {
                name: "threshold",
                ..
            })
        ));
    }

    #[test]
    fn serde_round_trips_as_decimal_strings() {
        let params = TallyParams::default();
        let json = serde_json::to_string(&params).unwrap();
        assert!(json.contains("\"0.334\""));
        let back: TallyParams = serde_json::from_str(&json).unwrap();
        assert_eq!(back, params);
    }
}
