//! # Harness Errors
//!
//! Every failure names the scenario it came from. A verifier that answers
//! with the wrong boolean is reported as `UnexpectedVerificationOutcome`,
//! which is distinct from every failure that happened before the verifier
//! could answer.

use thiserror::Error;
use zkcd_calldata::CalldataError;
use zkcd_core::ProofSystemKind;
use zkcd_zkp::{ContractError, ExportError, ProvingError};

/// Error while running a scenario.
#[derive(Error, Debug)]
pub enum HarnessError {
    /// The proving engine refused the witness.
    #[error("scenario {scenario}: proving failed: {source}")]
    ProvingFailure {
        scenario: String,
        #[source]
        source: ProvingError,
    },

    /// The proving engine could not render calldata for its own proof.
    #[error("scenario {scenario}: calldata export failed: {source}")]
    Export {
        scenario: String,
        #[source]
        source: ExportError,
    },

    /// The exported calldata text did not assemble.
    #[error("scenario {scenario}: calldata assembly failed: {source}")]
    Calldata {
        scenario: String,
        #[source]
        source: CalldataError,
    },

    /// Deploying or calling the verifier failed instead of returning a
    /// boolean.
    #[error("scenario {scenario}: verifier call failed: {source}")]
    Contract {
        scenario: String,
        #[source]
        source: ContractError,
    },

    /// The verifier answered, but not with the expected result.
    #[error("scenario {scenario} ({system}): expected verifyProof to return {expected}, got {actual}")]
    UnexpectedVerificationOutcome {
        scenario: String,
        system: ProofSystemKind,
        expected: bool,
        actual: bool,
    },

    /// The suite definition is unusable.
    #[error("suite config: {0}")]
    Config(#[from] ConfigError),
}

/// Error while loading or checking a suite definition.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("cannot read suite file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid suite YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("duplicate scenario name: {0}")]
    DuplicateScenario(String),

    #[error("scenario {scenario}: unknown circuit {circuit}")]
    UnknownCircuit { scenario: String, circuit: String },

    /// Literal arguments were written for the other proof system.
    #[error("scenario {scenario}: literal arguments are {found} calldata but the scenario targets {expected}")]
    ArgsSystemMismatch {
        scenario: String,
        expected: ProofSystemKind,
        found: ProofSystemKind,
    },

    #[error("scenario {scenario}: literal argument {value:?} is not an unsigned integer")]
    InvalidLiteral { scenario: String, value: String },
}

impl HarnessError {
    /// The scenario this error belongs to, if any.
    pub fn scenario(&self) -> Option<&str> {
        match self {
            Self::ProvingFailure { scenario, .. }
            | Self::Export { scenario, .. }
            | Self::Calldata { scenario, .. }
            | Self::Contract { scenario, .. }
            | Self::UnexpectedVerificationOutcome { scenario, .. } => Some(scenario),
            Self::Config(ConfigError::UnknownCircuit { scenario, .. })
            | Self::Config(ConfigError::ArgsSystemMismatch { scenario, .. })
            | Self::Config(ConfigError::InvalidLiteral { scenario, .. }) => Some(scenario),
            Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unexpected_outcome_display() {
        let err = HarnessError::UnexpectedVerificationOutcome {
            scenario: "groth16-zeroed".into(),
            system: ProofSystemKind::Groth16,
            expected: false,
            actual: true,
        };
        assert_eq!(
            err.to_string(),
            "scenario groth16-zeroed (groth16): expected verifyProof to return false, got true"
        );
        assert_eq!(err.scenario(), Some("groth16-zeroed"));
    }

    #[test]
    fn proving_failure_keeps_source() {
        let err = HarnessError::ProvingFailure {
            scenario: "bad-witness".into(),
            source: ProvingError::UnknownCircuit("Nope".into()),
        };
        assert!(std::error::Error::source(&err).is_some());
        assert!(err.to_string().contains("unknown circuit: Nope"));
    }

    #[test]
    fn config_errors_without_scenario() {
        let err = HarnessError::from(ConfigError::DuplicateScenario("x".into()));
        assert_eq!(err.scenario(), None);
    }
}
