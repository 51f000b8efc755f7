//! # Scenario Runner
//!
//! Drives one scenario through the pipeline:
//!
//! ```text
//! deploy verifier
//!   -> prove -> normalize -> export calldata -> assemble   (positive, relation negative)
//!   -> literal arguments                                    (structural negative)
//! -> verifyProof -> compare with expected
//! ```
//!
//! Scenarios run one at a time and each deploys its own verifier. Nothing is
//! retried.

use zkcd_calldata::{assemble, CalldataArgumentSet};
use zkcd_core::{classify_text, normalize, ProofTree};
use zkcd_zkp::{Backend, CircuitArtifacts, Witness};

use crate::config::SuiteConfig;
use crate::error::HarnessError;
use crate::report::{ScenarioReport, SuiteReport};
use crate::scenario::{Scenario, ScenarioKind};

/// Run one scenario. Returns the verifier's answer when it matches the
/// expectation.
pub fn run_scenario(
    backend: &dyn Backend,
    suite: &SuiteConfig,
    scenario: &Scenario,
) -> Result<bool, HarnessError> {
    let name = scenario.name.as_str();
    let artifacts = suite.artifacts(scenario);
    let verifier = backend
        .deploy_verifier(scenario.system, &artifacts)
        .map_err(|source| HarnessError::Contract {
            scenario: name.to_string(),
            source,
        })?;

    let args = match &scenario.kind {
        ScenarioKind::Positive { witness } => {
            proof_calldata(backend, scenario, &artifacts, witness, None)?
        }
        ScenarioKind::RelationNegative {
            witness,
            public_inputs,
        } => proof_calldata(backend, scenario, &artifacts, witness, Some(public_inputs.as_slice()))?,
        ScenarioKind::StructuralNegative { args } => args.to_argument_set(name)?,
    };

    let actual = verifier
        .verify_proof(&args)
        .map_err(|source| HarnessError::Contract {
            scenario: name.to_string(),
            source,
        })?;
    let expected = scenario.expected();
    tracing::info!(
        scenario = name,
        system = %scenario.system,
        kind = scenario.kind.as_str(),
        expected,
        actual,
        "verifyProof returned"
    );
    if actual != expected {
        return Err(HarnessError::UnexpectedVerificationOutcome {
            scenario: name.to_string(),
            system: scenario.system,
            expected,
            actual,
        });
    }
    Ok(actual)
}

/// Prove, optionally swap the public signals, then normalize, export and
/// assemble.
fn proof_calldata(
    backend: &dyn Backend,
    scenario: &Scenario,
    artifacts: &CircuitArtifacts,
    witness: &Witness,
    replacement_inputs: Option<&[String]>,
) -> Result<CalldataArgumentSet, HarnessError> {
    let name = scenario.name.as_str();
    let engine = backend.engine(scenario.system);
    let output = engine
        .prove(artifacts, witness)
        .map_err(|source| HarnessError::ProvingFailure {
            scenario: name.to_string(),
            source,
        })?;

    let public_signals = match replacement_inputs {
        Some(inputs) => {
            tracing::debug!(scenario = name, ?inputs, "replacing public signals");
            ProofTree::Sequence(inputs.iter().map(|s| classify_text(s)).collect())
        }
        None => output.public_signals,
    };

    let proof = normalize(output.proof);
    let public_signals = normalize(public_signals);
    let raw = engine
        .export_calldata(&proof, &public_signals)
        .map_err(|source| HarnessError::Export {
            scenario: name.to_string(),
            source,
        })?;
    tracing::debug!(scenario = name, calldata_len = raw.len(), "exported calldata");

    assemble(scenario.system, &raw).map_err(|source| HarnessError::Calldata {
        scenario: name.to_string(),
        source,
    })
}

/// Run every scenario in order and collect the outcomes.
pub fn run_suite(backend: &dyn Backend, suite: &SuiteConfig) -> SuiteReport {
    let scenarios = suite
        .scenarios
        .iter()
        .map(|scenario| {
            let outcome = run_scenario(backend, suite, scenario);
            if let Err(err) = &outcome {
                tracing::warn!(scenario = %scenario.name, error = %err, "scenario failed");
            }
            ScenarioReport::new(scenario, outcome)
        })
        .collect();
    let report = SuiteReport { scenarios };
    tracing::info!(
        passed = report.passed(),
        failed = report.failed(),
        "suite finished"
    );
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use zkcd_core::ProofSystemKind;
    use zkcd_zkp::MockBackend;

    use crate::scenario::LiteralArgs;

    fn run(scenario: Scenario) -> Result<bool, HarnessError> {
        let backend = MockBackend::default();
        run_scenario(&backend, &SuiteConfig::builtin(), &scenario)
    }

    #[test]
    fn positive_groth16() {
        let s = Scenario::positive(
            "hw",
            ProofSystemKind::Groth16,
            "HelloWorld",
            &[("a", "1"), ("b", "2")],
        );
        assert!(run(s).unwrap());
    }

    #[test]
    fn relation_negative_plonk() {
        let s = Scenario::relation_negative(
            "m3",
            ProofSystemKind::Plonk,
            "Multiplier3",
            &[("a", "1"), ("b", "2"), ("c", "3")],
            &["7"],
        );
        assert!(!run(s).unwrap());
    }

    #[test]
    fn mislabelled_negative_is_unexpected_outcome() {
        // The replacement equals the real product, so the proof verifies.
        let s = Scenario::relation_negative(
            "not-really-negative",
            ProofSystemKind::Groth16,
            "Multiplier3",
            &[("a", "1"), ("b", "2"), ("c", "3")],
            &["0x06"],
        );
        let err = run(s).unwrap_err();
        assert!(matches!(
            err,
            HarnessError::UnexpectedVerificationOutcome {
                expected: false,
                actual: true,
                ..
            }
        ));
    }

    #[test]
    fn unsatisfiable_witness_is_proving_failure() {
        let s = Scenario::positive(
            "missing-c",
            ProofSystemKind::Groth16,
            "Multiplier3",
            &[("a", "1"), ("b", "2")],
        );
        assert!(matches!(run(s), Err(HarnessError::ProvingFailure { .. })));
    }

    #[test]
    fn non_numeric_replacement_fails_export() {
        let s = Scenario::relation_negative(
            "bad-signal",
            ProofSystemKind::Plonk,
            "Multiplier3",
            &[("a", "1"), ("b", "2"), ("c", "3")],
            &["seven"],
        );
        assert!(matches!(run(s), Err(HarnessError::Export { .. })));
    }

    #[test]
    fn structural_empty_inputs_is_false() {
        for inputs in [0, 2] {
            let s = Scenario::structural_negative(
                "wrong-input-count",
                ProofSystemKind::Groth16,
                "HelloWorld",
                LiteralArgs::zeroed_groth16(inputs),
            );
            assert!(!run(s).unwrap());
        }
    }

    #[test]
    fn structural_revert_is_contract_error() {
        let s = Scenario::structural_negative(
            "input-equals-r",
            ProofSystemKind::Groth16,
            "HelloWorld",
            out_of_field_literal(),
        );
        assert!(matches!(run(s), Err(HarnessError::Contract { .. })));
    }

    fn out_of_field_literal() -> LiteralArgs {
        let pair = || ["0".to_string(), "0".to_string()];
        LiteralArgs::Groth16 {
            a: pair(),
            b: [pair(), pair()],
            c: pair(),
            public_inputs: vec![zkcd_core::scalar_field_modulus().to_string()],
        }
    }

    #[test]
    fn builtin_suite_passes() {
        let report = run_suite(&MockBackend::default(), &SuiteConfig::builtin());
        assert!(report.is_success(), "{report}");
        assert_eq!(report.passed(), 9);
    }
}
