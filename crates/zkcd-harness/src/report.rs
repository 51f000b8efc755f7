//! # Suite Report

use std::fmt;

use serde::Serialize;
use zkcd_core::ProofSystemKind;

use crate::error::HarnessError;
use crate::scenario::Scenario;

/// Outcome of one scenario.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScenarioReport {
    pub name: String,
    pub system: ProofSystemKind,
    pub circuit: String,
    pub kind: &'static str,
    pub expected: bool,
    /// What `verifyProof` returned, if it was reached and returned.
    pub actual: Option<bool>,
    pub passed: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ScenarioReport {
    pub fn new(scenario: &Scenario, outcome: Result<bool, HarnessError>) -> Self {
        let (actual, error) = match &outcome {
            Ok(actual) => (Some(*actual), None),
            Err(err) => {
                let actual = match err {
                    HarnessError::UnexpectedVerificationOutcome { actual, .. } => Some(*actual),
                    _ => None,
                };
                (actual, Some(err.to_string()))
            }
        };
        Self {
            name: scenario.name.clone(),
            system: scenario.system,
            circuit: scenario.circuit.clone(),
            kind: scenario.kind.as_str(),
            expected: scenario.expected(),
            actual,
            passed: outcome.is_ok(),
            error,
        }
    }
}

/// Outcomes of a suite run, in scenario order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SuiteReport {
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> usize {
        self.scenarios.iter().filter(|s| s.passed).count()
    }

    pub fn failed(&self) -> usize {
        self.scenarios.len() - self.passed()
    }

    pub fn is_success(&self) -> bool {
        self.failed() == 0
    }
}

impl fmt::Display for SuiteReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for s in &self.scenarios {
            let status = if s.passed { "PASS" } else { "FAIL" };
            write!(
                f,
                "{status}  {:<8} {:<12} {:<20} {}",
                s.system.as_str(),
                s.circuit,
                s.kind,
                s.name
            )?;
            if let Some(error) = &s.error {
                write!(f, "\n      {error}")?;
            }
            writeln!(f)?;
        }
        write!(
            f,
            "{} scenarios: {} passed, {} failed",
            self.scenarios.len(),
            self.passed(),
            self.failed()
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::LiteralArgs;

    fn zeroed() -> Scenario {
        Scenario::structural_negative(
            "groth16-zeroed",
            ProofSystemKind::Groth16,
            "HelloWorld",
            LiteralArgs::zeroed_groth16(1),
        )
    }

    #[test]
    fn passing_scenario() {
        let report = ScenarioReport::new(&zeroed(), Ok(false));
        assert!(report.passed);
        assert_eq!(report.actual, Some(false));
        assert_eq!(report.error, None);
    }

    #[test]
    fn unexpected_outcome_keeps_actual() {
        let err = HarnessError::UnexpectedVerificationOutcome {
            scenario: "groth16-zeroed".into(),
            system: ProofSystemKind::Groth16,
            expected: false,
            actual: true,
        };
        let report = ScenarioReport::new(&zeroed(), Err(err));
        assert!(!report.passed);
        assert_eq!(report.actual, Some(true));
        assert!(report.error.is_some());
    }

    #[test]
    fn summary_line() {
        let report = SuiteReport {
            scenarios: vec![
                ScenarioReport::new(&zeroed(), Ok(false)),
                ScenarioReport::new(
                    &zeroed(),
                    Err(HarnessError::Contract {
                        scenario: "groth16-zeroed".into(),
                        source: zkcd_zkp::ContractError::Reverted("verifier-gte-snark-scalar-field".into()),
                    }),
                ),
            ],
        };
        assert_eq!(report.failed(), 1);
        assert!(!report.is_success());
        let text = report.to_string();
        assert!(text.starts_with("PASS"));
        assert!(text.contains("verifier reverted: verifier-gte-snark-scalar-field"));
        assert!(text.ends_with("2 scenarios: 1 passed, 1 failed"));
    }

    #[test]
    fn json_omits_empty_error() {
        let value = serde_json::to_value(ScenarioReport::new(&zeroed(), Ok(false))).unwrap();
        assert_eq!(value["system"], "groth16");
        assert_eq!(value["kind"], "structural_negative");
        assert!(value.get("error").is_none());
    }
}
