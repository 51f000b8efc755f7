//! # Suite Configuration
//!
//! A suite is a YAML document:
//!
//! ```yaml
//! artifact_root: contracts/circuits   # optional
//! circuits:                           # optional, added to HelloWorld and Multiplier3
//!   - id: Multiplier4
//!     inputs: [a, b, c, d]
//! scenarios:
//!   - name: groth16-multiplier4
//!     system: groth16
//!     circuit: Multiplier4
//!     kind: positive
//!     witness: { a: "1", b: "2", c: "3", d: "4" }
//! ```
//!
//! Loading checks the whole suite up front, so a run never stops halfway on
//! a typo.

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use zkcd_core::ProofSystemKind;
use zkcd_zkp::{Circuit, CircuitArtifacts, CircuitRegistry};

use crate::error::ConfigError;
use crate::scenario::{LiteralArgs, Scenario, ScenarioKind};

/// Where circuit build outputs live when the suite does not say.
pub const DEFAULT_ARTIFACT_ROOT: &str = "contracts/circuits";

fn default_artifact_root() -> PathBuf {
    PathBuf::from(DEFAULT_ARTIFACT_ROOT)
}

/// A set of scenarios and the circuits they run against.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteConfig {
    #[serde(default = "default_artifact_root")]
    pub artifact_root: PathBuf,
    /// Circuits beyond the built-in ones.
    #[serde(default)]
    pub circuits: Vec<Circuit>,
    #[serde(default)]
    pub scenarios: Vec<Scenario>,
}

impl SuiteConfig {
    /// The reference suite: one valid proof and one zeroed argument set per
    /// Groth16 circuit, a valid PLONK proof and a one-byte PLONK blob, plus a
    /// wrong public product for each (system, circuit) pair that has a valid
    /// proof.
    pub fn builtin() -> Self {
        use ProofSystemKind::{Groth16, Plonk};
        let hello = [("a", "1"), ("b", "2")];
        let mult = [("a", "1"), ("b", "2"), ("c", "3")];
        Self {
            artifact_root: default_artifact_root(),
            circuits: Vec::new(),
            scenarios: vec![
                Scenario::positive("groth16-hello-world", Groth16, "HelloWorld", &hello),
                Scenario::structural_negative(
                    "groth16-hello-world-zeroed",
                    Groth16,
                    "HelloWorld",
                    LiteralArgs::zeroed_groth16(1),
                ),
                Scenario::positive("groth16-multiplier3", Groth16, "Multiplier3", &mult),
                Scenario::structural_negative(
                    "groth16-multiplier3-zeroed",
                    Groth16,
                    "Multiplier3",
                    LiteralArgs::zeroed_groth16(1),
                ),
                Scenario::positive("plonk-multiplier3", Plonk, "Multiplier3", &mult),
                Scenario::structural_negative(
                    "plonk-multiplier3-short-blob",
                    Plonk,
                    "Multiplier3",
                    LiteralArgs::plonk("0x01", &["1"]),
                ),
                Scenario::relation_negative(
                    "groth16-hello-world-wrong-product",
                    Groth16,
                    "HelloWorld",
                    &hello,
                    &["3"],
                ),
                Scenario::relation_negative(
                    "groth16-multiplier3-wrong-product",
                    Groth16,
                    "Multiplier3",
                    &mult,
                    &["7"],
                ),
                Scenario::relation_negative(
                    "plonk-multiplier3-wrong-product",
                    Plonk,
                    "Multiplier3",
                    &mult,
                    &["7"],
                ),
            ],
        }
    }

    /// Parse and check a suite document.
    pub fn from_yaml_str(yaml: &str) -> Result<Self, ConfigError> {
        let suite: Self = serde_yaml::from_str(yaml)?;
        suite.validate()?;
        Ok(suite)
    }

    /// Read, parse and check a suite file.
    pub fn from_path(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.display().to_string(),
            source,
        })?;
        let suite = Self::from_yaml_str(&content)?;
        tracing::info!(
            path = %path.display(),
            scenarios = suite.scenarios.len(),
            "loaded suite"
        );
        Ok(suite)
    }

    /// Built-in circuits plus the suite's own. A suite circuit with a
    /// built-in id replaces it.
    pub fn registry(&self) -> CircuitRegistry {
        let mut registry = CircuitRegistry::with_builtin();
        for circuit in &self.circuits {
            registry.register(circuit.clone());
        }
        registry
    }

    /// Artifact paths for a scenario's circuit under `artifact_root`.
    pub fn artifacts(&self, scenario: &Scenario) -> CircuitArtifacts {
        CircuitArtifacts::conventional(&self.artifact_root, &scenario.circuit, scenario.system)
    }

    /// Reject duplicate names, unknown circuits, and literal arguments that
    /// do not parse or belong to the other proof system.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let registry = self.registry();
        let mut seen = HashSet::new();
        for scenario in &self.scenarios {
            if !seen.insert(scenario.name.as_str()) {
                return Err(ConfigError::DuplicateScenario(scenario.name.clone()));
            }
            if registry.get(&scenario.circuit).is_none() {
                return Err(ConfigError::UnknownCircuit {
                    scenario: scenario.name.clone(),
                    circuit: scenario.circuit.clone(),
                });
            }
            if let ScenarioKind::StructuralNegative { args } = &scenario.kind {
                if args.system() != scenario.system {
                    return Err(ConfigError::ArgsSystemMismatch {
                        scenario: scenario.name.clone(),
                        expected: scenario.system,
                        found: args.system(),
                    });
                }
                args.to_argument_set(&scenario.name)?;
            }
        }
        Ok(())
    }
}

impl Default for SuiteConfig {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn builtin_suite_is_valid() {
        let suite = SuiteConfig::builtin();
        suite.validate().unwrap();
        assert_eq!(suite.scenarios.len(), 9);
        assert_eq!(suite.scenarios.iter().filter(|s| s.expected()).count(), 3);
    }

    #[test]
    fn minimal_yaml_uses_defaults() {
        let suite = SuiteConfig::from_yaml_str("scenarios: []").unwrap();
        assert_eq!(suite.artifact_root, Path::new(DEFAULT_ARTIFACT_ROOT));
        assert!(suite.circuits.is_empty());
        assert_eq!(suite.registry().len(), 2);
    }

    #[test]
    fn extra_circuit_is_registered() {
        let yaml = r#"
circuits:
  - id: Multiplier4
    inputs: [a, b, c, d]
scenarios:
  - name: m4
    system: groth16
    circuit: Multiplier4
    kind: positive
    witness: { a: "1", b: "2", c: "3", d: "4" }
"#;
        let suite = SuiteConfig::from_yaml_str(yaml).unwrap();
        assert!(suite.registry().get("Multiplier4").is_some());
        assert_eq!(
            suite.artifacts(&suite.scenarios[0]).proving_key,
            Path::new("contracts/circuits/Multiplier4/circuit_final.zkey")
        );
    }

    #[test]
    fn unknown_circuit_rejected() {
        let yaml = r#"
scenarios:
  - name: ghost
    system: plonk
    circuit: Ghost
    kind: positive
    witness: { a: "1" }
"#;
        let err = SuiteConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::UnknownCircuit { ref circuit, .. } if circuit == "Ghost"));
    }

    #[test]
    fn duplicate_names_rejected() {
        let mut suite = SuiteConfig::builtin();
        let first = suite.scenarios[0].clone();
        suite.scenarios.push(first);
        assert!(matches!(
            suite.validate(),
            Err(ConfigError::DuplicateScenario(name)) if name == "groth16-hello-world"
        ));
    }

    #[test]
    fn literal_args_for_wrong_system_rejected() {
        let yaml = r#"
scenarios:
  - name: crossed
    system: groth16
    circuit: HelloWorld
    kind: structural_negative
    args: { proof_blob: "0x01", public_inputs: ["1"] }
"#;
        let err = SuiteConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::ArgsSystemMismatch {
                expected: ProofSystemKind::Groth16,
                found: ProofSystemKind::Plonk,
                ..
            }
        ));
    }

    #[test]
    fn unknown_kind_is_yaml_error() {
        let yaml = r#"
scenarios:
  - name: odd
    system: groth16
    circuit: HelloWorld
    kind: sideways
"#;
        assert!(matches!(
            SuiteConfig::from_yaml_str(yaml),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn from_path_reads_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        let yaml = serde_yaml::to_string(&SuiteConfig::builtin()).unwrap();
        file.write_all(yaml.as_bytes()).unwrap();
        let suite = SuiteConfig::from_path(file.path()).unwrap();
        assert_eq!(suite, SuiteConfig::builtin());
    }

    #[test]
    fn from_path_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = SuiteConfig::from_path(&dir.path().join("absent.yaml")).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }
}
