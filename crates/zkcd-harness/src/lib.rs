//! # zkcd-harness: Verification Harness
//!
//! Runs declarative scenario suites against a [`zkcd_zkp::Backend`]. Each
//! scenario goes through the same calldata pipeline a dApp client would
//! use and checks the verifier's answer against what the scenario expects.
//!
//! ## Modules
//!
//! - `scenario`: the three scenario kinds and their literal arguments.
//! - `config`: `SuiteConfig`, YAML loading and the built-in suite.
//! - `runner`: `run_scenario` and `run_suite`.
//! - `report`: per-scenario outcomes and the suite summary.
//!
//! ## Crate Policy
//!
//! - A proving failure is a `HarnessError::ProvingFailure`, never a `false`
//!   verification result.
//! - Scenarios run sequentially with a freshly deployed verifier each.

pub mod config;
pub mod error;
pub mod report;
pub mod runner;
pub mod scenario;

pub use config::{SuiteConfig, DEFAULT_ARTIFACT_ROOT};
pub use error::{ConfigError, HarnessError};
pub use report::{ScenarioReport, SuiteReport};
pub use runner::{run_scenario, run_suite};
pub use scenario::{LiteralArgs, Scenario, ScenarioKind};
