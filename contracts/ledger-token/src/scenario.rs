//! Scenario Runner
//!
//! Replays a JSON list of invocations against a [`MockHost`], the way a
//! developer exercises the contract locally before deploying it.
//!
//! ```json
//! {
//!   "steps": [
//!     { "caller": "aa..aa", "function": "init", "args": ["03e8"] },
//!     { "caller": "aa..aa", "function": "transfer", "args": ["bb..bb", "02bc"],
//!       "expect": "E010_INSUFFICIENT_BALANCE" }
//!   ]
//! }
//! ```
//!
//! `caller` and `args` are hex. `expect` is `"ok"` or an error code; when it
//! is omitted any outcome is accepted.

use ledger_common::{constants::address, types::Address, MockHost};
use serde::{Deserialize, Serialize};

use crate::dispatch::dispatch;

/// Outcome label of a successful step
pub const EXPECT_OK: &str = "ok";

/// A list of invocations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub steps: Vec<Step>,
}

/// One invocation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Step {
    /// Hex-encoded 32-byte caller address
    pub caller: String,
    /// Exported function name
    pub function: String,
    /// Hex-encoded arguments
    #[serde(default)]
    pub args: Vec<String>,
    /// `"ok"` or the expected error code
    #[serde(default)]
    pub expect: Option<String>,
}

/// Result of one step
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StepOutcome {
    pub step: usize,
    pub function: String,
    /// Hex-encoded return values
    pub output: Vec<String>,
    /// Error code, if the invocation failed
    pub error: Option<String>,
    /// False when `expect` was given and did not match
    pub as_expected: bool,
}

/// Errors in the scenario file itself
#[derive(Debug, thiserror::Error)]
pub enum ScenarioError {
    #[error("invalid scenario: {0}")]
    Json(#[from] serde_json::Error),
    #[error("step {step}: invalid hex")]
    Hex {
        step: usize,
        #[source]
        source: hex::FromHexError,
    },
    #[error("step {step}: caller must be 32 bytes, got {len}")]
    CallerLength { step: usize, len: usize },
}

/// Parse a scenario from JSON text
pub fn parse_scenario(json: &str) -> Result<Scenario, ScenarioError> {
    Ok(serde_json::from_str(json)?)
}

fn decode_caller(step: usize, caller: &str) -> Result<Address, ScenarioError> {
    let bytes = hex::decode(caller.trim()).map_err(|source| ScenarioError::Hex { step, source })?;
    if bytes.len() != address::LENGTH {
        return Err(ScenarioError::CallerLength { step, len: bytes.len() });
    }
    let mut addr = [0u8; 32];
    addr.copy_from_slice(&bytes);
    Ok(addr)
}

fn decode_args(step: usize, args: &[String]) -> Result<Vec<Vec<u8>>, ScenarioError> {
    args.iter()
        .map(|arg| hex::decode(arg.trim()).map_err(|source| ScenarioError::Hex { step, source }))
        .collect()
}

/// Execute every step in order
///
/// A failing invocation does not stop the run; its outcome records the
/// error code. Only malformed steps abort with a [`ScenarioError`].
pub fn run_scenario(host: &mut MockHost, scenario: &Scenario) -> Result<Vec<StepOutcome>, ScenarioError> {
    let mut outcomes = Vec::with_capacity(scenario.steps.len());

    for (index, step) in scenario.steps.iter().enumerate() {
        let caller = decode_caller(index, &step.caller)?;
        let args = decode_args(index, &step.args)?;

        let function = step.function.as_str();
        let (output, error) = match host.call(caller, args, |h| dispatch(h, function)) {
            Ok(values) => (values.iter().map(hex::encode).collect(), None),
            Err(err) => (Vec::new(), Some(err.code().to_string())),
        };

        let actual = error.as_deref().unwrap_or(EXPECT_OK);
        let as_expected = step.expect.as_deref().map_or(true, |expected| expected == actual);

        outcomes.push(StepOutcome {
            step: index,
            function: step.function.clone(),
            output,
            error,
            as_expected,
        });
    }

    Ok(outcomes)
}
