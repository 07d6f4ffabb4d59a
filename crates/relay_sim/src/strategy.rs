//! Strategy selection and the shape of an evaluation result.

use relay_circuit::Circuit;
use relay_diagnostics::Diagnostic;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How the caller wants the evaluation mode chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Strategy {
    /// Immediate evaluation for acyclic circuits, delayed otherwise.
    #[default]
    AutoSelect,
    /// Always use delayed evaluation, for circuits meant to be stepped in
    /// time (clock-driven counters and the like) even while acyclic.
    EventDrivenOnly,
}

impl Strategy {
    /// Picks the evaluation mode for a circuit with or without feedback.
    pub fn select(self, has_cycle: bool) -> EvaluationMode {
        match self {
            Strategy::AutoSelect if !has_cycle => EvaluationMode::Immediate,
            _ => EvaluationMode::Delayed,
        }
    }
}

impl fmt::Display for Strategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Strategy::AutoSelect => write!(f, "auto"),
            Strategy::EventDrivenOnly => write!(f, "event-driven"),
        }
    }
}

/// The evaluation algorithm that actually ran.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvaluationMode {
    /// One pass in dependency order against live upstream outputs.
    Immediate,
    /// Unit-delay passes, each against a snapshot of the previous outputs.
    Delayed,
}

impl fmt::Display for EvaluationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvaluationMode::Immediate => write!(f, "immediate"),
            EvaluationMode::Delayed => write!(f, "delayed"),
        }
    }
}

/// What happened during one evaluation call.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationInfo {
    /// The strategy that was requested.
    pub strategy: Strategy,
    /// The evaluation mode the strategy resolved to.
    pub strategy_used: EvaluationMode,
    /// Whether the top-level circuit contains a feedback loop.
    pub has_circular_dependency: bool,
    /// Wall time spent in the call, in milliseconds.
    pub execution_time_ms: f64,
    /// Number of passes made over the circuit.
    pub iterations: u32,
}

/// The output of [`Engine::evaluate`](crate::Engine::evaluate).
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EvaluationResult {
    /// The updated circuit.
    pub circuit: Circuit,
    /// Mode selection and timing.
    pub evaluation_info: EvaluationInfo,
    /// One rendered line per diagnostic, e.g. `warning[W201]: ...`.
    pub warnings: Vec<String>,
    /// The structured diagnostics behind `warnings`.
    #[serde(default)]
    pub diagnostics: Vec<Diagnostic>,
}
