//! Boundary gates: circuit inputs, outputs, and display sinks.

use super::{GateEnv, GateEvaluator, GateUpdate};
use relay_circuit::{Gate, GateKind};
use relay_diagnostics::{Diagnostic, DiagnosticCode, Location};

/// INPUT: driven by the context override if present, else holds its own
/// stored output (a toggle set from outside the engine).
pub struct InputEvaluator;

impl GateEvaluator for InputEvaluator {
    fn evaluate(&self, gate: &Gate, _inputs: &[bool], env: &GateEnv<'_>) -> GateUpdate {
        let level = env
            .context
            .input_override(gate.id.as_str())
            .unwrap_or(gate.output);
        GateUpdate::outputs(vec![level])
    }
}

/// OUTPUT: passes its single input through.
pub struct OutputEvaluator;

impl GateEvaluator for OutputEvaluator {
    fn evaluate(&self, _gate: &Gate, inputs: &[bool], _env: &GateEnv<'_>) -> GateUpdate {
        GateUpdate::outputs(vec![inputs.first().copied().unwrap_or(false)])
    }
}

/// LED, SEVEN_SEGMENT, and NUMBER_DISPLAY: record their inputs, drive nothing.
pub struct DisplayEvaluator;

impl GateEvaluator for DisplayEvaluator {
    fn evaluate(&self, _gate: &Gate, _inputs: &[bool], _env: &GateEnv<'_>) -> GateUpdate {
        GateUpdate::outputs(Vec::new())
    }
}

/// Fallback for kinds with no registered evaluator. The gate contributes
/// nothing: every output pin it stores is driven low and its state is kept.
pub struct NoopEvaluator;

impl GateEvaluator for NoopEvaluator {
    fn evaluate(&self, gate: &Gate, _inputs: &[bool], env: &GateEnv<'_>) -> GateUpdate {
        let message = match &gate.kind {
            GateKind::Unknown(name) => format!("unknown gate type `{name}`; outputs driven low"),
            kind => format!("no evaluator registered for {kind}; outputs driven low"),
        };
        env.sink.emit_once(Diagnostic::warning(
            DiagnosticCode::UNKNOWN_GATE_TYPE,
            message,
            Location::gate(gate.id.as_str()),
        ));
        GateUpdate::outputs(vec![false; gate.outputs.len().max(1)])
    }
}
