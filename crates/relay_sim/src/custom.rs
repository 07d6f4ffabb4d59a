//! Custom gates: a nested circuit evaluated behind a gate boundary.

use crate::context::{EvalContext, InputOverride};
use crate::gates::{GateEnv, GateEvaluator, GateUpdate};
use relay_circuit::{CustomGateDefinition, Gate, GateState};
use relay_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use tracing::debug;

/// Evaluates the nested circuit of a CUSTOM gate.
///
/// External input pin `i` drives the nested INPUT gate bound to it for the
/// duration of the call. The nested circuit then goes through the same
/// strategy selection as a top-level circuit, at the same time and with the
/// same strategy and settling request, and its bound OUTPUT gates become the
/// external outputs. The evaluated nested circuit is kept as the gate's state,
/// so stateful gates inside it persist between calls. Findings inside are
/// reported relative to the outer circuit.
pub struct CustomEvaluator;

impl GateEvaluator for CustomEvaluator {
    fn evaluate(&self, gate: &Gate, inputs: &[bool], env: &GateEnv<'_>) -> GateUpdate {
        let GateState::Custom(def) = &gate.state else {
            return GateUpdate::hold();
        };
        let limit = env.config().max_nesting_depth;
        if env.depth >= limit {
            env.sink.emit_once(
                Diagnostic::warning(
                    DiagnosticCode::NESTING_TOO_DEEP,
                    format!("custom gates nested more than {limit} deep"),
                    Location::gate(gate.id.as_str()),
                )
                .with_note("the gate is left unevaluated"),
            );
            return GateUpdate::hold();
        }

        let context = EvalContext {
            memory: def
                .inputs
                .iter()
                .zip(inputs)
                .map(|(pin, &state)| (pin.gate_id.clone(), InputOverride { state }))
                .collect(),
            now_ms: Some(env.now_ms),
            strategy: env.context.strategy,
            settle: env.context.settle,
        };
        let mut nested = def.circuit.clone();
        let nested_sink = DiagnosticSink::new();
        let info = env
            .engine()
            .run(&mut nested, &context, env.now_ms, env.depth + 1, &nested_sink);
        debug!(
            gate = %gate.id,
            depth = env.depth + 1,
            mode = %info.strategy_used,
            "custom gate evaluated"
        );
        for diag in nested_sink.take_all() {
            env.sink.emit_once(diag.nested_in(gate.id.as_str()));
        }

        let outputs = def
            .outputs
            .iter()
            .map(|pin| nested.output_of(pin.gate_id.as_str()).unwrap_or(false))
            .collect();
        GateUpdate::outputs(outputs).with_state(GateState::Custom(Box::new(
            CustomGateDefinition {
                name: def.name.clone(),
                circuit: nested,
                inputs: def.inputs.clone(),
                outputs: def.outputs.clone(),
            },
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gates::with_env;
    use relay_circuit::{BoundaryPin, Circuit, GateKind};

    fn inverter() -> CustomGateDefinition {
        let mut inner = Circuit::new();
        inner.add_gate(Gate::new("i", GateKind::Input));
        inner.add_gate(Gate::new("n", GateKind::Not));
        inner.add_gate(Gate::new("o", GateKind::Output));
        inner.wire("i", "n", 0);
        inner.wire("n", "o", 0);
        CustomGateDefinition {
            name: "INV".into(),
            circuit: inner,
            inputs: vec![BoundaryPin::new("A", "i")],
            outputs: vec![BoundaryPin::new("Y", "o")],
        }
    }

    #[test]
    fn maps_boundary_pins() {
        let gate = Gate::custom("inv", inverter());
        for level in [false, true] {
            let (update, sink) =
                with_env(0.0, |env| CustomEvaluator.evaluate(&gate, &[level], env));
            assert_eq!(update.outputs, Some(vec![!level]));
            assert!(sink.is_empty());
        }
    }

    #[test]
    fn nested_state_is_kept() {
        let gate = Gate::custom("inv", inverter());
        let (update, _) = with_env(0.0, |env| CustomEvaluator.evaluate(&gate, &[true], env));
        match update.state {
            Some(GateState::Custom(def)) => {
                assert_eq!(def.circuit.output_of("i"), Some(true));
                assert_eq!(def.circuit.output_of("o"), Some(false));
                assert!(def.circuit.wires[0].is_active);
            }
            other => panic!("expected custom state, got {other:?}"),
        }
    }

    #[test]
    fn missing_definition_holds() {
        let mut gate = Gate::new("c", GateKind::Custom);
        gate.output = true;
        let (update, _) = with_env(0.0, |env| CustomEvaluator.evaluate(&gate, &[], env));
        assert_eq!(update, GateUpdate::hold());
    }

    #[test]
    fn nested_findings_are_rerooted() {
        let mut def = inverter();
        def.circuit.wire("ghost", "o", 0);
        let gate = Gate::custom("inv", def);
        let (_, sink) = with_env(0.0, |env| CustomEvaluator.evaluate(&gate, &[true], env));
        let diags = sink.take_all();
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::DANGLING_WIRE);
        assert_eq!(diags[0].location.path, vec!["inv".to_string()]);
    }
}
