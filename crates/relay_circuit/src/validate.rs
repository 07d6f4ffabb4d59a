//! Structural checks on a circuit, independent of evaluation.

use crate::circuit::Circuit;
use crate::kind::GateKind;
use crate::netlist::Netlist;
use crate::state::GateState;
use relay_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use std::collections::HashSet;

/// Checks `circuit` and every nested custom circuit, returning all findings.
///
/// Reports everything [`Netlist::build`] reports, plus duplicate gate ids,
/// unknown gate types, and custom gate boundary pins that do not name an
/// INPUT/OUTPUT gate of the nested circuit. Findings inside a custom gate are
/// located relative to the outermost circuit.
pub fn validate_circuit(circuit: &Circuit) -> Vec<Diagnostic> {
    let sink = DiagnosticSink::new();
    check_into(circuit, &sink);
    sink.take_all()
}

fn check_into(circuit: &Circuit, sink: &DiagnosticSink) {
    Netlist::build(circuit, sink);

    let mut seen = HashSet::new();
    for gate in &circuit.gates {
        if !seen.insert(gate.id.as_str()) {
            sink.emit(
                Diagnostic::error(
                    DiagnosticCode::DUPLICATE_GATE_ID,
                    format!("gate id `{}` is used more than once", gate.id),
                    Location::gate(gate.id.as_str()),
                )
                .with_help("wires bind to the first gate with this id"),
            );
        }
        if let GateKind::Unknown(name) = &gate.kind {
            sink.emit(Diagnostic::warning(
                DiagnosticCode::UNKNOWN_GATE_TYPE,
                format!("unknown gate type `{name}`; the gate is never evaluated"),
                Location::gate(gate.id.as_str()),
            ));
        }
        match (&gate.kind, &gate.state) {
            (GateKind::Custom, GateState::Custom(def)) => {
                let nested = DiagnosticSink::new();
                for (i, pin) in def.inputs.iter().enumerate() {
                    let id = pin.gate_id.as_str();
                    check_boundary(&def.circuit, "input", i, id, GateKind::Input, &nested);
                }
                for (i, pin) in def.outputs.iter().enumerate() {
                    let id = pin.gate_id.as_str();
                    check_boundary(&def.circuit, "output", i, id, GateKind::Output, &nested);
                }
                check_into(&def.circuit, &nested);
                for diag in nested.take_all() {
                    sink.emit(diag.nested_in(gate.id.as_str()));
                }
            }
            (GateKind::Custom, _) => {
                sink.emit(Diagnostic::error(
                    DiagnosticCode::BROKEN_CUSTOM_BOUNDARY,
                    "custom gate has no definition",
                    Location::gate(gate.id.as_str()),
                ));
            }
            _ => {}
        }
    }
}

fn check_boundary(
    circuit: &Circuit,
    side: &str,
    index: usize,
    gate_id: &str,
    expected: GateKind,
    sink: &DiagnosticSink,
) {
    let message = match circuit.gate(gate_id) {
        None => format!("{side} pin {index} is bound to missing gate `{gate_id}`"),
        Some(g) if g.kind != expected => format!(
            "{side} pin {index} is bound to `{gate_id}`, a {} gate, not {expected}",
            g.kind
        ),
        Some(_) => return,
    };
    sink.emit(Diagnostic::error(
        DiagnosticCode::BROKEN_CUSTOM_BOUNDARY,
        message,
        Location::circuit(),
    ));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gate::Gate;
    use crate::state::{BoundaryPin, CustomGateDefinition};
    use relay_diagnostics::Element;

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
    fn clean_circuit_has_no_findings() {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("a", GateKind::Input));
        c.add_gate(Gate::custom("inv", inverter()));
        c.wire("a", "inv", 0);
        assert!(validate_circuit(&c).is_empty());
    }

    #[test]
    fn duplicate_ids_are_errors() {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("a", GateKind::Input));
        c.add_gate(Gate::new("a", GateKind::Output));
        let diags = validate_circuit(&c);
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].code, DiagnosticCode::DUPLICATE_GATE_ID);
        assert!(diags[0].severity.is_error());
    }

    #[test]
    fn unknown_kind_is_warned() {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("t", GateKind::from_name("TRISTATE")));
        let diags = validate_circuit(&c);
        assert_eq!(diags[0].code, DiagnosticCode::UNKNOWN_GATE_TYPE);
        assert!(diags[0].message.contains("TRISTATE"));
    }

    #[test]
    fn broken_boundary_is_located_inside_the_custom_gate() {
        let mut def = inverter();
        def.outputs.push(BoundaryPin::new("Z", "n"));
        def.inputs.push(BoundaryPin::new("B", "missing"));
        let mut c = Circuit::new();
        c.add_gate(Gate::custom("inv", def));
        let diags = validate_circuit(&c);
        assert_eq!(diags.len(), 2);
        for d in &diags {
            assert_eq!(d.code, DiagnosticCode::BROKEN_CUSTOM_BOUNDARY);
            assert_eq!(d.location.path, vec!["inv".to_string()]);
            assert_eq!(d.location.element, Element::Circuit);
        }
    }

    #[test]
    fn nested_wire_problems_are_rerooted() {
        let mut def = inverter();
        def.circuit.wire("ghost", "o", 0);
        let mut c = Circuit::new();
        c.add_gate(Gate::custom("inv", def));
        let diags = validate_circuit(&c);
        let codes: Vec<_> = diags.iter().map(|d| d.code).collect();
        assert_eq!(codes, vec![DiagnosticCode::DANGLING_WIRE]);
        assert_eq!(diags[0].location.path, vec!["inv".to_string()]);
    }
}
