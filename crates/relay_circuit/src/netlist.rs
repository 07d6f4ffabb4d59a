//! Resolved input-pin drivers for one evaluation.
//!
//! [`Netlist::build`] walks the wire list once, maps gate ids to dense
//! positions, and records which output pin drives each input pin. Wires that
//! cannot be honored are reported and then ignored, so evaluation of a circuit
//! that is half-way through being edited still proceeds.

use crate::circuit::Circuit;
use crate::gate::Gate;
use crate::ids::GateId;
use relay_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use std::collections::HashMap;

/// The output pin feeding one input pin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Driver {
    /// Dense position of the source gate in `Circuit::gates`.
    pub gate: usize,
    /// Source pin index, following the wire pin-index convention.
    pub pin_index: i32,
}

/// Dense connectivity of a circuit.
#[derive(Clone, Debug, Default)]
pub struct Netlist {
    index: HashMap<GateId, usize>,
    drivers: Vec<Vec<Option<Driver>>>,
    edges: Vec<(usize, usize)>,
    wire_sources: Vec<Option<Driver>>,
}

impl Netlist {
    /// Resolves every wire of `circuit`, reporting unusable wires to `sink`.
    ///
    /// Gate ids map to the first gate carrying them. When several wires drive
    /// the same input pin, the first in wire order wins.
    pub fn build(circuit: &Circuit, sink: &DiagnosticSink) -> Self {
        let mut index = HashMap::with_capacity(circuit.gates.len());
        for (i, gate) in circuit.gates.iter().enumerate() {
            index.entry(gate.id.clone()).or_insert(i);
        }

        let mut drivers: Vec<Vec<Option<Driver>>> = circuit
            .gates
            .iter()
            .map(|g| vec![None; g.input_count()])
            .collect();
        let mut edges = Vec::with_capacity(circuit.wires.len());
        let mut wire_sources = vec![None; circuit.wires.len()];

        for (w, wire) in circuit.wires.iter().enumerate() {
            let location = || Location::wire(wire.id.as_str());
            let Some(&from) = index.get(&wire.from.gate_id) else {
                sink.emit_once(
                    Diagnostic::warning(
                        DiagnosticCode::DANGLING_WIRE,
                        format!("source gate `{}` does not exist", wire.from.gate_id),
                        location(),
                    )
                    .with_note("the wire is ignored during evaluation"),
                );
                continue;
            };
            let Some(&to) = index.get(&wire.to.gate_id) else {
                sink.emit_once(
                    Diagnostic::warning(
                        DiagnosticCode::DANGLING_WIRE,
                        format!("target gate `{}` does not exist", wire.to.gate_id),
                        location(),
                    )
                    .with_note("the wire is ignored during evaluation"),
                );
                continue;
            };
            let source = &circuit.gates[from];
            if !source.has_output_pin(wire.from.pin_index) {
                sink.emit_once(Diagnostic::warning(
                    DiagnosticCode::INVALID_SOURCE_PIN,
                    format!(
                        "gate `{}` ({}) has no output pin {}",
                        source.id, source.kind, wire.from.pin_index
                    ),
                    location(),
                ));
                continue;
            }
            let target = &circuit.gates[to];
            if !target.has_input_pin(wire.to.pin_index) {
                sink.emit_once(Diagnostic::warning(
                    DiagnosticCode::INVALID_TARGET_PIN,
                    format!(
                        "gate `{}` ({}) has no input pin {}",
                        target.id, target.kind, wire.to.pin_index
                    ),
                    location(),
                ));
                continue;
            }
            let slot = &mut drivers[to][wire.to.pin_index as usize];
            if slot.is_some() {
                sink.emit_once(
                    Diagnostic::warning(
                        DiagnosticCode::MULTIPLE_DRIVERS,
                        format!(
                            "input pin {} of gate `{}` is already driven",
                            wire.to.pin_index, target.id
                        ),
                        location(),
                    )
                    .with_note("the first wire driving a pin wins"),
                );
                continue;
            }
            let driver = Driver {
                gate: from,
                pin_index: wire.from.pin_index,
            };
            *slot = Some(driver);
            wire_sources[w] = Some(driver);
            edges.push((from, to));
        }

        Self {
            index,
            drivers,
            edges,
            wire_sources,
        }
    }

    /// Returns the dense position of gate `id`.
    pub fn gate_index(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    /// Returns the driver of every input pin of the gate at `gate`.
    pub fn drivers(&self, gate: usize) -> &[Option<Driver>] {
        self.drivers.get(gate).map_or(&[], Vec::as_slice)
    }

    /// Source/target positions of every honored wire, in wire order.
    pub fn edges(&self) -> &[(usize, usize)] {
        &self.edges
    }

    /// The source of the wire at position `wire` in `Circuit::wires`, or
    /// `None` if that wire was rejected.
    pub fn wire_source(&self, wire: usize) -> Option<Driver> {
        self.wire_sources.get(wire).copied().flatten()
    }

    /// Number of gates covered.
    pub fn len(&self) -> usize {
        self.drivers.len()
    }

    /// Returns `true` if the netlist covers no gates.
    pub fn is_empty(&self) -> bool {
        self.drivers.is_empty()
    }

    /// Reads the strict level on each input pin of gate `gate`, taking source
    /// levels from `gates`. Undriven pins read `false`.
    pub fn resolve_inputs(&self, gate: usize, gates: &[Gate]) -> Vec<bool> {
        self.drivers(gate)
            .iter()
            .map(|driver| match driver {
                Some(d) => gates
                    .get(d.gate)
                    .and_then(|g| g.read_output_pin(d.pin_index))
                    .unwrap_or(false),
                None => false,
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kind::GateKind;
    use crate::wire::{PinRef, Wire};

    fn not_chain() -> Circuit {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("in", GateKind::Input));
        c.add_gate(Gate::new("n1", GateKind::Not));
        c.add_gate(Gate::new("out", GateKind::Output));
        c.wire("in", "n1", 0);
        c.wire("n1", "out", 0);
        c
    }

    #[test]
    fn resolves_drivers() {
        let c = not_chain();
        let sink = DiagnosticSink::new();
        let net = Netlist::build(&c, &sink);
        assert!(sink.is_empty());
        assert_eq!(net.len(), 3);
        assert_eq!(net.gate_index("n1"), Some(1));
        assert_eq!(
            net.drivers(1),
            &[Some(Driver {
                gate: 0,
                pin_index: -1
            })]
        );
        assert_eq!(net.edges(), &[(0, 1), (1, 2)]);
    }

    #[test]
    fn resolve_inputs_reads_source_levels() {
        let mut c = not_chain();
        c.gates[0].output = true;
        let net = Netlist::build(&c, &DiagnosticSink::new());
        assert_eq!(net.resolve_inputs(1, &c.gates), vec![true]);
        assert_eq!(net.resolve_inputs(0, &c.gates), Vec::<bool>::new());
    }

    #[test]
    fn dangling_wires_are_reported_and_ignored() {
        let mut c = not_chain();
        c.wires
            .push(Wire::new("ghost", PinRef::output("nope"), PinRef::input("out", 0)));
        c.wires
            .push(Wire::new("bad-pin", PinRef::output("in"), PinRef::input("n1", 4)));
        c.wires
            .push(Wire::new("bad-src", PinRef::secondary("in"), PinRef::input("out", 0)));
        let sink = DiagnosticSink::new();
        let net = Netlist::build(&c, &sink);
        let codes: Vec<String> = sink.diagnostics().iter().map(|d| d.code.to_string()).collect();
        assert_eq!(codes, vec!["W101", "W102", "W103"]);
        assert_eq!(net.edges().len(), 2);
        assert!(net.wire_source(0).is_some());
        assert!((2..5).all(|w| net.wire_source(w).is_none()));
        assert!(net.wire_source(5).is_none());
    }

    #[test]
    fn second_driver_loses() {
        let mut c = not_chain();
        c.add_gate(Gate::new("in2", GateKind::Input));
        c.wire("in2", "n1", 0);
        c.gates[3].output = true;
        let sink = DiagnosticSink::new();
        let net = Netlist::build(&c, &sink);
        assert_eq!(sink.diagnostics()[0].code, DiagnosticCode::MULTIPLE_DRIVERS);
        assert_eq!(net.resolve_inputs(1, &c.gates), vec![false]);
        assert!(net.wire_source(0).is_some());
        assert!(net.wire_source(2).is_none());
    }

    #[test]
    fn duplicate_ids_map_to_first_gate() {
        let mut c = not_chain();
        c.add_gate(Gate::new("n1", GateKind::And));
        let net = Netlist::build(&c, &DiagnosticSink::new());
        assert_eq!(net.gate_index("n1"), Some(1));
    }
}
