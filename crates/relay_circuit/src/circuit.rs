//! The circuit aggregate: flat gate and wire collections.

use crate::error::CircuitError;
use crate::gate::Gate;
use crate::ids::{GateId, WireId};
use crate::kind::GateKind;
use crate::netlist::Netlist;
use crate::wire::{PinRef, Wire};
use relay_diagnostics::DiagnosticSink;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A circuit: the sole owner of its gates and wires.
///
/// All relations are expressed as id lookups. Gate order is significant only
/// as a tie-breaker (for example, the order of INPUT gates in a truth table).
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Circuit {
    /// All gates, in insertion order.
    #[serde(default)]
    pub gates: Vec<Gate>,
    /// All wires, in insertion order.
    #[serde(default)]
    pub wires: Vec<Wire>,
}

impl Circuit {
    /// Creates an empty circuit.
    pub fn new() -> Self {
        Self::default()
    }

    /// Parses a circuit from its JSON form.
    pub fn from_json(json: &str) -> Result<Self, CircuitError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes the circuit to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> Result<String, CircuitError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reads a circuit from a JSON file.
    pub fn load(path: &Path) -> Result<Self, CircuitError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Writes the circuit to a JSON file.
    pub fn save(&self, path: &Path) -> Result<(), CircuitError> {
        std::fs::write(path, self.to_json_pretty()?)?;
        Ok(())
    }

    /// Appends a gate and returns its id.
    pub fn add_gate(&mut self, gate: Gate) -> GateId {
        let id = gate.id.clone();
        self.gates.push(gate);
        id
    }

    /// Adds a wire between two pins with a freshly generated id.
    pub fn connect(&mut self, from: PinRef, to: PinRef) -> WireId {
        let mut n = self.wires.len();
        let id = loop {
            let candidate = WireId::new(format!("w{n}"));
            if !self.wires.iter().any(|w| w.id == candidate) {
                break candidate;
            }
            n += 1;
        };
        self.wires.push(Wire::new(id.clone(), from, to));
        id
    }

    /// Wires the primary output of `from` into input pin `pin` of `to`.
    pub fn wire(&mut self, from: &str, to: &str, pin: usize) -> WireId {
        self.connect(PinRef::output(from), PinRef::input(to, pin))
    }

    /// Returns the first gate with the given id.
    pub fn gate(&self, id: &str) -> Option<&Gate> {
        self.gates.iter().find(|g| g.id.as_str() == id)
    }

    /// Returns the first gate with the given id, mutably.
    pub fn gate_mut(&mut self, id: &str) -> Option<&mut Gate> {
        self.gates.iter_mut().find(|g| g.id.as_str() == id)
    }

    /// Returns the position of the first gate with the given id.
    pub fn position_of(&self, id: &str) -> Option<usize> {
        self.gates.iter().position(|g| g.id.as_str() == id)
    }

    /// Iterates over INPUT gates in circuit order.
    pub fn input_gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter().filter(|g| g.kind == GateKind::Input)
    }

    /// Iterates over OUTPUT gates in circuit order.
    pub fn output_gates(&self) -> impl Iterator<Item = &Gate> {
        self.gates.iter().filter(|g| g.kind == GateKind::Output)
    }

    /// Returns the level of the primary output of gate `id`, if it exists.
    pub fn output_of(&self, id: &str) -> Option<bool> {
        self.gate(id).map(|g| g.output)
    }

    /// Recomputes every wire's cosmetic `is_active` flag from its source pin.
    ///
    /// Only wires evaluation honors can be active. Dangling wires, wires into
    /// a pin the target lacks, and wires losing to an earlier driver of the
    /// same pin are all inactive.
    pub fn refresh_wire_activity(&mut self) {
        let netlist = Netlist::build(self, &DiagnosticSink::new());
        self.refresh_wire_activity_with(&netlist);
    }

    /// Like [`refresh_wire_activity`](Self::refresh_wire_activity), reusing
    /// a netlist built from this circuit's current wiring.
    pub fn refresh_wire_activity_with(&mut self, netlist: &Netlist) {
        let gates = &self.gates;
        for (w, wire) in self.wires.iter_mut().enumerate() {
            wire.is_active = netlist
                .wire_source(w)
                .and_then(|d| gates.get(d.gate)?.read_output_pin(d.pin_index))
                .unwrap_or(false);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn and_circuit() -> Circuit {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("a", GateKind::Input));
        c.add_gate(Gate::new("b", GateKind::Input));
        c.add_gate(Gate::new("and", GateKind::And));
        c.add_gate(Gate::new("y", GateKind::Output));
        c.wire("a", "and", 0);
        c.wire("b", "and", 1);
        c.wire("and", "y", 0);
        c
    }

    #[test]
    fn lookup_by_id() {
        let c = and_circuit();
        assert_eq!(c.gate("and").unwrap().kind, GateKind::And);
        assert_eq!(c.position_of("y"), Some(3));
        assert!(c.gate("missing").is_none());
        assert_eq!(c.input_gates().count(), 2);
        assert_eq!(c.output_gates().count(), 1);
    }

    #[test]
    fn connect_generates_unique_ids() {
        let mut c = Circuit::new();
        c.wires.push(Wire::new("w1", PinRef::output("a"), PinRef::input("b", 0)));
        let id = c.wire("a", "b", 1);
        assert_ne!(id.as_str(), "w1");
        let id2 = c.wire("a", "b", 0);
        assert_ne!(id, id2);
    }

    #[test]
    fn refresh_wire_activity_follows_source() {
        let mut c = and_circuit();
        c.gate_mut("a").unwrap().output = true;
        c.wires.push(Wire::new(
            "dangling",
            PinRef::output("nowhere"),
            PinRef::input("y", 0),
        ));
        c.refresh_wire_activity();
        assert!(c.wires[0].is_active);
        assert!(!c.wires[1].is_active);
        assert!(!c.wires[3].is_active);
    }

    #[test]
    fn rejected_wires_are_inactive() {
        let mut c = and_circuit();
        c.gate_mut("a").unwrap().output = true;
        c.wires.push(Wire::new(
            "bad-pin",
            PinRef::output("a"),
            PinRef::input("and", 5),
        ));
        c.wires.push(Wire::new(
            "missing-target",
            PinRef::output("a"),
            PinRef::input("ghost", 0),
        ));
        c.wires.push(Wire::new(
            "second-driver",
            PinRef::output("a"),
            PinRef::input("and", 1),
        ));
        for wire in &mut c.wires {
            wire.is_active = true;
        }
        c.refresh_wire_activity();
        assert!(c.wires[0].is_active);
        assert!(!c.wires[3].is_active, "invalid target pin");
        assert!(!c.wires[4].is_active, "missing target gate");
        assert!(!c.wires[5].is_active, "pin already driven");
    }

    #[test]
    fn json_roundtrip() {
        let c = and_circuit();
        let json = c.to_json_pretty().unwrap();
        let back = Circuit::from_json(&json).unwrap();
        assert_eq!(back, c);
    }

    #[test]
    fn empty_json_object_is_empty_circuit() {
        let c = Circuit::from_json("{}").unwrap();
        assert!(c.gates.is_empty());
        assert!(c.wires.is_empty());
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            Circuit::from_json("{\"gates\": 3}"),
            Err(CircuitError::Json(_))
        ));
    }

    #[test]
    fn save_and_load_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("and.json");
        let c = and_circuit();
        c.save(&path).unwrap();
        let back = Circuit::load(&path).unwrap();
        assert_eq!(back, c);
    }
}
