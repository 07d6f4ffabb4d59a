//! A single logic gate and its JSON wire format.

use crate::ids::GateId;
use crate::kind::GateKind;
use crate::state::{ClockState, CounterState, CustomGateDefinition, GateState, Metadata};
use crate::wire::OutputPin;
use relay_common::{Frequency, Signal};
use serde::{Deserialize, Serialize};

/// Canvas coordinates. Carried through for editors; never read by evaluation.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Position {
    /// Horizontal coordinate.
    #[serde(default)]
    pub x: f64,
    /// Vertical coordinate.
    #[serde(default)]
    pub y: f64,
}

/// A gate placed in a circuit.
///
/// `inputs` holds the value last seen on each input pin (unset until first
/// driven). `output` is the primary output pin; gates with more than one
/// output pin (flip-flops, latches, counters, multi-output custom gates)
/// also fill `outputs`, whose first entry always equals `output`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "RawGate", into = "RawGate")]
pub struct Gate {
    /// Identity within the circuit.
    pub id: GateId,
    /// The gate's type tag.
    pub kind: GateKind,
    /// Layout position.
    pub position: Position,
    /// Optional user label.
    pub label: Option<String>,
    /// Last value seen on each input pin.
    pub inputs: Vec<Signal>,
    /// Primary output level.
    pub output: bool,
    /// All output levels for multi-output gates; empty otherwise.
    pub outputs: Vec<bool>,
    /// Persistent per-kind state.
    pub state: GateState,
    /// Metadata keys the engine does not interpret, preserved for editors.
    pub extra_metadata: serde_json::Map<String, serde_json::Value>,
}

impl Gate {
    /// Creates a gate of `kind` with its default pins and initial state.
    pub fn new(id: impl Into<GateId>, kind: GateKind) -> Self {
        let state = GateState::initial(&kind);
        let mut gate = Self {
            id: id.into(),
            inputs: vec![Signal::Unset; kind.default_input_count()],
            kind,
            position: Position::default(),
            label: None,
            output: false,
            outputs: Vec::new(),
            state,
            extra_metadata: serde_json::Map::new(),
        };
        gate.reset_output_pins(gate.output_count());
        gate
    }

    /// Creates an AND/OR/XOR-style gate with `count` input pins.
    pub fn variadic(id: impl Into<GateId>, kind: GateKind, count: usize) -> Self {
        let mut gate = Self::new(id, kind);
        let count = count.max(gate.inputs.len());
        gate.inputs.resize(count, Signal::Unset);
        gate
    }

    /// Creates a clock toggling at `frequency`, starting at `start_time` ms.
    pub fn clock(id: impl Into<GateId>, frequency: Frequency, start_time: f64) -> Self {
        let mut gate = Self::new(id, GateKind::Clock);
        gate.state = GateState::Clock(ClockState {
            frequency: Some(frequency),
            running: true,
            start_time: Some(start_time),
        });
        gate
    }

    /// Creates a binary counter `bits` wide.
    pub fn counter(id: impl Into<GateId>, bits: u8) -> Self {
        let mut gate = Self::new(id, GateKind::BinaryCounter);
        gate.state = GateState::Counter(CounterState {
            bit_count: Some(CounterState::clamp_bits(bits)),
            ..CounterState::default()
        });
        gate.reset_output_pins(gate.output_count());
        gate
    }

    /// Creates a custom gate backed by `definition`.
    pub fn custom(id: impl Into<GateId>, definition: CustomGateDefinition) -> Self {
        let mut gate = Self::new(id, GateKind::Custom);
        gate.inputs = vec![Signal::Unset; definition.inputs.len()];
        gate.state = GateState::Custom(Box::new(definition));
        gate.reset_output_pins(gate.output_count());
        gate
    }

    /// Sets the layout position (builder style).
    pub fn at(mut self, x: f64, y: f64) -> Self {
        self.position = Position { x, y };
        self
    }

    /// Number of input pins this gate accepts wires on.
    pub fn input_count(&self) -> usize {
        match (&self.kind, &self.state) {
            (GateKind::Custom, GateState::Custom(def)) => def.inputs.len(),
            (GateKind::Unknown(_), _) => self.inputs.len(),
            (kind, _) if kind.is_variadic() => self.inputs.len().max(kind.default_input_count()),
            (kind, _) => kind.default_input_count(),
        }
    }

    /// Number of output pins this gate drives.
    ///
    /// Counters report their configured width. A counter whose width is left
    /// to the engine default reports the pins it currently stores.
    pub fn output_count(&self) -> usize {
        match (&self.kind, &self.state) {
            (GateKind::Custom, GateState::Custom(def)) => def.outputs.len(),
            (GateKind::Custom, _) | (GateKind::Unknown(_), _) => 0,
            (GateKind::BinaryCounter, GateState::Counter(counter)) => {
                match counter.bit_count {
                    Some(bits) => bits as usize,
                    None => self.outputs.len().max(1),
                }
            }
            (kind, _) if kind.is_display() => 0,
            (kind, _) if kind.is_dual_output() => 2,
            _ => 1,
        }
    }

    /// Reads an output pin using the wire pin-index convention.
    ///
    /// `-1` is the primary output and `-2` the secondary (`Q̄`) output of a
    /// dual-output gate; non-negative indices select from `outputs`, with
    /// index `0` also naming the primary output of single-output gates.
    /// Returns `None` for a pin the gate does not have.
    pub fn read_output_pin(&self, pin_index: i32) -> Option<bool> {
        match OutputPin::from_index(pin_index) {
            OutputPin::Primary => Some(self.output),
            OutputPin::Secondary => match self.outputs.get(1) {
                Some(level) => Some(*level),
                None if self.kind.is_dual_output() => Some(!self.output),
                None => None,
            },
            OutputPin::Indexed(n) => match self.outputs.get(n) {
                Some(level) => Some(*level),
                None if n == 0 && self.outputs.is_empty() && self.output_count() > 0 => {
                    Some(self.output)
                }
                None => None,
            },
            OutputPin::Invalid(_) => None,
        }
    }

    /// Returns `true` if `pin_index` names an output pin this gate drives,
    /// judged by its arity rather than by the levels currently stored.
    pub fn has_output_pin(&self, pin_index: i32) -> bool {
        let count = self.output_count();
        match OutputPin::from_index(pin_index) {
            OutputPin::Primary => !self.kind.is_display(),
            OutputPin::Secondary => count >= 2,
            OutputPin::Indexed(n) => n < count || (n == 0 && !self.kind.is_display()),
            OutputPin::Invalid(_) => false,
        }
    }

    /// Returns `true` if `pin_index` names an input pin of this gate.
    pub fn has_input_pin(&self, pin_index: i32) -> bool {
        pin_index >= 0 && (pin_index as usize) < self.input_count()
    }

    /// Writes a full set of output levels, keeping `output` and `outputs`
    /// consistent. Single-output gates keep `outputs` empty.
    pub fn set_outputs(&mut self, levels: &[bool]) {
        self.output = levels.first().copied().unwrap_or(false);
        if levels.len() > 1 {
            self.outputs.clear();
            self.outputs.extend_from_slice(levels);
        } else {
            self.outputs.clear();
        }
    }

    /// Returns the current output levels as a vector of `output_count()` entries.
    pub fn output_levels(&self) -> Vec<bool> {
        let count = self.output_count();
        match count {
            0 => Vec::new(),
            1 => vec![self.output],
            _ => (0..count)
                .map(|i| self.read_output_pin(i as i32).unwrap_or(false))
                .collect(),
        }
    }

    fn reset_output_pins(&mut self, count: usize) {
        self.outputs = if count > 1 { vec![false; count] } else { Vec::new() };
        if self.kind.is_dual_output() {
            self.outputs = vec![false, true];
        }
    }
}

/// Wire format of a gate, as written by circuit editors.
#[derive(Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawGate {
    id: GateId,
    #[serde(rename = "type")]
    kind: GateKind,
    #[serde(default)]
    position: Position,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    label: Option<String>,
    #[serde(default)]
    inputs: Vec<Signal>,
    #[serde(default)]
    output: Signal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    outputs: Option<Vec<Signal>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    metadata: Option<Metadata>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    custom_gate_definition: Option<CustomGateDefinition>,
}

impl From<RawGate> for Gate {
    fn from(raw: RawGate) -> Self {
        let meta = raw.metadata.unwrap_or_default();
        let state = meta.to_state(&raw.kind, raw.custom_gate_definition);
        let mut gate = Gate {
            id: raw.id,
            kind: raw.kind,
            position: raw.position,
            label: raw.label,
            inputs: raw.inputs,
            output: raw.output.is_high(),
            outputs: raw
                .outputs
                .unwrap_or_default()
                .into_iter()
                .map(Signal::is_high)
                .collect(),
            state,
            extra_metadata: meta.extra,
        };
        let arity = gate.input_count();
        if gate.inputs.len() < arity {
            gate.inputs.resize(arity, Signal::Unset);
        }
        if let Some(first) = gate.outputs.first() {
            gate.output = *first;
        }
        gate
    }
}

impl From<Gate> for RawGate {
    fn from(gate: Gate) -> Self {
        let (meta, custom) = Metadata::from_state(gate.state, gate.extra_metadata);
        RawGate {
            id: gate.id,
            kind: gate.kind,
            position: gate.position,
            label: gate.label,
            inputs: gate.inputs,
            output: Signal::from(gate.output),
            outputs: if gate.outputs.is_empty() {
                None
            } else {
                Some(gate.outputs.into_iter().map(Signal::from).collect())
            },
            metadata: if meta.is_empty() { None } else { Some(meta) },
            custom_gate_definition: custom,
        }
    }
}
