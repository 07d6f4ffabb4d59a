//! Per-kind persistent gate state.
//!
//! Everything a gate must remember between evaluation calls lives here, in a
//! variant chosen by the gate's kind. The engine keeps no state of its own, so
//! a circuit value carries its complete simulation state and independent
//! circuits never interfere.

use crate::circuit::Circuit;
use crate::ids::GateId;
use crate::kind::GateKind;
use relay_common::Frequency;
use serde::{Deserialize, Serialize};

/// Widest counter the engine supports; counter values are stored as `u32`.
pub const MAX_COUNTER_BITS: u8 = 32;

/// Persistent state of a single gate, selected by its kind.
#[derive(Clone, Debug, PartialEq, Default)]
pub enum GateState {
    /// Combinational, input, output, display, and unknown gates.
    #[default]
    Stateless,
    /// A [`GateKind::Clock`].
    Clock(ClockState),
    /// A [`GateKind::DFlipFlop`].
    FlipFlop(FlipFlopState),
    /// A [`GateKind::SrLatch`].
    Latch(LatchState),
    /// A [`GateKind::BinaryCounter`].
    Counter(CounterState),
    /// A [`GateKind::Custom`]; the nested circuit is the gate's state.
    Custom(Box<CustomGateDefinition>),
}

impl GateState {
    /// The state a freshly placed gate of `kind` starts with.
    pub fn initial(kind: &GateKind) -> Self {
        match kind {
            GateKind::Clock => GateState::Clock(ClockState::default()),
            GateKind::DFlipFlop => GateState::FlipFlop(FlipFlopState::default()),
            GateKind::SrLatch => GateState::Latch(LatchState::default()),
            GateKind::BinaryCounter => GateState::Counter(CounterState::default()),
            _ => GateState::Stateless,
        }
    }

    /// Returns the custom definition, if this is a custom gate's state.
    pub fn custom(&self) -> Option<&CustomGateDefinition> {
        match self {
            GateState::Custom(def) => Some(def),
            _ => None,
        }
    }
}

/// Timing state of a clock gate.
///
/// `None` fields fall back to engine-wide defaults at evaluation time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ClockState {
    /// Toggle rate; `None` uses the engine's default clock frequency.
    pub frequency: Option<Frequency>,
    /// Whether the clock is currently toggling.
    pub running: bool,
    /// Wall-clock time in milliseconds the current run started at.
    pub start_time: Option<f64>,
}

impl Default for ClockState {
    fn default() -> Self {
        Self {
            frequency: None,
            running: true,
            start_time: None,
        }
    }
}

/// Memory of an edge-triggered D flip-flop.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct FlipFlopState {
    /// The captured `Q` value.
    pub q: bool,
    /// The clock level seen by the previous evaluation.
    pub previous_clock: bool,
}

/// Memory of an SR latch.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct LatchState {
    /// The held `Q` value.
    pub q: bool,
}

/// Memory of a binary counter.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub struct CounterState {
    /// Counter width; `None` uses the engine's default width.
    pub bit_count: Option<u8>,
    /// The current count.
    pub value: u32,
    /// The clock level seen by the previous evaluation.
    pub previous_clock: bool,
}

impl CounterState {
    /// Clamps a requested width into `1..=MAX_COUNTER_BITS`.
    pub fn clamp_bits(bits: u8) -> u8 {
        bits.clamp(1, MAX_COUNTER_BITS)
    }

    /// Returns the mask selecting the low `bits` bits.
    pub fn mask(bits: u8) -> u32 {
        let bits = Self::clamp_bits(bits);
        if bits >= 32 {
            u32::MAX
        } else {
            (1u32 << bits) - 1
        }
    }
}

/// The nested circuit behind a custom gate, with its ordered boundary pins.
///
/// External input pin `i` drives the nested INPUT gate named by `inputs[i]`;
/// external output pin `j` reads the nested OUTPUT gate named by `outputs[j]`.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomGateDefinition {
    /// Display name of the custom gate type (e.g. "HALF_ADDER").
    #[serde(default)]
    pub name: String,
    /// The circuit implementing the gate.
    pub circuit: Circuit,
    /// Ordered external input pins.
    #[serde(default)]
    pub inputs: Vec<BoundaryPin>,
    /// Ordered external output pins.
    #[serde(default)]
    pub outputs: Vec<BoundaryPin>,
}

/// One named pin on a custom gate's boundary.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BoundaryPin {
    /// Pin label shown by editors.
    #[serde(default)]
    pub name: String,
    /// The nested INPUT or OUTPUT gate this pin is bound to.
    pub gate_id: GateId,
}

impl BoundaryPin {
    /// Creates a boundary pin bound to `gate_id`.
    pub fn new(name: impl Into<String>, gate_id: impl Into<GateId>) -> Self {
        Self {
            name: name.into(),
            gate_id: gate_id.into(),
        }
    }
}

/// The loosely-typed `metadata` bag of the JSON wire format.
///
/// Only [`Gate`](crate::gate::Gate)'s serde conversion touches this type.
/// Keys the engine does not use are carried through untouched in `extra`.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct Metadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_clock_state: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub q_output: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub frequency: Option<Frequency>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_running: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bit_count: Option<u8>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub current_value: Option<u32>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl Metadata {
    /// Builds the typed state for `kind` from this bag.
    pub(crate) fn to_state(
        &self,
        kind: &GateKind,
        custom: Option<CustomGateDefinition>,
    ) -> GateState {
        match kind {
            GateKind::Clock => GateState::Clock(ClockState {
                frequency: self.frequency,
                running: self.is_running.unwrap_or(true),
                start_time: self.start_time,
            }),
            GateKind::DFlipFlop => GateState::FlipFlop(FlipFlopState {
                q: self.q_output.unwrap_or(false),
                previous_clock: self.previous_clock_state.unwrap_or(false),
            }),
            GateKind::SrLatch => GateState::Latch(LatchState {
                q: self.q_output.unwrap_or(false),
            }),
            GateKind::BinaryCounter => {
                let bit_count = self.bit_count.map(CounterState::clamp_bits);
                let mask = CounterState::mask(bit_count.unwrap_or(MAX_COUNTER_BITS));
                GateState::Counter(CounterState {
                    bit_count,
                    value: self.current_value.unwrap_or(0) & mask,
                    previous_clock: self.previous_clock_state.unwrap_or(false),
                })
            }
            GateKind::Custom => match custom {
                Some(def) => GateState::Custom(Box::new(def)),
                None => GateState::Stateless,
            },
            _ => GateState::Stateless,
        }
    }

    /// Writes the typed fields of `state` into a bag that already holds the
    /// untyped extras. Returns the custom definition separately.
    pub(crate) fn from_state(
        state: GateState,
        extra: serde_json::Map<String, serde_json::Value>,
    ) -> (Self, Option<CustomGateDefinition>) {
        let mut meta = Metadata {
            extra,
            ..Metadata::default()
        };
        let mut custom = None;
        match state {
            GateState::Stateless => {}
            GateState::Clock(clock) => {
                meta.frequency = clock.frequency;
                meta.is_running = Some(clock.running);
                meta.start_time = clock.start_time;
            }
            GateState::FlipFlop(ff) => {
                meta.q_output = Some(ff.q);
                meta.previous_clock_state = Some(ff.previous_clock);
            }
            GateState::Latch(latch) => {
                meta.q_output = Some(latch.q);
            }
            GateState::Counter(counter) => {
                meta.bit_count = counter.bit_count;
                meta.current_value = Some(counter.value);
                meta.previous_clock_state = Some(counter.previous_clock);
            }
            GateState::Custom(def) => custom = Some(*def),
        }
        (meta, custom)
    }

    /// Returns `true` when serializing this bag would produce `{}`.
    pub(crate) fn is_empty(&self) -> bool {
        self.previous_clock_state.is_none()
            && self.q_output.is_none()
            && self.frequency.is_none()
            && self.is_running.is_none()
            && self.start_time.is_none()
            && self.bit_count.is_none()
            && self.current_value.is_none()
            && self.extra.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_states() {
        assert_eq!(GateState::initial(&GateKind::And), GateState::Stateless);
        assert_eq!(
            GateState::initial(&GateKind::DFlipFlop),
            GateState::FlipFlop(FlipFlopState::default())
        );
        match GateState::initial(&GateKind::Clock) {
            GateState::Clock(clock) => {
                assert!(clock.running);
                assert!(clock.start_time.is_none());
            }
            other => panic!("expected clock state, got {other:?}"),
        }
    }

    #[test]
    fn counter_masks() {
        assert_eq!(CounterState::mask(4), 0b1111);
        assert_eq!(CounterState::mask(1), 1);
        assert_eq!(CounterState::mask(32), u32::MAX);
        assert_eq!(CounterState::mask(0), 1);
        assert_eq!(CounterState::mask(200), u32::MAX);
    }

    #[test]
    fn metadata_to_flip_flop_state() {
        let meta: Metadata =
            serde_json::from_str(r#"{"previousClockState": true, "qOutput": true}"#).unwrap();
        assert_eq!(
            meta.to_state(&GateKind::DFlipFlop, None),
            GateState::FlipFlop(FlipFlopState {
                q: true,
                previous_clock: true
            })
        );
    }

    #[test]
    fn metadata_counter_value_is_masked() {
        let meta: Metadata =
            serde_json::from_str(r#"{"bitCount": 3, "currentValue": 13}"#).unwrap();
        match meta.to_state(&GateKind::BinaryCounter, None) {
            GateState::Counter(counter) => {
                assert_eq!(counter.bit_count, Some(3));
                assert_eq!(counter.value, 5);
            }
            other => panic!("expected counter state, got {other:?}"),
        }
    }

    #[test]
    fn metadata_keeps_unknown_keys() {
        let meta: Metadata =
            serde_json::from_str(r#"{"qOutput": false, "color": "red"}"#).unwrap();
        assert_eq!(meta.extra.get("color").unwrap(), "red");
        let (back, _) = Metadata::from_state(
            meta.to_state(&GateKind::SrLatch, None),
            meta.extra.clone(),
        );
        let json = serde_json::to_value(&back).unwrap();
        assert_eq!(json["color"], "red");
        assert_eq!(json["qOutput"], false);
    }

    #[test]
    fn custom_without_definition_is_stateless() {
        let meta = Metadata::default();
        assert_eq!(meta.to_state(&GateKind::Custom, None), GateState::Stateless);
        assert!(meta.is_empty());
    }
}
