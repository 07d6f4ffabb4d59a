//! Wires and the pin-index convention.
//!
//! A wire always runs from an output pin to an input pin. On the source side,
//! negative indices name output pins: `-1` is a gate's primary output and
//! `-2` its secondary output. Non-negative indices on the source side select
//! among a multi-output gate's `outputs`; on the target side they name input
//! pins. One flat list of wires can therefore describe both input wiring and
//! output fan-out without a separate pin-type tag.

use crate::ids::{GateId, WireId};
use serde::{Deserialize, Serialize};

/// One end of a wire.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRef {
    /// The gate the pin belongs to.
    pub gate_id: GateId,
    /// Pin position, following the convention described in the module docs.
    pub pin_index: i32,
}

impl PinRef {
    /// Pin index of a gate's primary output.
    pub const PRIMARY_OUTPUT: i32 = -1;
    /// Pin index of a dual-output gate's secondary (`Q̄`) output.
    pub const SECONDARY_OUTPUT: i32 = -2;

    /// Creates a pin reference.
    pub fn new(gate_id: impl Into<GateId>, pin_index: i32) -> Self {
        Self {
            gate_id: gate_id.into(),
            pin_index,
        }
    }

    /// The primary output of `gate_id`.
    pub fn output(gate_id: impl Into<GateId>) -> Self {
        Self::new(gate_id, Self::PRIMARY_OUTPUT)
    }

    /// The secondary output of `gate_id`.
    pub fn secondary(gate_id: impl Into<GateId>) -> Self {
        Self::new(gate_id, Self::SECONDARY_OUTPUT)
    }

    /// Input pin `pin` of `gate_id`.
    pub fn input(gate_id: impl Into<GateId>, pin: usize) -> Self {
        Self::new(gate_id, pin as i32)
    }

    /// Classifies this reference when used as a wire's source.
    pub fn output_pin(&self) -> OutputPin {
        OutputPin::from_index(self.pin_index)
    }
}

/// How a wire's source pin index reads its gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputPin {
    /// Index `-1`.
    Primary,
    /// Index `-2`.
    Secondary,
    /// A non-negative index into `outputs`.
    Indexed(usize),
    /// Any other negative index.
    Invalid(i32),
}

impl OutputPin {
    /// Classifies a raw source-side pin index.
    pub fn from_index(pin_index: i32) -> Self {
        match pin_index {
            PinRef::PRIMARY_OUTPUT => OutputPin::Primary,
            PinRef::SECONDARY_OUTPUT => OutputPin::Secondary,
            n if n >= 0 => OutputPin::Indexed(n as usize),
            n => OutputPin::Invalid(n),
        }
    }
}

/// A directed connection from an output pin to an input pin.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Wire {
    /// Identity within the circuit.
    pub id: WireId,
    /// The driving output pin.
    pub from: PinRef,
    /// The driven input pin.
    pub to: PinRef,
    /// Whether the source pin is currently high. Cosmetic: recomputed after
    /// every evaluation and never read by it.
    #[serde(default)]
    pub is_active: bool,
}

impl Wire {
    /// Creates an inactive wire.
    pub fn new(id: impl Into<WireId>, from: PinRef, to: PinRef) -> Self {
        Self {
            id: id.into(),
            from,
            to,
            is_active: false,
        }
    }
}
