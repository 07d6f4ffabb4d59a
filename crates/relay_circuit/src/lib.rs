//! Circuit data model for the relay logic simulator.
//!
//! A [`Circuit`] is a flat pair of collections, gates and wires. Wires refer
//! to gates by [`GateId`] only, so a circuit may contain arbitrary feedback
//! loops without any gate owning another. The JSON form produced by circuit
//! editors is accepted as-is (see [`Circuit::from_json`]); its loosely-typed
//! per-gate `metadata` bag is converted into the typed [`GateState`] at the
//! serde boundary.
//!
//! # Modules
//!
//! - `ids`: string-backed gate and wire identifiers
//! - `kind`: the gate type enumeration and per-type pin arities
//! - `state`: per-kind persistent state and custom gate definitions
//! - `gate`: [`Gate`] and its wire format
//! - `wire`: [`Wire`], [`PinRef`], and the negative pin-index convention
//! - `circuit`: [`Circuit`] construction, lookup, and JSON I/O
//! - `netlist`: resolved input-pin drivers for one evaluation
//! - `validate`: structural checks producing diagnostics

#![warn(missing_docs)]

pub mod circuit;
pub mod error;
pub mod gate;
pub mod ids;
pub mod kind;
pub mod netlist;
pub mod state;
pub mod validate;
pub mod wire;

pub use circuit::Circuit;
pub use error::CircuitError;
pub use gate::{Gate, Position};
pub use ids::{GateId, WireId};
pub use kind::GateKind;
pub use netlist::{Driver, Netlist};
pub use state::{
    BoundaryPin, ClockState, CounterState, CustomGateDefinition, FlipFlopState, GateState,
    LatchState, MAX_COUNTER_BITS,
};
pub use validate::validate_circuit;
pub use wire::{OutputPin, PinRef, Wire};
