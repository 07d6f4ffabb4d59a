//! The caller-supplied context of one evaluation call.

use crate::strategy::Strategy;
use relay_circuit::GateId;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Drives one INPUT gate from outside the circuit for one call.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputOverride {
    /// The level to drive.
    pub state: bool,
}

/// External inputs to one evaluation call.
///
/// Every field is optional. An empty context evaluates the circuit as stored,
/// at the current wall-clock time, with the engine's configured strategy.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EvalContext {
    /// Overrides for INPUT gates, keyed by gate id. Entries naming gates that
    /// are not INPUT gates are ignored.
    pub memory: BTreeMap<GateId, InputOverride>,
    /// Time in milliseconds seen by clock gates. `None` reads the wall clock.
    pub now_ms: Option<f64>,
    /// Strategy for this call. `None` uses the engine's configured strategy.
    pub strategy: Option<Strategy>,
    /// Repeat delayed passes until the circuit stops changing.
    pub settle: bool,
}

impl EvalContext {
    /// Creates an empty context.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drives INPUT gate `id` to `state` (builder style).
    pub fn with_input(mut self, id: impl Into<GateId>, state: bool) -> Self {
        self.memory.insert(id.into(), InputOverride { state });
        self
    }

    /// Pins the time seen by clock gates (builder style).
    pub fn at(mut self, now_ms: f64) -> Self {
        self.now_ms = Some(now_ms);
        self
    }

    /// Selects the strategy for this call (builder style).
    pub fn with_strategy(mut self, strategy: Strategy) -> Self {
        self.strategy = Some(strategy);
        self
    }

    /// Requests a settling evaluation (builder style).
    pub fn settled(mut self) -> Self {
        self.settle = true;
        self
    }

    /// Returns the override for gate `id`, if any.
    pub fn input_override(&self, id: &str) -> Option<bool> {
        self.memory.get(id).map(|o| o.state)
    }
}
