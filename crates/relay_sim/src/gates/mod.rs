//! Per-type gate evaluators and the registry that dispatches to them.
//!
//! An evaluator sees one gate, its resolved input levels, and the call's
//! environment. It never looks at wires or other gates, and it reports its
//! result as a [`GateUpdate`] that the caller applies, so the same evaluator
//! serves both immediate and delayed passes.

mod combinational;
mod io;
mod sequential;

pub use combinational::{BoolOp, Combinational, Mux};
pub use io::{DisplayEvaluator, InputEvaluator, NoopEvaluator, OutputEvaluator};
pub use sequential::{ClockEvaluator, CounterEvaluator, FlipFlopEvaluator, LatchEvaluator};

use crate::context::EvalContext;
use crate::custom::CustomEvaluator;
use crate::engine::{Engine, EngineConfig};
use relay_circuit::{Gate, GateKind, GateState};
use relay_diagnostics::DiagnosticSink;
use std::collections::HashMap;

/// Everything an evaluator may consult besides its own gate and inputs.
pub struct GateEnv<'a> {
    pub(crate) engine: &'a Engine,
    /// The caller's context for the circuit being evaluated.
    pub context: &'a EvalContext,
    /// The time seen by clock gates during this call.
    pub now_ms: f64,
    /// Custom-gate nesting depth of the circuit being evaluated (0 at top level).
    pub depth: u32,
    /// Receives findings about the circuit being evaluated.
    pub sink: &'a DiagnosticSink,
}

impl GateEnv<'_> {
    /// The engine running this evaluation.
    pub fn engine(&self) -> &Engine {
        self.engine
    }

    /// The running engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        self.engine.config()
    }
}

/// The result of evaluating one gate.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GateUpdate {
    /// New output levels, primary first. `None` leaves the outputs untouched.
    pub outputs: Option<Vec<bool>>,
    /// Replacement state. `None` keeps the current state.
    pub state: Option<GateState>,
}

impl GateUpdate {
    /// An update that changes nothing.
    pub fn hold() -> Self {
        Self::default()
    }

    /// An update writing `outputs` and keeping the state.
    pub fn outputs(outputs: Vec<bool>) -> Self {
        Self {
            outputs: Some(outputs),
            state: None,
        }
    }

    /// Adds a replacement state (builder style).
    pub fn with_state(mut self, state: GateState) -> Self {
        self.state = Some(state);
        self
    }

    /// Writes this update into `gate`.
    pub fn apply(self, gate: &mut Gate) {
        if let Some(outputs) = self.outputs {
            gate.set_outputs(&outputs);
        }
        if let Some(state) = self.state {
            gate.state = state;
        }
    }
}

/// Evaluation rule for one gate type.
pub trait GateEvaluator: Send + Sync {
    /// Computes the gate's next outputs and state from `inputs`, which holds
    /// one strict level per input pin (`gate.input_count()` entries).
    fn evaluate(&self, gate: &Gate, inputs: &[bool], env: &GateEnv<'_>) -> GateUpdate;
}

/// Maps gate kinds to their evaluators.
///
/// Kinds without an entry, including every [`GateKind::Unknown`], fall back
/// to [`NoopEvaluator`].
pub struct EvaluatorRegistry {
    evaluators: HashMap<GateKind, Box<dyn GateEvaluator>>,
    fallback: NoopEvaluator,
}

impl EvaluatorRegistry {
    /// Creates a registry with no evaluators; every gate is a no-op.
    pub fn empty() -> Self {
        Self {
            evaluators: HashMap::new(),
            fallback: NoopEvaluator,
        }
    }

    /// Creates a registry covering every built-in gate kind.
    pub fn standard() -> Self {
        let mut registry = Self::empty();
        registry.register(GateKind::Input, InputEvaluator);
        registry.register(GateKind::Output, OutputEvaluator);
        registry.register(GateKind::And, Combinational(BoolOp::And));
        registry.register(GateKind::Or, Combinational(BoolOp::Or));
        registry.register(GateKind::Not, Combinational(BoolOp::Not));
        registry.register(GateKind::Nand, Combinational(BoolOp::Nand));
        registry.register(GateKind::Nor, Combinational(BoolOp::Nor));
        registry.register(GateKind::Xor, Combinational(BoolOp::Xor));
        registry.register(GateKind::Xnor, Combinational(BoolOp::Xnor));
        registry.register(GateKind::Mux, Mux);
        registry.register(GateKind::Clock, ClockEvaluator);
        registry.register(GateKind::DFlipFlop, FlipFlopEvaluator);
        registry.register(GateKind::SrLatch, LatchEvaluator);
        registry.register(GateKind::BinaryCounter, CounterEvaluator);
        registry.register(GateKind::Led, DisplayEvaluator);
        registry.register(GateKind::SevenSegment, DisplayEvaluator);
        registry.register(GateKind::NumberDisplay, DisplayEvaluator);
        registry.register(GateKind::Custom, CustomEvaluator);
        registry
    }

    /// Installs `evaluator` for `kind`, returning the one it replaces.
    pub fn register(
        &mut self,
        kind: GateKind,
        evaluator: impl GateEvaluator + 'static,
    ) -> Option<Box<dyn GateEvaluator>> {
        self.evaluators.insert(kind, Box::new(evaluator))
    }

    /// Returns `true` if `kind` has a registered evaluator.
    pub fn contains(&self, kind: &GateKind) -> bool {
        self.evaluators.contains_key(kind)
    }

    /// Returns the evaluator for `kind`, or the no-op fallback.
    pub fn get(&self, kind: &GateKind) -> &dyn GateEvaluator {
        match self.evaluators.get(kind) {
            Some(evaluator) => evaluator.as_ref(),
            None => &self.fallback,
        }
    }
}

impl Default for EvaluatorRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

/// Runs `f` with an environment backed by a default engine, for evaluator tests.
#[cfg(test)]
pub(crate) fn with_env<R>(now_ms: f64, f: impl FnOnce(&GateEnv<'_>) -> R) -> (R, DiagnosticSink) {
    with_env_in(EvalContext::default(), now_ms, f)
}

/// Like [`with_env`], with an explicit caller context.
#[cfg(test)]
pub(crate) fn with_env_in<R>(
    context: EvalContext,
    now_ms: f64,
    f: impl FnOnce(&GateEnv<'_>) -> R,
) -> (R, DiagnosticSink) {
    let engine = Engine::default();
    let sink = DiagnosticSink::new();
    let result = f(&GateEnv {
        engine: &engine,
        context: &context,
        now_ms,
        depth: 0,
        sink: &sink,
    });
    (result, sink)
}

#[cfg(test)]
mod tests {
    use super::*;

    struct AlwaysHigh;

    impl GateEvaluator for AlwaysHigh {
        fn evaluate(&self, _gate: &Gate, _inputs: &[bool], _env: &GateEnv<'_>) -> GateUpdate {
            GateUpdate::outputs(vec![true])
        }
    }

    #[test]
    fn standard_covers_every_known_kind() {
        let registry = EvaluatorRegistry::standard();
        for kind in GateKind::KNOWN.iter() {
            assert!(registry.contains(kind), "no evaluator for {kind}");
        }
        assert!(!registry.contains(&GateKind::Unknown("FUSE".into())));
    }

    #[test]
    fn register_replaces() {
        let mut registry = EvaluatorRegistry::standard();
        assert!(registry.register(GateKind::And, AlwaysHigh).is_some());
        let gate = Gate::new("a", GateKind::And);
        let (update, _) = with_env(0.0, |env| {
            registry.get(&GateKind::And).evaluate(&gate, &[false, false], env)
        });
        assert_eq!(update.outputs, Some(vec![true]));
    }

    #[test]
    fn new_kinds_are_additive() {
        let mut registry = EvaluatorRegistry::empty();
        let kind = GateKind::from_name("PULLUP");
        assert!(registry.register(kind.clone(), AlwaysHigh).is_none());
        let gate = Gate::new("p", kind.clone());
        let (update, _) = with_env(0.0, |env| registry.get(&kind).evaluate(&gate, &[], env));
        assert_eq!(update.outputs, Some(vec![true]));
    }

    #[test]
    fn apply_writes_outputs_and_state() {
        let mut gate = Gate::new("ff", GateKind::DFlipFlop);
        GateUpdate::outputs(vec![true, false])
            .with_state(GateState::FlipFlop(relay_circuit::FlipFlopState {
                q: true,
                previous_clock: true,
            }))
            .apply(&mut gate);
        assert!(gate.output);
        assert_eq!(gate.outputs, vec![true, false]);

        let before = gate.clone();
        GateUpdate::hold().apply(&mut gate);
        assert_eq!(gate, before);
    }
}
