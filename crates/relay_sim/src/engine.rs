//! The engine: configuration, strategy selection, and the evaluation entry points.

use crate::analyzer::CircuitAnalyzer;
use crate::context::EvalContext;
use crate::evaluator::{delayed_pass, immediate_pass};
use crate::gates::{EvaluatorRegistry, GateEnv};
use crate::strategy::{EvaluationInfo, EvaluationMode, EvaluationResult, Strategy};
use crate::time::wall_clock_ms;
use relay_circuit::{Circuit, CounterState, GateId, GateState, Netlist};
use relay_common::{Frequency, InternalError};
use relay_diagnostics::{Diagnostic, DiagnosticCode, DiagnosticSink, Location};
use std::time::Instant;
use tracing::{debug, warn};

/// Engine-wide settings.
///
/// Gates that leave a setting to the engine (a clock with no frequency, a
/// counter with no width) take it from here at evaluation time.
#[derive(Clone, Debug, PartialEq)]
pub struct EngineConfig {
    /// Strategy used when the call's context does not pick one.
    pub strategy: Strategy,
    /// Upper bound on delayed passes made by a settling evaluation.
    pub max_settle_iterations: u32,
    /// Deepest custom-gate nesting evaluated.
    pub max_nesting_depth: u32,
    /// Frequency of clocks that store none.
    pub default_clock_frequency: Frequency,
    /// Width of counters that store none.
    pub default_counter_bits: u8,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            strategy: Strategy::AutoSelect,
            max_settle_iterations: 64,
            max_nesting_depth: 32,
            default_clock_frequency: Frequency::DEFAULT,
            default_counter_bits: 4,
        }
    }
}

/// Primary output levels of every gate, sampled after one call of
/// [`Engine::evaluate_ticks`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickSample {
    /// The time the call was evaluated at.
    pub time_ms: f64,
    /// Primary output of each gate, in circuit order.
    pub levels: Vec<bool>,
}

/// The trace produced by [`Engine::evaluate_ticks`].
#[derive(Clone, Debug, PartialEq)]
pub struct TickTrace {
    /// Gate ids, in the order of [`TickSample::levels`].
    pub gate_ids: Vec<GateId>,
    /// One sample per call.
    pub samples: Vec<TickSample>,
    /// The final call's result, with the diagnostics of every call.
    pub result: EvaluationResult,
}

impl TickTrace {
    /// The primary output of gate `id` across all samples.
    pub fn levels_of(&self, id: &str) -> Option<Vec<bool>> {
        let index = self.gate_ids.iter().position(|g| g.as_str() == id)?;
        Some(self.samples.iter().map(|s| s.levels[index]).collect())
    }
}

/// A configured evaluation engine.
///
/// The engine holds no per-circuit state. Everything a circuit remembers
/// between calls lives in its gates, so one engine can evaluate any number of
/// independent circuits in any interleaving.
#[derive(Default)]
pub struct Engine {
    registry: EvaluatorRegistry,
    config: EngineConfig,
}

impl Engine {
    /// Creates an engine with the standard evaluators.
    pub fn new(config: EngineConfig) -> Self {
        Self::with_registry(config, EvaluatorRegistry::standard())
    }

    /// Creates an engine with a caller-supplied evaluator registry.
    pub fn with_registry(config: EngineConfig, registry: EvaluatorRegistry) -> Self {
        Self { registry, config }
    }

    /// The engine's configuration.
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The evaluator registry.
    pub fn registry(&self) -> &EvaluatorRegistry {
        &self.registry
    }

    /// The evaluator registry, for registering additional gate kinds.
    pub fn registry_mut(&mut self) -> &mut EvaluatorRegistry {
        &mut self.registry
    }

    /// Evaluates `circuit` once and returns the updated circuit.
    ///
    /// Never fails: problems with the circuit are returned as warnings and
    /// the affected wires or gates are skipped. Acyclic circuits under
    /// [`Strategy::AutoSelect`] are brought fully up to date by one call.
    /// Otherwise each call advances the circuit by one unit delay, unless the
    /// context asks to settle.
    pub fn evaluate(&self, mut circuit: Circuit, context: &EvalContext) -> EvaluationResult {
        let started = Instant::now();
        let now_ms = context.now_ms.unwrap_or_else(wall_clock_ms);
        let sink = DiagnosticSink::new();
        let mut info = self.run(&mut circuit, context, now_ms, 0, &sink);
        info.execution_time_ms = started.elapsed().as_secs_f64() * 1_000.0;

        let diagnostics = sink.take_all();
        for diag in &diagnostics {
            warn!(code = %diag.code, location = %diag.location, "{}", diag.message);
        }
        EvaluationResult {
            circuit,
            evaluation_info: info,
            warnings: diagnostics.iter().map(ToString::to_string).collect(),
            diagnostics,
        }
    }

    /// Evaluates `circuit`, repeating delayed passes until a pass changes
    /// nothing or the configured iteration limit is reached.
    pub fn settle(&self, circuit: Circuit, context: &EvalContext) -> EvaluationResult {
        let context = EvalContext {
            settle: true,
            ..context.clone()
        };
        self.evaluate(circuit, &context)
    }

    /// Evaluates `circuit` `ticks` times (at least once), advancing the time
    /// by `tick_ms` between calls, and samples every gate's primary output
    /// after each call.
    ///
    /// The first call runs at the context's time (or now); input overrides
    /// apply to every call.
    pub fn evaluate_ticks(
        &self,
        mut circuit: Circuit,
        context: &EvalContext,
        ticks: u32,
        tick_ms: f64,
    ) -> TickTrace {
        let start = context.now_ms.unwrap_or_else(wall_clock_ms);
        let gate_ids = circuit.gates.iter().map(|g| g.id.clone()).collect();
        let mut samples = Vec::new();
        let mut diagnostics: Vec<Diagnostic> = Vec::new();
        let mut last = None;
        for tick in 0..ticks.max(1) {
            let time_ms = start + f64::from(tick) * tick_ms;
            let result = self.evaluate(circuit, &context.clone().at(time_ms));
            samples.push(TickSample {
                time_ms,
                levels: result.circuit.gates.iter().map(|g| g.output).collect(),
            });
            for diag in &result.diagnostics {
                if !diagnostics.contains(diag) {
                    diagnostics.push(diag.clone());
                }
            }
            circuit = result.circuit.clone();
            last = Some(result);
        }
        let mut result = match last {
            Some(result) => result,
            None => self.evaluate(circuit, context),
        };
        result.warnings = diagnostics.iter().map(ToString::to_string).collect();
        result.diagnostics = diagnostics;
        TickTrace {
            gate_ids,
            samples,
            result,
        }
    }

    /// Evaluates one circuit level and refreshes its wire activity. Custom
    /// gates re-enter here with a deeper `depth` and their own sink.
    pub(crate) fn run(
        &self,
        circuit: &mut Circuit,
        context: &EvalContext,
        now_ms: f64,
        depth: u32,
        sink: &DiagnosticSink,
    ) -> EvaluationInfo {
        let started = Instant::now();
        let strategy = context.strategy.unwrap_or(self.config.strategy);
        self.apply_defaults(circuit);

        let netlist = Netlist::build(circuit, sink);
        let analyzer = CircuitAnalyzer::with_netlist(circuit, &netlist);
        let has_cycle = analyzer.has_circular_dependency();
        let mut mode = strategy.select(has_cycle);
        debug!(
            gates = circuit.gates.len(),
            wires = circuit.wires.len(),
            has_cycle,
            %strategy,
            %mode,
            depth,
            "evaluating circuit"
        );

        let env = GateEnv {
            engine: self,
            context,
            now_ms,
            depth,
            sink,
        };
        let mut iterations = 0;
        if mode == EvaluationMode::Immediate {
            let outcome = analyzer
                .topological_order()
                .ok_or_else(|| InternalError::new("acyclic circuit has no topological order"))
                .and_then(|order| immediate_pass(circuit, &netlist, &order, &self.registry, &env));
            match outcome {
                Ok(()) => iterations = 1,
                Err(err) => {
                    warn!(%err, "falling back to delayed evaluation");
                    mode = EvaluationMode::Delayed;
                }
            }
        }
        if mode == EvaluationMode::Delayed {
            let limit = if context.settle {
                self.config.max_settle_iterations.max(1)
            } else {
                1
            };
            loop {
                let changed = delayed_pass(circuit, &netlist, &self.registry, &env);
                iterations += 1;
                if !context.settle || !changed {
                    break;
                }
                if iterations >= limit {
                    sink.emit_once(
                        Diagnostic::warning(
                            DiagnosticCode::NOT_SETTLED,
                            format!("evaluation did not settle within {limit} iterations"),
                            Location::circuit(),
                        )
                        .with_help("the circuit may oscillate; evaluate it repeatedly instead"),
                    );
                    break;
                }
            }
            debug!(iterations, settle = context.settle, "delayed evaluation finished");
        }
        circuit.refresh_wire_activity_with(&netlist);

        EvaluationInfo {
            strategy,
            strategy_used: mode,
            has_circular_dependency: has_cycle,
            execution_time_ms: started.elapsed().as_secs_f64() * 1_000.0,
            iterations,
        }
    }

    /// Fixes counter widths left to the engine so that pin checks see the
    /// real number of output pins. The width is stored back on the gate.
    fn apply_defaults(&self, circuit: &mut Circuit) {
        for gate in &mut circuit.gates {
            if let GateState::Counter(counter) = &mut gate.state {
                if counter.bit_count.is_none() {
                    let bits = CounterState::clamp_bits(self.config.default_counter_bits);
                    counter.bit_count = Some(bits);
                    counter.value &= CounterState::mask(bits);
                    let value = counter.value;
                    let levels: Vec<bool> = (0..bits).map(|i| (value >> i) & 1 == 1).collect();
                    gate.set_outputs(&levels);
                }
            }
        }
    }
}

/// Evaluates `circuit` once with a default-configured engine.
///
/// Shorthand for `Engine::default().evaluate(circuit, context)`.
pub fn evaluate(circuit: Circuit, context: &EvalContext) -> EvaluationResult {
    Engine::default().evaluate(circuit, context)
}
