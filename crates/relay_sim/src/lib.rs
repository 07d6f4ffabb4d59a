//! Evaluation engine for relay logic circuits.
//!
//! Given a [`Circuit`](relay_circuit::Circuit) and an [`EvalContext`], the
//! engine computes every gate's outputs and returns the updated circuit. It
//! chooses per call between two algorithms:
//!
//! - **immediate**: one pass in topological order, valid for acyclic circuits
//! - **delayed**: one unit-delay pass against a snapshot of the previous
//!   outputs, required once feedback exists
//!
//! Stateful gates (flip-flops, latches, counters, clocks) keep their memory in
//! the circuit itself, so the caller advances a circuit by feeding each result
//! back into the next call.
//!
//! # Usage
//!
//! ```ignore
//! use relay_sim::{Engine, EvalContext};
//!
//! let engine = Engine::default();
//! let result = engine.evaluate(circuit, &EvalContext::new().with_input("a", true));
//! println!("y = {:?}", result.circuit.output_of("y"));
//! ```
//!
//! # Modules
//!
//! - `analyzer`: dependency graph, cycle detection, complexity metrics
//! - `gates`: per-type evaluators and their registry
//! - `custom`: nested evaluation of custom gates
//! - `evaluator`: the immediate and delayed passes
//! - `engine`: strategy selection, settling, and tick traces
//! - `truth_table`: exhaustive tabulation of small circuits

#![warn(missing_docs)]

pub mod analyzer;
pub mod context;
pub mod custom;
pub mod engine;
pub mod error;
mod evaluator;
pub mod gates;
pub mod strategy;
pub mod time;
pub mod truth_table;

pub use analyzer::{CircuitAnalyzer, CircuitComplexity};
pub use context::{EvalContext, InputOverride};
pub use engine::{evaluate, Engine, EngineConfig, TickSample, TickTrace};
pub use error::SimError;
pub use gates::{EvaluatorRegistry, GateEnv, GateEvaluator, GateUpdate};
pub use strategy::{EvaluationInfo, EvaluationMode, EvaluationResult, Strategy};
pub use truth_table::{TruthRow, TruthTable, MAX_TRUTH_TABLE_INPUTS};
