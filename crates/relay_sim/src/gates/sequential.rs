//! Gates whose outputs depend on state carried between evaluation calls.
//!
//! Edge detection compares the current clock input with the level stored by
//! the previous call. Every evaluation stores the current level, whether or
//! not an edge was seen, so consecutive calls see consecutive samples.

use super::{GateEnv, GateEvaluator, GateUpdate};
use relay_circuit::{ClockState, CounterState, FlipFlopState, Gate, GateState, LatchState};
use relay_diagnostics::{Diagnostic, DiagnosticCode, Location};
use tracing::trace;

fn pin(inputs: &[bool], index: usize) -> bool {
    inputs.get(index).copied().unwrap_or(false)
}

/// CLOCK: a square wave derived from the call's time.
///
/// With period `1000 / frequency` ms, the output is high for the first half
/// of every period counted from `start_time`. A running clock with no start
/// time starts now. A stopped clock, or one with a non-positive frequency,
/// holds its output.
pub struct ClockEvaluator;

impl GateEvaluator for ClockEvaluator {
    fn evaluate(&self, gate: &Gate, _inputs: &[bool], env: &GateEnv<'_>) -> GateUpdate {
        let mut state = match &gate.state {
            GateState::Clock(state) => *state,
            _ => ClockState::default(),
        };
        if !state.running {
            return GateUpdate::hold();
        }
        let frequency = state
            .frequency
            .unwrap_or(env.config().default_clock_frequency);
        let Some(period) = frequency.period_ms() else {
            return GateUpdate::hold();
        };
        let start = *state.start_time.get_or_insert(env.now_ms);
        let phase = (env.now_ms - start).rem_euclid(period);
        let level = phase < period / 2.0;
        trace!(gate = %gate.id, phase, level, "clock");
        GateUpdate::outputs(vec![level]).with_state(GateState::Clock(state))
    }
}

/// D-FF over inputs `[D, CLK]`: captures `D` on a rising clock edge.
/// Outputs `[Q, Q̄]`.
pub struct FlipFlopEvaluator;

impl GateEvaluator for FlipFlopEvaluator {
    fn evaluate(&self, gate: &Gate, inputs: &[bool], _env: &GateEnv<'_>) -> GateUpdate {
        let prior = match &gate.state {
            GateState::FlipFlop(state) => *state,
            _ => FlipFlopState::default(),
        };
        let (d, clk) = (pin(inputs, 0), pin(inputs, 1));
        let q = if clk && !prior.previous_clock { d } else { prior.q };
        GateUpdate::outputs(vec![q, !q]).with_state(GateState::FlipFlop(FlipFlopState {
            q,
            previous_clock: clk,
        }))
    }
}

/// SR-LATCH over inputs `[S, R]`. Outputs `[Q, Q̄]`.
///
/// `S=R=1` is forbidden; the latch holds `Q` and reports it.
pub struct LatchEvaluator;

impl GateEvaluator for LatchEvaluator {
    fn evaluate(&self, gate: &Gate, inputs: &[bool], env: &GateEnv<'_>) -> GateUpdate {
        let prior = match &gate.state {
            GateState::Latch(state) => *state,
            _ => LatchState::default(),
        };
        let q = match (pin(inputs, 0), pin(inputs, 1)) {
            (true, false) => true,
            (false, true) => false,
            (false, false) => prior.q,
            (true, true) => {
                env.sink.emit_once(
                    Diagnostic::warning(
                        DiagnosticCode::FORBIDDEN_LATCH_STATE,
                        "S and R are both high",
                        Location::gate(gate.id.as_str()),
                    )
                    .with_note("the latch holds its previous Q"),
                );
                prior.q
            }
        };
        GateUpdate::outputs(vec![q, !q]).with_state(GateState::Latch(LatchState { q }))
    }
}

/// BINARY_COUNTER: counts rising edges on its single input, modulo
/// `2^bit_count`, exposing the count LSB first.
pub struct CounterEvaluator;

impl GateEvaluator for CounterEvaluator {
    fn evaluate(&self, gate: &Gate, inputs: &[bool], env: &GateEnv<'_>) -> GateUpdate {
        let prior = match &gate.state {
            GateState::Counter(state) => *state,
            _ => CounterState::default(),
        };
        let bits = CounterState::clamp_bits(
            prior
                .bit_count
                .unwrap_or(env.config().default_counter_bits),
        );
        let mask = CounterState::mask(bits);
        let clk = pin(inputs, 0);
        let mut value = prior.value & mask;
        if clk && !prior.previous_clock {
            value = value.wrapping_add(1) & mask;
        }
        let outputs = (0..bits).map(|i| (value >> i) & 1 == 1).collect();
        GateUpdate::outputs(outputs).with_state(GateState::Counter(CounterState {
            bit_count: Some(bits),
            value,
            previous_clock: clk,
        }))
    }
}
