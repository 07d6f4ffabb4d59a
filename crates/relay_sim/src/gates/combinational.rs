//! Stateless boolean gates.

use super::{GateEnv, GateEvaluator, GateUpdate};
use relay_circuit::Gate;

/// The boolean function computed by a combinational gate.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BoolOp {
    /// All inputs high.
    And,
    /// Any input high.
    Or,
    /// First input low.
    Not,
    /// Not all inputs high.
    Nand,
    /// No input high.
    Nor,
    /// Odd number of inputs high.
    Xor,
    /// Even number of inputs high.
    Xnor,
}

impl BoolOp {
    /// Applies the function. An empty input list reads as all-low.
    pub fn apply(self, inputs: &[bool]) -> bool {
        let odd = || inputs.iter().filter(|&&b| b).count() % 2 == 1;
        match self {
            BoolOp::And => !inputs.is_empty() && inputs.iter().all(|&b| b),
            BoolOp::Or => inputs.iter().any(|&b| b),
            BoolOp::Not => !inputs.first().copied().unwrap_or(false),
            BoolOp::Nand => !BoolOp::And.apply(inputs),
            BoolOp::Nor => !BoolOp::Or.apply(inputs),
            BoolOp::Xor => odd(),
            BoolOp::Xnor => !odd(),
        }
    }
}

/// Evaluator for AND, OR, NOT, NAND, NOR, XOR, and XNOR.
pub struct Combinational(pub BoolOp);

impl GateEvaluator for Combinational {
    fn evaluate(&self, _gate: &Gate, inputs: &[bool], _env: &GateEnv<'_>) -> GateUpdate {
        GateUpdate::outputs(vec![self.0.apply(inputs)])
    }
}

/// Two-way multiplexer over inputs `[A, B, S]`: `S ? B : A`.
pub struct Mux;

impl GateEvaluator for Mux {
    fn evaluate(&self, _gate: &Gate, inputs: &[bool], _env: &GateEnv<'_>) -> GateUpdate {
        let pin = |i: usize| inputs.get(i).copied().unwrap_or(false);
        let out = if pin(2) { pin(1) } else { pin(0) };
        GateUpdate::outputs(vec![out])
    }
}
