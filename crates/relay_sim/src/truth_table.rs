//! Exhaustive input/output tables for circuits with few inputs.

use crate::context::EvalContext;
use crate::engine::Engine;
use crate::error::SimError;
use relay_circuit::{Circuit, GateId};
use serde::Serialize;
use std::fmt;

/// Largest number of INPUT gates [`Engine::truth_table`] enumerates.
pub const MAX_TRUTH_TABLE_INPUTS: usize = 16;

/// One row: an input combination and the outputs it settles to.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TruthRow {
    /// Level of each INPUT gate, in [`TruthTable::inputs`] order.
    pub inputs: Vec<bool>,
    /// Level of each OUTPUT gate, in [`TruthTable::outputs`] order.
    pub outputs: Vec<bool>,
}

/// Every input combination of a circuit and the outputs it produces.
///
/// Rows count up in binary with the first input as the most significant bit.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TruthTable {
    /// INPUT gate ids, in circuit order.
    pub inputs: Vec<GateId>,
    /// OUTPUT gate ids, in circuit order.
    pub outputs: Vec<GateId>,
    /// One row per input combination.
    pub rows: Vec<TruthRow>,
}

impl TruthTable {
    /// Returns the row for an input combination.
    pub fn row(&self, inputs: &[bool]) -> Option<&TruthRow> {
        self.rows.iter().find(|r| r.inputs == inputs)
    }

    /// Returns the column of OUTPUT gate `id`, one level per row.
    pub fn output_column(&self, id: &str) -> Option<Vec<bool>> {
        let index = self.outputs.iter().position(|g| g.as_str() == id)?;
        Some(self.rows.iter().map(|r| r.outputs[index]).collect())
    }
}

impl fmt::Display for TruthTable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.inputs.iter().map(GateId::as_str).collect();
        let outs: Vec<&str> = self.outputs.iter().map(GateId::as_str).collect();
        writeln!(f, "{} | {}", names.join(" "), outs.join(" "))?;
        for row in &self.rows {
            let cells = |levels: &[bool], headers: &[&str]| {
                levels
                    .iter()
                    .zip(headers)
                    .map(|(&b, h)| format!("{:<width$}", u8::from(b), width = h.len()))
                    .collect::<Vec<_>>()
                    .join(" ")
            };
            writeln!(f, "{} | {}", cells(&row.inputs, &names), cells(&row.outputs, &outs))?;
        }
        Ok(())
    }
}

impl Engine {
    /// Tabulates `circuit` over every combination of its INPUT gates.
    ///
    /// Each row starts from the circuit as given, drives the inputs through
    /// the context, and settles. Rows are therefore independent, which makes
    /// the table meaningful for combinational circuits and for latches whose
    /// next state depends only on the stored state and the inputs.
    pub fn truth_table(&self, circuit: &Circuit) -> Result<TruthTable, SimError> {
        let inputs: Vec<GateId> = circuit.input_gates().map(|g| g.id.clone()).collect();
        let outputs: Vec<GateId> = circuit.output_gates().map(|g| g.id.clone()).collect();
        if inputs.len() > MAX_TRUTH_TABLE_INPUTS {
            return Err(SimError::TooManyInputs {
                count: inputs.len(),
                max: MAX_TRUTH_TABLE_INPUTS,
            });
        }
        if inputs.is_empty() {
            return Err(SimError::NothingToTabulate("INPUT"));
        }
        if outputs.is_empty() {
            return Err(SimError::NothingToTabulate("OUTPUT"));
        }

        let width = inputs.len();
        let mut rows = Vec::with_capacity(1 << width);
        for combination in 0u32..(1u32 << width) {
            let levels: Vec<bool> = (0..width)
                .map(|j| (combination >> (width - 1 - j)) & 1 == 1)
                .collect();
            let mut context = EvalContext::new().at(0.0).settled();
            for (id, &level) in inputs.iter().zip(&levels) {
                context = context.with_input(id.clone(), level);
            }
            let result = self.evaluate(circuit.clone(), &context);
            let values = outputs
                .iter()
                .map(|id| result.circuit.output_of(id.as_str()).unwrap_or(false))
                .collect();
            rows.push(TruthRow {
                inputs: levels,
                outputs: values,
            });
        }
        Ok(TruthTable {
            inputs,
            outputs,
            rows,
        })
    }
}
