//! The two evaluation passes over a resolved netlist.
//!
//! Both passes resolve each gate's input pins through the netlist, record
//! the resolved level on every driven pin, and hand the levels to the gate's
//! evaluator. They differ only in where source levels are read from.

use crate::gates::{EvaluatorRegistry, GateEnv};
use relay_circuit::{Circuit, Gate, Netlist};
use relay_common::{InternalError, RelayResult, Signal};
use tracing::trace;

/// One pass in dependency order. Each gate reads the outputs its drivers
/// produced earlier in the same pass, so an acyclic circuit is fully
/// consistent afterwards.
///
/// `order` must list every gate position exactly once.
pub(crate) fn immediate_pass(
    circuit: &mut Circuit,
    netlist: &Netlist,
    order: &[usize],
    registry: &EvaluatorRegistry,
    env: &GateEnv<'_>,
) -> RelayResult<()> {
    if order.len() != circuit.gates.len() {
        return Err(InternalError::new(format!(
            "evaluation order covers {} of {} gates",
            order.len(),
            circuit.gates.len()
        )));
    }
    for &i in order {
        let gate = circuit
            .gates
            .get(i)
            .ok_or_else(|| InternalError::new(format!("gate position {i} out of range")))?;
        let inputs = netlist.resolve_inputs(i, &circuit.gates);
        let update = registry.get(&gate.kind).evaluate(gate, &inputs, env);
        trace!(gate = %gate.id, kind = %gate.kind, ?inputs, outputs = ?update.outputs, "immediate");
        let gate = &mut circuit.gates[i];
        record_inputs(gate, netlist, i, &inputs);
        update.apply(gate);
    }
    Ok(())
}

/// One unit-delay pass. Every gate reads the outputs of the snapshot taken
/// before the pass, so gate order is irrelevant. Returns `true` if any gate's
/// outputs or state changed.
pub(crate) fn delayed_pass(
    circuit: &mut Circuit,
    netlist: &Netlist,
    registry: &EvaluatorRegistry,
    env: &GateEnv<'_>,
) -> bool {
    let snapshot = circuit.gates.clone();
    let mut changed = false;
    for (i, prior) in snapshot.iter().enumerate() {
        let inputs = netlist.resolve_inputs(i, &snapshot);
        let update = registry.get(&prior.kind).evaluate(prior, &inputs, env);
        trace!(gate = %prior.id, kind = %prior.kind, ?inputs, outputs = ?update.outputs, "delayed");
        let gate = &mut circuit.gates[i];
        record_inputs(gate, netlist, i, &inputs);
        update.apply(gate);
        changed |= gate.output != prior.output
            || gate.outputs != prior.outputs
            || gate.state != prior.state;
    }
    changed
}

/// Stores the resolved level on every driven input pin. Undriven pins keep
/// whatever they held.
fn record_inputs(gate: &mut Gate, netlist: &Netlist, index: usize, levels: &[bool]) {
    for (pin, driver) in netlist.drivers(index).iter().enumerate() {
        if driver.is_none() {
            continue;
        }
        if let (Some(slot), Some(&level)) = (gate.inputs.get_mut(pin), levels.get(pin)) {
            *slot = Signal::from(level);
        }
    }
}
