//! Gate dependency graph: cycle detection, ordering, and complexity metrics.
//!
//! The graph has one node per gate (by position, so duplicate ids stay
//! distinct) and one edge `a -> b` whenever an honored wire runs from `a` to
//! `b`. Parallel wires collapse to a single edge. Wires the netlist rejected
//! contribute nothing.

use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::visit::{depth_first_search, DfsEvent};
use relay_circuit::{Circuit, GateId, Netlist};
use relay_diagnostics::DiagnosticSink;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashSet};

/// Size and feedback metrics of a circuit.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CircuitComplexity {
    /// Number of gates.
    pub gate_count: usize,
    /// Number of wires, honored or not.
    pub wire_count: usize,
    /// Number of distinct gate-to-gate edges that close a cycle during a
    /// depth-first walk in gate order.
    pub feedback_edges: usize,
    /// Largest number of honored wires leaving a single gate.
    pub max_fan_out: usize,
}

/// Read-only structural analysis of one circuit.
pub struct CircuitAnalyzer {
    graph: DiGraph<usize, ()>,
    ids: Vec<GateId>,
    fan_out: Vec<usize>,
    wire_count: usize,
}

impl CircuitAnalyzer {
    /// Analyzes `circuit`, discarding any wiring diagnostics.
    pub fn new(circuit: &Circuit) -> Self {
        let netlist = Netlist::build(circuit, &DiagnosticSink::new());
        Self::with_netlist(circuit, &netlist)
    }

    /// Analyzes `circuit` using an already-resolved netlist.
    pub fn with_netlist(circuit: &Circuit, netlist: &Netlist) -> Self {
        let mut graph = DiGraph::with_capacity(circuit.gates.len(), netlist.edges().len());
        for i in 0..circuit.gates.len() {
            graph.add_node(i);
        }
        let mut fan_out = vec![0; circuit.gates.len()];
        for &(from, to) in netlist.edges() {
            fan_out[from] += 1;
            graph.update_edge(NodeIndex::new(from), NodeIndex::new(to), ());
        }
        Self {
            graph,
            ids: circuit.gates.iter().map(|g| g.id.clone()).collect(),
            fan_out,
            wire_count: circuit.wires.len(),
        }
    }

    /// Returns `true` if any path of wires leads from a gate back to itself.
    pub fn has_circular_dependency(&self) -> bool {
        self.back_edges() > 0
    }

    /// Returns the ids of every gate lying on at least one cycle.
    pub fn find_circular_gates(&self) -> BTreeSet<GateId> {
        self.circular_positions()
            .into_iter()
            .map(|i| self.ids[i].clone())
            .collect()
    }

    /// Returns the positions of every gate lying on at least one cycle.
    pub fn circular_positions(&self) -> BTreeSet<usize> {
        let mut members = BTreeSet::new();
        for component in tarjan_scc(&self.graph) {
            let cyclic = component.len() > 1
                || component
                    .first()
                    .is_some_and(|&n| self.graph.contains_edge(n, n));
            if cyclic {
                members.extend(component.iter().map(|n| n.index()));
            }
        }
        members
    }

    /// Reports gate/wire counts, feedback edges, and the largest fan-out.
    pub fn complexity(&self) -> CircuitComplexity {
        CircuitComplexity {
            gate_count: self.ids.len(),
            wire_count: self.wire_count,
            feedback_edges: self.back_edges(),
            max_fan_out: self.fan_out.iter().copied().max().unwrap_or(0),
        }
    }

    /// Gate positions with every gate after all of its drivers, or `None` if
    /// the circuit has a cycle.
    pub fn topological_order(&self) -> Option<Vec<usize>> {
        toposort(&self.graph, None)
            .ok()
            .map(|order| order.into_iter().map(|n| n.index()).collect())
    }

    fn back_edges(&self) -> usize {
        let mut edges = HashSet::new();
        depth_first_search(&self.graph, self.graph.node_indices(), |event| {
            if let DfsEvent::BackEdge(from, to) = event {
                edges.insert((from, to));
            }
        });
        edges.len()
    }
}
