//! `relay analyze`: report topology statistics without evaluating.

use relay_circuit::Circuit;
use relay_sim::{CircuitAnalyzer, CircuitComplexity, Strategy};
use serde_json::json;

use crate::pipeline::{engine_config, load_circuit, resolve_config};
use crate::{AnalyzeArgs, GlobalArgs, ReportFormat};

/// Runs the `relay analyze` command.
pub fn run(args: &AnalyzeArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let config = engine_config(&resolve_config(global)?);
    let circuit = load_circuit(&args.circuit)?;

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Analyzing {}", args.circuit);
    }

    let report = Report::new(&circuit, config.strategy);
    match args.format {
        ReportFormat::Text => print!("{}", report.to_text()),
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&report.to_json())?),
    }
    Ok(0)
}

/// Everything `relay analyze` prints about one circuit.
struct Report {
    complexity: CircuitComplexity,
    cyclic: bool,
    strategy: Strategy,
    circular_gates: Vec<String>,
    order: Option<Vec<String>>,
}

impl Report {
    fn new(circuit: &Circuit, strategy: Strategy) -> Self {
        let analyzer = CircuitAnalyzer::new(circuit);
        let cyclic = analyzer.has_circular_dependency();
        let order = analyzer.topological_order().map(|positions| {
            positions
                .into_iter()
                .map(|pos| circuit.gates[pos].id.to_string())
                .collect()
        });
        Self {
            complexity: analyzer.complexity(),
            cyclic,
            strategy,
            circular_gates: analyzer
                .find_circular_gates()
                .into_iter()
                .map(|id| id.to_string())
                .collect(),
            order,
        }
    }

    fn to_text(&self) -> String {
        let c = &self.complexity;
        let mut out = String::new();
        out.push_str(&format!("gates:          {}\n", c.gate_count));
        out.push_str(&format!("wires:          {}\n", c.wire_count));
        out.push_str(&format!("feedback edges: {}\n", c.feedback_edges));
        out.push_str(&format!("max fan-out:    {}\n", c.max_fan_out));
        out.push_str(&format!(
            "cyclic:         {}\n",
            if self.cyclic { "yes" } else { "no" }
        ));
        out.push_str(&format!(
            "evaluation:     {} ({} strategy)\n",
            self.strategy.select(self.cyclic),
            self.strategy
        ));
        if !self.circular_gates.is_empty() {
            out.push_str(&format!(
                "in cycles:      {}\n",
                self.circular_gates.join(", ")
            ));
        }
        if let Some(ref order) = self.order {
            out.push_str(&format!("order:          {}\n", order.join(" -> ")));
        }
        out
    }

    fn to_json(&self) -> serde_json::Value {
        json!({
            "complexity": self.complexity,
            "hasCircularDependency": self.cyclic,
            "strategy": self.strategy,
            "strategyUsed": self.strategy.select(self.cyclic),
            "circularGates": self.circular_gates,
            "topologicalOrder": self.order,
        })
    }
}
