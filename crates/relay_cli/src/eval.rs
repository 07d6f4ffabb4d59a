//! `relay eval`: run the evaluation engine over a circuit file.
//!
//! A single call prints the updated circuit. With `--ticks N` the engine is
//! called `N` times with time advancing by `--tick-ms`, and the OUTPUT and
//! CLOCK levels after each call are printed as a timeline.

use std::path::Path;

use relay_circuit::{Circuit, GateKind};
use relay_sim::{EvalContext, EvaluationResult, TickTrace};

use crate::pipeline::{engine, load_circuit, print_diagnostics};
use crate::{EvalArgs, GlobalArgs};

/// Runs the `relay eval` command.
///
/// Returns exit code 0; warnings never fail an evaluation.
pub fn run(args: &EvalArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let engine = engine(global)?;
    let circuit = load_circuit(&args.circuit)?;

    if !global.quiet {
        eprintln!(
            "   Evaluating {} ({} gates, {} wires)",
            args.circuit,
            circuit.gates.len(),
            circuit.wires.len()
        );
    }

    let context = build_context(args);
    let result = match args.ticks {
        Some(ticks) => {
            let trace = engine.evaluate_ticks(circuit, &context, ticks, args.tick_ms);
            if !global.quiet {
                eprint!("{}", format_timeline(&trace));
            }
            trace.result
        }
        None => engine.evaluate(circuit, &context),
    };

    print_diagnostics(&result.diagnostics, global);
    if !global.quiet {
        eprintln!("   {}", summary(&result));
    }

    match args.output {
        Some(ref path) => {
            result.circuit.save(Path::new(path))?;
            if !global.quiet {
                eprintln!("   Wrote {path}");
            }
        }
        None => println!("{}", result.circuit.to_json_pretty()?),
    }
    Ok(0)
}

/// Translates the command-line flags into an evaluation context.
fn build_context(args: &EvalArgs) -> EvalContext {
    let mut context = EvalContext::new();
    for (id, level) in &args.set {
        context = context.with_input(id.as_str(), *level);
    }
    if let Some(at) = args.at {
        context = context.at(at);
    }
    if let Some(strategy) = args.strategy {
        context = context.with_strategy(strategy.into());
    }
    if args.settle {
        context = context.settled();
    }
    context
}

/// One-line description of how the evaluation ran.
fn summary(result: &EvaluationResult) -> String {
    let info = &result.evaluation_info;
    format!(
        "Result: {} evaluation ({} strategy), {} iteration(s), {}, {} warning(s) in {:.3}ms",
        info.strategy_used,
        info.strategy,
        info.iterations,
        if info.has_circular_dependency {
            "cyclic"
        } else {
            "acyclic"
        },
        result.warnings.len(),
        info.execution_time_ms
    )
}

/// Renders the sampled OUTPUT and CLOCK levels of a tick trace, one row per
/// call.
fn format_timeline(trace: &TickTrace) -> String {
    let watched = watched_gates(&trace.result.circuit);
    let mut out = String::new();
    if watched.is_empty() {
        return out;
    }
    let header: Vec<&str> = watched.iter().map(|&(_, id)| id).collect();
    out.push_str(&format!("{:>12}  {}\n", "time_ms", header.join(" ")));
    for sample in &trace.samples {
        let cells: Vec<String> = watched
            .iter()
            .map(|&(pos, id)| {
                let level = sample.levels.get(pos).copied().unwrap_or(false);
                format!("{:>width$}", u8::from(level), width = id.len())
            })
            .collect();
        out.push_str(&format!("{:>12.1}  {}\n", sample.time_ms, cells.join(" ")));
    }
    out
}

fn watched_gates(circuit: &Circuit) -> Vec<(usize, &str)> {
    circuit
        .gates
        .iter()
        .enumerate()
        .filter(|(_, g)| matches!(g.kind, GateKind::Output | GateKind::Clock))
        .map(|(pos, g)| (pos, g.id.as_str()))
        .collect()
}
