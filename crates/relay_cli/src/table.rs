//! `relay table`: print a circuit's truth table.

use crate::pipeline::{engine, load_circuit};
use crate::{GlobalArgs, TableArgs};

/// Runs the `relay table` command.
///
/// Every INPUT gate combination is evaluated independently and settled; the
/// OUTPUT gate levels form the right-hand columns.
pub fn run(args: &TableArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let engine = engine(global)?;
    let circuit = load_circuit(&args.circuit)?;

    if !global.quiet {
        eprintln!("   Tabulating {}", args.circuit);
    }

    let table = engine.truth_table(&circuit)?;
    print!("{table}");
    Ok(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_circuit::{Circuit, Gate, GateKind};
    use std::fs;
    use tempfile::TempDir;

    fn setup(circuit: &Circuit) -> (TempDir, TableArgs, GlobalArgs) {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("circuit.json");
        circuit.save(&path).unwrap();
        fs::write(tmp.path().join("relay.toml"), "").unwrap();
        let args = TableArgs {
            circuit: path.to_str().unwrap().to_string(),
        };
        let global = GlobalArgs {
            quiet: true,
            color: false,
            config: Some(tmp.path().to_str().unwrap().to_string()),
        };
        (tmp, args, global)
    }

    #[test]
    fn tabulates_xor() {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("a", GateKind::Input));
        c.add_gate(Gate::new("b", GateKind::Input));
        c.add_gate(Gate::new("x", GateKind::Xor));
        c.add_gate(Gate::new("y", GateKind::Output));
        c.wire("a", "x", 0);
        c.wire("b", "x", 1);
        c.wire("x", "y", 0);
        let (_tmp, args, global) = setup(&c);
        assert_eq!(run(&args, &global).unwrap(), 0);
    }

    #[test]
    fn circuit_without_inputs_is_an_error() {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("y", GateKind::Output));
        let (_tmp, args, global) = setup(&c);
        let err = run(&args, &global).unwrap_err();
        assert!(err.to_string().contains("INPUT"));
    }
}
