//! `relay check`: static validation of a circuit file.
//!
//! Reports dangling wires, invalid pins, multiply-driven pins, duplicate ids,
//! unknown gate types, and broken custom gate boundaries without evaluating.

use relay_circuit::validate_circuit;
use relay_diagnostics::{Diagnostic, Severity};

use crate::pipeline::{load_circuit, print_diagnostics};
use crate::{CheckArgs, GlobalArgs, ReportFormat};

/// Runs the `relay check` command.
///
/// Returns exit code 0 if no errors, 1 if there are errors. Warnings alone do
/// not fail the check.
pub fn run(args: &CheckArgs, global: &GlobalArgs) -> Result<i32, Box<dyn std::error::Error>> {
    let circuit = load_circuit(&args.circuit)?;

    if !global.quiet && args.format == ReportFormat::Text {
        eprintln!("   Checking {}", args.circuit);
    }

    let diagnostics = validate_circuit(&circuit);

    match args.format {
        ReportFormat::Text => {
            print_diagnostics(&diagnostics, global);
            if !global.quiet {
                let (errors, warnings) = count(&diagnostics);
                eprintln!("   Result: {errors} error(s), {warnings} warning(s)");
            }
        }
        ReportFormat::Json => println!("{}", serde_json::to_string_pretty(&diagnostics)?),
    }

    Ok(exit_code(&diagnostics))
}

fn count(diagnostics: &[Diagnostic]) -> (usize, usize) {
    let errors = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Error)
        .count();
    let warnings = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Warning)
        .count();
    (errors, warnings)
}

fn exit_code(diagnostics: &[Diagnostic]) -> i32 {
    if diagnostics.iter().any(|d| d.severity.is_error()) {
        1
    } else {
        0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_circuit::{Circuit, Gate, GateKind};
    use tempfile::TempDir;

    fn quiet() -> GlobalArgs {
        GlobalArgs {
            quiet: true,
            color: false,
            config: None,
        }
    }

    fn check(circuit: &Circuit) -> i32 {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("circuit.json");
        circuit.save(&path).unwrap();
        let args = CheckArgs {
            circuit: path.to_str().unwrap().to_string(),
            format: ReportFormat::Json,
        };
        run(&args, &quiet()).unwrap()
    }

    #[test]
    fn clean_circuit_passes() {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("a", GateKind::Input));
        c.add_gate(Gate::new("y", GateKind::Output));
        c.wire("a", "y", 0);
        assert_eq!(check(&c), 0);
    }

    #[test]
    fn warnings_do_not_fail() {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("a", GateKind::Input));
        c.add_gate(Gate::new("y", GateKind::Output));
        c.wire("ghost", "y", 0);
        let diagnostics = validate_circuit(&c);
        assert_eq!(count(&diagnostics), (0, 1));
        assert_eq!(check(&c), 0);
    }

    #[test]
    fn duplicate_ids_fail() {
        let mut c = Circuit::new();
        c.add_gate(Gate::new("a", GateKind::Input));
        c.add_gate(Gate::new("a", GateKind::Input));
        let diagnostics = validate_circuit(&c);
        assert_eq!(count(&diagnostics).0, 1);
        assert_eq!(check(&c), 1);
    }

    #[test]
    fn unreadable_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let args = CheckArgs {
            circuit: tmp.path().join("absent.json").to_str().unwrap().to_string(),
            format: ReportFormat::Text,
        };
        assert!(run(&args, &quiet()).is_err());
    }
}
