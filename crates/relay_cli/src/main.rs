//! Relay CLI: evaluate, analyze, and check logic circuits saved as JSON.
//!
//! Provides `relay eval` for running the evaluation engine over a circuit
//! file, `relay analyze` for topology statistics and feedback loops,
//! `relay check` for static validation, and `relay table` for truth tables.

#![warn(missing_docs)]

mod analyze;
mod check;
mod eval;
mod pipeline;
mod table;

use std::process;

use clap::{Parser, Subcommand, ValueEnum};
use relay_sim::Strategy;

/// Relay: a digital logic circuit evaluator.
#[derive(Parser, Debug)]
#[command(name = "relay", version, about = "Relay logic circuit evaluator")]
pub struct Cli {
    /// Suppress all output except errors.
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Control colored output.
    #[arg(long, global = true, value_enum, default_value_t = ColorChoice::Auto)]
    pub color: ColorChoice,

    /// Path to a `relay.toml` file or the directory containing it.
    #[arg(long, global = true)]
    pub config: Option<String>,

    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate a circuit and print the updated circuit.
    Eval(EvalArgs),
    /// Report circuit size and feedback loops.
    Analyze(AnalyzeArgs),
    /// Validate wiring without evaluating.
    Check(CheckArgs),
    /// Print the truth table of a circuit's INPUT/OUTPUT gates.
    Table(TableArgs),
}

/// Arguments for the `relay eval` subcommand.
#[derive(Parser, Debug)]
pub struct EvalArgs {
    /// Circuit JSON file.
    pub circuit: String,

    /// Number of evaluation calls to run, advancing time between them.
    #[arg(long)]
    pub ticks: Option<u32>,

    /// Milliseconds between ticks.
    #[arg(long, default_value_t = 100.0)]
    pub tick_ms: f64,

    /// Evaluation time in milliseconds (default: wall clock).
    #[arg(long)]
    pub at: Option<f64>,

    /// Evaluation strategy (default: from config).
    #[arg(long, value_enum)]
    pub strategy: Option<StrategyArg>,

    /// Drive an INPUT gate, e.g. `--set a=1`.
    #[arg(long = "set", value_name = "GATE=0|1", value_parser = pipeline::parse_assignment)]
    pub set: Vec<(String, bool)>,

    /// Repeat delayed passes until the circuit stops changing.
    #[arg(long)]
    pub settle: bool,

    /// Write the evaluated circuit here instead of stdout.
    #[arg(short, long)]
    pub output: Option<String>,
}

/// Arguments for the `relay analyze` subcommand.
#[derive(Parser, Debug)]
pub struct AnalyzeArgs {
    /// Circuit JSON file.
    pub circuit: String,

    /// Output format.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `relay check` subcommand.
#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Circuit JSON file.
    pub circuit: String,

    /// Output format for diagnostics.
    #[arg(short, long, value_enum, default_value_t = ReportFormat::Text)]
    pub format: ReportFormat,
}

/// Arguments for the `relay table` subcommand.
#[derive(Parser, Debug)]
pub struct TableArgs {
    /// Circuit JSON file.
    pub circuit: String,
}

/// Strategy names accepted on the command line.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    /// Immediate evaluation for acyclic circuits, delayed otherwise.
    Auto,
    /// Always use delayed evaluation.
    EventDriven,
}

impl From<StrategyArg> for Strategy {
    fn from(arg: StrategyArg) -> Self {
        match arg {
            StrategyArg::Auto => Strategy::AutoSelect,
            StrategyArg::EventDriven => Strategy::EventDrivenOnly,
        }
    }
}

/// Controls whether colored output is produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ColorChoice {
    /// Detect from terminal capabilities.
    Auto,
    /// Always produce colored output.
    Always,
    /// Never produce colored output.
    Never,
}

/// Report output format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    /// Human-readable terminal output.
    Text,
    /// Machine-readable JSON output.
    Json,
}

/// Global settings derived from CLI flags.
pub struct GlobalArgs {
    /// Whether to suppress non-error output.
    pub quiet: bool,
    /// Whether to use colored output.
    pub color: bool,
    /// Optional path to a config file or directory.
    pub config: Option<String>,
}

fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let color = match cli.color {
        ColorChoice::Auto => std::io::IsTerminal::is_terminal(&std::io::stderr()),
        ColorChoice::Always => true,
        ColorChoice::Never => false,
    };

    let global = GlobalArgs {
        quiet: cli.quiet,
        color,
        config: cli.config,
    };

    let result = match cli.command {
        Command::Eval(ref args) => eval::run(args, &global),
        Command::Analyze(ref args) => analyze::run(args, &global),
        Command::Check(ref args) => check::run(args, &global),
        Command::Table(ref args) => table::run(args, &global),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("error: {e}");
            process::exit(1);
        }
    }
}

/// Maps the `-v` count to a default log filter.
fn log_filter(verbose: u8) -> &'static str {
    match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

/// Installs the stderr subscriber. `RUST_LOG` wins over `-v`.
fn init_logging(verbose: u8) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_filter(verbose)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parse_eval_default() {
        let cli = Cli::parse_from(["relay", "eval", "adder.json"]);
        match cli.command {
            Command::Eval(ref args) => {
                assert_eq!(args.circuit, "adder.json");
                assert!(args.ticks.is_none());
                assert_eq!(args.tick_ms, 100.0);
                assert!(args.at.is_none());
                assert!(args.strategy.is_none());
                assert!(args.set.is_empty());
                assert!(!args.settle);
                assert!(args.output.is_none());
            }
            _ => panic!("expected Eval command"),
        }
    }

    #[test]
    fn parse_eval_with_args() {
        let cli = Cli::parse_from([
            "relay",
            "eval",
            "latch.json",
            "--ticks",
            "8",
            "--tick-ms",
            "250",
            "--at",
            "0",
            "--strategy",
            "event-driven",
            "--set",
            "s=1",
            "--set",
            "r=0",
            "--settle",
            "-o",
            "out.json",
        ]);
        match cli.command {
            Command::Eval(ref args) => {
                assert_eq!(args.ticks, Some(8));
                assert_eq!(args.tick_ms, 250.0);
                assert_eq!(args.at, Some(0.0));
                assert_eq!(args.strategy, Some(StrategyArg::EventDriven));
                assert_eq!(
                    args.set,
                    vec![("s".to_string(), true), ("r".to_string(), false)]
                );
                assert!(args.settle);
                assert_eq!(args.output.as_deref(), Some("out.json"));
            }
            _ => panic!("expected Eval command"),
        }
    }

    #[test]
    fn parse_eval_rejects_bad_assignment() {
        let result = Cli::try_parse_from(["relay", "eval", "c.json", "--set", "a=maybe"]);
        assert!(result.is_err());
    }

    #[test]
    fn parse_analyze_json() {
        let cli = Cli::parse_from(["relay", "analyze", "ring.json", "--format", "json"]);
        match cli.command {
            Command::Analyze(ref args) => {
                assert_eq!(args.circuit, "ring.json");
                assert_eq!(args.format, ReportFormat::Json);
            }
            _ => panic!("expected Analyze command"),
        }
    }

    #[test]
    fn parse_check_default() {
        let cli = Cli::parse_from(["relay", "check", "c.json"]);
        match cli.command {
            Command::Check(ref args) => assert_eq!(args.format, ReportFormat::Text),
            _ => panic!("expected Check command"),
        }
    }

    #[test]
    fn parse_table() {
        let cli = Cli::parse_from(["relay", "table", "xor.json"]);
        match cli.command {
            Command::Table(ref args) => assert_eq!(args.circuit, "xor.json"),
            _ => panic!("expected Table command"),
        }
    }

    #[test]
    fn parse_global_flags() {
        let cli = Cli::parse_from([
            "relay",
            "--quiet",
            "--color",
            "never",
            "--config",
            "/tmp/relay.toml",
            "check",
            "c.json",
        ]);
        assert!(cli.quiet);
        assert_eq!(cli.verbose, 0);
        assert_eq!(cli.color, ColorChoice::Never);
        assert_eq!(cli.config.as_deref(), Some("/tmp/relay.toml"));
    }

    #[test]
    fn verbose_flag_counts() {
        let cli = Cli::parse_from(["relay", "-vv", "table", "c.json"]);
        assert_eq!(cli.verbose, 2);
        assert_eq!(log_filter(cli.verbose), "debug");
    }

    #[test]
    fn log_filter_levels() {
        assert_eq!(log_filter(0), "warn");
        assert_eq!(log_filter(1), "info");
        assert_eq!(log_filter(3), "trace");
        assert_eq!(log_filter(9), "trace");
    }

    #[test]
    fn strategy_arg_maps_to_engine_strategy() {
        assert_eq!(Strategy::from(StrategyArg::Auto), Strategy::AutoSelect);
        assert_eq!(
            Strategy::from(StrategyArg::EventDriven),
            Strategy::EventDrivenOnly
        );
    }
}
