//! Shared helpers for CLI commands.
//!
//! Config resolution, mapping the project config onto the engine, circuit
//! loading, and `--set` parsing.

use std::path::{Path, PathBuf};

use relay_circuit::Circuit;
use relay_common::Signal;
use relay_config::{ProjectConfig, StrategyChoice, CONFIG_FILE_NAME};
use relay_diagnostics::{Diagnostic, DiagnosticRenderer, TerminalRenderer};
use relay_sim::{Engine, EngineConfig, Strategy};
use tracing::debug;

use crate::GlobalArgs;

/// Loads the project configuration selected by the global flags.
///
/// `--config` may name a file or a directory holding `relay.toml`. Without it
/// the current directory's `relay.toml` is used when present, and defaults
/// otherwise.
pub fn resolve_config(global: &GlobalArgs) -> Result<ProjectConfig, Box<dyn std::error::Error>> {
    let explicit = global.config.as_deref().map(PathBuf::from);
    config_from(explicit.as_deref(), &std::env::current_dir()?)
}

fn config_from(
    explicit: Option<&Path>,
    cwd: &Path,
) -> Result<ProjectConfig, Box<dyn std::error::Error>> {
    let path = match explicit {
        Some(p) if p.is_dir() => p.join(CONFIG_FILE_NAME),
        Some(p) => p.to_path_buf(),
        None => {
            let candidate = cwd.join(CONFIG_FILE_NAME);
            if !candidate.is_file() {
                debug!("no {CONFIG_FILE_NAME} in {}, using defaults", cwd.display());
                return Ok(ProjectConfig::default());
            }
            candidate
        }
    };
    debug!("loading config from {}", path.display());
    relay_config::load_config_file(&path)
        .map_err(|e| format!("{}: {e}", path.display()).into())
}

/// Builds the in-memory engine configuration from `relay.toml` values.
pub fn engine_config(config: &ProjectConfig) -> EngineConfig {
    EngineConfig {
        strategy: match config.engine.strategy {
            StrategyChoice::Auto => Strategy::AutoSelect,
            StrategyChoice::EventDriven => Strategy::EventDrivenOnly,
        },
        max_settle_iterations: config.engine.max_settle_iterations,
        max_nesting_depth: config.engine.max_nesting_depth,
        default_clock_frequency: config.clock.frequency(),
        default_counter_bits: config.counter.default_bit_count,
    }
}

/// Resolves the config and builds an engine from it.
pub fn engine(global: &GlobalArgs) -> Result<Engine, Box<dyn std::error::Error>> {
    let config = resolve_config(global)?;
    Ok(Engine::new(engine_config(&config)))
}

/// Reads a circuit JSON file, naming the file in any error.
pub fn load_circuit(path: &str) -> Result<Circuit, Box<dyn std::error::Error>> {
    Circuit::load(Path::new(path)).map_err(|e| format!("{path}: {e}").into())
}

/// Parses a `GATE=LEVEL` assignment given to `--set`.
///
/// The level accepts the loose forms circuit files use (`1`, `0`, `true`,
/// `false`).
pub fn parse_assignment(s: &str) -> Result<(String, bool), String> {
    let (id, level) = s
        .split_once('=')
        .ok_or_else(|| format!("expected GATE=0|1, got `{s}`"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing gate id in `{s}`"));
    }
    match Signal::parse_loose(level.trim()) {
        Signal::Unset => Err(format!("invalid level `{level}` for gate `{id}`")),
        signal => Ok((id.to_string(), signal.is_high())),
    }
}

/// Writes diagnostics to stderr in the terminal format.
pub fn print_diagnostics(diagnostics: &[Diagnostic], global: &GlobalArgs) {
    let renderer = TerminalRenderer::new(global.color);
    for diag in diagnostics {
        eprint!("{}", renderer.render(diag));
    }
}
