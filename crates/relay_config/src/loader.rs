//! Configuration file loading and validation.

use crate::error::ConfigError;
use crate::types::ProjectConfig;
use relay_common::Frequency;
use std::path::Path;

/// File name looked up inside a project directory.
pub const CONFIG_FILE_NAME: &str = "relay.toml";

/// Widest counter the engine supports.
const MAX_COUNTER_BITS: u8 = 32;

/// Loads and validates `relay.toml` from a project directory.
///
/// Reads `<project_dir>/relay.toml`, parses it, and validates its values.
pub fn load_config(project_dir: &Path) -> Result<ProjectConfig, ConfigError> {
    load_config_file(&project_dir.join(CONFIG_FILE_NAME))
}

/// Loads and validates a configuration file at an explicit path.
pub fn load_config_file(path: &Path) -> Result<ProjectConfig, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    load_config_from_str(&content)
}

/// Parses and validates a `relay.toml` configuration from a string.
///
/// Useful for testing without filesystem dependencies.
pub fn load_config_from_str(content: &str) -> Result<ProjectConfig, ConfigError> {
    let config: ProjectConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;
    validate_config(&config)?;
    Ok(config)
}

/// Checks that every value is within the range the engine accepts.
fn validate_config(config: &ProjectConfig) -> Result<(), ConfigError> {
    if config.engine.max_settle_iterations == 0 {
        return Err(ConfigError::ValidationError(
            "engine.max_settle_iterations must be at least 1".to_string(),
        ));
    }
    if config.engine.max_nesting_depth == 0 {
        return Err(ConfigError::ValidationError(
            "engine.max_nesting_depth must be at least 1".to_string(),
        ));
    }
    config
        .clock
        .default_frequency
        .parse::<Frequency>()
        .map_err(|e| ConfigError::ValidationError(format!("clock.default_frequency: {e}")))?;
    let bits = config.counter.default_bit_count;
    if bits == 0 || bits > MAX_COUNTER_BITS {
        return Err(ConfigError::ValidationError(format!(
            "counter.default_bit_count must be between 1 and {MAX_COUNTER_BITS}, got {bits}"
        )));
    }
    Ok(())
}
