//! Configuration types deserialized from `relay.toml`.

use relay_common::Frequency;
use serde::Deserialize;

/// The top-level configuration parsed from `relay.toml`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ProjectConfig {
    /// Evaluation strategy and iteration limits.
    #[serde(default)]
    pub engine: EngineSection,
    /// Defaults applied to clock gates.
    #[serde(default)]
    pub clock: ClockSection,
    /// Defaults applied to binary counters.
    #[serde(default)]
    pub counter: CounterSection,
}

/// The `[engine]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EngineSection {
    /// Strategy used when the caller does not pick one.
    pub strategy: StrategyChoice,
    /// Upper bound on delayed passes made by a settling evaluation.
    pub max_settle_iterations: u32,
    /// Deepest custom-gate nesting evaluated before giving up.
    pub max_nesting_depth: u32,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            strategy: StrategyChoice::Auto,
            max_settle_iterations: 64,
            max_nesting_depth: 32,
        }
    }
}

/// Strategy names accepted in `engine.strategy`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum StrategyChoice {
    /// Pick immediate or delayed evaluation from the circuit's topology.
    #[default]
    Auto,
    /// Always use delayed (unit-delay) evaluation.
    EventDriven,
}

/// The `[clock]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ClockSection {
    /// Frequency of clocks that do not specify one (e.g. `"1Hz"`, `"2.5kHz"`).
    pub default_frequency: String,
}

impl Default for ClockSection {
    fn default() -> Self {
        Self {
            default_frequency: "1Hz".to_string(),
        }
    }
}

impl ClockSection {
    /// The parsed default frequency, or [`Frequency::DEFAULT`] when the
    /// string does not parse. Loaded configurations are validated, so the
    /// fallback only applies to hand-built values.
    pub fn frequency(&self) -> Frequency {
        self.default_frequency.parse().unwrap_or(Frequency::DEFAULT)
    }
}

/// The `[counter]` section.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CounterSection {
    /// Width of counters that do not specify one.
    pub default_bit_count: u8,
}

impl Default for CounterSection {
    fn default() -> Self {
        Self {
            default_bit_count: 4,
        }
    }
}
