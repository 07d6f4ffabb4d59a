//! Diagnostic codes with category prefixes for structured identification.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The category of a diagnostic code, determining its prefix letter.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub enum Category {
    /// Structural errors found by validation, prefixed with `E`.
    Error,
    /// Non-fatal findings, prefixed with `W`.
    Warning,
}

impl Category {
    /// Returns the single-character prefix for this category.
    pub fn prefix(self) -> char {
        match self {
            Category::Error => 'E',
            Category::Warning => 'W',
        }
    }
}

/// A structured diagnostic code combining a category prefix and a number.
///
/// Displayed as the prefix followed by a zero-padded 3-digit number,
/// e.g. `W101`, `E302`. Topology findings use the 1xx range, evaluation
/// findings 2xx, and validation-only errors 3xx.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
pub struct DiagnosticCode {
    /// The category of this diagnostic.
    pub category: Category,
    /// The numeric identifier within the category.
    pub number: u16,
}

impl DiagnosticCode {
    /// A wire endpoint references a gate that does not exist.
    pub const DANGLING_WIRE: Self = Self::new(Category::Warning, 101);
    /// A wire targets an input pin the gate does not have.
    pub const INVALID_TARGET_PIN: Self = Self::new(Category::Warning, 102);
    /// A wire reads an output pin the gate does not have.
    pub const INVALID_SOURCE_PIN: Self = Self::new(Category::Warning, 103);
    /// More than one wire drives the same input pin.
    pub const MULTIPLE_DRIVERS: Self = Self::new(Category::Warning, 104);
    /// Delayed evaluation stopped before reaching a fixed point.
    pub const NOT_SETTLED: Self = Self::new(Category::Warning, 201);
    /// Custom gates are nested deeper than the configured limit.
    pub const NESTING_TOO_DEEP: Self = Self::new(Category::Warning, 202);
    /// A gate type the engine does not know; evaluated as a no-op.
    pub const UNKNOWN_GATE_TYPE: Self = Self::new(Category::Warning, 203);
    /// An SR latch saw S=1 and R=1 together.
    pub const FORBIDDEN_LATCH_STATE: Self = Self::new(Category::Warning, 204);
    /// Two gates share one id.
    pub const DUPLICATE_GATE_ID: Self = Self::new(Category::Error, 301);
    /// A custom gate boundary pin names a missing or mistyped inner gate.
    pub const BROKEN_CUSTOM_BOUNDARY: Self = Self::new(Category::Error, 302);

    /// Creates a new diagnostic code.
    pub const fn new(category: Category, number: u16) -> Self {
        Self { category, number }
    }
}

impl fmt::Display for DiagnosticCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{:03}", self.category.prefix(), self.number)
    }
}
