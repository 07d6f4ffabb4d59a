//! How serious a circuit diagnostic is.
//!
//! The engine itself only ever warns: a broken wire or an unknown gate is
//! skipped and the rest of the circuit still evaluates. Errors come from
//! `validate_circuit`, for circuits whose structure cannot be trusted at all.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Diagnostic severity. `Warning < Error`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Serialize, Deserialize)]
pub enum Severity {
    /// Something in the circuit was ignored or worked around during
    /// evaluation (codes `W1xx` and `W2xx`).
    Warning,
    /// A structural defect reported by validation, such as a duplicate gate
    /// id or a custom gate whose boundary pins are missing (codes `E3xx`).
    /// `relay check` exits non-zero when one is present.
    Error,
}

impl Severity {
    /// Whether this diagnostic should fail `relay check`.
    pub fn is_error(self) -> bool {
        self == Severity::Error
    }

    /// Lowercase label used in rendered output.
    pub fn label(self) -> &'static str {
        match self {
            Severity::Warning => "warning",
            Severity::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn errors_outrank_warnings() {
        assert!(Severity::Warning < Severity::Error);
        assert_eq!(
            [Severity::Error, Severity::Warning].iter().max(),
            Some(&Severity::Error)
        );
    }

    #[test]
    fn only_errors_fail_a_check() {
        assert!(Severity::Error.is_error());
        assert!(!Severity::Warning.is_error());
    }

    #[test]
    fn renders_lowercase() {
        assert_eq!(Severity::Error.to_string(), "error");
        assert_eq!(Severity::Warning.to_string(), "warning");
    }
}
