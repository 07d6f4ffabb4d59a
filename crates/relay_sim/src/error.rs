//! Error types for the engine's fallible helper APIs.
//!
//! Evaluation itself never fails; see [`Engine::evaluate`](crate::Engine::evaluate).
//! These errors come from the operations layered on top of it.

use relay_common::InternalError;

/// Errors from truth-table generation and other non-evaluation APIs.
#[derive(Debug, thiserror::Error)]
pub enum SimError {
    /// The circuit has more INPUT gates than a truth table can enumerate.
    #[error("circuit has {count} inputs; truth tables support at most {max}")]
    TooManyInputs {
        /// Number of INPUT gates found.
        count: usize,
        /// The enumeration limit.
        max: usize,
    },

    /// The circuit has no INPUT or no OUTPUT gates to tabulate.
    #[error("circuit has no {0} gates")]
    NothingToTabulate(&'static str),

    /// An engine invariant was violated.
    #[error(transparent)]
    Internal(#[from] InternalError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_too_many_inputs() {
        let err = SimError::TooManyInputs { count: 20, max: 16 };
        assert_eq!(
            err.to_string(),
            "circuit has 20 inputs; truth tables support at most 16"
        );
    }

    #[test]
    fn display_internal() {
        let err = SimError::from(InternalError::new("order lost a gate"));
        assert_eq!(err.to_string(), "internal engine error: order lost a gate");
    }
}
