//! Errors raised while loading or saving circuit files.

use std::io;

/// Errors that can occur when reading or writing a circuit.
///
/// These only arise at the file/JSON boundary. A circuit that loads
/// successfully can always be evaluated, however broken its topology.
#[derive(Debug, thiserror::Error)]
pub enum CircuitError {
    /// The circuit file could not be read or written.
    #[error("circuit I/O error: {0}")]
    Io(#[from] io::Error),

    /// The JSON content does not describe a circuit.
    #[error("malformed circuit JSON: {0}")]
    Json(#[from] serde_json::Error),
}
