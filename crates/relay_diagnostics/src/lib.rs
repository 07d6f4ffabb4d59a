//! Structured warnings and errors reported while checking or evaluating circuits.
//!
//! Evaluation never fails on a malformed circuit; instead, each problem is
//! described by a [`Diagnostic`] carrying a severity, a stable code, and the
//! gate or wire it concerns. The thread-safe [`DiagnosticSink`] accumulates
//! them, and [`DiagnosticRenderer`] implementations format them for a terminal
//! or as JSON.

#![warn(missing_docs)]

pub mod code;
pub mod diagnostic;
pub mod location;
pub mod renderer;
pub mod severity;
pub mod sink;

pub use code::{Category, DiagnosticCode};
pub use diagnostic::Diagnostic;
pub use location::{Element, Location};
pub use renderer::{DiagnosticRenderer, JsonRenderer, TerminalRenderer};
pub use severity::Severity;
pub use sink::DiagnosticSink;
