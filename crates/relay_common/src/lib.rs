//! Shared foundational types used across the relay logic simulator.
//!
//! This crate provides the pin-level [`Signal`] value with its loose
//! normalization rules, clock [`Frequency`] values, and the internal error type.

#![warn(missing_docs)]

pub mod frequency;
pub mod result;
pub mod signal;

pub use frequency::{Frequency, ParseFrequencyError};
pub use result::{InternalError, RelayResult};
pub use signal::Signal;
