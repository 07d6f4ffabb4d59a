//! Clock frequencies with unit parsing and display.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// A clock frequency stored in Hertz.
///
/// Circuit files store clock rates as plain numbers of Hertz, so this type
/// serializes transparently as a number. Configuration files may spell it with
/// a unit: "2Hz", "0.5hz", "1kHz", or a bare number.
#[derive(Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Frequency(f64);

impl Frequency {
    /// The rate used for clocks that carry no frequency of their own.
    pub const DEFAULT: Frequency = Frequency(1.0);

    /// Creates a new frequency from a value in Hertz.
    pub fn new(hz: f64) -> Self {
        Self(hz)
    }

    /// Returns the frequency in Hertz.
    pub fn hz(&self) -> f64 {
        self.0
    }

    /// Returns the frequency in kilohertz.
    pub fn khz(&self) -> f64 {
        self.0 / 1_000.0
    }

    /// Returns `true` if the frequency is finite and strictly positive.
    pub fn is_valid(&self) -> bool {
        self.0.is_finite() && self.0 > 0.0
    }

    /// Returns the length of one full period in milliseconds, or `None` for an
    /// invalid frequency.
    pub fn period_ms(&self) -> Option<f64> {
        if self.is_valid() {
            Some(1_000.0 / self.0)
        } else {
            None
        }
    }
}

impl Default for Frequency {
    fn default() -> Self {
        Self::DEFAULT
    }
}

impl fmt::Debug for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Frequency({self})")
    }
}

impl fmt::Display for Frequency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hz = self.0;
        if hz >= 1_000_000.0 {
            write!(f, "{}MHz", hz / 1_000_000.0)
        } else if hz >= 1_000.0 {
            write!(f, "{}kHz", hz / 1_000.0)
        } else {
            write!(f, "{hz}Hz")
        }
    }
}

/// Error type for parsing frequency strings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid frequency: '{input}'")]
pub struct ParseFrequencyError {
    /// The input string that failed to parse.
    pub input: String,
}

impl FromStr for Frequency {
    type Err = ParseFrequencyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let err = || ParseFrequencyError {
            input: s.to_string(),
        };

        let lower = s.to_ascii_lowercase();
        let (num, scale) = if let Some(num) = lower.strip_suffix("mhz") {
            (num, 1_000_000.0)
        } else if let Some(num) = lower.strip_suffix("khz") {
            (num, 1_000.0)
        } else if let Some(num) = lower.strip_suffix("hz") {
            (num, 1.0)
        } else {
            (lower.as_str(), 1.0)
        };

        let val: f64 = num.trim().parse().map_err(|_| err())?;
        let freq = Frequency(val * scale);
        if !freq.is_valid() {
            return Err(err());
        }
        Ok(freq)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_hz() {
        let f: Frequency = "2Hz".parse().unwrap();
        assert_eq!(f.hz(), 2.0);
    }

    #[test]
    fn parse_fractional_hz() {
        let f: Frequency = "0.5hz".parse().unwrap();
        assert_eq!(f.hz(), 0.5);
    }

    #[test]
    fn parse_khz() {
        let f: Frequency = "1kHz".parse().unwrap();
        assert_eq!(f.hz(), 1_000.0);
    }

    #[test]
    fn parse_bare_number() {
        let f: Frequency = "4".parse().unwrap();
        assert_eq!(f.hz(), 4.0);
    }

    #[test]
    fn parse_rejects_zero_and_garbage() {
        assert!("0Hz".parse::<Frequency>().is_err());
        assert!("-3".parse::<Frequency>().is_err());
        assert!("fast".parse::<Frequency>().is_err());
    }

    #[test]
    fn period_ms() {
        assert_eq!(Frequency::new(2.0).period_ms(), Some(500.0));
        assert_eq!(Frequency::new(0.0).period_ms(), None);
        assert_eq!(Frequency::new(f64::NAN).period_ms(), None);
    }

    #[test]
    fn display_selects_best_unit() {
        assert_eq!(format!("{}", Frequency::new(2_000_000.0)), "2MHz");
        assert_eq!(format!("{}", Frequency::new(1_500.0)), "1.5kHz");
        assert_eq!(format!("{}", Frequency::new(0.5)), "0.5Hz");
    }

    #[test]
    fn serializes_as_plain_number() {
        let json = serde_json::to_string(&Frequency::new(2.5)).unwrap();
        assert_eq!(json, "2.5");
        let back: Frequency = serde_json::from_str("10").unwrap();
        assert_eq!(back.hz(), 10.0);
    }
}
