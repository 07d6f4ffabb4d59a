//! Pin-level signal values and their normalization to strict booleans.
//!
//! Circuit files written by editors store input pins loosely: a pin that was
//! never driven may be `null` or an empty string, and older files spell levels
//! as `"true"`/`"false"` or `0`/`1`. [`Signal`] absorbs all of those spellings
//! at the deserialization boundary so evaluators only ever see `bool`.

use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::ops::Not;

/// The stored value of a single gate pin.
///
/// `Unset` is the placeholder for a pin that has never been driven. It reads
/// as logic low everywhere a strict level is needed.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Signal {
    /// Never driven, or an unrecognized placeholder.
    #[default]
    Unset,
    /// Logic low.
    Low,
    /// Logic high.
    High,
}

impl Signal {
    /// Returns the strict level of this pin. `Unset` reads as `false`.
    pub fn is_high(self) -> bool {
        self == Signal::High
    }

    /// Returns `true` if the pin has never been driven.
    pub fn is_unset(self) -> bool {
        self == Signal::Unset
    }

    /// Parses the loose textual spellings accepted in circuit files.
    ///
    /// `"1"`/`"true"`/`"high"` are high and `"0"`/`"false"`/`"low"` are low
    /// (case-insensitive, surrounding whitespace ignored). Everything else,
    /// including the empty string, is `Unset`.
    pub fn parse_loose(s: &str) -> Self {
        match s.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "high" => Signal::High,
            "0" | "false" | "low" => Signal::Low,
            _ => Signal::Unset,
        }
    }

    /// Converts a character to a [`Signal`]: `'0'`, `'1'`, or `'-'` for unset.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '0' => Some(Signal::Low),
            '1' => Some(Signal::High),
            '-' => Some(Signal::Unset),
            _ => None,
        }
    }
}

impl From<bool> for Signal {
    fn from(level: bool) -> Self {
        if level {
            Signal::High
        } else {
            Signal::Low
        }
    }
}

impl From<Signal> for bool {
    fn from(signal: Signal) -> Self {
        signal.is_high()
    }
}

impl Not for Signal {
    type Output = Self;

    fn not(self) -> Self {
        Signal::from(!self.is_high())
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Low => write!(f, "0"),
            Signal::High => write!(f, "1"),
            Signal::Unset => write!(f, "-"),
        }
    }
}

impl Serialize for Signal {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Signal::Unset => serializer.serialize_none(),
            Signal::Low => serializer.serialize_bool(false),
            Signal::High => serializer.serialize_bool(true),
        }
    }
}

struct SignalVisitor;

impl<'de> Visitor<'de> for SignalVisitor {
    type Value = Signal;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("a boolean, 0/1, a level string, or null")
    }

    fn visit_bool<E: de::Error>(self, value: bool) -> Result<Signal, E> {
        Ok(Signal::from(value))
    }

    fn visit_u64<E: de::Error>(self, value: u64) -> Result<Signal, E> {
        Ok(Signal::from(value != 0))
    }

    fn visit_i64<E: de::Error>(self, value: i64) -> Result<Signal, E> {
        Ok(Signal::from(value != 0))
    }

    fn visit_f64<E: de::Error>(self, value: f64) -> Result<Signal, E> {
        Ok(Signal::from(value != 0.0))
    }

    fn visit_str<E: de::Error>(self, value: &str) -> Result<Signal, E> {
        Ok(Signal::parse_loose(value))
    }

    fn visit_none<E: de::Error>(self) -> Result<Signal, E> {
        Ok(Signal::Unset)
    }

    fn visit_unit<E: de::Error>(self) -> Result<Signal, E> {
        Ok(Signal::Unset)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Signal, D::Error> {
        deserializer.deserialize_any(SignalVisitor)
    }
}

impl<'de> Deserialize<'de> for Signal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Signal, D::Error> {
        deserializer.deserialize_any(SignalVisitor)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_reads_low() {
        assert!(!Signal::Unset.is_high());
        assert!(!Signal::Low.is_high());
        assert!(Signal::High.is_high());
        assert!(!bool::from(Signal::Unset));
    }

    #[test]
    fn parse_loose_spellings() {
        assert_eq!(Signal::parse_loose("true"), Signal::High);
        assert_eq!(Signal::parse_loose(" TRUE "), Signal::High);
        assert_eq!(Signal::parse_loose("1"), Signal::High);
        assert_eq!(Signal::parse_loose("false"), Signal::Low);
        assert_eq!(Signal::parse_loose("0"), Signal::Low);
        assert_eq!(Signal::parse_loose(""), Signal::Unset);
        assert_eq!(Signal::parse_loose("maybe"), Signal::Unset);
    }

    #[test]
    fn deserialize_loose_json() {
        let pins: Vec<Signal> =
            serde_json::from_str(r#"[null, true, false, "true", "false", "", 1, 0]"#).unwrap();
        assert_eq!(
            pins,
            vec![
                Signal::Unset,
                Signal::High,
                Signal::Low,
                Signal::High,
                Signal::Low,
                Signal::Unset,
                Signal::High,
                Signal::Low,
            ]
        );
    }

    #[test]
    fn serialize_strict_json() {
        let pins = vec![Signal::Unset, Signal::High, Signal::Low];
        assert_eq!(serde_json::to_string(&pins).unwrap(), "[null,true,false]");
    }

    #[test]
    fn negation_treats_unset_as_low() {
        assert_eq!(!Signal::Unset, Signal::High);
        assert_eq!(!Signal::High, Signal::Low);
        assert_eq!(!Signal::Low, Signal::High);
    }

    #[test]
    fn display_and_from_char() {
        assert_eq!(format!("{}", Signal::High), "1");
        assert_eq!(format!("{}", Signal::Low), "0");
        assert_eq!(format!("{}", Signal::Unset), "-");
        assert_eq!(Signal::from_char('1'), Some(Signal::High));
        assert_eq!(Signal::from_char('-'), Some(Signal::Unset));
        assert_eq!(Signal::from_char('x'), None);
    }
}
