//! The circuit element a diagnostic points at.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Where in a circuit a diagnostic applies.
///
/// Locations are plain ids rather than references so diagnostics can outlive
/// the circuit they describe. `path` holds the ids of the enclosing custom
/// gates, outermost first, when the element lives inside a nested circuit.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Location {
    /// Ids of the enclosing custom gates, outermost first.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub path: Vec<String>,
    /// The element itself.
    pub element: Element,
}

/// The kind of circuit element a [`Location`] names.
#[derive(Clone, Debug, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "kind", content = "id", rename_all = "lowercase")]
pub enum Element {
    /// The circuit as a whole.
    #[default]
    Circuit,
    /// A gate, by id.
    Gate(String),
    /// A wire, by id.
    Wire(String),
}

impl Location {
    /// A location naming the whole circuit.
    pub fn circuit() -> Self {
        Self::default()
    }

    /// A location naming a gate.
    pub fn gate(id: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            element: Element::Gate(id.into()),
        }
    }

    /// A location naming a wire.
    pub fn wire(id: impl Into<String>) -> Self {
        Self {
            path: Vec::new(),
            element: Element::Wire(id.into()),
        }
    }

    /// Re-roots this location one level down, inside the custom gate `outer`.
    pub fn nested_in(mut self, outer: impl Into<String>) -> Self {
        self.path.insert(0, outer.into());
        self
    }
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for outer in &self.path {
            write!(f, "{outer}/")?;
        }
        match &self.element {
            Element::Circuit => write!(f, "circuit"),
            Element::Gate(id) => write!(f, "gate `{id}`"),
            Element::Wire(id) => write!(f, "wire `{id}`"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_flat() {
        assert_eq!(Location::gate("g1").to_string(), "gate `g1`");
        assert_eq!(Location::wire("w1").to_string(), "wire `w1`");
        assert_eq!(Location::circuit().to_string(), "circuit");
    }

    #[test]
    fn display_nested() {
        let loc = Location::gate("xor").nested_in("adder").nested_in("alu");
        assert_eq!(loc.path, vec!["alu", "adder"]);
        assert_eq!(loc.to_string(), "alu/adder/gate `xor`");
    }

    #[test]
    fn serde_shape() {
        let json = serde_json::to_string(&Location::wire("w7")).unwrap();
        assert_eq!(json, r#"{"element":{"kind":"wire","id":"w7"}}"#);
    }
}
