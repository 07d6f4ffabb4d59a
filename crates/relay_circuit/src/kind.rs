//! The gate type enumeration and its wire names.

use serde::{Deserialize, Serialize};
use std::fmt;

/// The type tag of a gate.
///
/// Serialized as the editor's wire string (`"AND"`, `"D-FF"`,
/// `"BINARY_COUNTER"`, ...). Strings the engine does not recognize are kept
/// verbatim in [`GateKind::Unknown`] so that newer circuit files load, round-trip,
/// and evaluate (as no-ops) instead of being rejected.
#[derive(Clone, PartialEq, Eq, Hash, Debug, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum GateKind {
    /// Externally driven source; zero inputs, one output.
    Input,
    /// Observed sink; one input passed through to its output.
    Output,
    /// Logical AND.
    And,
    /// Logical OR.
    Or,
    /// Inverter.
    Not,
    /// Inverted AND.
    Nand,
    /// Inverted OR.
    Nor,
    /// Exclusive OR (odd parity for more than two inputs).
    Xor,
    /// Inverted exclusive OR.
    Xnor,
    /// Free-running wall-clock square wave.
    Clock,
    /// Rising-edge D flip-flop with inputs `[D, CLK]` and outputs `[Q, Q̄]`.
    DFlipFlop,
    /// Set/reset latch with inputs `[S, R]` and outputs `[Q, Q̄]`.
    SrLatch,
    /// Two-way multiplexer with inputs `[A, B, S]`.
    Mux,
    /// Rising-edge counter exposing one output per bit, LSB first.
    BinaryCounter,
    /// Single-input indicator lamp.
    Led,
    /// Seven-segment display with inputs `a`..`g`.
    SevenSegment,
    /// Hex digit display driven by four bits, LSB first.
    NumberDisplay,
    /// A gate implemented by a nested circuit.
    Custom,
    /// A type tag this version of the engine does not know.
    Unknown(String),
}

impl GateKind {
    /// Every known kind, in wire-format order.
    pub const KNOWN: [GateKind; 18] = [
        GateKind::Input,
        GateKind::Output,
        GateKind::And,
        GateKind::Or,
        GateKind::Not,
        GateKind::Nand,
        GateKind::Nor,
        GateKind::Xor,
        GateKind::Xnor,
        GateKind::Clock,
        GateKind::DFlipFlop,
        GateKind::SrLatch,
        GateKind::Mux,
        GateKind::BinaryCounter,
        GateKind::Led,
        GateKind::SevenSegment,
        GateKind::NumberDisplay,
        GateKind::Custom,
    ];

    /// Looks up a kind by its wire name. Unrecognized names become `Unknown`.
    pub fn from_name(name: &str) -> Self {
        match name {
            "INPUT" => GateKind::Input,
            "OUTPUT" => GateKind::Output,
            "AND" => GateKind::And,
            "OR" => GateKind::Or,
            "NOT" => GateKind::Not,
            "NAND" => GateKind::Nand,
            "NOR" => GateKind::Nor,
            "XOR" => GateKind::Xor,
            "XNOR" => GateKind::Xnor,
            "CLOCK" => GateKind::Clock,
            "D-FF" => GateKind::DFlipFlop,
            "SR-LATCH" => GateKind::SrLatch,
            "MUX" => GateKind::Mux,
            "BINARY_COUNTER" => GateKind::BinaryCounter,
            "LED" => GateKind::Led,
            "SEVEN_SEGMENT" => GateKind::SevenSegment,
            "NUMBER_DISPLAY" => GateKind::NumberDisplay,
            "CUSTOM" => GateKind::Custom,
            other => GateKind::Unknown(other.to_string()),
        }
    }

    /// Returns the wire name of this kind.
    pub fn name(&self) -> &str {
        match self {
            GateKind::Input => "INPUT",
            GateKind::Output => "OUTPUT",
            GateKind::And => "AND",
            GateKind::Or => "OR",
            GateKind::Not => "NOT",
            GateKind::Nand => "NAND",
            GateKind::Nor => "NOR",
            GateKind::Xor => "XOR",
            GateKind::Xnor => "XNOR",
            GateKind::Clock => "CLOCK",
            GateKind::DFlipFlop => "D-FF",
            GateKind::SrLatch => "SR-LATCH",
            GateKind::Mux => "MUX",
            GateKind::BinaryCounter => "BINARY_COUNTER",
            GateKind::Led => "LED",
            GateKind::SevenSegment => "SEVEN_SEGMENT",
            GateKind::NumberDisplay => "NUMBER_DISPLAY",
            GateKind::Custom => "CUSTOM",
            GateKind::Unknown(name) => name,
        }
    }

    /// Number of input pins a freshly placed gate of this kind has.
    ///
    /// Custom gates take their arity from their definition and unknown kinds
    /// from whatever the file stored, so both report zero here.
    pub fn default_input_count(&self) -> usize {
        match self {
            GateKind::Input | GateKind::Clock => 0,
            GateKind::Output | GateKind::Not | GateKind::BinaryCounter | GateKind::Led => 1,
            GateKind::And
            | GateKind::Or
            | GateKind::Nand
            | GateKind::Nor
            | GateKind::Xor
            | GateKind::Xnor
            | GateKind::DFlipFlop
            | GateKind::SrLatch => 2,
            GateKind::Mux => 3,
            GateKind::NumberDisplay => 4,
            GateKind::SevenSegment => 7,
            GateKind::Custom | GateKind::Unknown(_) => 0,
        }
    }

    /// Returns `true` for the two-or-more input gates whose arity grows with
    /// the number of stored input pins.
    pub fn is_variadic(&self) -> bool {
        matches!(
            self,
            GateKind::And
                | GateKind::Or
                | GateKind::Nand
                | GateKind::Nor
                | GateKind::Xor
                | GateKind::Xnor
        )
    }

    /// Returns `true` for stateless boolean functions of the current inputs.
    pub fn is_combinational(&self) -> bool {
        self.is_variadic() || matches!(self, GateKind::Not | GateKind::Mux)
    }

    /// Returns `true` for gates whose outputs depend on prior evaluations.
    pub fn is_sequential(&self) -> bool {
        matches!(
            self,
            GateKind::Clock | GateKind::DFlipFlop | GateKind::SrLatch | GateKind::BinaryCounter
        )
    }

    /// Returns `true` for visualization-only gates with no outputs.
    pub fn is_display(&self) -> bool {
        matches!(
            self,
            GateKind::Led | GateKind::SevenSegment | GateKind::NumberDisplay
        )
    }

    /// Returns `true` for kinds with both a `Q` and a `Q̄` output.
    pub fn is_dual_output(&self) -> bool {
        matches!(self, GateKind::DFlipFlop | GateKind::SrLatch)
    }
}

impl From<String> for GateKind {
    fn from(name: String) -> Self {
        GateKind::from_name(&name)
    }
}

impl From<GateKind> for String {
    fn from(kind: GateKind) -> Self {
        match kind {
            GateKind::Unknown(name) => name,
            known => known.name().to_string(),
        }
    }
}

impl fmt::Display for GateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
