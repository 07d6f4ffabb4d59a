use relay_circuit::{
    validate_circuit, Circuit, GateKind, GateState, OutputPin, PinRef,
};
use relay_common::Signal;

const EDITOR_FILE: &str = r#"{
  "gates": [
    { "id": "clk", "type": "CLOCK", "position": { "x": 10, "y": 20 },
      "inputs": [], "output": false,
      "metadata": { "frequency": 2, "isRunning": true, "startTime": 0 } },
    { "id": "d", "type": "INPUT", "position": { "x": 10, "y": 80 },
      "inputs": [], "output": true },
    { "id": "ff", "type": "D-FF", "position": { "x": 120, "y": 50 },
      "inputs": [null, null], "output": false, "outputs": [false, true],
      "metadata": { "qOutput": false, "previousClockState": false, "color": "teal" } },
    { "id": "cnt", "type": "BINARY_COUNTER", "position": { "x": 200, "y": 50 },
      "inputs": [false], "output": 0,
      "metadata": { "bitCount": 3, "currentValue": 13 } },
    { "id": "lamp", "type": "LED", "position": { "x": 300, "y": 50 },
      "inputs": [null], "output": null },
    { "id": 7, "type": "PLASMA_COIL", "position": { "x": 0, "y": 0 },
      "inputs": [true, "1"], "output": "high" }
  ],
  "wires": [
    { "id": "w1", "from": { "gateId": "d", "pinIndex": -1 }, "to": { "gateId": "ff", "pinIndex": 0 } },
    { "id": "w2", "from": { "gateId": "clk", "pinIndex": -1 }, "to": { "gateId": "ff", "pinIndex": 1 } },
    { "id": "w3", "from": { "gateId": "ff", "pinIndex": -2 }, "to": { "gateId": "cnt", "pinIndex": 0 } },
    { "id": "w4", "from": { "gateId": "cnt", "pinIndex": 2 }, "to": { "gateId": "lamp", "pinIndex": 0 }, "isActive": true }
  ]
}"#;

#[test]
fn loads_editor_json() {
    let circuit = Circuit::from_json(EDITOR_FILE).unwrap();
    assert_eq!(circuit.gates.len(), 6);
    assert_eq!(circuit.wires.len(), 4);

    let clk = circuit.gate("clk").unwrap();
    match &clk.state {
        GateState::Clock(state) => {
            assert_eq!(state.frequency.map(|f| f.hz()), Some(2.0));
            assert_eq!(state.start_time, Some(0.0));
        }
        other => panic!("expected clock state, got {other:?}"),
    }

    let cnt = circuit.gate("cnt").unwrap();
    match &cnt.state {
        GateState::Counter(state) => {
            assert_eq!(state.bit_count, Some(3));
            assert_eq!(state.value, 13 & 0b111);
        }
        other => panic!("expected counter state, got {other:?}"),
    }
    assert_eq!(cnt.output_count(), 3);

    let odd = circuit.gate("7").unwrap();
    assert_eq!(odd.kind, GateKind::Unknown("PLASMA_COIL".into()));
    assert_eq!(odd.inputs, vec![Signal::High, Signal::High]);
    assert!(odd.output);

    assert_eq!(
        circuit.wires[2].from.output_pin(),
        OutputPin::Secondary
    );
    assert!(circuit.wires[3].is_active);
}

#[test]
fn unknown_metadata_survives_a_round_trip() {
    let circuit = Circuit::from_json(EDITOR_FILE).unwrap();
    let json = circuit.to_json_pretty().unwrap();
    assert!(json.contains("\"color\": \"teal\""));
    assert!(json.contains("\"type\": \"PLASMA_COIL\""));
    let again = Circuit::from_json(&json).unwrap();
    assert_eq!(again, circuit);
}

#[test]
fn editor_file_validates_with_only_the_unknown_gate_warning() {
    let circuit = Circuit::from_json(EDITOR_FILE).unwrap();
    let diags = validate_circuit(&circuit);
    assert_eq!(diags.len(), 1);
    assert_eq!(diags[0].code.to_string(), "W203");
}

#[test]
fn saved_file_reloads() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("circuit.json");
    let mut circuit = Circuit::from_json(EDITOR_FILE).unwrap();
    circuit.connect(PinRef::output("d"), PinRef::input("lamp", 0));
    circuit.save(&path).unwrap();
    let loaded = Circuit::load(&path).unwrap();
    assert_eq!(loaded.wires.len(), 5);
    assert_eq!(loaded, circuit);
}
