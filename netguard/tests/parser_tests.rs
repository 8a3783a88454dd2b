//! Tests for netlist file intake

use netguard::{parse_netlist, NetguardError, NetlistError, PinType};
use std::path::PathBuf;

fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

#[test]
fn test_parse_sample_fixture_matches_builtin() {
    let netlist = parse_netlist(&fixture_path("sample_netlist.json")).expect("Should parse");

    assert_eq!(netlist, netguard::netlist::sample_netlist());
    assert_eq!(netlist.components[0].pins[0].pin_type, PinType::Power);
    assert_eq!(netlist.connection_count(), 8);
}

#[test]
fn test_parse_keeps_coordinates() {
    let netlist = parse_netlist(&fixture_path("valid_design.json")).expect("Should parse");

    assert_eq!(netlist.components[0].x, Some(120.5));
    assert_eq!(netlist.components[0].y, Some(40.0));
}

#[test]
fn test_parse_malformed_entries_without_error() {
    let netlist = parse_netlist(&fixture_path("malformed_entries.json")).expect("Should parse");

    assert_eq!(netlist.components.len(), 3);
    assert!(netlist.components[0].pins.is_empty());
    assert!(netlist.components[2].id.is_empty());
    assert!(netlist.nets[0].connections.is_empty());
}

#[test]
fn test_parse_bad_shape() {
    let err = parse_netlist(&fixture_path("bad_shape.json")).unwrap_err();

    match err {
        NetguardError::Netlist(NetlistError::InvalidInputShape { field, found }) => {
            assert_eq!(field, "components");
            assert_eq!(found, "object");
        }
        other => panic!("expected shape error, got {other}"),
    }
}

#[test]
fn test_parse_missing_file() {
    let err = parse_netlist(&fixture_path("does_not_exist.json")).unwrap_err();
    assert!(matches!(err, NetguardError::Io(_)));
    assert!(!err.is_input_error());
}
