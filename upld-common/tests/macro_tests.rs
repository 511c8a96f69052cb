// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for macro parsing and the macro table.

use upld_common::{ArgError, MacroDef, MacroList};

fn def(arg: &str) -> MacroDef {
    MacroDef::parse(arg).unwrap()
}

// =============================================================================
// MacroDef tests
// =============================================================================

#[test]
fn test_macro_parse_uppercases_name() {
    let m = def("target_board=Qemu");
    assert_eq!(m.name, "TARGET_BOARD");
    assert_eq!(m.value, "Qemu");
}

#[test]
fn test_macro_parse_trims_argument() {
    let m = def("  FOO=bar \n");
    assert_eq!(m.name, "FOO");
    assert_eq!(m.value, "bar");
}

#[test]
fn test_macro_parse_empty_value() {
    assert_eq!(def("FOO=").value, "");
}

#[test]
fn test_macro_without_equals_rejected() {
    assert_eq!(
        MacroDef::parse("FOO"),
        Err(ArgError::MacroFormat("FOO".to_string()))
    );
}

#[test]
fn test_macro_with_two_equals_rejected() {
    assert_eq!(
        MacroDef::parse("A=B=C"),
        Err(ArgError::MacroFormat("A=B=C".to_string()))
    );
}

#[test]
fn test_macro_from_str() {
    let m: MacroDef = "x=1".parse().unwrap();
    assert_eq!(m, def("X=1"));
}

// =============================================================================
// MacroList tests
// =============================================================================

#[test]
fn test_default_list_defines_universal_payload() {
    let list = MacroList::default();
    assert_eq!(list.len(), 1);
    assert_eq!(list.get("UNIVERSAL_PAYLOAD"), Some("TRUE"));
}

#[test]
fn test_list_lookup_is_case_insensitive() {
    let list = MacroList::with_defaults([def("Foo=1")]);
    assert_eq!(list.get("foo"), Some("1"));
    assert_eq!(list.get("FOO"), Some("1"));
    assert_eq!(list.get("BAR"), None);
}

#[test]
fn test_list_keeps_insertion_order() {
    let list = MacroList::with_defaults([def("B=2"), def("A=1")]);
    let names: Vec<&str> = list.iter().map(|d| d.name.as_str()).collect();
    assert_eq!(names, ["UNIVERSAL_PAYLOAD", "B", "A"]);
}

#[test]
fn test_list_redefinition_replaces_in_place() {
    let list = MacroList::with_defaults([def("A=1"), def("universal_payload=FALSE"), def("a=3")]);
    let pairs: Vec<(&str, &str)> = list
        .iter()
        .map(|d| (d.name.as_str(), d.value.as_str()))
        .collect();
    assert_eq!(pairs, [("UNIVERSAL_PAYLOAD", "FALSE"), ("A", "3")]);
}

#[test]
fn test_empty_list() {
    let list = MacroList::new();
    assert!(list.is_empty());
    assert_eq!(list.iter().count(), 0);
}
