// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Unit tests for spec revision and revision parsing.

use upld_common::{parse_revision, parse_spec_revision, ArgError};

// =============================================================================
// parse_spec_revision tests
// =============================================================================

#[test]
fn test_spec_revision_default() {
    assert_eq!(parse_spec_revision("0.7"), Ok(0x0070));
}

#[test]
fn test_spec_revision_two_digit_minor_is_not_shifted() {
    assert_eq!(parse_spec_revision("1.05"), Ok(0x0105));
    assert_eq!(parse_spec_revision("0.70"), Ok(0x0070));
}

#[test]
fn test_spec_revision_single_digit_minor_is_shifted() {
    let value = parse_spec_revision("7.a").unwrap();
    assert_eq!(value >> 8, 0x07);
    assert_eq!(value & 0xFF, 0xA0);
}

#[test]
fn test_spec_revision_hex_digits() {
    assert_eq!(parse_spec_revision("ff.ff"), Ok(0xFFFF));
    assert_eq!(parse_spec_revision("A.B"), Ok(0x0AB0));
    assert_eq!(parse_spec_revision("10.1"), Ok(0x1010));
}

#[test]
fn test_spec_revision_every_component_pair() {
    for major in 0u16..=0xFF {
        for minor in 0u16..=0xFF {
            let input = format!("{:x}.{:02x}", major, minor);
            assert_eq!(parse_spec_revision(&input), Ok((major << 8) | minor));
        }
    }
}

#[test]
fn test_spec_revision_missing_dot() {
    assert_eq!(
        parse_spec_revision("07"),
        Err(ArgError::SpecRevisionFormat("07".to_string()))
    );
}

#[test]
fn test_spec_revision_too_many_components() {
    assert!(matches!(
        parse_spec_revision("1.2.3"),
        Err(ArgError::SpecRevisionFormat(_))
    ));
}

#[test]
fn test_spec_revision_empty_components() {
    assert!(matches!(
        parse_spec_revision(".7"),
        Err(ArgError::SpecRevisionFormat(_))
    ));
    assert!(matches!(
        parse_spec_revision("1."),
        Err(ArgError::SpecRevisionFormat(_))
    ));
}

#[test]
fn test_spec_revision_components_too_long() {
    assert!(matches!(
        parse_spec_revision("100.1"),
        Err(ArgError::SpecRevisionFormat(_))
    ));
    assert!(matches!(
        parse_spec_revision("1.100"),
        Err(ArgError::SpecRevisionFormat(_))
    ));
}

#[test]
fn test_spec_revision_non_hex_digits() {
    assert_eq!(
        parse_spec_revision("1.g"),
        Err(ArgError::SpecRevisionDigits {
            input: "1.g".to_string(),
            part: "Minor",
        })
    );
    assert_eq!(
        parse_spec_revision("z.1"),
        Err(ArgError::SpecRevisionDigits {
            input: "z.1".to_string(),
            part: "Major",
        })
    );
    assert!(parse_spec_revision("+1.1").is_err());
}

// =============================================================================
// parse_revision tests
// =============================================================================

#[test]
fn test_revision_default_literal() {
    assert_eq!(parse_revision("0x0000010105"), Ok(0x0001_0105));
}

#[test]
fn test_revision_decimal_and_prefixes() {
    assert_eq!(parse_revision("0"), Ok(0));
    assert_eq!(parse_revision("257"), Ok(257));
    assert_eq!(parse_revision("0XFF"), Ok(0xFF));
    assert_eq!(parse_revision("0o17"), Ok(0o17));
    assert_eq!(parse_revision("0b101"), Ok(0b101));
    assert_eq!(parse_revision("+42"), Ok(42));
    assert_eq!(parse_revision(" 42 "), Ok(42));
}

#[test]
fn test_revision_separators() {
    assert_eq!(parse_revision("1_000"), Ok(1000));
    assert_eq!(parse_revision("0x_ff_ff"), Ok(0xFFFF));
    assert!(parse_revision("1__0").is_err());
    assert!(parse_revision("_1").is_err());
    assert!(parse_revision("1_").is_err());
}

#[test]
fn test_revision_round_trips_in_range() {
    for value in [0u32, 1, 0x0101_0105, 0x7FFF_FFFF, 0xFFFF_FFFE, 0xFFFF_FFFF] {
        assert_eq!(parse_revision(&value.to_string()), Ok(value));
        assert_eq!(parse_revision(&format!("{:#x}", value)), Ok(value));
    }
}

#[test]
fn test_revision_above_32_bits_rejected() {
    assert_eq!(
        parse_revision("0x100000000"),
        Err(ArgError::TooLarge("0x100000000".to_string()))
    );
    assert_eq!(
        parse_revision("4294967296"),
        Err(ArgError::TooLarge("4294967296".to_string()))
    );
    assert!(matches!(
        parse_revision("0xffffffffffffffffffffffffffffffffffff"),
        Err(ArgError::TooLarge(_))
    ));
}

#[test]
fn test_revision_negative_rejected() {
    assert_eq!(
        parse_revision("-1"),
        Err(ArgError::Negative("-1".to_string()))
    );
    assert_eq!(parse_revision("-0"), Ok(0));
}

#[test]
fn test_revision_malformed_rejected() {
    for input in ["", "abc", "0x", "0xg", "12a", "0123", "--1", "1.5"] {
        assert_eq!(
            parse_revision(input),
            Err(ArgError::InvalidInteger(input.to_string())),
            "input {:?}",
            input
        );
    }
    assert_eq!(parse_revision("00"), Ok(0));
}
