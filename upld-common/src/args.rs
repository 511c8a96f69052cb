// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Parsers for numeric build parameters.
//!
//! Both functions have the `fn(&str) -> Result<T, ArgError>` shape so they can
//! be plugged straight into a clap `value_parser`.

use std::num::IntErrorKind;

use crate::error::ArgError;

/// Parse a `Major.Minor` spec revision into its BCD form.
///
/// Each component is one or two hex digits. A single-digit minor is shifted
/// into the high nibble, so `0.7` becomes `0x0070` and `1.05` stays `0x0105`.
pub fn parse_spec_revision(input: &str) -> Result<u16, ArgError> {
    let format_err = || ArgError::SpecRevisionFormat(input.to_string());

    let (major_str, minor_str) = input.split_once('.').ok_or_else(format_err)?;
    if minor_str.contains('.') {
        return Err(format_err());
    }

    if !(1..=2).contains(&minor_str.len()) {
        return Err(format_err());
    }
    let minor = hex_byte(minor_str).ok_or_else(|| ArgError::SpecRevisionDigits {
        input: input.to_string(),
        part: "Minor",
    })?;
    let minor = if minor_str.len() == 1 { minor << 4 } else { minor };

    if !(1..=2).contains(&major_str.len()) {
        return Err(format_err());
    }
    let major = hex_byte(major_str).ok_or_else(|| ArgError::SpecRevisionDigits {
        input: input.to_string(),
        part: "Major",
    })?;

    Ok((u16::from(major) << 8) | u16::from(minor))
}

/// Parse a payload revision as a 32-bit unsigned integer.
///
/// Accepts decimal or `0x`/`0o`/`0b` prefixed literals with optional `_`
/// separators and sign. Decimal literals may not have leading zeros.
pub fn parse_revision(input: &str) -> Result<u32, ArgError> {
    let invalid = || ArgError::InvalidInteger(input.to_string());

    let s = input.trim();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits, prefixed) = match s.get(..2).map(str::to_ascii_lowercase).as_deref() {
        Some("0x") => (16, &s[2..], true),
        Some("0o") => (8, &s[2..], true),
        Some("0b") => (2, &s[2..], true),
        _ => (10, s, false),
    };

    let digits = strip_separators(digits, prefixed).ok_or_else(invalid)?;
    if !digits.chars().all(|c| c.is_digit(radix)) {
        return Err(invalid());
    }
    if radix == 10 && digits.len() > 1 && digits.starts_with('0') && digits.bytes().any(|b| b != b'0')
    {
        return Err(invalid());
    }

    let value = match u128::from_str_radix(&digits, radix) {
        Ok(v) => v,
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => {
            return Err(if negative {
                ArgError::Negative(input.to_string())
            } else {
                ArgError::TooLarge(input.to_string())
            });
        }
        Err(_) => return Err(invalid()),
    };

    if negative && value != 0 {
        return Err(ArgError::Negative(input.to_string()));
    }
    u32::try_from(value).map_err(|_| ArgError::TooLarge(input.to_string()))
}

// --- Internal helpers ---

fn hex_byte(s: &str) -> Option<u8> {
    if !s.chars().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    u8::from_str_radix(s, 16).ok()
}

/// Remove `_` digit separators. A separator must sit between two digits, or
/// directly after a radix prefix.
fn strip_separators(digits: &str, prefixed: bool) -> Option<String> {
    let body = match digits.strip_prefix('_') {
        Some(rest) if prefixed => rest,
        Some(_) => return None,
        None => digits,
    };
    if body.is_empty() || body.ends_with('_') || body.starts_with('_') || body.contains("__") {
        return None;
    }
    Some(body.replace('_', ""))
}
