// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Error types for argument validation and header decoding.

use thiserror::Error;

/// A build parameter that failed validation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArgError {
    #[error("{0} is not a valid SpecRevision format (Major[8-bits].Minor[8-bits])")]
    SpecRevisionFormat(String),

    #[error("{input} {part} version of SpecRevision is not a valid integer value")]
    SpecRevisionDigits { input: String, part: &'static str },

    #[error("{0} is not a valid integer value")]
    InvalidInteger(String),

    #[error("{0} is a negative value")]
    Negative(String),

    #[error("{0} is larger than 32-bits")]
    TooLarge(String),

    #[error("unknown variable passed in: {0} (expected NAME=VALUE)")]
    MacroFormat(String),
}

/// A serialized info header that could not be decoded.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderError {
    #[error("header too short: {0} bytes")]
    TooShort(usize),

    #[error("bad header magic {0:02x?}")]
    BadMagic([u8; 4]),

    #[error("header length field is {0}, expected {1}")]
    LengthMismatch(u32, u32),
}
