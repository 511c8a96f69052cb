// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Common types for building a Universal Payload image.
//!
//! This crate has no process or filesystem dependencies:
//! - `header`: the `.upld_info` section record and its byte layout
//! - `args`: parsers for the user-supplied build parameters
//! - `macros`: the ordered `-D NAME=VALUE` macro table

pub mod args;
pub mod error;
pub mod header;
pub mod macros;

// Re-export commonly used types
pub use args::{parse_revision, parse_spec_revision};
pub use error::{ArgError, HeaderError};
pub use header::{PayloadInfoHeader, DEFAULT_REVISION, DEFAULT_SPEC_REVISION, UPLD_INFO_MAGIC};
pub use macros::{MacroDef, MacroList, DEFAULT_MACRO};
