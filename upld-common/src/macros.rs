// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Build macro definitions (`-D NAME=VALUE`).

use std::str::FromStr;

use crate::error::ArgError;

/// Macro every Universal Payload build defines, as `(name, value)`.
pub const DEFAULT_MACRO: (&str, &str) = ("UNIVERSAL_PAYLOAD", "TRUE");

/// A single `NAME=VALUE` definition. The name is stored uppercased.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroDef {
    pub name: String,
    pub value: String,
}

impl MacroDef {
    /// Parse `NAME=VALUE`. The argument must contain exactly one `=`.
    pub fn parse(arg: &str) -> Result<Self, ArgError> {
        if arg.matches('=').count() != 1 {
            return Err(ArgError::MacroFormat(arg.to_string()));
        }
        let (name, value) = arg
            .trim()
            .split_once('=')
            .ok_or_else(|| ArgError::MacroFormat(arg.to_string()))?;

        Ok(Self {
            name: name.to_uppercase(),
            value: value.to_string(),
        })
    }
}

impl FromStr for MacroDef {
    type Err = ArgError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// Ordered macro table, keyed case-insensitively.
///
/// Redefining a name replaces its value but keeps its original position, so
/// the generated `-D` flags are stable across runs.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MacroList {
    defs: Vec<MacroDef>,
}

impl MacroList {
    pub fn new() -> Self {
        Self { defs: Vec::new() }
    }

    /// Table seeded with [`DEFAULT_MACRO`] followed by `defs`.
    pub fn with_defaults<I>(defs: I) -> Self
    where
        I: IntoIterator<Item = MacroDef>,
    {
        let mut list = Self::new();
        list.insert(MacroDef {
            name: DEFAULT_MACRO.0.to_string(),
            value: DEFAULT_MACRO.1.to_string(),
        });
        list.extend(defs);
        list
    }

    pub fn insert(&mut self, def: MacroDef) {
        match self.defs.iter_mut().find(|d| d.name == def.name) {
            Some(existing) => existing.value = def.value,
            None => self.defs.push(def),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let name = name.to_uppercase();
        self.defs
            .iter()
            .find(|d| d.name == name)
            .map(|d| d.value.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = &MacroDef> {
        self.defs.iter()
    }

    pub fn len(&self) -> usize {
        self.defs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.defs.is_empty()
    }
}

impl Default for MacroList {
    fn default() -> Self {
        Self::with_defaults(std::iter::empty())
    }
}

impl Extend<MacroDef> for MacroList {
    fn extend<I: IntoIterator<Item = MacroDef>>(&mut self, iter: I) {
        for def in iter {
            self.insert(def);
        }
    }
}
