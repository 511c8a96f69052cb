// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Universal Payload build orchestrator.
//!
//! A run is turned into a [`plan::Plan`] first, then executed step by step
//! through a [`runner::CommandRunner`]:
//!
//! 1. build the payload firmware volumes (unless entry-only)
//! 2. build the payload entry module (unless a pre-built binary is given)
//! 3. write the `.upld_info` header file
//! 4. replace the payload sections in the entry image with `llvm-objcopy`
//! 5. copy the entry image to `UniversalPayload.elf`

pub mod cli;
pub mod commands;
pub mod config;
pub mod plan;
pub mod runner;
