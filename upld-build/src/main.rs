// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Universal Payload build tool.
//!
//! Usage:
//!   WORKSPACE=/path/to/edk2 upld-build -t GCC5
//!   upld-build --workspace /path/to/edk2 -t CLANGDWARF -a IA32 -b RELEASE
//!   upld-build -t GCC5 --build-entry-only -D SMM_SUPPORT=TRUE

use anyhow::Result;
use clap::Parser;
use env_logger::Env;

use upld_build::cli;

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = cli::Cli::parse();
    cli::run(args)
}
