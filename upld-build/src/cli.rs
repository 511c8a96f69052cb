// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Command-line interface definitions.
//!
//! All argument validation happens in clap value parsers, so a malformed
//! argument stops the run before any command is started.

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;

use upld_common::{parse_revision, parse_spec_revision, MacroDef, MacroList};

use crate::commands;
use crate::config::Workspace;
use crate::plan::{Arch, BuildOptions, Plan};
use crate::runner::ProcessRunner;

/// Command-line arguments.
///
/// Long options also accept the CamelCase spelling of the EDK II build
/// script (`--ToolChain`, `--BuildEntryOnly`, ...).
#[derive(Parser, Debug)]
#[command(name = "upld-build")]
#[command(about = "For building Universal Payload")]
pub struct Cli {
    /// Tool chain tag for the payload firmware volumes (e.g., GCC5)
    #[arg(short = 't', long, visible_alias = "ToolChain")]
    pub tool_chain: String,

    /// Build target
    #[arg(short = 'b', long, visible_alias = "Target", default_value = "DEBUG")]
    pub target: String,

    /// Architecture of the payload entry module
    #[arg(short = 'a', long, visible_alias = "Arch", value_enum, default_value_t = Arch::X64)]
    pub arch: Arch,

    /// Macro definition, may be repeated
    #[arg(
        short = 'D',
        long = "macro",
        visible_alias = "Macro",
        value_name = "NAME=VALUE",
        value_parser = MacroDef::parse
    )]
    pub macros: Vec<MacroDef>,

    /// Payload image id (16 bytes maximal)
    #[arg(short = 'i', long, visible_alias = "ImageId", default_value = "UEFI")]
    pub image_id: String,

    /// Disable all build messages except fatal errors
    #[arg(short = 'q', long, visible_alias = "Quiet")]
    pub quiet: bool,

    /// PCD override passed to the build, may be repeated
    #[arg(short = 'p', long = "pcd", value_name = "PCD")]
    pub pcds: Vec<String>,

    /// Spec revision in BCD format (Major[8-bits].Minor[8-bits])
    #[arg(
        short = 's',
        long,
        visible_alias = "SpecRevision",
        default_value = "0.7",
        value_parser = parse_spec_revision
    )]
    pub spec_revision: u16,

    /// Revision of the payload binary (Major.Minor.Revision.Build)
    #[arg(
        short = 'r',
        long,
        visible_alias = "Revision",
        default_value = "0x0000010105",
        value_parser = parse_revision
    )]
    pub revision: u32,

    /// Payload producer id (16 bytes maximal)
    #[arg(short = 'o', long, visible_alias = "ProducerId", default_value = "INTEL")]
    pub producer_id: String,

    /// Only build the payload entry module
    #[arg(short = 'e', long, visible_alias = "BuildEntryOnly")]
    pub build_entry_only: bool,

    /// Use an existing payload entry image instead of building it
    #[arg(long, visible_alias = "PreBuildUplBinary", value_name = "FILE")]
    pub pre_build_upl_binary: Option<PathBuf>,

    /// EDK II workspace root
    #[arg(long, env = "WORKSPACE", value_name = "DIR")]
    pub workspace: PathBuf,

    /// Directory containing llvm-objcopy
    #[arg(long, env = "CLANG_BIN", value_name = "DIR")]
    pub clang_bin: Option<PathBuf>,
}

impl Cli {
    pub fn workspace(&self) -> Workspace {
        Workspace::new(&self.workspace).with_clang_bin(self.clang_bin.clone())
    }

    pub fn options(&self) -> BuildOptions {
        BuildOptions {
            tool_chain: self.tool_chain.clone(),
            target: self.target.clone(),
            arch: self.arch,
            macros: MacroList::with_defaults(self.macros.iter().cloned()),
            pcds: self.pcds.clone(),
            quiet: self.quiet,
            image_id: self.image_id.clone(),
            producer_id: self.producer_id.clone(),
            spec_revision: self.spec_revision,
            revision: self.revision,
            build_entry_only: self.build_entry_only,
            pre_build_upl_binary: self.pre_build_upl_binary.clone(),
        }
    }
}

/// Execute the parsed CLI command.
pub fn run(cli: Cli) -> Result<()> {
    let workspace = cli.workspace();
    let options = cli.options();
    let plan = Plan::new(&workspace, &options)?;

    log::debug!("{:#?}", plan);

    let progress = commands::progress_bar(plan.len())?;
    let mut runner = ProcessRunner::new(&workspace.root, progress.clone());
    commands::build(&mut runner, &plan, &progress)
}
