// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Workspace configuration and the file layout of a payload build.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::plan::{Arch, BuildOptions, ENTRY_TOOL_CHAIN};

/// Name of the binary-editing tool.
pub const OBJCOPY: &str = "llvm-objcopy";

/// Build output directory, relative to the workspace root.
pub const BUILD_DIR: &str = "Build/UefiPayloadPkgX64";

pub const PAYLOAD_REPORT: &str = "UefiUniversalPayload.txt";
pub const MODULE_REPORT: &str = "UefiUniversalPayloadEntry.txt";
pub const INFO_FILE: &str = "UniversalPayloadInfo.bin";
pub const OUTPUT_FILE: &str = "UniversalPayload.elf";

const ENTRY_IMAGE: &str =
    "UefiPayloadPkg/UefiPayloadEntry/UniversalPayloadEntry/DEBUG/UniversalPayloadEntry.dll";

/// Where the build runs and which tools it uses.
///
/// Every subprocess runs with `root` as its working directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Workspace {
    pub root: PathBuf,
    /// Directory holding `llvm-objcopy`; `PATH` lookup when unset.
    pub clang_bin: Option<PathBuf>,
}

impl Workspace {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            clang_bin: None,
        }
    }

    pub fn with_clang_bin(mut self, clang_bin: Option<PathBuf>) -> Self {
        self.clang_bin = clang_bin;
        self
    }

    /// Path (or bare name) of the objcopy binary to invoke.
    pub fn objcopy(&self) -> PathBuf {
        match &self.clang_bin {
            Some(dir) => dir.join(OBJCOPY),
            None => PathBuf::from(OBJCOPY),
        }
    }

    pub fn build_dir(&self) -> PathBuf {
        self.root.join(BUILD_DIR)
    }
}

/// Every file a build reads or writes.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuildPaths {
    pub build_dir: PathBuf,
    /// Entry module image the sections are injected into.
    pub entry_image: PathBuf,
    pub dxe_fv: PathBuf,
    pub bds_fv: PathBuf,
    pub payload_report: PathBuf,
    pub module_report: PathBuf,
    pub info_file: PathBuf,
    pub output: PathBuf,
}

impl BuildPaths {
    pub fn new(workspace: &Workspace, options: &BuildOptions) -> Result<Self> {
        let build_dir = workspace.build_dir();

        let entry_image = match &options.pre_build_upl_binary {
            Some(path) => std::path::absolute(path)
                .with_context(|| format!("Failed to resolve {}", path.display()))?,
            None => entry_output(&build_dir, &options.target, options.arch),
        };

        let fv_dir = build_dir
            .join(format!("{}_{}", options.target, options.tool_chain))
            .join("FV");

        Ok(Self {
            entry_image,
            dxe_fv: fv_dir.join("DXEFV.Fv"),
            bds_fv: fv_dir.join("BDSFV.Fv"),
            payload_report: build_dir.join(PAYLOAD_REPORT),
            module_report: build_dir.join(MODULE_REPORT),
            info_file: build_dir.join(INFO_FILE),
            output: build_dir.join(OUTPUT_FILE),
            build_dir,
        })
    }
}

fn entry_output(build_dir: &Path, target: &str, arch: Arch) -> PathBuf {
    build_dir
        .join(format!("{}_{}", target, ENTRY_TOOL_CHAIN))
        .join(arch.to_string())
        .join(ENTRY_IMAGE)
}
