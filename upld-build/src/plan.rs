// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Build plan: the ordered list of steps a payload build performs.
//!
//! Building the plan touches neither the filesystem nor any process, so the
//! exact command lines can be checked before anything runs.

use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::Result;
use clap::ValueEnum;

use upld_common::{MacroList, PayloadInfoHeader};

use crate::config::{BuildPaths, Workspace};

/// External build command.
pub const BUILD_COMMAND: &str = "build";

pub const DSC_PATH: &str = "UefiPayloadPkg/UefiPayloadPkg.dsc";
pub const ENTRY_MODULE_INF: &str = "UefiPayloadPkg/UefiPayloadEntry/UniversalPayloadEntry.inf";

/// Tool chain used for the entry module, which must come out as ELF.
pub const ENTRY_TOOL_CHAIN: &str = "CLANGDWARF";

/// Target that sets the debug attribute in the info header.
pub const DEBUG_TARGET: &str = "DEBUG";

// --- Payload sections (name, alignment) ---

pub const INFO_SECTION: (&str, u32) = (".upld_info", 4);
pub const UEFI_FV_SECTION: (&str, u32) = (".upld.uefi_fv", 16);
pub const BDS_FV_SECTION: (&str, u32) = (".upld.bds_fv", 16);

/// Architecture of the payload entry module.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Arch {
    #[value(name = "IA32")]
    Ia32,
    #[value(name = "X64")]
    X64,
}

impl Arch {
    /// Object format passed to objcopy as both input and output format.
    pub fn objcopy_format(self) -> &'static str {
        match self {
            Arch::Ia32 => "elf32-i386",
            Arch::X64 => "elf64-x86-64",
        }
    }

    /// `-a` values for the entry module build. IA32 entry builds need X64
    /// enabled as well.
    fn build_archs(self) -> &'static [&'static str] {
        match self {
            Arch::Ia32 => &["IA32", "X64"],
            Arch::X64 => &["X64"],
        }
    }
}

impl fmt::Display for Arch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Arch::Ia32 => f.write_str("IA32"),
            Arch::X64 => f.write_str("X64"),
        }
    }
}

/// Validated build parameters.
#[derive(Clone, Debug)]
pub struct BuildOptions {
    pub tool_chain: String,
    pub target: String,
    pub arch: Arch,
    pub macros: MacroList,
    pub pcds: Vec<String>,
    pub quiet: bool,
    pub image_id: String,
    pub producer_id: String,
    pub spec_revision: u16,
    pub revision: u32,
    pub build_entry_only: bool,
    pub pre_build_upl_binary: Option<PathBuf>,
}

impl BuildOptions {
    /// Options with every optional parameter at its default.
    pub fn new(tool_chain: impl Into<String>) -> Self {
        Self {
            tool_chain: tool_chain.into(),
            target: DEBUG_TARGET.to_string(),
            arch: Arch::X64,
            macros: MacroList::default(),
            pcds: Vec::new(),
            quiet: false,
            image_id: upld_common::header::DEFAULT_IMAGE_ID.to_string(),
            producer_id: upld_common::header::DEFAULT_PRODUCER_ID.to_string(),
            spec_revision: upld_common::DEFAULT_SPEC_REVISION,
            revision: upld_common::DEFAULT_REVISION,
            build_entry_only: false,
            pre_build_upl_binary: None,
        }
    }

    pub fn is_debug(&self) -> bool {
        self.target == DEBUG_TARGET
    }

    pub fn info_header(&self) -> PayloadInfoHeader {
        PayloadInfoHeader::new(
            self.spec_revision,
            self.revision,
            &self.producer_id,
            &self.image_id,
            self.is_debug(),
        )
    }
}

// --- Invocation ---

/// An external command line. Runs in the workspace root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Invocation {
    program: OsString,
    args: Vec<OsString>,
}

impl Invocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            args: Vec::new(),
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_os_string()));
        self
    }

    pub fn program(&self) -> &OsStr {
        &self.program
    }

    pub fn get_args(&self) -> impl Iterator<Item = &OsStr> {
        self.args.iter().map(OsString::as_os_str)
    }

    pub fn to_command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        cmd
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_word(f, &self.program)?;
        for arg in &self.args {
            f.write_str(" ")?;
            write_word(f, arg)?;
        }
        Ok(())
    }
}

fn write_word(f: &mut fmt::Formatter<'_>, word: &OsStr) -> fmt::Result {
    let word = word.to_string_lossy();
    if word.is_empty() || word.contains(char::is_whitespace) {
        write!(f, "\"{}\"", word)
    } else {
        f.write_str(&word)
    }
}

// --- Steps ---

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Step {
    /// Run an external command; a non-zero exit aborts the build.
    Run {
        label: &'static str,
        invocation: Invocation,
    },
    /// Serialize the info header to `path`.
    WriteHeader {
        path: PathBuf,
        header: PayloadInfoHeader,
    },
    /// Copy `from` to `to`, overwriting.
    Copy { from: PathBuf, to: PathBuf },
}

impl Step {
    pub fn label(&self) -> String {
        match self {
            Step::Run { label, .. } => label.to_string(),
            Step::WriteHeader { path, .. } => format!("Writing {}", file_name(path)),
            Step::Copy { to, .. } => format!("Copying to {}", file_name(to)),
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .unwrap_or(path.as_os_str())
        .to_string_lossy()
        .into_owned()
}

// --- Plan ---

#[derive(Clone, Debug)]
pub struct Plan {
    /// `llvm-objcopy --version`, run before anything else.
    pub preflight: Invocation,
    pub steps: Vec<Step>,
    pub paths: BuildPaths,
}

impl Plan {
    pub fn new(workspace: &Workspace, options: &BuildOptions) -> Result<Self> {
        let paths = BuildPaths::new(workspace, options)?;
        let objcopy = workspace.objcopy();
        let mut steps = Vec::new();

        if !options.build_entry_only {
            steps.push(Step::Run {
                label: "Building DXE core and drivers (DXEFV, BDSFV)",
                invocation: build_payload(options, &paths),
            });
        }

        if options.pre_build_upl_binary.is_none() {
            steps.push(Step::Run {
                label: "Building Universal Payload entry",
                invocation: build_entry(options, &paths),
            });
        }

        steps.push(Step::WriteHeader {
            path: paths.info_file.clone(),
            header: options.info_header(),
        });

        if !options.build_entry_only {
            steps.extend(inject_sections(&objcopy, options.arch, &paths));
        }

        steps.push(Step::Copy {
            from: paths.entry_image.clone(),
            to: paths.output.clone(),
        });

        Ok(Self {
            preflight: Invocation::new(&objcopy).arg("--version"),
            steps,
            paths,
        })
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// All external commands, preflight included, in execution order.
    pub fn invocations(&self) -> impl Iterator<Item = &Invocation> {
        std::iter::once(&self.preflight).chain(self.steps.iter().filter_map(|s| match s {
            Step::Run { invocation, .. } => Some(invocation),
            _ => None,
        }))
    }
}

// --- Command construction ---

fn build_payload(options: &BuildOptions, paths: &BuildPaths) -> Invocation {
    let cmd = Invocation::new(BUILD_COMMAND)
        .args(["-p", DSC_PATH, "-b", options.target.as_str(), "-a", "X64"])
        .args(["-t", options.tool_chain.as_str()])
        .arg("-y")
        .arg(&paths.payload_report);
    with_build_flags(cmd, options)
}

fn build_entry(options: &BuildOptions, paths: &BuildPaths) -> Invocation {
    let mut cmd =
        Invocation::new(BUILD_COMMAND).args(["-p", DSC_PATH, "-b", options.target.as_str()]);
    for arch in options.arch.build_archs() {
        cmd = cmd.args(["-a", *arch]);
    }
    let cmd = cmd
        .args(["-m", ENTRY_MODULE_INF, "-t", ENTRY_TOOL_CHAIN])
        .arg("-y")
        .arg(&paths.module_report);
    with_build_flags(cmd, options)
}

/// Append `--quiet`, PCD overrides and macro definitions.
fn with_build_flags(mut cmd: Invocation, options: &BuildOptions) -> Invocation {
    if options.quiet {
        cmd = cmd.arg("--quiet");
    }
    for pcd in &options.pcds {
        cmd = cmd.args(["--pcd", pcd.as_str()]);
    }
    for def in options.macros.iter() {
        cmd = cmd.arg("-D").arg(format!("{}={}", def.name, def.value));
    }
    cmd
}

fn inject_sections(objcopy: &Path, arch: Arch, paths: &BuildPaths) -> [Step; 3] {
    let format = arch.objcopy_format();
    let base = |label| {
        let cmd = Invocation::new(objcopy).args(["-I", format, "-O", format]);
        (label, cmd)
    };
    let sections = [
        (INFO_SECTION, &paths.info_file),
        (UEFI_FV_SECTION, &paths.dxe_fv),
        (BDS_FV_SECTION, &paths.bds_fv),
    ];

    let (label, mut remove) = base("Removing stale payload sections");
    for ((name, _), _) in &sections {
        remove = remove.args(["--remove-section", *name]);
    }
    let remove = Step::Run {
        label,
        invocation: remove.arg(&paths.entry_image),
    };

    let (label, mut add) = base("Adding payload sections");
    for ((name, _), source) in &sections {
        let mut spec = OsString::from(format!("{}=", name));
        spec.push(source.as_os_str());
        add = add.arg("--add-section").arg(spec);
    }
    let add = Step::Run {
        label,
        invocation: add.arg(&paths.entry_image),
    };

    let (label, mut align) = base("Aligning payload sections");
    for ((name, alignment), _) in &sections {
        align = align
            .arg("--set-section-alignment")
            .arg(format!("{}={}", name, alignment));
    }
    let align = Step::Run {
        label,
        invocation: align.arg(&paths.entry_image),
    };

    [remove, add, align]
}
