// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Subprocess execution for build and objcopy invocations.

use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use std::process::Stdio;

use anyhow::{bail, Context, Result};
use indicatif::ProgressBar;

use crate::plan::Invocation;

/// Runs external commands on behalf of the build.
pub trait CommandRunner {
    /// Run `invocation` to completion. A non-zero exit is an error.
    fn run(&mut self, invocation: &Invocation) -> Result<()>;
}

/// Runs commands as child processes in the workspace root.
///
/// Child stdout is echoed line by line through the progress bar; stderr goes
/// straight to ours. Stdout is drained before waiting on the child.
pub struct ProcessRunner {
    cwd: PathBuf,
    progress: ProgressBar,
}

impl ProcessRunner {
    pub fn new(cwd: &Path, progress: ProgressBar) -> Self {
        Self {
            cwd: cwd.to_path_buf(),
            progress,
        }
    }

    fn print(&self, line: &str) {
        self.progress.suspend(|| println!("{}", line));
    }
}

impl CommandRunner for ProcessRunner {
    fn run(&mut self, invocation: &Invocation) -> Result<()> {
        self.print(&invocation.to_string());
        log::debug!("running in {}", self.cwd.display());

        let mut child = invocation
            .to_command()
            .current_dir(&self.cwd)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::inherit())
            .spawn()
            .with_context(|| format!("Failed to start command: {}", invocation))?;

        if let Some(stdout) = child.stdout.take() {
            for line in BufReader::new(stdout).split(b'\n') {
                let line = line.context("Failed to read command output")?;
                self.print(String::from_utf8_lossy(&line).trim());
            }
        }

        let status = child
            .wait()
            .with_context(|| format!("Failed to wait for command: {}", invocation))?;

        if !status.success() {
            self.print(&format!("- Failed - error happened when run command: {}", invocation));
            bail!("command failed ({}): {}", status, invocation);
        }
        Ok(())
    }
}
