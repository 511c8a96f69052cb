// SPDX-License-Identifier: MIT
// Copyright (c) 2026 ADNT Sarl <info@adnt.io>

//! Plan execution.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use crc::{Crc, CRC_32_ISO_HDLC};
use indicatif::{ProgressBar, ProgressStyle};

use crate::plan::{Plan, Step};
use crate::runner::CommandRunner;

const CRC32: Crc<u32> = Crc::<u32>::new(&CRC_32_ISO_HDLC);

pub const OBJCOPY_HINT: &str = "Please check if LLVM is installed or if CLANG_BIN is set correctly";

/// Progress bar counting plan steps.
pub fn progress_bar(steps: usize) -> Result<ProgressBar> {
    let pb = ProgressBar::new(steps as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{pos}/{len}] {msg}")?,
    );
    Ok(pb)
}

/// Execute every step of `plan`, stopping at the first failure.
///
/// The objcopy preflight check runs before any step. Files written by steps
/// that completed before a failure are left in place.
pub fn build(runner: &mut dyn CommandRunner, plan: &Plan, progress: &ProgressBar) -> Result<()> {
    runner.run(&plan.preflight).context(OBJCOPY_HINT)?;

    for step in &plan.steps {
        progress.set_message(step.label());
        if let Err(e) = execute(runner, step) {
            progress.abandon();
            return Err(e);
        }
        progress.inc(1);
    }
    progress.finish_with_message("Build complete");

    report(&plan.paths.output)?;
    println!("Successfully built Universal Payload");
    Ok(())
}

fn execute(runner: &mut dyn CommandRunner, step: &Step) -> Result<()> {
    match step {
        Step::Run { invocation, .. } => runner.run(invocation),
        Step::WriteHeader { path, header } => {
            if let Some(dir) = path.parent() {
                fs::create_dir_all(dir)
                    .with_context(|| format!("Failed to create {}", dir.display()))?;
            }
            fs::write(path, header.to_bytes())
                .with_context(|| format!("Failed to write {}", path.display()))?;
            log::info!(
                "wrote info header to {} (spec revision 0x{:04x}, revision 0x{:08x})",
                path.display(),
                header.spec_revision,
                header.revision
            );
            Ok(())
        }
        Step::Copy { from, to } => {
            if same_file(from, to) {
                log::info!("{} is already in place", to.display());
                return Ok(());
            }
            fs::copy(from, to).with_context(|| {
                format!("Failed to copy {} to {}", from.display(), to.display())
            })?;
            Ok(())
        }
    }
}

fn same_file(a: &Path, b: &Path) -> bool {
    match (fs::canonicalize(a), fs::canonicalize(b)) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

/// Print size and CRC32 of the final payload image.
fn report(output: &Path) -> Result<()> {
    let image =
        fs::read(output).with_context(|| format!("Failed to read {}", output.display()))?;
    println!(
        "Payload: {} ({} bytes, CRC32: 0x{:08x})",
        output.display(),
        image.len(),
        CRC32.checksum(&image)
    );
    Ok(())
}
