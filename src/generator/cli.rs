// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Command-line interface parsing and argument validation.

use std::path::PathBuf;

use clap::{ArgAction, Parser, ValueEnum};

use crate::core::error::{GenError, GenErrorKind};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const LONG_ABOUT: &str =
    "Generates the paired memory-interceptor source artifacts: the accessor
definitions (memory_interceptors_gen.cc) and the matching redirector
declarations/stubs (memory_interceptors.asm).

The two artifacts are produced from a single generation pass, so routine
names and ordering always agree between them. Runs are deterministic:
unchanged tables and templates produce byte-identical output.

With --check, the artifacts on disk are compared against freshly rendered
output and nothing is rewritten; stale or missing files exit non-zero.";

#[derive(Parser, Debug)]
#[command(
    name = "hookForge",
    version = VERSION,
    about = "Memory-interceptor source generator (accessor definitions + redirector stubs)",
    long_about = LONG_ABOUT
)]
pub struct Cli {
    #[arg(
        short = 'o',
        long = "out-dir",
        value_name = "DIR",
        default_value = ".",
        long_help = "Directory the artifacts are written to. Must exist."
    )]
    pub out_dir: PathBuf,
    #[arg(
        long = "format",
        value_enum,
        default_value_t = OutputFormat::Text,
        long_help = "Select run summary format. text is default; json emits a machine-readable summary."
    )]
    pub format: OutputFormat,
    #[arg(
        long = "check",
        action = ArgAction::SetTrue,
        long_help = "Verify the artifacts on disk are up to date instead of rewriting them. Stale or missing artifacts exit with a non-zero status."
    )]
    pub check: bool,
    #[arg(
        short = 'q',
        long = "quiet",
        action = ArgAction::SetTrue,
        long_help = "Suppress the success summary. Errors are still reported."
    )]
    pub quiet: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

pub fn validate_cli(cli: &Cli) -> Result<(), GenError> {
    if !cli.out_dir.is_dir() {
        return Err(GenError::new(
            GenErrorKind::Cli,
            "Output directory does not exist",
            Some(cli.out_dir.to_string_lossy().as_ref()),
        ));
    }
    Ok(())
}
