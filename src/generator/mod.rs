// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Interceptor source generation - main entry point.
//!
//! Ties the template formatter and parameter tables together into the
//! single-pass pipeline that renders, assembles, and writes the two
//! artifacts.

mod artifact;
pub mod cli;
mod driver;
mod output;

pub use artifact::{build_definitions, build_redirectors};
pub use driver::{scalar_routines, string_routines, RoutineBlock};
pub use output::{artifact_up_to_date, write_artifact};

use std::path::PathBuf;

use crate::core::error::{GenError, GenErrorKind};
use crate::core::formatter::TemplateFormatter;
use crate::core::tables::{
    validate_tables, ACCESS_MODES, ACCESS_SIZES, STRING_ACCESSORS, SUFFIXES,
};
use crate::core::templates::builtin_macros;

use cli::Cli;

/// Fixed artifact file name: accessor definitions.
pub const DEFINITIONS_FILE: &str = "memory_interceptors_gen.cc";
/// Fixed artifact file name: redirector declarations and stubs.
pub const REDIRECTORS_FILE: &str = "memory_interceptors.asm";

/// Outcome of a successful run.
#[derive(Debug)]
pub struct RunReport {
    pub definitions_path: PathBuf,
    pub redirectors_path: PathBuf,
    pub scalar_routines: usize,
    pub string_routines: usize,
    pub checked: bool,
}

/// Render both artifacts in memory. The tables and macro registry are built
/// fresh; nothing is shared or mutated across calls.
pub fn render_artifacts() -> Result<(String, String, usize, usize), GenError> {
    validate_tables(STRING_ACCESSORS)?;
    let macros = builtin_macros();
    let fmt = TemplateFormatter::new(&macros);
    let scalars = scalar_routines(&fmt, SUFFIXES, ACCESS_SIZES, ACCESS_MODES)?;
    let strings = string_routines(&fmt, STRING_ACCESSORS)?;
    let definitions = build_definitions(&fmt, &scalars, &strings)?;
    let redirectors = build_redirectors(&fmt, &scalars, &strings)?;
    Ok((definitions, redirectors, scalars.len(), strings.len()))
}

/// Run the generator for the given CLI configuration.
pub fn run_with_cli(cli: &Cli) -> Result<RunReport, GenError> {
    let (definitions, redirectors, scalar_count, string_count) = render_artifacts()?;
    let definitions_path = cli.out_dir.join(DEFINITIONS_FILE);
    let redirectors_path = cli.out_dir.join(REDIRECTORS_FILE);

    if cli.check {
        for (path, contents) in [
            (&definitions_path, &definitions),
            (&redirectors_path, &redirectors),
        ] {
            if !artifact_up_to_date(path, contents)? {
                return Err(GenError::new(
                    GenErrorKind::Stale,
                    "Artifact is out of date",
                    Some(path.to_string_lossy().as_ref()),
                ));
            }
        }
    } else {
        write_artifact(&definitions_path, &definitions)?;
        write_artifact(&redirectors_path, &redirectors)?;
    }

    Ok(RunReport {
        definitions_path,
        redirectors_path,
        scalar_routines: scalar_count,
        string_routines: string_count,
        checked: cli.check,
    })
}
