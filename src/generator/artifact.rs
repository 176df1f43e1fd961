// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Dual-artifact assembly.
//!
//! Each artifact is the shared header, the artifact's fixed blocks, and the
//! routine blocks in driver order, joined with a single line terminator.
//! Nothing here reorders, deduplicates, or validates.

use crate::core::error::GenError;
use crate::core::formatter::{TemplateFormatter, TemplateValues};
use crate::core::templates;

use super::driver::RoutineBlock;

/// Build the definitions artifact: header, bootstrap and tail routines, then
/// one accessor definition per routine block.
pub fn build_definitions(
    fmt: &TemplateFormatter<'_>,
    scalars: &[RoutineBlock],
    strings: &[RoutineBlock],
) -> Result<String, GenError> {
    let mut parts = Vec::with_capacity(2 + scalars.len() + strings.len());
    parts.push(render_header(fmt, "//")?);
    parts.push(fmt.render(templates::GLOBAL_FUNCTIONS, &TemplateValues::new())?);
    for block in scalars.iter().chain(strings) {
        parts.push(block.definition.clone());
    }
    Ok(parts.join("\n"))
}

/// Build the declarations/redirectors artifact: header, assembly prologue,
/// one `PUBLIC` declaration per routine block, then the enclosing PROC with
/// one redirector stub per block.
pub fn build_redirectors(
    fmt: &TemplateFormatter<'_>,
    scalars: &[RoutineBlock],
    strings: &[RoutineBlock],
) -> Result<String, GenError> {
    let mut parts = Vec::with_capacity(4 + 2 * (scalars.len() + strings.len()));
    parts.push(render_header(fmt, ";")?);
    parts.push(templates::ASM_HEADER.to_string());
    for block in scalars.iter().chain(strings) {
        parts.push(block.declaration.clone());
    }
    parts.push(templates::PROC_HEADER.to_string());
    for block in scalars.iter().chain(strings) {
        parts.push(block.redirector.clone());
    }
    parts.push(templates::PROC_TRAILER.to_string());
    Ok(parts.join("\n"))
}

fn render_header(fmt: &TemplateFormatter<'_>, comment: &str) -> Result<String, GenError> {
    fmt.render(templates::HEADER, &TemplateValues::new().with("c", comment))
}
