// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Combinatorial generation driver.
//!
//! One pass over the parameter tables yields, per combination, the accessor
//! definition, the redirector declaration, and the redirector stub together.
//! Both artifacts are then assembled from the same ordered sequence, so
//! their naming and ordering cannot drift apart.

use crate::core::error::GenError;
use crate::core::formatter::{TemplateFormatter, TemplateValues};
use crate::core::tables::{AccessMode, StringAccessor, SHADOW_SYMBOL};
use crate::core::templates;

/// All generated text for one routine, across both artifacts.
pub struct RoutineBlock {
    /// Accessor symbol, e.g. `asan_check_4_byte_read_access`.
    pub check_name: String,
    /// Redirector symbol, e.g. `asan_redirect_4_byte_read_access`.
    pub redirect_name: String,
    /// Accessor definition for the definitions artifact.
    pub definition: String,
    /// `PUBLIC` declaration line for the redirector artifact.
    pub declaration: String,
    /// Redirector stub for the redirector artifact.
    pub redirector: String,
}

/// Generate the scalar accessor family in canonical order: suffix variant,
/// then access width, then access direction.
pub fn scalar_routines(
    fmt: &TemplateFormatter<'_>,
    suffixes: &[&str],
    sizes: &[u32],
    modes: &[AccessMode],
) -> Result<Vec<RoutineBlock>, GenError> {
    let mut blocks = Vec::with_capacity(suffixes.len() * sizes.len() * modes.len());
    for suffix in suffixes {
        let definition_template = if suffix.is_empty() {
            templates::CHECK_FUNCTION
        } else {
            templates::CHECK_FUNCTION_NO_FLAGS
        };
        for size in sizes {
            for mode in modes {
                let values = TemplateValues::new()
                    .with("access_size", size.to_string())
                    .with("access_mode_str", mode.name)
                    .with("access_mode_value", mode.tag)
                    .with("shadow", SHADOW_SYMBOL)
                    .with("suffix", *suffix);
                blocks.push(RoutineBlock {
                    check_name: format!("asan_check_{size}_byte_{}{suffix}", mode.name),
                    redirect_name: format!("asan_redirect_{size}_byte_{}{suffix}", mode.name),
                    definition: fmt.render(definition_template, &values)?,
                    declaration: fmt.render(templates::REDIRECT_FUNCTION_DECL, &values)?,
                    redirector: fmt.render(templates::REDIRECT_FUNCTION, &values)?,
                });
            }
        }
    }
    Ok(blocks)
}

/// Generate the string-operation family in table order.
pub fn string_routines(
    fmt: &TemplateFormatter<'_>,
    accessors: &[StringAccessor],
) -> Result<Vec<RoutineBlock>, GenError> {
    let mut blocks = Vec::with_capacity(accessors.len());
    for entry in accessors {
        let values = TemplateValues::new()
            .with("func", entry.op)
            .with("prefix", entry.prefix)
            .with("counter", entry.counter)
            .with("dst_mode", entry.dst_mode)
            .with("src_mode", entry.src_mode)
            .with("access_size", entry.size.to_string())
            .with("compare", entry.compare.to_string());
        let StringAccessor {
            op, prefix, size, ..
        } = entry;
        blocks.push(RoutineBlock {
            check_name: format!("asan_check{prefix}{size}_byte_{op}_access"),
            redirect_name: format!("asan_redirect{prefix}{size}_byte_{op}_access"),
            definition: fmt.render(templates::CHECK_STRINGS, &values)?,
            declaration: fmt.render(templates::STRING_REDIRECT_FUNCTION_DECL, &values)?,
            redirector: fmt.render(templates::STRING_REDIRECT_FUNCTION, &values)?,
        });
    }
    Ok(blocks)
}
