// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Generation core: template formatter, macro registry, and parameter tables.

pub mod error;
pub mod formatter;
pub mod tables;
pub mod templates;

pub use error::{GenError, GenErrorKind};
pub use formatter::{MacroRegistry, TemplateFormatter, TemplateValues};
