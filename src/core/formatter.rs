// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Template formatter with macro-aware placeholder resolution.
//!
//! Placeholders use `{name}` syntax with doubled braces as escapes. A name is
//! resolved against the macro registry first and the supplied values second;
//! a macro body is re-rendered with the same value set before substitution.

use std::collections::HashMap;

use crate::core::error::{GenError, GenErrorKind};

// Indentation pad used by nested macro bodies. A literal segment ending in
// newline + pad directly before a placeholder has the pad trimmed, so a
// multi-line macro body spliced into an indented slot does not leave a
// whitespace-only line behind.
const SEAM_PAD: &str = "    ";

// Macro bodies only ever reference plain value placeholders, so any deeper
// nesting indicates a self-referential registry entry.
const MAX_EXPANSION_DEPTH: usize = 8;

/// Named macro fragments available to every render call.
#[derive(Debug, Clone, Default)]
pub struct MacroRegistry {
    macros: HashMap<&'static str, &'static str>,
}

impl MacroRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: &'static str, body: &'static str) {
        self.macros.insert(name, body);
    }

    pub fn get(&self, name: &str) -> Option<&'static str> {
        self.macros.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.macros.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.macros.len()
    }

    pub fn is_empty(&self) -> bool {
        self.macros.is_empty()
    }
}

/// Named values supplied for one render call.
#[derive(Debug, Clone, Default)]
pub struct TemplateValues {
    values: HashMap<&'static str, String>,
}

impl TemplateValues {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &'static str, value: impl Into<String>) -> Self {
        self.values.insert(key, value.into());
        self
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

/// Stateless rendering engine over a macro registry.
pub struct TemplateFormatter<'a> {
    macros: &'a MacroRegistry,
}

impl<'a> TemplateFormatter<'a> {
    pub fn new(macros: &'a MacroRegistry) -> Self {
        Self { macros }
    }

    /// Render `template`, substituting every `{name}` placeholder.
    pub fn render(&self, template: &str, values: &TemplateValues) -> Result<String, GenError> {
        self.render_at_depth(template, values, 0)
    }

    fn render_at_depth(
        &self,
        template: &str,
        values: &TemplateValues,
        depth: usize,
    ) -> Result<String, GenError> {
        if depth > MAX_EXPANSION_DEPTH {
            return Err(GenError::new(
                GenErrorKind::Format,
                "Macro expansion exceeded maximum depth",
                None,
            ));
        }
        let mut out = String::with_capacity(template.len());
        // Braces are single ASCII bytes, so the scan walks bytes and copies
        // literal text as whole spans; UTF-8 continuation bytes never match
        // a brace and slice boundaries always land on brace positions.
        let bytes = template.as_bytes();
        let mut i = 0usize;
        // Start of the pending literal span.
        let mut span_start = 0usize;
        // Bytes of literal text emitted since the last substitution. The
        // seam trim must only inspect literal text, never substituted text.
        let mut literal_len = 0usize;
        while i < bytes.len() {
            match bytes[i] {
                b'{' if bytes.get(i + 1) == Some(&b'{') => {
                    out.push_str(&template[span_start..i]);
                    out.push('{');
                    literal_len += i - span_start + 1;
                    i += 2;
                    span_start = i;
                }
                b'}' if bytes.get(i + 1) == Some(&b'}') => {
                    out.push_str(&template[span_start..i]);
                    out.push('}');
                    literal_len += i - span_start + 1;
                    i += 2;
                    span_start = i;
                }
                b'}' => {
                    return Err(GenError::new(
                        GenErrorKind::Format,
                        "Single '}' encountered in template",
                        None,
                    ));
                }
                b'{' => {
                    out.push_str(&template[span_start..i]);
                    literal_len += i - span_start;
                    let (name, next) = take_placeholder(template, i)?;
                    trim_seam(&mut out, literal_len);
                    let replacement = self.resolve(name, values, depth)?;
                    out.push_str(&replacement);
                    literal_len = 0;
                    i = next;
                    span_start = i;
                }
                _ => {
                    i += 1;
                }
            }
        }
        out.push_str(&template[span_start..]);
        Ok(out)
    }

    // Two-tier resolution: macro registry first, supplied values second.
    fn resolve(
        &self,
        name: &str,
        values: &TemplateValues,
        depth: usize,
    ) -> Result<String, GenError> {
        if let Some(body) = self.macros.get(name) {
            return self.render_at_depth(body, values, depth + 1);
        }
        match values.get(name) {
            Some(value) => Ok(value.to_string()),
            None => Err(GenError::new(
                GenErrorKind::Format,
                "Unresolved placeholder",
                Some(name),
            )),
        }
    }
}

fn take_placeholder(template: &str, start: usize) -> Result<(&str, usize), GenError> {
    let bytes = template.as_bytes();
    let mut end = start + 1;
    while end < bytes.len() && bytes[end] != b'}' {
        if bytes[end] == b'{' {
            return Err(GenError::new(
                GenErrorKind::Format,
                "Nested '{' in placeholder",
                None,
            ));
        }
        end += 1;
    }
    if end >= bytes.len() {
        return Err(GenError::new(
            GenErrorKind::Format,
            "Single '{' encountered in template",
            None,
        ));
    }
    let name = &template[start + 1..end];
    if name.is_empty() {
        return Err(GenError::new(
            GenErrorKind::Format,
            "Empty placeholder in template",
            None,
        ));
    }
    Ok((name, end + 1))
}

// Drop a trailing newline + pad from the pending literal run so a spliced
// macro body supplies its own indentation.
fn trim_seam(out: &mut String, literal_len: usize) {
    const SEAM: &str = "\n    ";
    debug_assert_eq!(&SEAM[1..], SEAM_PAD);
    if literal_len >= SEAM.len() && out.ends_with(SEAM) {
        out.truncate(out.len() - SEAM_PAD.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn registry(entries: &[(&'static str, &'static str)]) -> MacroRegistry {
        let mut macros = MacroRegistry::new();
        for (name, body) in entries.iter().copied() {
            macros.insert(name, body);
        }
        macros
    }

    #[test]
    fn plain_substitution() {
        let macros = MacroRegistry::new();
        let fmt = TemplateFormatter::new(&macros);
        let values = TemplateValues::new().with("size", "4").with("mode", "read");
        let out = fmt.render("check_{size}_{mode}", &values).unwrap();
        assert_eq!(out, "check_4_read");
    }

    #[test]
    fn macro_expansion_uses_same_values() {
        let macros = registry(&[("Foo", "X{bar}Y")]);
        let fmt = TemplateFormatter::new(&macros);
        let values = TemplateValues::new().with("bar", "Z");
        let out = fmt.render("A{Foo}B", &values).unwrap();
        assert_eq!(out, "AXZYB");
    }

    #[test]
    fn no_macro_passthrough_is_single_pass() {
        let macros = registry(&[("Foo", "X{bar}Y")]);
        let fmt = TemplateFormatter::new(&macros);
        // A substituted value containing placeholder syntax must not be
        // re-scanned.
        let values = TemplateValues::new().with("bar", "{Foo}");
        let out = fmt.render("A{bar}B", &values).unwrap();
        assert_eq!(out, "A{Foo}B");
    }

    #[test]
    fn escaped_braces() {
        let macros = MacroRegistry::new();
        let fmt = TemplateFormatter::new(&macros);
        let values = TemplateValues::new().with("x", "1");
        let out = fmt.render("void f() {{\n  ret {x};\n}}", &values).unwrap();
        assert_eq!(out, "void f() {\n  ret 1;\n}");
    }

    #[test]
    fn non_ascii_literals_pass_through() {
        let macros = registry(&[("Note", "größe geprüft")]);
        let fmt = TemplateFormatter::new(&macros);
        let values = TemplateValues::new().with("x", "1");
        let out = fmt.render("// café {x}", &values).unwrap();
        assert_eq!(out, "// café 1");
        let out = fmt.render("{{é}} {Note} €", &values).unwrap();
        assert_eq!(out, "{é} größe geprüft €");
    }

    #[test]
    fn seam_pad_is_trimmed_before_placeholder() {
        let macros = registry(&[("Body", "    line1\n    line2")]);
        let fmt = TemplateFormatter::new(&macros);
        let values = TemplateValues::new();
        let out = fmt.render("head\n    {Body}\ntail", &values).unwrap();
        assert_eq!(out, "head\n    line1\n    line2\ntail");
    }

    #[test]
    fn seam_trim_ignores_substituted_text() {
        let macros = MacroRegistry::new();
        let fmt = TemplateFormatter::new(&macros);
        // The first substitution ends with newline + pad; the seam rule only
        // applies to literal template text, so it must survive.
        let values = TemplateValues::new().with("a", "x\n    ").with("b", "y");
        let out = fmt.render("{a}{b}", &values).unwrap();
        assert_eq!(out, "x\n    y");
    }

    #[test]
    fn deeper_indentation_is_not_a_seam() {
        let macros = MacroRegistry::new();
        let fmt = TemplateFormatter::new(&macros);
        let values = TemplateValues::new().with("x", "v");
        let out = fmt.render("a\n        {x}", &values).unwrap();
        assert_eq!(out, "a\n        v");
    }

    #[test]
    fn unresolved_placeholder_is_fatal() {
        let macros = registry(&[("Foo", "X")]);
        let fmt = TemplateFormatter::new(&macros);
        let err = fmt
            .render("A{missing}B", &TemplateValues::new())
            .unwrap_err();
        assert_eq!(err.kind(), GenErrorKind::Format);
        assert!(err.message().contains("missing"));
    }

    #[test]
    fn macro_referencing_unknown_value_is_fatal() {
        let macros = registry(&[("Foo", "X{absent}Y")]);
        let fmt = TemplateFormatter::new(&macros);
        let err = fmt.render("A{Foo}B", &TemplateValues::new()).unwrap_err();
        assert_eq!(err.kind(), GenErrorKind::Format);
    }

    #[test]
    fn self_referential_macro_is_fatal() {
        let macros = registry(&[("Loop", "{Loop}")]);
        let fmt = TemplateFormatter::new(&macros);
        let err = fmt.render("{Loop}", &TemplateValues::new()).unwrap_err();
        assert_eq!(err.kind(), GenErrorKind::Format);
        assert!(err.message().contains("depth"));
    }

    #[test]
    fn unbalanced_braces_are_fatal() {
        let macros = MacroRegistry::new();
        let fmt = TemplateFormatter::new(&macros);
        assert!(fmt.render("a{b", &TemplateValues::new()).is_err());
        assert!(fmt.render("a}b", &TemplateValues::new()).is_err());
        assert!(fmt.render("a{}b", &TemplateValues::new()).is_err());
    }

    proptest! {
        #[test]
        fn brace_free_text_renders_unchanged(text in "[a-zA-Z0-9 _.;\\néüß€語]{0,64}") {
            let macros = MacroRegistry::new();
            let fmt = TemplateFormatter::new(&macros);
            prop_assert_eq!(fmt.render(&text, &TemplateValues::new()).unwrap(), text);
        }

        #[test]
        fn value_substitution_round_trip(value in "[a-zA-Z0-9_]{0,16}") {
            let macros = MacroRegistry::new();
            let fmt = TemplateFormatter::new(&macros);
            let values = TemplateValues::new().with("v", value.clone());
            let out = fmt.render("<{v}>", &values).unwrap();
            prop_assert_eq!(out, format!("<{value}>"));
        }

        #[test]
        fn render_is_deterministic(value in "[a-z0-9]{0,12}") {
            let macros = MacroRegistry::new();
            let fmt = TemplateFormatter::new(&macros);
            let values = TemplateValues::new().with("v", value);
            let first = fmt.render("a {v} b", &values).unwrap();
            let second = fmt.render("a {v} b", &values).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
