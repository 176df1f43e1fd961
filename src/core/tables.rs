// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Parameter tables driving the combinatorial generation.

use crate::core::error::{GenError, GenErrorKind};

/// Shadow-memory base symbol referenced by the fast path.
pub const SHADOW_SYMBOL: &str = "Shadow::shadow_";

/// Access widths (bytes) for the scalar accessors, in emission order.
pub static ACCESS_SIZES: &[u32] = &[1, 2, 4, 8, 10, 16, 32];

/// Name suffixes for the scalar accessor variants, in emission order. The
/// empty suffix is the flag-preserving variant.
pub static SUFFIXES: &[&str] = &["", "_no_flags"];

/// An access direction with its symbol-name fragment and the runtime tag
/// pushed on the error path.
pub struct AccessMode {
    pub name: &'static str,
    pub tag: &'static str,
}

/// Access directions in emission order, reads before writes.
pub static ACCESS_MODES: &[AccessMode] = &[
    AccessMode {
        name: "read_access",
        tag: "AsanReadAccess",
    },
    AccessMode {
        name: "write_access",
        tag: "AsanWriteAccess",
    },
];

/// One string-instruction accessor variant.
///
/// The list is hand-authored rather than generated: not every operation
/// supports every prefix/mode combination, so the cross product would be
/// wrong.
pub struct StringAccessor {
    /// Instruction mnemonic.
    pub op: &'static str,
    /// Name fragment for the repetition prefix, `"_repz_"` or `"_"`.
    pub prefix: &'static str,
    /// Iteration count pushed for the runtime check, a register or constant.
    pub counter: &'static str,
    /// Access-mode tag for the destination pointer (EDI).
    pub dst_mode: &'static str,
    /// Access-mode tag for the source pointer (ESI).
    pub src_mode: &'static str,
    /// Element size of the access in bytes.
    pub size: u32,
    /// Non-zero to let the runtime shortcut when memory contents differ.
    pub compare: u32,
}

pub static STRING_ACCESSORS: &[StringAccessor] = &[
    StringAccessor {
        op: "cmps",
        prefix: "_repz_",
        counter: "ecx",
        dst_mode: "AsanReadAccess",
        src_mode: "AsanReadAccess",
        size: 4,
        compare: 1,
    },
    StringAccessor {
        op: "cmps",
        prefix: "_repz_",
        counter: "ecx",
        dst_mode: "AsanReadAccess",
        src_mode: "AsanReadAccess",
        size: 2,
        compare: 1,
    },
    StringAccessor {
        op: "cmps",
        prefix: "_repz_",
        counter: "ecx",
        dst_mode: "AsanReadAccess",
        src_mode: "AsanReadAccess",
        size: 1,
        compare: 1,
    },
    StringAccessor {
        op: "cmps",
        prefix: "_",
        counter: "1",
        dst_mode: "AsanReadAccess",
        src_mode: "AsanReadAccess",
        size: 4,
        compare: 1,
    },
    StringAccessor {
        op: "cmps",
        prefix: "_",
        counter: "1",
        dst_mode: "AsanReadAccess",
        src_mode: "AsanReadAccess",
        size: 2,
        compare: 1,
    },
    StringAccessor {
        op: "cmps",
        prefix: "_",
        counter: "1",
        dst_mode: "AsanReadAccess",
        src_mode: "AsanReadAccess",
        size: 1,
        compare: 1,
    },
    StringAccessor {
        op: "movs",
        prefix: "_repz_",
        counter: "ecx",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanReadAccess",
        size: 4,
        compare: 0,
    },
    StringAccessor {
        op: "movs",
        prefix: "_repz_",
        counter: "ecx",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanReadAccess",
        size: 2,
        compare: 0,
    },
    StringAccessor {
        op: "movs",
        prefix: "_repz_",
        counter: "ecx",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanReadAccess",
        size: 1,
        compare: 0,
    },
    StringAccessor {
        op: "movs",
        prefix: "_",
        counter: "1",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanReadAccess",
        size: 4,
        compare: 0,
    },
    StringAccessor {
        op: "movs",
        prefix: "_",
        counter: "1",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanReadAccess",
        size: 2,
        compare: 0,
    },
    StringAccessor {
        op: "movs",
        prefix: "_",
        counter: "1",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanReadAccess",
        size: 1,
        compare: 0,
    },
    StringAccessor {
        op: "stos",
        prefix: "_repz_",
        counter: "ecx",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanUnknownAccess",
        size: 4,
        compare: 0,
    },
    StringAccessor {
        op: "stos",
        prefix: "_repz_",
        counter: "ecx",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanUnknownAccess",
        size: 2,
        compare: 0,
    },
    StringAccessor {
        op: "stos",
        prefix: "_repz_",
        counter: "ecx",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanUnknownAccess",
        size: 1,
        compare: 0,
    },
    StringAccessor {
        op: "stos",
        prefix: "_",
        counter: "1",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanUnknownAccess",
        size: 4,
        compare: 0,
    },
    StringAccessor {
        op: "stos",
        prefix: "_",
        counter: "1",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanUnknownAccess",
        size: 2,
        compare: 0,
    },
    StringAccessor {
        op: "stos",
        prefix: "_",
        counter: "1",
        dst_mode: "AsanWriteAccess",
        src_mode: "AsanUnknownAccess",
        size: 1,
        compare: 0,
    },
];

/// Reject malformed table entries before any rendering starts.
pub fn validate_tables(strings: &[StringAccessor]) -> Result<(), GenError> {
    for (index, entry) in strings.iter().enumerate() {
        let at = |msg: &str| {
            GenError::new(
                GenErrorKind::Table,
                msg,
                Some(&format!("string accessor #{index}")),
            )
        };
        if entry.op.is_empty() || !entry.op.chars().all(|c| c.is_ascii_lowercase()) {
            return Err(at("Invalid operation mnemonic"));
        }
        if entry.prefix != "_" && entry.prefix != "_repz_" {
            return Err(at("Invalid repetition prefix"));
        }
        if entry.counter.is_empty() {
            return Err(at("Missing counter source"));
        }
        if !matches!(entry.size, 1 | 2 | 4) {
            return Err(at("Invalid element size"));
        }
        if entry.compare > 1 {
            return Err(at("Invalid compare flag"));
        }
        for mode in [entry.dst_mode, entry.src_mode] {
            if !mode.starts_with("Asan") || !mode.ends_with("Access") {
                return Err(at("Invalid access-mode tag"));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_tables_validate() {
        assert!(validate_tables(STRING_ACCESSORS).is_ok());
    }

    #[test]
    fn scalar_tables_are_in_emission_order() {
        assert_eq!(ACCESS_SIZES, &[1, 2, 4, 8, 10, 16, 32][..]);
        assert_eq!(ACCESS_MODES[0].name, "read_access");
        assert_eq!(ACCESS_MODES[1].name, "write_access");
        assert_eq!(SUFFIXES, &["", "_no_flags"][..]);
    }

    #[test]
    fn string_table_shape() {
        assert_eq!(STRING_ACCESSORS.len(), 18);
        // Six variants per mnemonic, rep-prefixed before single-shot.
        for op in ["cmps", "movs", "stos"] {
            assert_eq!(STRING_ACCESSORS.iter().filter(|e| e.op == op).count(), 6);
        }
        assert!(STRING_ACCESSORS
            .iter()
            .all(|e| (e.prefix == "_repz_") == (e.counter == "ecx")));
    }

    #[test]
    fn malformed_entry_is_rejected() {
        let bad = [StringAccessor {
            op: "cmps",
            prefix: "_rep_",
            counter: "ecx",
            dst_mode: "AsanReadAccess",
            src_mode: "AsanReadAccess",
            size: 4,
            compare: 1,
        }];
        let err = validate_tables(&bad).unwrap_err();
        assert_eq!(err.kind(), GenErrorKind::Table);
        assert!(err.message().contains("#0"));
    }

    #[test]
    fn bad_element_size_is_rejected() {
        let bad = [StringAccessor {
            op: "movs",
            prefix: "_",
            counter: "1",
            dst_mode: "AsanWriteAccess",
            src_mode: "AsanReadAccess",
            size: 8,
            compare: 0,
        }];
        assert!(validate_tables(&bad).is_err());
    }
}
