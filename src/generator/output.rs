// SPDX-License-Identifier: GPL-3.0-or-later
// Copyright (C) 2026 Erik van der Tier

//! Artifact file writing and freshness checking.

use std::fs;
use std::path::Path;

use crate::core::error::{GenError, GenErrorKind};

/// Write `contents` to `path` through a temporary file in the destination
/// directory, so an aborted run never leaves a truncated artifact behind.
/// Line endings are whatever the rendered text contains (always `\n`).
pub fn write_artifact(path: &Path, contents: &str) -> Result<(), GenError> {
    let io_err = |err: std::io::Error| {
        GenError::new(
            GenErrorKind::Io,
            &format!("Error writing artifact: {err}"),
            Some(path.to_string_lossy().as_ref()),
        )
    };
    let file_name = path
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| {
            GenError::new(
                GenErrorKind::Io,
                "Invalid artifact path",
                Some(path.to_string_lossy().as_ref()),
            )
        })?;
    let tmp_path = path.with_file_name(format!(".{file_name}.tmp"));
    fs::write(&tmp_path, contents).map_err(io_err)?;
    if let Err(err) = fs::rename(&tmp_path, path) {
        let _ = fs::remove_file(&tmp_path);
        return Err(io_err(err));
    }
    Ok(())
}

/// Compare the artifact on disk against freshly rendered contents. A missing
/// file is simply stale, not an error.
pub fn artifact_up_to_date(path: &Path, contents: &str) -> Result<bool, GenError> {
    match fs::read_to_string(path) {
        Ok(existing) => Ok(existing == contents),
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(GenError::new(
            GenErrorKind::Io,
            &format!("Error reading artifact: {err}"),
            Some(path.to_string_lossy().as_ref()),
        )),
    }
}
