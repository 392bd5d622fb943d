// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Temporary unit directories.

use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// A temporary directory of compiled units, removed on drop.
pub struct UnitDir {
    dir: TempDir,
}

impl UnitDir {
    /// Creates an empty unit directory.
    ///
    /// Panics if the temporary directory cannot be created.
    pub fn new() -> Self {
        Self {
            dir: tempfile::tempdir().expect("failed to create temp unit dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Compiles `wat` to binary and writes it as `<name>.wasm`.
    pub fn add_wat(&self, name: &str, wat: &str) -> PathBuf {
        let bytes = wat::parse_str(wat)
            .unwrap_or_else(|e| panic!("fixture `{name}` is not valid WAT: {e}"));
        self.add_bytes(name, &bytes)
    }

    /// Writes raw bytes as `<name>.wasm`.
    pub fn add_bytes(&self, name: &str, bytes: &[u8]) -> PathBuf {
        let path = self.dir.path().join(format!("{name}.wasm"));
        std::fs::write(&path, bytes)
            .unwrap_or_else(|e| panic!("failed to write {}: {e}", path.display()));
        path
    }
}

impl Default for UnitDir {
    fn default() -> Self {
        Self::new()
    }
}
