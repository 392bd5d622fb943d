// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Code unit descriptors and pipeline stages.

use std::path::{Component, Path, PathBuf};

use strum::{Display, EnumString};
use tracing::warn;

/// File extension of a compiled code unit.
pub const UNIT_EXTENSION: &str = "wasm";

/// Identifies a code unit by name inside a directory.
///
/// The name is joined onto the directory as-is. Names containing path
/// separators or `..` are not rejected; they resolve outside the directory.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UnitDescriptor {
    directory: PathBuf,
    name: String,
}

impl UnitDescriptor {
    /// Creates a descriptor for `name` under `directory`.
    pub fn new(directory: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        let descriptor = Self {
            directory: directory.into(),
            name: name.into(),
        };
        if descriptor.escapes_directory() {
            warn!(
                unit = %descriptor.name,
                directory = %descriptor.directory.display(),
                "unit name contains path components; it is used unsanitized"
            );
        }
        descriptor
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Resolves the unit file: `<directory>/<name>.wasm`.
    pub fn path(&self) -> PathBuf {
        self.directory
            .join(format!("{}.{UNIT_EXTENSION}", self.name))
    }

    /// True if the name would reach outside of the directory when joined.
    pub fn escapes_directory(&self) -> bool {
        let name = Path::new(&self.name);
        name.is_absolute()
            || name
                .components()
                .any(|c| matches!(c, Component::ParentDir | Component::RootDir))
            || self.name.contains('/')
            || self.name.contains(std::path::MAIN_SEPARATOR)
    }
}

/// A step of the load-then-invoke pipeline, used to tag diagnostics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum Stage {
    Load,
    Construct,
    Resolve,
    Invoke,
}
