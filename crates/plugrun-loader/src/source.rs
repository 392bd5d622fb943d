// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Byte sources for code units.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use plugrun_core::{LoadError, UnitDescriptor, UnitSource};
use tracing::debug;

/// Reads units from `<directory>/<name>.wasm`.
#[derive(Debug, Clone)]
pub struct FsUnitSource {
    directory: PathBuf,
}

impl FsUnitSource {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }
}

impl UnitSource for FsUnitSource {
    fn descriptor(&self, name: &str) -> UnitDescriptor {
        UnitDescriptor::new(&self.directory, name)
    }

    fn read_bytes(&self, descriptor: &UnitDescriptor) -> Result<Vec<u8>, LoadError> {
        let path = descriptor.path();
        let bytes = std::fs::read(&path).map_err(|source| LoadError::Io {
            unit: descriptor.name().to_string(),
            path: path.clone(),
            source,
        })?;
        debug!(
            unit = %descriptor.name(),
            path = %path.display(),
            len = bytes.len(),
            "read unit bytes"
        );
        Ok(bytes)
    }
}

/// Serves unit images held in memory, keyed by unit name.
#[derive(Debug, Clone, Default)]
pub struct MemoryUnitSource {
    units: HashMap<String, Vec<u8>>,
}

impl MemoryUnitSource {
    /// Directory reported in descriptors for in-memory units.
    pub const DIRECTORY: &'static str = "<memory>";

    pub fn new() -> Self {
        Self::default()
    }

    /// Adds or replaces the image for `name`.
    pub fn insert(&mut self, name: impl Into<String>, bytes: Vec<u8>) -> &mut Self {
        self.units.insert(name.into(), bytes);
        self
    }
}

impl UnitSource for MemoryUnitSource {
    fn descriptor(&self, name: &str) -> UnitDescriptor {
        UnitDescriptor::new(Self::DIRECTORY, name)
    }

    fn read_bytes(&self, descriptor: &UnitDescriptor) -> Result<Vec<u8>, LoadError> {
        let name = descriptor.name();
        self.units
            .get(name)
            .cloned()
            .ok_or_else(|| LoadError::Io {
                unit: name.to_string(),
                path: descriptor.path(),
                source: std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("no in-memory unit named `{name}`"),
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_source_reads_whole_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("Blob.wasm"), [1u8, 2, 3, 4]).unwrap();

        let source = FsUnitSource::new(dir.path());
        assert_eq!(source.directory(), dir.path());
        let blob = source.descriptor("Blob");
        assert_eq!(blob.path(), dir.path().join("Blob.wasm"));
        assert_eq!(source.read_bytes(&blob).unwrap(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn fs_source_missing_file_is_io_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FsUnitSource::new(dir.path());

        match source.read_bytes(&source.descriptor("Missing")) {
            Err(LoadError::Io { unit, path, source }) => {
                assert_eq!(unit, "Missing");
                assert_eq!(path, dir.path().join("Missing.wasm"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected Io error, got {other:?}"),
        }
    }

    #[test]
    fn fs_source_directory_in_place_of_file_is_io() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir(dir.path().join("Folder.wasm")).unwrap();

        let source = FsUnitSource::new(dir.path());
        assert!(matches!(
            source.read_bytes(&source.descriptor("Folder")),
            Err(LoadError::Io { .. })
        ));
    }

    #[test]
    fn memory_source_serves_inserted_units() {
        let mut source = MemoryUnitSource::new();
        source.insert("A", vec![0, 97, 115, 109]);

        assert_eq!(
            source.read_bytes(&source.descriptor("A")).unwrap(),
            vec![0, 97, 115, 109]
        );
        let err = source.read_bytes(&source.descriptor("B")).unwrap_err();
        assert_eq!(err.unit(), "B");
        assert!(err.to_string().contains("<memory>"));
    }
}
