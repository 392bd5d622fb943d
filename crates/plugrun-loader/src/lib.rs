// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Unit loader: turns a named WebAssembly file into a [`LoadedDefinition`].
//!
//! Loading is two separate steps. A [`UnitSource`] produces the raw bytes of
//! a unit, and [`materialize`] compiles those bytes on a wasmtime [`Engine`]
//! and records the unit's exports in a [`CapabilityTable`]. The
//! [`UnitLoader`] strings the two together and keeps a by-name registration
//! of everything it has loaded.
//!
//! [`Engine`]: wasmtime::Engine

pub mod capability;
pub mod definition;
pub mod loader;
pub mod source;

use std::path::Path;

use plugrun_core::LoadError;

pub use capability::{CapabilityTable, FunctionSignature, MemberKind, ResolveError};
pub use definition::{LoadedDefinition, materialize};
pub use loader::{EngineOptions, UnitLoader, build_engine};
pub use plugrun_core::UnitSource;
pub use source::{FsUnitSource, MemoryUnitSource};

/// Loads `<directory>/<name>.wasm` on a default engine.
///
/// One-shot convenience over [`UnitLoader`]; nothing is retried.
pub fn load(directory: impl AsRef<Path>, name: &str) -> Result<LoadedDefinition, LoadError> {
    UnitLoader::new(FsUnitSource::new(directory.as_ref())).load(name)
}
