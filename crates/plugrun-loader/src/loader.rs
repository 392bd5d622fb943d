// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The unit loader: one engine, one byte source, a by-name registration.

use std::collections::HashMap;

use plugrun_core::{LoadError, PlugrunError, UnitSource};
use tracing::{debug, info};
use wasmtime::{Config, Engine, Module, WasmBacktraceDetails};

use crate::definition::{LoadedDefinition, materialize};

/// Engine settings derived from the runtime configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineOptions {
    /// Attach DWARF file and line details to trap backtraces.
    pub backtrace_details: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            backtrace_details: true,
        }
    }
}

/// Creates the wasmtime engine units are compiled on.
pub fn build_engine(options: &EngineOptions) -> Result<Engine, PlugrunError> {
    let mut config = Config::new();
    config.wasm_backtrace_details(if options.backtrace_details {
        WasmBacktraceDetails::Enable
    } else {
        WasmBacktraceDetails::Disable
    });

    let engine = Engine::new(&config)
        .map_err(|e| PlugrunError::Internal(format!("failed to create wasmtime engine: {e}")))?;
    debug!(?options, "wasmtime engine initialized");
    Ok(engine)
}

/// Loads units from a [`UnitSource`] onto a shared engine.
///
/// Every successful load registers the compiled module under the unit's
/// name, replacing an earlier registration of the same name. Each call to
/// [`UnitLoader::load`] still returns its own definition.
pub struct UnitLoader<S = crate::source::FsUnitSource> {
    engine: Engine,
    source: S,
    registered: HashMap<String, Module>,
}

impl<S: UnitSource> UnitLoader<S> {
    /// Creates a loader on a default engine.
    pub fn new(source: S) -> Self {
        Self::with_engine(Engine::default(), source)
    }

    pub fn with_engine(engine: Engine, source: S) -> Self {
        Self {
            engine,
            source,
            registered: HashMap::new(),
        }
    }

    /// Reads and materializes the unit called `name`.
    ///
    /// Fails fast: a read failure is [`LoadError::Io`], bytes that do not
    /// compile are [`LoadError::Malformed`]. Nothing is registered on failure.
    pub fn load(&mut self, name: &str) -> Result<LoadedDefinition, LoadError> {
        let descriptor = self.source.descriptor(name);
        let bytes = self.source.read_bytes(&descriptor)?;
        let definition = materialize(&self.engine, descriptor, &bytes)?;
        drop(bytes);

        if self
            .registered
            .insert(name.to_string(), definition.module().clone())
            .is_some()
        {
            debug!(unit = %name, "replaced earlier registration");
        }
        info!(
            unit = %name,
            path = %definition.descriptor().path().display(),
            "loaded unit"
        );
        Ok(definition)
    }

    /// True if a unit called `name` has been loaded by this loader.
    pub fn is_registered(&self, name: &str) -> bool {
        self.registered.contains_key(name)
    }

    pub fn engine(&self) -> &Engine {
        &self.engine
    }

    pub fn source(&self) -> &S {
        &self.source
    }
}
