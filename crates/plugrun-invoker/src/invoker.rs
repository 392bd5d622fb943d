// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Construct, resolve, invoke.

use plugrun_core::InvocationError;
use plugrun_loader::capability::CONSTRUCTOR_EXPORT;
use plugrun_loader::{FunctionSignature, LoadedDefinition, MemberKind};
use tracing::{debug, info};
use wasmtime::{Func, Instance, Linker, Store, Val};
use wasmtime_wasi::WasiCtxBuilder;

use crate::console::Console;
use crate::host::{self, UnitState};

/// Runs entry operations of loaded units.
#[derive(Debug, Clone, Default)]
pub struct Invoker {
    console: Console,
}

impl Invoker {
    pub fn new(console: Console) -> Self {
        Self { console }
    }

    /// Constructs an instance of `definition` and calls `entry` on it once.
    pub fn run(&self, definition: &LoadedDefinition, entry: &str) -> Result<(), InvocationError> {
        let mut instance = self.construct(definition)?;
        let entry_point = instance.resolve(entry)?;
        let results = instance.invoke(&entry_point)?;
        debug!(unit = %definition.name(), entry = %entry, ?results, "entry operation returned");
        Ok(())
    }

    /// Step A: builds a fresh instance of `definition`.
    ///
    /// Instantiation links WASI preview 1 and the `plugrun` host module and
    /// runs the module's `start` function. A unit exporting `_initialize`
    /// has it called afterwards; it must take and return nothing.
    pub fn construct<'d>(
        &self,
        definition: &'d LoadedDefinition,
    ) -> Result<UnitInstance<'d>, InvocationError> {
        let unit = definition.name();
        let engine = definition.module().engine();

        let mut linker: Linker<UnitState> = Linker::new(engine);
        wasmtime_wasi::p1::add_to_linker_sync(&mut linker, |state| &mut state.wasi)
            .map_err(|e| construction(unit, "failed to link WASI imports", Some(e)))?;
        host::define_host_functions(&mut linker)
            .map_err(|e| construction(unit, "failed to define host functions", Some(e)))?;

        let mut wasi = WasiCtxBuilder::new();
        if self.console.inherits_stdio() {
            wasi.inherit_stdio();
        }
        let state = UnitState::new(unit, self.console.clone(), wasi.build_p1());
        let mut store = Store::new(engine, state);

        let instance = linker
            .instantiate(&mut store, definition.module())
            .map_err(|e| construction(unit, "instantiation failed", Some(e)))?;

        if let Some(kind) = definition.capabilities().constructor() {
            match kind {
                MemberKind::Function(sig) if sig.params.is_empty() && sig.results.is_empty() => {
                    let init = instance
                        .get_typed_func::<(), ()>(&mut store, CONSTRUCTOR_EXPORT)
                        .map_err(|e| construction(unit, "`_initialize` is not callable", Some(e)))?;
                    init.call(&mut store, ())
                        .map_err(|e| construction(unit, "`_initialize` failed", Some(e)))?;
                    debug!(unit = %unit, "ran `_initialize`");
                }
                MemberKind::Function(sig) => {
                    return Err(construction(
                        unit,
                        &format!("`_initialize` must have signature () -> (), found {sig}"),
                        None,
                    ));
                }
                _ => {
                    return Err(construction(unit, "`_initialize` is not a function", None));
                }
            }
        }

        info!(unit = %unit, "constructed unit instance");
        Ok(UnitInstance {
            definition,
            store,
            instance,
        })
    }
}

fn construction(unit: &str, reason: &str, source: Option<wasmtime::Error>) -> InvocationError {
    InvocationError::Construction {
        unit: unit.to_string(),
        reason: reason.to_string(),
        source: source.map(Into::into),
    }
}

/// A resolved entry operation: its signature and the live function handle.
#[derive(Debug, Clone)]
pub struct EntryPoint {
    name: String,
    signature: FunctionSignature,
    func: Func,
}

impl EntryPoint {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn signature(&self) -> &FunctionSignature {
        &self.signature
    }
}

/// One constructed instance of a loaded definition.
pub struct UnitInstance<'d> {
    definition: &'d LoadedDefinition,
    store: Store<UnitState>,
    instance: Instance,
}

impl std::fmt::Debug for UnitInstance<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UnitInstance")
            .field("unit", &self.definition.name())
            .finish_non_exhaustive()
    }
}

impl UnitInstance<'_> {
    /// Step B: looks `entry` up in the capability table.
    pub fn resolve(&mut self, entry: &str) -> Result<EntryPoint, InvocationError> {
        let unit = self.definition.name();
        let not_found = |reason: String| InvocationError::EntryNotFound {
            unit: unit.to_string(),
            entry: entry.to_string(),
            reason,
        };

        let signature = self
            .definition
            .capabilities()
            .resolve(entry)
            .map_err(|e| not_found(e.to_string()))?
            .clone();
        let func = self
            .instance
            .get_func(&mut self.store, entry)
            .ok_or_else(|| not_found(format!("export `{entry}` is missing from the instance")))?;

        debug!(unit = %unit, entry = %entry, %signature, "resolved entry operation");
        Ok(EntryPoint {
            name: entry.to_string(),
            signature,
            func,
        })
    }

    /// Step C: calls `entry` once with no arguments and returns its results.
    pub fn invoke(&mut self, entry: &EntryPoint) -> Result<Vec<Val>, InvocationError> {
        let unit = self.definition.name();
        let mut results = vec![Val::I32(0); entry.signature.results.len()];

        info!(unit = %unit, entry = %entry.name, "invoking entry operation");
        entry
            .func
            .call(&mut self.store, &[], &mut results)
            .map_err(|e| InvocationError::Failure {
                unit: unit.to_string(),
                entry: entry.name.clone(),
                source: e.into(),
            })?;
        Ok(results)
    }

    pub fn definition(&self) -> &LoadedDefinition {
        self.definition
    }
}
