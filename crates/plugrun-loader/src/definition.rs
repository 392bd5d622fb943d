// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Materialization of unit bytes into a loaded definition.

use plugrun_core::{LoadError, UnitDescriptor};
use tracing::info;
use wasmtime::{Engine, Module};

use crate::capability::CapabilityTable;

/// A compiled code unit, ready to be instantiated.
///
/// Only [`materialize`] builds one, and only from bytes that validated as a
/// complete WebAssembly binary.
#[derive(Debug)]
pub struct LoadedDefinition {
    descriptor: UnitDescriptor,
    module: Module,
    capabilities: CapabilityTable,
}

impl LoadedDefinition {
    pub fn descriptor(&self) -> &UnitDescriptor {
        &self.descriptor
    }

    /// Unit name this definition was loaded under.
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }

    /// The compiled module. Instances are created on [`Module::engine`].
    pub fn module(&self) -> &Module {
        &self.module
    }

    pub fn capabilities(&self) -> &CapabilityTable {
        &self.capabilities
    }
}

/// Compiles `bytes` on `engine` and records the unit's exports.
///
/// Only the binary format is accepted; WAT text fails as malformed even
/// though wasmtime could parse it.
pub fn materialize(
    engine: &Engine,
    descriptor: UnitDescriptor,
    bytes: &[u8],
) -> Result<LoadedDefinition, LoadError> {
    let module = Module::from_binary(engine, bytes).map_err(|e| LoadError::Malformed {
        unit: descriptor.name().to_string(),
        path: descriptor.path(),
        source: e.into(),
    })?;

    let capabilities = CapabilityTable::from_module(&module);
    info!(
        unit = %descriptor.name(),
        bytes = bytes.len(),
        exports = capabilities.len(),
        "materialized unit"
    );

    Ok(LoadedDefinition {
        descriptor,
        module,
        capabilities,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn descriptor() -> UnitDescriptor {
        UnitDescriptor::new("units", "Greeter")
    }

    #[test]
    fn valid_binary_materializes() {
        let engine = Engine::default();
        let bytes = wat::parse_str(r#"(module (func (export "greet")))"#).unwrap();

        let def = materialize(&engine, descriptor(), &bytes).unwrap();
        assert_eq!(def.name(), "Greeter");
        assert!(def.capabilities().resolve("greet").is_ok());
    }

    #[test]
    fn text_format_is_malformed() {
        let engine = Engine::default();
        let text = br#"(module (func (export "greet")))"#;

        let err = materialize(&engine, descriptor(), text).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }), "got {err:?}");
    }

    #[test]
    fn empty_and_truncated_images_are_malformed() {
        let engine = Engine::default();
        let bytes = wat::parse_str(r#"(module (func (export "greet") nop nop))"#).unwrap();

        for image in [&[][..], &bytes[..4], &bytes[..bytes.len() - 3]] {
            let err = materialize(&engine, descriptor(), image).unwrap_err();
            match err {
                LoadError::Malformed { unit, path, .. } => {
                    assert_eq!(unit, "Greeter");
                    assert_eq!(path, descriptor().path());
                }
                other => panic!("expected Malformed, got {other:?}"),
            }
        }
    }

    #[test]
    fn invalid_code_is_malformed() {
        let engine = Engine::default();
        // Parses structurally but fails validation: i32.add with no operands.
        let bytes = wat::parse_str(r#"(module (func (export "bad") (result i32) i32.add))"#).unwrap();
        let err = materialize(&engine, descriptor(), &bytes).unwrap_err();
        assert!(matches!(err, LoadError::Malformed { .. }));
    }
}
