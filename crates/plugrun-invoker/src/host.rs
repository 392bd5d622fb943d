// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! The `plugrun` host module offered to units.
//!
//! - `print(ptr: i32, len: i32)` writes `len` bytes of the unit's exported
//!   `memory` to the console.
//! - `log(level: i32, ptr: i32, len: i32)` emits a tracing event. Levels are
//!   0 trace, 1 debug, 2 info, 3 warn, 4 error; anything else logs at info.
//!
//! Both trap when the unit has no exported memory or the range is out of
//! bounds, so a bad call surfaces as an invocation failure.

use anyhow::anyhow;
use tracing::{debug, error, info, trace, warn};
use wasmtime::{Caller, Linker};
use wasmtime_wasi::p1::WasiP1Ctx;

use crate::console::Console;

/// Import module name of the host functions.
pub const HOST_MODULE: &str = "plugrun";

/// Per-instance state held in the wasmtime store.
pub struct UnitState {
    /// Unit name, attached to log events.
    pub(crate) unit: String,
    pub(crate) console: Console,
    pub(crate) wasi: WasiP1Ctx,
}

impl UnitState {
    pub(crate) fn new(unit: &str, console: Console, wasi: WasiP1Ctx) -> Self {
        Self {
            unit: unit.to_string(),
            console,
            wasi,
        }
    }
}

/// Defines `plugrun.print` and `plugrun.log` in the linker.
pub fn define_host_functions(linker: &mut Linker<UnitState>) -> Result<(), wasmtime::Error> {
    linker.func_wrap(
        HOST_MODULE,
        "print",
        |mut caller: Caller<'_, UnitState>, ptr: i32, len: i32| -> Result<(), wasmtime::Error> {
            let bytes = read_memory(&mut caller, ptr, len)?;
            caller
                .data()
                .console
                .write(&bytes)
                .map_err(|e| anyhow!("console write failed: {e}").into())
        },
    )?;

    linker.func_wrap(
        HOST_MODULE,
        "log",
        |mut caller: Caller<'_, UnitState>,
         level: i32,
         ptr: i32,
         len: i32|
         -> Result<(), wasmtime::Error> {
            let bytes = read_memory(&mut caller, ptr, len)?;
            let msg = String::from_utf8_lossy(&bytes);
            let unit = caller.data().unit.as_str();
            match level {
                0 => trace!(unit = %unit, unit_log = %msg, "unit log"),
                1 => debug!(unit = %unit, unit_log = %msg, "unit log"),
                3 => warn!(unit = %unit, unit_log = %msg, "unit log"),
                4 => error!(unit = %unit, unit_log = %msg, "unit log"),
                _ => info!(unit = %unit, unit_log = %msg, "unit log"),
            }
            Ok(())
        },
    )?;

    Ok(())
}

/// Copies `len` bytes at `ptr` out of the caller's exported memory.
fn read_memory(
    caller: &mut Caller<'_, UnitState>,
    ptr: i32,
    len: i32,
) -> Result<Vec<u8>, wasmtime::Error> {
    let memory = match caller.get_export("memory") {
        Some(wasmtime::Extern::Memory(mem)) => mem,
        _ => return Err(anyhow!("unit has no exported memory").into()),
    };

    let Ok(start) = usize::try_from(ptr) else {
        return Err(anyhow!("negative pointer {ptr}").into());
    };
    let Ok(len) = usize::try_from(len) else {
        return Err(anyhow!("negative length {len}").into());
    };
    let data = memory.data(&*caller);
    start
        .checked_add(len)
        .and_then(|end| data.get(start..end))
        .map(<[u8]>::to_vec)
        .ok_or_else(|| {
            anyhow!(
                "range {start}..{} is outside unit memory of {} bytes",
                start.saturating_add(len),
                data.len()
            )
            .into()
        })
}

#[cfg(test)]
mod tests {
    use plugrun_loader::{MemoryUnitSource, UnitLoader};
    use plugrun_test_utils::units;
    use tracing_test::traced_test;

    use crate::{Console, Invoker};

    #[test]
    #[traced_test]
    fn log_forwards_to_tracing() {
        let mut source = MemoryUnitSource::new();
        source.insert("Logger", wat::parse_str(units::LOGGER).unwrap());
        let def = UnitLoader::new(source).load("Logger").unwrap();

        let (console, output) = Console::capture();
        Invoker::new(console).run(&def, "greet").unwrap();

        assert!(logs_contain("careful"));
        assert!(logs_contain("Logger"));
        assert!(output.text().is_empty());
    }

    #[test]
    fn print_without_memory_traps() {
        let wat = r#"(module
            (import "plugrun" "print" (func $print (param i32 i32)))
            (func (export "greet") (call $print (i32.const 0) (i32.const 1)))
        )"#;
        let mut source = MemoryUnitSource::new();
        source.insert("NoMemory", wat::parse_str(wat).unwrap());
        let def = UnitLoader::new(source).load("NoMemory").unwrap();

        let err = Invoker::default().run(&def, "greet").unwrap_err();
        assert!(matches!(err, plugrun_core::InvocationError::Failure { .. }));
    }
}
