// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canned unit sources in WebAssembly text format.
//!
//! Units that write output use the `plugrun.print(ptr, len)` host import,
//! except [`WASI_GREETER`] which writes to fd 1 through WASI preview 1.

/// `greet` prints `hello`.
pub const GREETER: &str = r#"(module
    (import "plugrun" "print" (func $print (param i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "hello\n")
    (func (export "greet")
        (call $print (i32.const 0) (i32.const 6)))
)"#;

/// `greet` writes `hello` to stdout through `fd_write`.
pub const WASI_GREETER: &str = r#"(module
    (import "wasi_snapshot_preview1" "fd_write"
        (func $fd_write (param i32 i32 i32 i32) (result i32)))
    (memory (export "memory") 1)
    (data (i32.const 16) "hello\n")
    (func (export "greet")
        ;; iovec { buf = 16, len = 6 } at offset 0, bytes written at offset 8
        (i32.store (i32.const 0) (i32.const 16))
        (i32.store (i32.const 4) (i32.const 6))
        (drop (call $fd_write (i32.const 1) (i32.const 0) (i32.const 1) (i32.const 8))))
)"#;

/// Only exposes `greet(i32)`; there is no zero-argument `greet`.
pub const BAD_SIG: &str = r#"(module
    (import "plugrun" "print" (func $print (param i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "hello\n")
    (func (export "greet") (param i32)
        (call $print (i32.const 0) (i32.const 6)))
)"#;

/// Start function prints `ctor`; exports nothing callable.
pub const CONSTRUCTED_NO_ENTRY: &str = r#"(module
    (import "plugrun" "print" (func $print (param i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "ctor\n")
    (func $init
        (call $print (i32.const 0) (i32.const 5)))
    (start $init)
)"#;

/// Start function traps; `greet` would print `hello`.
pub const TRAPPING_START: &str = r#"(module
    (import "plugrun" "print" (func $print (param i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "hello\n")
    (func $init unreachable)
    (start $init)
    (func (export "greet")
        (call $print (i32.const 0) (i32.const 6)))
)"#;

/// `_initialize` prints `init`, then `greet` prints `hello`.
pub const REACTOR: &str = r#"(module
    (import "plugrun" "print" (func $print (param i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "init\n")
    (data (i32.const 16) "hello\n")
    (func (export "_initialize")
        (call $print (i32.const 0) (i32.const 5)))
    (func (export "greet")
        (call $print (i32.const 16) (i32.const 6)))
)"#;

/// `_initialize` takes a parameter, so it cannot serve as a constructor.
pub const BAD_CONSTRUCTOR: &str = r#"(module
    (func (export "_initialize") (param i32))
    (func (export "greet"))
)"#;

/// Imports a host function nobody provides.
pub const UNKNOWN_IMPORT: &str = r#"(module
    (import "elsewhere" "missing" (func))
    (func (export "greet"))
)"#;

/// `greet` prints `before`, then traps.
pub const TRAPPING_ENTRY: &str = r#"(module
    (import "plugrun" "print" (func $print (param i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "before\n")
    (func (export "greet")
        (call $print (i32.const 0) (i32.const 7))
        unreachable)
)"#;

/// `greet` asks the host to print from outside its memory.
pub const OUT_OF_BOUNDS_PRINT: &str = r#"(module
    (import "plugrun" "print" (func $print (param i32 i32)))
    (memory (export "memory") 1)
    (func (export "greet")
        (call $print (i32.const 65530) (i32.const 100)))
)"#;

/// `greet` calls `plugrun.log` at warn level with `careful`.
pub const LOGGER: &str = r#"(module
    (import "plugrun" "log" (func $log (param i32 i32 i32)))
    (memory (export "memory") 1)
    (data (i32.const 0) "careful")
    (func (export "greet")
        (call $log (i32.const 3) (i32.const 0) (i32.const 7)))
)"#;

/// `next` returns an incrementing counter held in a mutable global.
pub const COUNTER: &str = r#"(module
    (global $n (mut i32) (i32.const 0))
    (func (export "next") (result i32)
        (global.set $n (i32.add (global.get $n) (i32.const 1)))
        (global.get $n))
)"#;
