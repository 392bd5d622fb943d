// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Invoker: instantiates a loaded unit and calls one entry operation.
//!
//! [`Invoker::run`] performs three steps in order and stops at the first
//! failure:
//!
//! 1. **Construct** ([`Invoker::construct`]) links WASI preview 1 and the
//!    `plugrun` host module, instantiates the module (running its `start`
//!    function) and calls `_initialize` when the unit exports one.
//! 2. **Resolve** ([`UnitInstance::resolve`]) checks the entry name against
//!    the definition's capability table: it must be a function taking no
//!    parameters.
//! 3. **Invoke** ([`UnitInstance::invoke`]) calls it once. Traps are reported
//!    as [`InvocationError::Failure`] with the trap as the source.
//!
//! [`InvocationError::Failure`]: plugrun_core::InvocationError::Failure

pub mod console;
pub mod host;
pub mod invoker;

pub use console::{CapturedOutput, Console};
pub use invoker::{EntryPoint, Invoker, UnitInstance};
