// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for plugrun integration tests.
//!
//! # Components
//!
//! - [`UnitDir`] - A temporary unit directory that compiles WAT into `.wasm` files
//! - [`units`] - Canned unit sources covering each success and failure path

pub mod fixtures;
pub mod units;

pub use fixtures::UnitDir;
