// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Trait seams between plugrun components.

pub mod source;

pub use source::UnitSource;
