// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Where code unit bytes come from.

use crate::error::LoadError;
use crate::types::UnitDescriptor;

/// Supplies the raw bytes of a named code unit.
///
/// Implementations decide where the bytes live (a directory, memory, the
/// network). The loader only ever asks for the complete image of one unit.
pub trait UnitSource {
    /// Describes where the unit called `name` lives.
    fn descriptor(&self, name: &str) -> UnitDescriptor;

    /// Reads the complete binary image of the unit `descriptor` names.
    fn read_bytes(&self, descriptor: &UnitDescriptor) -> Result<Vec<u8>, LoadError>;
}
