// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for plugrun.
//!
//! Loading and invoking are separate failure domains: [`LoadError`] covers
//! turning a file into a loaded definition, [`InvocationError`] covers the
//! construct, resolve and invoke steps. [`PlugrunError`] is what the driver
//! renders before exiting non-zero.

#![allow(unused_assignments)] // miette's Diagnostic derive generates code triggering this lint

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::types::Stage;

/// Boxed cause carried by errors that wrap a runtime failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Failure to turn a code unit on disk into a loaded definition.
#[derive(Debug, Error, Diagnostic)]
pub enum LoadError {
    /// The unit file is missing, unreadable, or could not be read in full.
    #[error("unit `{unit}` could not be read from {}", .path.display())]
    #[diagnostic(
        code(plugrun::load::io),
        help("check that the unit directory is correct and the file is readable")
    )]
    Io {
        unit: String,
        path: PathBuf,
        source: std::io::Error,
    },

    /// The bytes were read but are not a valid executable unit image.
    #[error("unit `{unit}` at {} is not a valid WebAssembly module", .path.display())]
    #[diagnostic(
        code(plugrun::load::malformed),
        help("units must be compiled WebAssembly binaries; text-format modules are not accepted")
    )]
    Malformed {
        unit: String,
        path: PathBuf,
        source: BoxError,
    },
}

impl LoadError {
    /// Name of the unit that failed to load.
    pub fn unit(&self) -> &str {
        match self {
            LoadError::Io { unit, .. } | LoadError::Malformed { unit, .. } => unit,
        }
    }
}

/// Failure while constructing, resolving, or invoking a loaded unit.
#[derive(Debug, Error, Diagnostic)]
pub enum InvocationError {
    /// No instance could be built from the definition.
    #[error("unit `{unit}` could not be constructed: {reason}")]
    #[diagnostic(code(plugrun::invoke::construction))]
    Construction {
        unit: String,
        reason: String,
        source: Option<BoxError>,
    },

    /// The configured entry operation is absent or has the wrong shape.
    #[error("unit `{unit}` has no zero-argument entry operation `{entry}`: {reason}")]
    #[diagnostic(
        code(plugrun::invoke::entry_not_found),
        help("the unit must export a function `{entry}` that takes no parameters")
    )]
    EntryNotFound {
        unit: String,
        entry: String,
        reason: String,
    },

    /// The entry operation ran and failed inside the loaded code.
    #[error("entry operation `{entry}` of unit `{unit}` failed")]
    #[diagnostic(code(plugrun::invoke::failure))]
    Failure {
        unit: String,
        entry: String,
        source: BoxError,
    },
}

impl InvocationError {
    /// Name of the unit the failing step was working on.
    pub fn unit(&self) -> &str {
        match self {
            InvocationError::Construction { unit, .. }
            | InvocationError::EntryNotFound { unit, .. }
            | InvocationError::Failure { unit, .. } => unit,
        }
    }
}

/// The top-level error surfaced by the `plugrun` binary.
#[derive(Debug, Error, Diagnostic)]
pub enum PlugrunError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Invocation(#[from] InvocationError),

    /// Host-side failures unrelated to the unit (engine setup).
    #[error("internal error: {0}")]
    #[diagnostic(code(plugrun::internal))]
    Internal(String),
}

impl PlugrunError {
    /// The pipeline stage that produced this error, if any.
    pub fn stage(&self) -> Option<Stage> {
        match self {
            PlugrunError::Internal(_) => None,
            PlugrunError::Load(_) => Some(Stage::Load),
            PlugrunError::Invocation(InvocationError::Construction { .. }) => {
                Some(Stage::Construct)
            }
            PlugrunError::Invocation(InvocationError::EntryNotFound { .. }) => {
                Some(Stage::Resolve)
            }
            PlugrunError::Invocation(InvocationError::Failure { .. }) => Some(Stage::Invoke),
        }
    }
}
