// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for plugrun.
//!
//! This crate provides the error taxonomy, the code unit descriptor, and the
//! byte-source trait shared by the loader, the invoker and the driver binary.

pub mod error;
pub mod traits;
pub mod types;

// Re-export key items at crate root for ergonomic imports.
pub use error::{InvocationError, LoadError, PlugrunError};
pub use traits::UnitSource;
pub use types::{Stage, UNIT_EXTENSION, UnitDescriptor};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_display_and_parse() {
        use std::str::FromStr;

        let stages = [Stage::Load, Stage::Construct, Stage::Resolve, Stage::Invoke];
        for stage in &stages {
            let s = stage.to_string();
            let parsed = Stage::from_str(&s).expect("should parse back");
            assert_eq!(*stage, parsed);
        }
        assert_eq!(Stage::Construct.to_string(), "construct");
    }

    #[test]
    fn every_error_kind_reports_its_stage() {
        let io = LoadError::Io {
            unit: "Missing".into(),
            path: "./Missing.wasm".into(),
            source: std::io::Error::from(std::io::ErrorKind::NotFound),
        };
        let malformed = LoadError::Malformed {
            unit: "Broken".into(),
            path: "./Broken.wasm".into(),
            source: "bad magic".into(),
        };
        let construction = InvocationError::Construction {
            unit: "Greeter".into(),
            reason: "start trapped".into(),
            source: None,
        };
        let missing = InvocationError::EntryNotFound {
            unit: "Greeter".into(),
            entry: "greet".into(),
            reason: "no export named `greet`".into(),
        };
        let failure = InvocationError::Failure {
            unit: "Greeter".into(),
            entry: "greet".into(),
            source: "unreachable".into(),
        };

        assert_eq!(PlugrunError::from(io).stage(), Some(Stage::Load));
        assert_eq!(PlugrunError::from(malformed).stage(), Some(Stage::Load));
        assert_eq!(PlugrunError::from(construction).stage(), Some(Stage::Construct));
        assert_eq!(PlugrunError::from(missing).stage(), Some(Stage::Resolve));
        assert_eq!(PlugrunError::from(failure).stage(), Some(Stage::Invoke));
        assert_eq!(PlugrunError::Internal("engine".into()).stage(), None);
    }
}
