// SPDX-FileCopyrightText: 2026 Plugrun Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Where a unit's console output goes.

use std::io::Write;
use std::sync::{Arc, Mutex};

/// Destination for bytes a unit prints.
#[derive(Debug, Clone, Default)]
pub enum Console {
    /// The host process's stdout; WASI stdio is inherited too.
    #[default]
    Inherit,
    /// An in-memory buffer. WASI stdio is left unconnected.
    Capture(CapturedOutput),
}

impl Console {
    /// Creates a capturing console and returns it with a handle to its buffer.
    pub fn capture() -> (Self, CapturedOutput) {
        let output = CapturedOutput::default();
        (Console::Capture(output.clone()), output)
    }

    pub fn inherits_stdio(&self) -> bool {
        matches!(self, Console::Inherit)
    }

    pub(crate) fn write(&self, bytes: &[u8]) -> std::io::Result<()> {
        match self {
            Console::Inherit => {
                let mut out = std::io::stdout().lock();
                out.write_all(bytes)?;
                out.flush()
            }
            Console::Capture(output) => {
                output.append(bytes);
                Ok(())
            }
        }
    }
}

/// Shared buffer behind [`Console::Capture`].
#[derive(Debug, Clone, Default)]
pub struct CapturedOutput(Arc<Mutex<Vec<u8>>>);

impl CapturedOutput {
    fn append(&self, bytes: &[u8]) {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .extend_from_slice(bytes);
    }

    /// Everything written so far.
    pub fn bytes(&self) -> Vec<u8> {
        self.0
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Everything written so far, lossily decoded as UTF-8.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.bytes()).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capture_collects_writes_in_order() {
        let (console, output) = Console::capture();
        console.write(b"one ").unwrap();
        console.write(b"two").unwrap();
        assert_eq!(output.text(), "one two");
        assert!(!console.inherits_stdio());
    }

    #[test]
    fn default_console_inherits() {
        assert!(Console::default().inherits_stdio());
    }
}
