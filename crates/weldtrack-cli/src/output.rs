//! Shared output layer for human/JSON parity across all CLI commands.
//!
//! Every command handler receives an [`OutputMode`] and renders through
//! [`render`]: stable JSON for machines, a closure-provided text layout
//! for humans.

use serde::Serialize;
use std::io::{self, Write};

/// The two output modes supported by the CLI.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputMode {
    /// Human-readable text.
    Human,
    /// Machine-readable JSON (one object or array per result).
    Json,
}

impl OutputMode {
    /// Returns `true` if JSON output was requested.
    #[allow(dead_code)]
    pub fn is_json(self) -> bool {
        matches!(self, Self::Json)
    }
}

/// Render `value` to stdout: pretty JSON in [`OutputMode::Json`], the
/// `human` closure otherwise.
pub fn render<T, F>(mode: OutputMode, value: &T, human: F) -> anyhow::Result<()>
where
    T: Serialize,
    F: FnOnce(&T, &mut dyn Write) -> io::Result<()>,
{
    let stdout = io::stdout();
    let mut out = stdout.lock();
    match mode {
        OutputMode::Json => {
            serde_json::to_writer_pretty(&mut out, value)?;
            writeln!(out)?;
        }
        OutputMode::Human => human(value, &mut out)?,
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::OutputMode;

    #[test]
    fn json_mode_reports_itself() {
        assert!(OutputMode::Json.is_json());
        assert!(!OutputMode::Human.is_json());
    }
}
