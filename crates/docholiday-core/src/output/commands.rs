//! Workflow command encoding
//!
//! The runner scans stdout for `::command::message` lines. Messages and
//! output values must be escaped so embedded newlines cannot start a new
//! command.

/// Escape for GitHub Actions safe output (percent-encoding special chars)
pub fn safe_output_escape(s: &str) -> String {
    s.replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

/// Workflow commands the action emits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Warning annotation
    Warning,
    /// Error annotation
    Error,
    /// Secret registration
    AddMask,
}

impl Command {
    /// Command keyword
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Warning => "warning",
            Self::Error => "error",
            Self::AddMask => "add-mask",
        }
    }
}

/// Format a single workflow command line (no trailing newline)
pub fn format_command(command: Command, message: &str) -> String {
    format!("::{}::{}", command.as_str(), safe_output_escape(message))
}
