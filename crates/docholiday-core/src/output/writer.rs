//! Runner file writer for `$GITHUB_OUTPUT` and `$GITHUB_STEP_SUMMARY`
//!
//! Output values are written verbatim inside a heredoc whose delimiter is
//! generated per write, so the runner reads back exactly what was set.

use crate::error::{Error, Result};
use std::io::Write;
use std::path::Path;

/// Prefix of the generated heredoc delimiters
pub const DELIMITER_PREFIX: &str = "ghadelimiter_";

/// Output file writer
pub struct OutputWriter;

impl OutputWriter {
    /// Append `name<<DELIM` entries to an output file
    pub fn append_outputs(path: &Path, entries: &[(&str, &str)]) -> Result<()> {
        let mut buf = String::with_capacity(entries.len() * 96);
        for (name, value) in entries {
            buf.push_str(&Self::format_entry(name, value, &new_delimiter())?);
        }
        Self::append(path, &buf)
    }

    /// Append markdown to the step summary file
    pub fn append_summary(path: &Path, markdown: &str) -> Result<()> {
        let mut content = markdown.to_string();
        if !content.ends_with('\n') {
            content.push('\n');
        }
        Self::append(path, &content)
    }

    /// Format one heredoc entry with the value unchanged
    ///
    /// Fails if the name or value contains `delimiter`, since the entry
    /// would then end early.
    pub fn format_entry(name: &str, value: &str, delimiter: &str) -> Result<String> {
        if name.contains(delimiter) || value.contains(delimiter) {
            return Err(Error::OutputDelimiterCollision {
                name: name.to_string(),
            });
        }
        Ok(format!("{name}<<{delimiter}\n{value}\n{delimiter}\n"))
    }

    fn append(path: &Path, content: &str) -> Result<()> {
        let mut f = std::fs::OpenOptions::new()
            .append(true)
            .create(true)
            .open(path)?;
        f.write_all(content.as_bytes())?;
        Ok(())
    }
}

fn new_delimiter() -> String {
    format!("{}{}", DELIMITER_PREFIX, uuid::Uuid::new_v4())
}
