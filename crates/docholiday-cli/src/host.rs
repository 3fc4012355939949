//! GitHub Actions runner binding for [`ActionHost`]

use docholiday_core::output::commands::{format_command, Command};
use docholiday_core::output::OutputWriter;
use docholiday_core::ActionHost;
use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;
use std::io::Write;
use std::path::PathBuf;

/// Output format for the CLI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// GitHub Actions: workflow commands on stdout, outputs to $GITHUB_OUTPUT
    Gha,
    /// Outputs as one JSON object on stdout
    Json,
    /// Human-readable `name=value` lines on stdout
    Text,
}

impl OutputFormat {
    pub fn detect(explicit: Option<&str>, github_actions: bool) -> Self {
        match explicit {
            Some("gha") => OutputFormat::Gha,
            Some("json") => OutputFormat::Json,
            Some("text") => OutputFormat::Text,
            _ => {
                if github_actions {
                    OutputFormat::Gha
                } else {
                    OutputFormat::Text
                }
            }
        }
    }
}

/// Runner files the host writes to
#[derive(Debug, Default, Clone)]
pub struct RunnerFiles {
    /// `$GITHUB_OUTPUT`
    pub output: Option<PathBuf>,
    /// `$GITHUB_STEP_SUMMARY`
    pub step_summary: Option<PathBuf>,
}

pub struct GithubActionsHost {
    inputs: BTreeMap<&'static str, String>,
    format: OutputFormat,
    files: RunnerFiles,
    outputs: RefCell<Vec<(String, String)>>,
    failed: Cell<bool>,
}

impl GithubActionsHost {
    pub fn new(
        inputs: BTreeMap<&'static str, String>,
        format: OutputFormat,
        files: RunnerFiles,
    ) -> Self {
        Self {
            inputs,
            format,
            files,
            outputs: RefCell::new(Vec::new()),
            failed: Cell::new(false),
        }
    }

    /// Whether `fail` was reported
    pub fn failed(&self) -> bool {
        self.failed.get()
    }

    /// Write the collected outputs in the selected format
    pub fn finish(&self) {
        let outputs = self.outputs.borrow();
        if outputs.is_empty() {
            return;
        }
        let entries: Vec<(&str, &str)> = outputs
            .iter()
            .map(|(n, v)| (n.as_str(), v.as_str()))
            .collect();

        match self.format {
            OutputFormat::Gha => match &self.files.output {
                Some(path) => {
                    if let Err(e) = OutputWriter::append_outputs(path, &entries) {
                        self.fail(&format!(
                            "Cannot write GITHUB_OUTPUT ({}): {}",
                            path.display(),
                            e
                        ));
                    }
                }
                None => {
                    eprintln!("Warning: GITHUB_OUTPUT not set, falling back to stdout");
                    write_json_output(&entries);
                }
            },
            OutputFormat::Json => write_json_output(&entries),
            OutputFormat::Text => write_text_output(&entries),
        }
    }

    fn command(&self, command: Command, message: &str) {
        let stdout = std::io::stdout();
        let mut w = stdout.lock();
        let _ = writeln!(w, "{}", format_command(command, message));
    }
}

impl ActionHost for GithubActionsHost {
    fn input(&self, name: &str) -> String {
        self.inputs.get(name).cloned().unwrap_or_default()
    }

    fn set_output(&self, name: &str, value: &str) {
        tracing::debug!(name, value, "Set output");
        self.outputs
            .borrow_mut()
            .push((name.to_string(), value.to_string()));
    }

    fn info(&self, message: &str) {
        match self.format {
            // Keep stdout a single JSON document
            OutputFormat::Json => eprintln!("{message}"),
            OutputFormat::Gha | OutputFormat::Text => println!("{message}"),
        }
    }

    fn warning(&self, message: &str) {
        match self.format {
            OutputFormat::Gha => self.command(Command::Warning, message),
            OutputFormat::Json | OutputFormat::Text => eprintln!("Warning: {message}"),
        }
    }

    fn fail(&self, message: &str) {
        self.failed.set(true);
        match self.format {
            OutputFormat::Gha => self.command(Command::Error, message),
            OutputFormat::Json | OutputFormat::Text => eprintln!("Error: {message}"),
        }
    }

    fn mask(&self, secret: &str) {
        if self.format == OutputFormat::Gha {
            self.command(Command::AddMask, secret);
        }
    }

    fn summary(&self, markdown: &str) {
        if self.format != OutputFormat::Gha {
            return;
        }
        match &self.files.step_summary {
            Some(path) => {
                if let Err(e) = OutputWriter::append_summary(path, markdown) {
                    tracing::warn!(path = %path.display(), error = %e, "Cannot write step summary");
                }
            }
            None => tracing::debug!("GITHUB_STEP_SUMMARY not set, skipping summary"),
        }
    }
}

/// Write outputs as one JSON object to stdout
fn write_json_output(entries: &[(&str, &str)]) {
    let object: serde_json::Map<String, serde_json::Value> = entries
        .iter()
        .map(|(n, v)| (n.to_string(), serde_json::Value::from(*v)))
        .collect();

    let stdout = std::io::stdout();
    let mut lock = stdout.lock();
    let _ = serde_json::to_writer(&mut lock, &object);
    let _ = writeln!(lock);
}

/// Write `name=value` lines to stdout
fn write_text_output(entries: &[(&str, &str)]) {
    let stdout = std::io::stdout();
    let mut w = stdout.lock();
    for (name, value) in entries {
        let _ = writeln!(w, "{name}={value}");
    }
}
