//! Host runner abstraction
//!
//! Everything the action needs from the GitHub Actions runner goes through
//! [`ActionHost`], so the pipeline runs unchanged against the real runner
//! or an in-memory fake.

/// Inputs, outputs and log sink of the hosting runner
pub trait ActionHost {
    /// Raw value of a named input; empty when unset
    fn input(&self, name: &str) -> String;

    /// Publish a named output value
    fn set_output(&self, name: &str, value: &str);

    /// Plain log line
    fn info(&self, message: &str);

    /// Warning annotation
    fn warning(&self, message: &str);

    /// Mark the run as failed with a single message
    fn fail(&self, message: &str);

    /// Register a secret so the runner redacts it from logs
    fn mask(&self, _secret: &str) {}

    /// Append markdown to the job summary
    fn summary(&self, _markdown: &str) {}
}
