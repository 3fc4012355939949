//! Job outputs and workflow command formatting

pub mod commands;
pub mod writer;

pub use commands::safe_output_escape;
pub use writer::OutputWriter;

use crate::types::DocHolidayResponse;

/// Web app base for job links
pub const JOB_URL_BASE: &str = "https://app.doc.holiday/jobs";

/// Link to a job in the doc.holiday web app
#[inline]
pub fn job_url(id: &str) -> String {
    format!("{}/{}", JOB_URL_BASE, id)
}

/// Output names published on success
pub mod names {
    /// Created job id
    pub const JOB_ID: &str = "job-id";
    /// Job state at creation time
    pub const JOB_STATE: &str = "job-state";
    /// Web app link to the job
    pub const JOB_URL: &str = "job-url";
}

/// Values published after a job is created
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobOutputs {
    /// Job id
    pub job_id: String,
    /// Job state
    pub job_state: String,
    /// Web app link
    pub job_url: String,
}

impl JobOutputs {
    /// Outputs for an API response
    pub fn from_response(response: &DocHolidayResponse) -> Self {
        Self {
            job_id: response.id.clone(),
            job_state: response.state.as_str().to_string(),
            job_url: job_url(&response.id),
        }
    }

    /// Name/value pairs in publication order
    pub fn entries(&self) -> [(&'static str, &str); 3] {
        [
            (names::JOB_ID, &self.job_id),
            (names::JOB_STATE, &self.job_state),
            (names::JOB_URL, &self.job_url),
        ]
    }

    /// Markdown block for the job summary
    pub fn summary_markdown(&self) -> String {
        format!(
            "### doc.holiday job created\n\n\
             | Job | State |\n\
             | --- | --- |\n\
             | [{}]({}) | {} |\n",
            self.job_id, self.job_url, self.job_state
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::JobState;

    fn response() -> DocHolidayResponse {
        DocHolidayResponse {
            id: "abc123".into(),
            org_id: "org".into(),
            job_type: "doc".into(),
            state: JobState::Requested,
        }
    }

    #[test]
    fn test_job_url() {
        assert_eq!(job_url("abc123"), "https://app.doc.holiday/jobs/abc123");
    }

    #[test]
    fn test_entries_order() {
        let outputs = JobOutputs::from_response(&response());
        assert_eq!(
            outputs.entries(),
            [
                ("job-id", "abc123"),
                ("job-state", "requested"),
                ("job-url", "https://app.doc.holiday/jobs/abc123"),
            ]
        );
    }

    #[test]
    fn test_summary_links_job() {
        let md = JobOutputs::from_response(&response()).summary_markdown();
        assert!(md.contains("[abc123](https://app.doc.holiday/jobs/abc123)"));
        assert!(md.contains("| requested |"));
    }
}
