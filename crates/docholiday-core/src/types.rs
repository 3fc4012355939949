//! Core type definitions: validated inputs and the doc.holiday wire format

use serde::{Deserialize, Serialize};

/// Declared event kind from the `event-type` input
///
/// Only `release` and `merge` switch the action into smart mode. Any literal
/// other than the three known ones is carried through verbatim and behaves
/// like `custom`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventType {
    /// Triggered by a published release
    Release,
    /// Triggered by a merged pull request
    Merge,
    /// Title and body supplied by the caller
    Custom,
    /// Anything else, kept as written
    Unrecognized(String),
}

impl EventType {
    /// Parse a raw `event-type` value - never fails
    pub fn parse(raw: &str) -> Self {
        match raw {
            "release" => Self::Release,
            "merge" => Self::Merge,
            "custom" => Self::Custom,
            other => Self::Unrecognized(other.to_string()),
        }
    }

    /// The smart event kind, if this event type enables smart defaults
    #[inline]
    pub fn smart(&self) -> Option<SmartEvent> {
        match self {
            Self::Release => Some(SmartEvent::Release),
            Self::Merge => Some(SmartEvent::Merge),
            Self::Custom | Self::Unrecognized(_) => None,
        }
    }

    /// Get string representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Release => "release",
            Self::Merge => "merge",
            Self::Custom => "custom",
            Self::Unrecognized(s) => s,
        }
    }
}

/// Event kinds that derive title and body from the event payload
///
/// Serialized as the request's `eventType`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum SmartEvent {
    /// Release published
    Release,
    /// Pull request merged
    Merge,
}

impl SmartEvent {
    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Release => "release",
            Self::Merge => "merge",
        }
    }
}

/// One validated change-range specification
///
/// At most one kind can be populated per invocation, so the choice is made
/// once, when the raw inputs are validated. Companion fields stay optional:
/// a kind can be selected by a field that cannot be mapped on its own (an
/// end without a start), in which case it maps to no change at all.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangesetInput {
    /// The last N releases
    Releases {
        /// Number of releases
        count: u32,
    },
    /// Commits between two points in time
    TimeRange {
        /// Range start
        start: Option<String>,
        /// Range end (defaults to now on the API side)
        end: Option<String>,
    },
    /// The last N commits
    CommitsCount {
        /// Number of commits
        count: u32,
    },
    /// Every commit after a SHA
    CommitsSince {
        /// Starting SHA
        sha: String,
    },
    /// An explicit list of commits
    CommitShas {
        /// Commit SHAs in input order
        shas: Vec<String>,
    },
    /// Commits between two SHAs
    CommitRange {
        /// First SHA of the range
        start_sha: Option<String>,
        /// Last SHA of the range
        end_sha: Option<String>,
        /// Include the start commit itself
        include_start: bool,
    },
    /// Changes between two tags
    Tags {
        /// Starting tag
        start: Option<String>,
        /// Ending tag
        end: Option<String>,
    },
}

/// Validated configuration for one invocation
#[derive(Clone, Default)]
pub struct ActionInputs {
    /// doc.holiday API token
    pub api_token: String,
    /// Declared event kind, if any
    pub event_type: Option<EventType>,
    /// Manual title
    pub title: Option<String>,
    /// Manual body
    pub body: Option<String>,
    /// Publication targets
    pub publications: Option<Vec<String>>,
    /// Explicit source connection (`owner/repo`)
    pub source_connection: Option<String>,
    /// Job labels
    pub labels: Option<Vec<String>>,
    /// Free-form comments, one per line
    pub comments: Option<Vec<String>>,
    /// Links the generator should consider
    pub relevant_links: Option<Vec<String>>,
    /// Change range, if one was specified
    pub changeset: Option<ChangesetInput>,
}

impl std::fmt::Debug for ActionInputs {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ActionInputs")
            .field("api_token", &"<redacted>")
            .field("event_type", &self.event_type)
            .field("title", &self.title)
            .field("body", &self.body.as_ref().map(|b| b.len()))
            .field("publications", &self.publications)
            .field("source_connection", &self.source_connection)
            .field("labels", &self.labels)
            .field("comments", &self.comments)
            .field("relevant_links", &self.relevant_links)
            .field("changeset", &self.changeset)
            .finish()
    }
}

impl ActionInputs {
    /// The smart event kind, if the declared event type enables one
    #[inline]
    pub fn smart_event(&self) -> Option<SmartEvent> {
        self.event_type.as_ref().and_then(EventType::smart)
    }
}

/// One entry of the outbound `changes` array
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum ChangeSpec {
    /// `{ "releases": { "count": N } }`
    Releases {
        /// Number of releases
        count: u32,
    },
    /// `{ "timeRange": { "start", "end"? } }`
    TimeRange {
        /// Range start
        start: String,
        /// Range end
        #[serde(skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
    /// `{ "commits": { ... } }`
    Commits(CommitsSpec),
    /// `{ "tags": { "start", "end"? } }`
    Tags {
        /// Starting tag
        start: String,
        /// Ending tag
        #[serde(skip_serializing_if = "Option::is_none")]
        end: Option<String>,
    },
}

/// Body of a `commits` change; exactly one shape is populated
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CommitsSpec {
    /// Last N commits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<u32>,
    /// Start of a range, or the SHA to start after
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start_sha: Option<String>,
    /// End of a range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_sha: Option<String>,
    /// Include the start commit in a range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_start_commit: Option<bool>,
    /// Explicit commit list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shas: Option<Vec<String>>,
}

/// Outbound request body: `{"docRequest": {...}}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocHolidayRequest {
    /// The job description
    pub doc_request: DocRequest,
}

/// Job description sent to doc.holiday
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DocRequest {
    /// Job title
    pub title: String,
    /// Job body
    pub body: String,
    /// Repository the job belongs to
    pub source_connection: String,
    /// Publication targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub publications: Option<Vec<String>>,
    /// Labels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<String>>,
    /// Comments
    #[serde(skip_serializing_if = "Option::is_none")]
    pub comments: Option<Vec<String>>,
    /// Relevant links
    #[serde(skip_serializing_if = "Option::is_none")]
    pub relevant_links: Option<Vec<String>>,
    /// Set only for release and merge events
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_type: Option<SmartEvent>,
    /// Explicit change range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes: Option<Vec<ChangeSpec>>,
}

/// Job lifecycle state reported by the API
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum JobState {
    /// Accepted, not started
    Requested,
    /// Generation in progress
    Running,
    /// Finished
    Done,
    /// Failed on the API side
    Errored,
}

impl JobState {
    /// Get string representation
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Requested => "requested",
            Self::Running => "running",
            Self::Done => "done",
            Self::Errored => "errored",
        }
    }
}

/// Parsed success response
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct DocHolidayResponse {
    /// Job id
    pub id: String,
    /// Owning organization
    #[serde(rename = "orgId")]
    pub org_id: String,
    /// Job type
    #[serde(rename = "type")]
    pub job_type: String,
    /// Current state
    pub state: JobState,
}
