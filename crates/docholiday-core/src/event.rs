//! GitHub event context and smart defaults
//!
//! Release and merge events carry enough metadata to describe a
//! documentation job on their own: the release tag and notes, or the merged
//! pull request's number, title and description.

use crate::error::{Error, Result};
use crate::types::SmartEvent;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::path::Path;

/// The event payload document
///
/// Only release and merge runs read it, so sections are decoded on access.
/// A payload that could not be loaded is kept as an error and reported only
/// when a section is requested.
#[derive(Debug, Clone, Default)]
pub struct EventPayload {
    raw: serde_json::Value,
    unreadable: Option<String>,
}

/// `release` object of a release event
#[derive(Debug, Clone, Deserialize)]
pub struct ReleasePayload {
    /// Tag the release points at
    pub tag_name: String,
    /// Release notes
    #[serde(default)]
    pub body: Option<String>,
}

/// `pull_request` object of a pull request event
#[derive(Debug, Clone, Deserialize)]
pub struct PullRequestPayload {
    /// PR number
    pub number: u64,
    /// PR title
    #[serde(default)]
    pub title: Option<String>,
    /// PR description
    #[serde(default)]
    pub body: Option<String>,
    /// `null` or absent for PRs that were not merged
    #[serde(default)]
    pub merged: Option<bool>,
}

/// `repository` object of any event
#[derive(Debug, Clone, Deserialize)]
pub struct RepositoryPayload {
    /// Repository name
    pub name: String,
    /// Repository owner
    pub owner: OwnerPayload,
}

/// `repository.owner` object
#[derive(Debug, Clone, Deserialize)]
pub struct OwnerPayload {
    /// Owner login
    pub login: String,
}

impl EventPayload {
    /// Parse a payload document; fails only on malformed JSON
    pub fn from_json(json: &str) -> Result<Self> {
        let raw = serde_json::from_str(json).map_err(|e| Error::EventParse(e.to_string()))?;
        Ok(Self {
            raw,
            unreadable: None,
        })
    }

    /// Load the payload file written by the runner
    ///
    /// A missing file yields an empty payload, matching runs that are not
    /// triggered by a webhook event.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            tracing::debug!(path = %path.display(), "Event payload file not found, using empty payload");
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// A payload that failed to load; section access reports `message`
    pub fn unreadable(message: impl Into<String>) -> Self {
        Self {
            raw: serde_json::Value::Null,
            unreadable: Some(message.into()),
        }
    }

    /// The `release` object, if present and not null
    pub fn release(&self) -> Result<Option<ReleasePayload>> {
        self.section("release")
    }

    /// The `pull_request` object, if present and not null
    pub fn pull_request(&self) -> Result<Option<PullRequestPayload>> {
        self.section("pull_request")
    }

    /// The `repository` object; a malformed one counts as absent
    pub fn repository(&self) -> Option<RepositoryPayload> {
        self.section("repository").ok().flatten()
    }

    fn section<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        if let Some(message) = &self.unreadable {
            return Err(Error::EventParse(message.clone()));
        }
        match self.raw.get(key) {
            None | Some(serde_json::Value::Null) => Ok(None),
            Some(value) => T::deserialize(value)
                .map(Some)
                .map_err(|e| Error::EventParse(format!("{}: {}", key, e))),
        }
    }
}

/// Repository owner and name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepoIdentity {
    /// Owner login
    pub owner: String,
    /// Repository name
    pub repo: String,
}

impl RepoIdentity {
    /// Parse an `owner/repo` string such as `GITHUB_REPOSITORY`
    pub fn parse(repository: &str) -> Option<Self> {
        let (owner, repo) = repository.split_once('/')?;
        if owner.is_empty() || repo.is_empty() || repo.contains('/') {
            return None;
        }
        Some(Self {
            owner: owner.to_string(),
            repo: repo.to_string(),
        })
    }
}

/// Everything the runner tells the action about the triggering event
#[derive(Debug, Clone, Default)]
pub struct EventContext {
    /// Event payload
    pub payload: EventPayload,
    /// Repository identity, if known
    pub repo: Option<RepoIdentity>,
}

impl EventContext {
    /// Build a context, resolving the repository from `GITHUB_REPOSITORY`
    /// first and the payload's `repository` object second
    pub fn new(payload: EventPayload, github_repository: Option<&str>) -> Self {
        let repo = github_repository
            .and_then(RepoIdentity::parse)
            .or_else(|| {
                payload.repository().map(|r| RepoIdentity {
                    owner: r.owner.login,
                    repo: r.name,
                })
            });
        Self { payload, repo }
    }
}

/// Title, body and event kind derived from the event payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmartDefaults {
    /// Job title
    pub title: String,
    /// Job body
    pub body: String,
    /// Event kind the defaults were derived for
    pub event_type: SmartEvent,
}

/// Derive smart defaults for a release or merge event
pub fn smart_defaults(event: SmartEvent, payload: &EventPayload) -> Result<SmartDefaults> {
    match event {
        SmartEvent::Release => {
            let release = payload.release()?.ok_or_else(|| {
                Error::EventDataMissing("No release data found in event context".to_string())
            })?;
            Ok(SmartDefaults {
                title: format!("Release notes for {}", release.tag_name),
                body: release.body.unwrap_or_default(),
                event_type: SmartEvent::Release,
            })
        }
        SmartEvent::Merge => {
            let pr = payload.pull_request()?.ok_or_else(|| {
                Error::EventDataMissing("No pull request data found in event context".to_string())
            })?;
            if pr.merged != Some(true) {
                return Err(Error::EventDataMissing(format!(
                    "Pull request #{} was closed without being merged",
                    pr.number
                )));
            }
            Ok(SmartDefaults {
                title: format!("PR #{}: {}", pr.number, pr.title.unwrap_or_default()),
                body: pr.body.unwrap_or_default(),
                event_type: SmartEvent::Merge,
            })
        }
    }
}

/// `owner/repo` for the `sourceConnection` field
#[inline]
pub fn infer_source_connection(repo: &RepoIdentity) -> String {
    format!("{}/{}", repo.owner, repo.repo)
}
