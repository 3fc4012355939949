//! Changeset to wire-format mapping

use crate::types::{ChangeSpec, ChangesetInput, CommitsSpec};

/// Map a validated changeset to the request's `changes` array
///
/// The result holds zero or one entry. It is empty when the selected kind
/// lacks the field it needs to be expressed, e.g. a time range with only an
/// end, or a commit range with one side missing.
pub fn map_changeset(changeset: &ChangesetInput) -> Vec<ChangeSpec> {
    let spec = match changeset {
        ChangesetInput::Releases { count } => Some(ChangeSpec::Releases { count: *count }),
        ChangesetInput::TimeRange { start, end } => start.as_ref().map(|start| {
            ChangeSpec::TimeRange {
                start: start.clone(),
                end: end.clone(),
            }
        }),
        ChangesetInput::CommitsCount { count } => Some(ChangeSpec::Commits(CommitsSpec {
            count: Some(*count),
            ..Default::default()
        })),
        ChangesetInput::CommitsSince { sha } => Some(ChangeSpec::Commits(CommitsSpec {
            start_sha: Some(sha.clone()),
            ..Default::default()
        })),
        ChangesetInput::CommitShas { shas } => Some(ChangeSpec::Commits(CommitsSpec {
            shas: Some(shas.clone()),
            ..Default::default()
        })),
        ChangesetInput::CommitRange {
            start_sha: Some(start_sha),
            end_sha: Some(end_sha),
            include_start,
        } => Some(ChangeSpec::Commits(CommitsSpec {
            start_sha: Some(start_sha.clone()),
            end_sha: Some(end_sha.clone()),
            include_start_commit: include_start.then_some(true),
            ..Default::default()
        })),
        ChangesetInput::CommitRange { .. } => None,
        ChangesetInput::Tags { start, end } => start.as_ref().map(|start| ChangeSpec::Tags {
            start: start.clone(),
            end: end.clone(),
        }),
    };

    spec.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn mapped(changeset: ChangesetInput) -> serde_json::Value {
        serde_json::to_value(map_changeset(&changeset)).unwrap()
    }

    #[test]
    fn test_releases() {
        assert_eq!(
            mapped(ChangesetInput::Releases { count: 2 }),
            json!([{"releases": {"count": 2}}])
        );
    }

    #[test]
    fn test_time_range() {
        assert_eq!(
            mapped(ChangesetInput::TimeRange {
                start: Some("2024-01-01T00:00:00Z".into()),
                end: Some("2024-02-01T00:00:00Z".into()),
            }),
            json!([{"timeRange": {"start": "2024-01-01T00:00:00Z", "end": "2024-02-01T00:00:00Z"}}])
        );
        assert_eq!(
            mapped(ChangesetInput::TimeRange {
                start: Some("2024-01-01".into()),
                end: None,
            }),
            json!([{"timeRange": {"start": "2024-01-01"}}])
        );
    }

    #[test]
    fn test_time_range_without_start_maps_to_nothing() {
        assert!(map_changeset(&ChangesetInput::TimeRange {
            start: None,
            end: Some("2024-02-01".into()),
        })
        .is_empty());
    }

    #[test]
    fn test_commit_shapes() {
        assert_eq!(
            mapped(ChangesetInput::CommitsCount { count: 5 }),
            json!([{"commits": {"count": 5}}])
        );
        assert_eq!(
            mapped(ChangesetInput::CommitsSince { sha: "abc123".into() }),
            json!([{"commits": {"startSha": "abc123"}}])
        );
        assert_eq!(
            mapped(ChangesetInput::CommitShas {
                shas: vec!["a1".into(), "b2".into()]
            }),
            json!([{"commits": {"shas": ["a1", "b2"]}}])
        );
    }

    #[test]
    fn test_commit_range() {
        assert_eq!(
            mapped(ChangesetInput::CommitRange {
                start_sha: Some("aaa".into()),
                end_sha: Some("bbb".into()),
                include_start: true,
            }),
            json!([{"commits": {"startSha": "aaa", "endSha": "bbb", "includeStartCommit": true}}])
        );
        assert_eq!(
            mapped(ChangesetInput::CommitRange {
                start_sha: Some("aaa".into()),
                end_sha: Some("bbb".into()),
                include_start: false,
            }),
            json!([{"commits": {"startSha": "aaa", "endSha": "bbb"}}])
        );
    }

    #[test]
    fn test_incomplete_commit_range_maps_to_nothing() {
        assert!(map_changeset(&ChangesetInput::CommitRange {
            start_sha: Some("aaa".into()),
            end_sha: None,
            include_start: false,
        })
        .is_empty());
        assert!(map_changeset(&ChangesetInput::CommitRange {
            start_sha: None,
            end_sha: None,
            include_start: true,
        })
        .is_empty());
    }

    #[test]
    fn test_tags() {
        assert_eq!(
            mapped(ChangesetInput::Tags {
                start: Some("v1.0.0".into()),
                end: None,
            }),
            json!([{"tags": {"start": "v1.0.0"}}])
        );
        assert!(map_changeset(&ChangesetInput::Tags {
            start: None,
            end: Some("v2".into()),
        })
        .is_empty());
    }
}
