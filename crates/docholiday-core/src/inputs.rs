//! Action input reading and validation

use crate::error::{Error, Result};
use crate::host::ActionHost;
use crate::types::{ActionInputs, ChangesetInput, EventType};

/// Action input names
pub mod names {
    #![allow(missing_docs)]
    pub const API_TOKEN: &str = "api-token";
    pub const EVENT_TYPE: &str = "event-type";
    pub const TITLE: &str = "title";
    pub const BODY: &str = "body";
    pub const PUBLICATIONS: &str = "publications";
    pub const SOURCE_CONNECTION: &str = "source-connection";
    pub const LABELS: &str = "labels";
    pub const COMMENTS: &str = "comments";
    pub const RELEVANT_LINKS: &str = "relevant-links";
    pub const RELEASES_COUNT: &str = "releases-count";
    pub const TIME_RANGE_START: &str = "time-range-start";
    pub const TIME_RANGE_END: &str = "time-range-end";
    pub const COMMITS_COUNT: &str = "commits-count";
    pub const COMMITS_SINCE_SHA: &str = "commits-since-sha";
    pub const COMMITS_SHAS: &str = "commits-shas";
    pub const COMMITS_START_SHA: &str = "commits-start-sha";
    pub const COMMITS_END_SHA: &str = "commits-end-sha";
    pub const COMMITS_INCLUDE_START: &str = "commits-include-start";
    pub const TAGS_START: &str = "tags-start";
    pub const TAGS_END: &str = "tags-end";

    /// Every input, in declaration order
    pub const ALL: [&str; 20] = [
        API_TOKEN,
        EVENT_TYPE,
        TITLE,
        BODY,
        PUBLICATIONS,
        SOURCE_CONNECTION,
        LABELS,
        COMMENTS,
        RELEVANT_LINKS,
        RELEASES_COUNT,
        TIME_RANGE_START,
        TIME_RANGE_END,
        COMMITS_COUNT,
        COMMITS_SINCE_SHA,
        COMMITS_SHAS,
        COMMITS_START_SHA,
        COMMITS_END_SHA,
        COMMITS_INCLUDE_START,
        TAGS_START,
        TAGS_END,
    ];
}

/// Split a comma-separated value into trimmed, non-empty entries
///
/// Returns `None` rather than an empty `Vec` when nothing is left.
pub fn split_list(raw: &str) -> Option<Vec<String>> {
    collect_entries(raw.split(','))
}

/// Split a newline-separated value into trimmed, non-empty lines
pub fn split_lines(raw: &str) -> Option<Vec<String>> {
    collect_entries(raw.lines())
}

fn collect_entries<'a>(parts: impl Iterator<Item = &'a str>) -> Option<Vec<String>> {
    let entries: Vec<String> = parts
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();
    if entries.is_empty() {
        None
    } else {
        Some(entries)
    }
}

/// Changeset kinds in their fixed evaluation order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ChangesetKind {
    /// `releases-count`
    ReleasesCount,
    /// `time-range-start` / `time-range-end`
    TimeRange,
    /// `commits-count`
    CommitsCount,
    /// `commits-since-sha`
    CommitsSinceSha,
    /// `commits-shas`
    CommitsShas,
    /// `commits-start-sha` / `commits-end-sha` / `commits-include-start`
    CommitsRange,
    /// `tags-start` / `tags-end`
    Tags,
}

impl ChangesetKind {
    /// Every kind, in evaluation order
    pub const ALL: [ChangesetKind; 7] = [
        Self::ReleasesCount,
        Self::TimeRange,
        Self::CommitsCount,
        Self::CommitsSinceSha,
        Self::CommitsShas,
        Self::CommitsRange,
        Self::Tags,
    ];

    /// Name used in error messages
    #[inline]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::ReleasesCount => "releases-count",
            Self::TimeRange => "time-range",
            Self::CommitsCount => "commits-count",
            Self::CommitsSinceSha => "commits-since-sha",
            Self::CommitsShas => "commits-shas",
            Self::CommitsRange => "commits-range",
            Self::Tags => "tags",
        }
    }
}

/// Raw, unvalidated changeset inputs; `None` means unset
///
/// Field names follow the input names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[allow(missing_docs)]
pub struct RawChangeset {
    pub releases_count: Option<String>,
    pub time_range_start: Option<String>,
    pub time_range_end: Option<String>,
    pub commits_count: Option<String>,
    pub commits_since_sha: Option<String>,
    pub commits_shas: Option<Vec<String>>,
    pub commits_start_sha: Option<String>,
    pub commits_end_sha: Option<String>,
    pub commits_include_start: bool,
    pub tags_start: Option<String>,
    pub tags_end: Option<String>,
}

impl RawChangeset {
    /// Collect the changeset inputs from the host
    pub fn from_host<H: ActionHost + ?Sized>(host: &H) -> Self {
        Self {
            releases_count: optional(host, names::RELEASES_COUNT),
            time_range_start: optional(host, names::TIME_RANGE_START),
            time_range_end: optional(host, names::TIME_RANGE_END),
            commits_count: optional(host, names::COMMITS_COUNT),
            commits_since_sha: optional(host, names::COMMITS_SINCE_SHA),
            commits_shas: split_list(&host.input(names::COMMITS_SHAS)),
            commits_start_sha: optional(host, names::COMMITS_START_SHA),
            commits_end_sha: optional(host, names::COMMITS_END_SHA),
            commits_include_start: host.input(names::COMMITS_INCLUDE_START).trim() == "true",
            tags_start: optional(host, names::TAGS_START),
            tags_end: optional(host, names::TAGS_END),
        }
    }

    /// Whether at least one field of `kind` is set
    pub fn is_populated(&self, kind: ChangesetKind) -> bool {
        match kind {
            ChangesetKind::ReleasesCount => self.releases_count.is_some(),
            ChangesetKind::TimeRange => {
                self.time_range_start.is_some() || self.time_range_end.is_some()
            }
            ChangesetKind::CommitsCount => self.commits_count.is_some(),
            ChangesetKind::CommitsSinceSha => self.commits_since_sha.is_some(),
            ChangesetKind::CommitsShas => self.commits_shas.is_some(),
            ChangesetKind::CommitsRange => {
                self.commits_start_sha.is_some()
                    || self.commits_end_sha.is_some()
                    || self.commits_include_start
            }
            ChangesetKind::Tags => self.tags_start.is_some() || self.tags_end.is_some(),
        }
    }

    /// Populated kinds, in evaluation order
    pub fn populated_kinds(&self) -> Vec<ChangesetKind> {
        ChangesetKind::ALL
            .into_iter()
            .filter(|&kind| self.is_populated(kind))
            .collect()
    }

    /// Validate and select the single populated kind
    ///
    /// Zero populated kinds is not an error: it yields `Ok(None)`.
    pub fn into_changeset(self) -> Result<Option<ChangesetInput>> {
        let kinds = self.populated_kinds();
        let kind = match kinds.as_slice() {
            [] => return Ok(None),
            [kind] => *kind,
            _ => {
                return Err(Error::MultipleChangesetTypes(
                    kinds.iter().map(ChangesetKind::as_str).collect(),
                ))
            }
        };

        let changeset = match kind {
            ChangesetKind::ReleasesCount => ChangesetInput::Releases {
                count: parse_count(names::RELEASES_COUNT, self.releases_count.as_deref())?,
            },
            ChangesetKind::TimeRange => ChangesetInput::TimeRange {
                start: self.time_range_start,
                end: self.time_range_end,
            },
            ChangesetKind::CommitsCount => ChangesetInput::CommitsCount {
                count: parse_count(names::COMMITS_COUNT, self.commits_count.as_deref())?,
            },
            ChangesetKind::CommitsSinceSha => ChangesetInput::CommitsSince {
                sha: self.commits_since_sha.unwrap_or_default(),
            },
            ChangesetKind::CommitsShas => ChangesetInput::CommitShas {
                shas: self.commits_shas.unwrap_or_default(),
            },
            ChangesetKind::CommitsRange => ChangesetInput::CommitRange {
                start_sha: self.commits_start_sha,
                end_sha: self.commits_end_sha,
                include_start: self.commits_include_start,
            },
            ChangesetKind::Tags => ChangesetInput::Tags {
                start: self.tags_start,
                end: self.tags_end,
            },
        };
        Ok(Some(changeset))
    }
}

/// Parse a base-10 count input
fn parse_count(name: &str, raw: Option<&str>) -> Result<u32> {
    let raw = raw.unwrap_or_default();
    raw.parse::<u32>().map_err(|e| Error::InvalidInput {
        input: name.to_string(),
        message: format!("expected a non-negative integer, got '{}' ({})", raw, e),
    })
}

/// Trimmed input value, `None` when empty
fn optional<H: ActionHost + ?Sized>(host: &H, name: &str) -> Option<String> {
    let value = host.input(name);
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Read and validate every input
///
/// Manual mode (no event type, `custom`, or an unrecognized literal) needs
/// both a title and a body. Release and merge modes defer that check until
/// smart defaults have been computed.
pub fn read_inputs<H: ActionHost + ?Sized>(host: &H) -> Result<ActionInputs> {
    let api_token = optional(host, names::API_TOKEN)
        .ok_or_else(|| Error::MissingRequiredInput(names::API_TOKEN.to_string()))?;

    let inputs = ActionInputs {
        api_token,
        event_type: optional(host, names::EVENT_TYPE).map(|s| EventType::parse(&s)),
        title: optional(host, names::TITLE),
        body: optional(host, names::BODY),
        publications: split_list(&host.input(names::PUBLICATIONS)),
        source_connection: optional(host, names::SOURCE_CONNECTION),
        labels: split_list(&host.input(names::LABELS)),
        comments: split_lines(&host.input(names::COMMENTS)),
        relevant_links: split_list(&host.input(names::RELEVANT_LINKS)),
        changeset: RawChangeset::from_host(host).into_changeset()?,
    };

    if inputs.smart_event().is_none() && (inputs.title.is_none() || inputs.body.is_none()) {
        return Err(Error::TitleAndBodyRequired);
    }

    tracing::debug!(?inputs, "Inputs validated");
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::SmartEvent;
    use assert_matches::assert_matches;
    use std::collections::HashMap;

    struct MapHost(HashMap<&'static str, &'static str>);

    impl MapHost {
        fn new(pairs: &[(&'static str, &'static str)]) -> Self {
            Self(pairs.iter().copied().collect())
        }
    }

    impl ActionHost for MapHost {
        fn input(&self, name: &str) -> String {
            self.0.get(name).copied().unwrap_or_default().to_string()
        }
        fn set_output(&self, _name: &str, _value: &str) {}
        fn info(&self, _message: &str) {}
        fn warning(&self, _message: &str) {}
        fn fail(&self, _message: &str) {}
    }

    #[test]
    fn test_split_list_drops_empty_segments() {
        assert_eq!(
            split_list("a,,b,"),
            Some(vec!["a".to_string(), "b".to_string()])
        );
        assert_eq!(
            split_list(" docs , blog "),
            Some(vec!["docs".to_string(), "blog".to_string()])
        );
    }

    #[test]
    fn test_split_list_empty_is_unset() {
        assert_eq!(split_list(""), None);
        assert_eq!(split_list(" , ,"), None);
    }

    #[test]
    fn test_split_lines_trims_and_drops_blank_lines() {
        assert_eq!(
            split_lines("  x  \n\ny  \n"),
            Some(vec!["x".to_string(), "y".to_string()])
        );
        assert_eq!(
            split_lines("first\r\nsecond"),
            Some(vec!["first".to_string(), "second".to_string()])
        );
        assert_eq!(split_lines("\n \n"), None);
    }

    #[test]
    fn test_missing_token() {
        let host = MapHost::new(&[("title", "T"), ("body", "B")]);
        assert_matches!(
            read_inputs(&host),
            Err(Error::MissingRequiredInput(name)) if name == "api-token"
        );
    }

    #[test]
    fn test_blank_token_is_missing() {
        let host = MapHost::new(&[("api-token", "   "), ("title", "T"), ("body", "B")]);
        assert_matches!(read_inputs(&host), Err(Error::MissingRequiredInput(_)));
    }

    #[test]
    fn test_manual_mode_requires_title_and_body() {
        let host = MapHost::new(&[("api-token", "t"), ("title", "T")]);
        assert_matches!(read_inputs(&host), Err(Error::TitleAndBodyRequired));

        let host = MapHost::new(&[("api-token", "t"), ("event-type", "custom"), ("body", "B")]);
        assert_matches!(read_inputs(&host), Err(Error::TitleAndBodyRequired));
    }

    #[test]
    fn test_unrecognized_event_type_behaves_like_custom() {
        let host = MapHost::new(&[("api-token", "t"), ("event-type", "deploy")]);
        assert_matches!(read_inputs(&host), Err(Error::TitleAndBodyRequired));

        let host = MapHost::new(&[
            ("api-token", "t"),
            ("event-type", "deploy"),
            ("title", "T"),
            ("body", "B"),
        ]);
        let inputs = read_inputs(&host).unwrap();
        assert_eq!(inputs.event_type, Some(EventType::Unrecognized("deploy".into())));
        assert_eq!(inputs.smart_event(), None);
    }

    #[test]
    fn test_smart_modes_defer_title_check() {
        for kind in ["release", "merge"] {
            let host = MapHost(HashMap::from([("api-token", "t"), ("event-type", kind)]));
            let inputs = read_inputs(&host).unwrap();
            assert!(inputs.title.is_none());
            assert!(inputs.smart_event().is_some());
        }
        let host = MapHost::new(&[("api-token", "t"), ("event-type", "merge")]);
        assert_eq!(read_inputs(&host).unwrap().smart_event(), Some(SmartEvent::Merge));
    }

    #[test]
    fn test_list_inputs_are_parsed() {
        let host = MapHost::new(&[
            ("api-token", "t"),
            ("title", "T"),
            ("body", "B"),
            ("publications", "docs,changelog"),
            ("labels", ""),
            ("comments", "one\n\ntwo"),
            ("relevant-links", "https://a, https://b"),
            ("source-connection", " acme/widgets "),
        ]);
        let inputs = read_inputs(&host).unwrap();
        assert_eq!(
            inputs.publications,
            Some(vec!["docs".to_string(), "changelog".to_string()])
        );
        assert_eq!(inputs.labels, None);
        assert_eq!(
            inputs.comments,
            Some(vec!["one".to_string(), "two".to_string()])
        );
        assert_eq!(
            inputs.relevant_links,
            Some(vec!["https://a".to_string(), "https://b".to_string()])
        );
        assert_eq!(inputs.source_connection.as_deref(), Some("acme/widgets"));
        assert_eq!(inputs.changeset, None);
    }

    #[test]
    fn test_multiple_changeset_kinds_are_named_in_order() {
        let host = MapHost::new(&[
            ("api-token", "t"),
            ("title", "T"),
            ("body", "B"),
            ("tags-start", "v1"),
            ("releases-count", "2"),
            ("commits-shas", "abc,def"),
        ]);
        assert_matches!(
            read_inputs(&host),
            Err(Error::MultipleChangesetTypes(kinds))
                if kinds == vec!["releases-count", "commits-shas", "tags"]
        );
    }

    #[test]
    fn test_single_changeset_kinds() {
        let raw = RawChangeset {
            commits_count: Some("5".into()),
            ..Default::default()
        };
        assert_eq!(
            raw.into_changeset().unwrap(),
            Some(ChangesetInput::CommitsCount { count: 5 })
        );

        let raw = RawChangeset {
            commits_start_sha: Some("abc".into()),
            commits_end_sha: Some("def".into()),
            commits_include_start: true,
            ..Default::default()
        };
        assert_eq!(
            raw.into_changeset().unwrap(),
            Some(ChangesetInput::CommitRange {
                start_sha: Some("abc".into()),
                end_sha: Some("def".into()),
                include_start: true,
            })
        );

        let raw = RawChangeset {
            time_range_end: Some("2024-02-01".into()),
            ..Default::default()
        };
        assert_eq!(
            raw.into_changeset().unwrap(),
            Some(ChangesetInput::TimeRange {
                start: None,
                end: Some("2024-02-01".into()),
            })
        );
    }

    #[test]
    fn test_include_start_counts_only_when_true() {
        let host = MapHost::new(&[("commits-include-start", "false")]);
        assert!(RawChangeset::from_host(&host).populated_kinds().is_empty());

        let host = MapHost::new(&[("commits-include-start", "TRUE")]);
        assert!(!RawChangeset::from_host(&host).commits_include_start);

        let host = MapHost::new(&[("commits-include-start", "true")]);
        assert_eq!(
            RawChangeset::from_host(&host).populated_kinds(),
            vec![ChangesetKind::CommitsRange]
        );
    }

    #[test]
    fn test_non_numeric_count_is_invalid() {
        let raw = RawChangeset {
            releases_count: Some("three".into()),
            ..Default::default()
        };
        assert_matches!(
            raw.into_changeset(),
            Err(Error::InvalidInput { input, .. }) if input == "releases-count"
        );

        let raw = RawChangeset {
            commits_count: Some("-1".into()),
            ..Default::default()
        };
        assert_matches!(raw.into_changeset(), Err(Error::InvalidInput { .. }));
    }

    #[test]
    fn test_no_changeset_is_none() {
        assert_eq!(RawChangeset::default().into_changeset().unwrap(), None);
    }

    #[test]
    fn test_every_input_name_is_unique() {
        let mut seen = std::collections::HashSet::new();
        for name in names::ALL {
            assert!(seen.insert(name), "duplicate input name {}", name);
        }
    }
}
