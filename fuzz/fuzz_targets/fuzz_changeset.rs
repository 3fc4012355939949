#![no_main]

use docholiday_core::changeset::map_changeset;
use docholiday_core::inputs::{names, RawChangeset};
use docholiday_core::ActionHost;
use libfuzzer_sys::fuzz_target;

const CHANGESET_INPUTS: [&str; 11] = [
    names::RELEASES_COUNT,
    names::TIME_RANGE_START,
    names::TIME_RANGE_END,
    names::COMMITS_COUNT,
    names::COMMITS_SINCE_SHA,
    names::COMMITS_SHAS,
    names::COMMITS_START_SHA,
    names::COMMITS_END_SHA,
    names::COMMITS_INCLUDE_START,
    names::TAGS_START,
    names::TAGS_END,
];

/// One input value per line, in `CHANGESET_INPUTS` order
struct LineHost(Vec<String>);

impl ActionHost for LineHost {
    fn input(&self, name: &str) -> String {
        CHANGESET_INPUTS
            .iter()
            .position(|n| *n == name)
            .and_then(|i| self.0.get(i).cloned())
            .unwrap_or_default()
    }
    fn set_output(&self, _name: &str, _value: &str) {}
    fn info(&self, _message: &str) {}
    fn warning(&self, _message: &str) {}
    fn fail(&self, _message: &str) {}
}

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);
    let host = LineHost(text.split('\n').map(str::to_string).collect());

    let raw = RawChangeset::from_host(&host);
    let kinds = raw.populated_kinds();

    match raw.into_changeset() {
        Ok(None) => assert!(kinds.is_empty()),
        Ok(Some(changeset)) => {
            assert_eq!(kinds.len(), 1);
            let changes = map_changeset(&changeset);
            assert!(changes.len() <= 1);
            let _ = serde_json::to_string(&changes);
        }
        Err(err) => {
            let _ = err.to_string();
        }
    }
});
