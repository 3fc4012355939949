#![no_main]

use docholiday_core::inputs::{split_lines, split_list};
use docholiday_core::output::safe_output_escape;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let text = String::from_utf8_lossy(data);

    if let Some(entries) = split_list(&text) {
        assert!(!entries.is_empty());
        for entry in &entries {
            assert!(!entry.is_empty());
            assert!(!entry.contains(','));
            assert_eq!(entry.trim(), entry);
        }
    }

    if let Some(lines) = split_lines(&text) {
        for line in &lines {
            assert!(!line.is_empty());
            assert!(!line.contains('\n'));
        }
    }

    let escaped = safe_output_escape(&text);
    assert!(!escaped.contains('\n') && !escaped.contains('\r'));
});
