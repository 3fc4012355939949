#![no_main]

use docholiday_core::event::{smart_defaults, EventContext, EventPayload, RepoIdentity};
use docholiday_core::SmartEvent;
use libfuzzer_sys::fuzz_target;

fuzz_target!(|data: &[u8]| {
    let Ok(text) = std::str::from_utf8(data) else {
        return;
    };

    // Repository identities must never panic either
    let _ = RepoIdentity::parse(text);

    if let Ok(payload) = EventPayload::from_json(text) {
        for event in [SmartEvent::Release, SmartEvent::Merge] {
            if let Ok(defaults) = smart_defaults(event, &payload) {
                assert_eq!(defaults.event_type, event);
                assert!(!defaults.title.is_empty());
            }
        }
        let _ = EventContext::new(payload, None);
    }
});
