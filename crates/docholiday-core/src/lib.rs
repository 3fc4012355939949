//! # docholiday-core
//!
//! Library behind the doc.holiday GitHub Action: turns workflow inputs and
//! the triggering event into one documentation job request, submits it with
//! bounded retry, and reports the created job.
//!
//! The runner and the network sit behind two seams, [`ActionHost`] and
//! [`http::Transport`], so the whole pipeline runs against in-memory fakes.
//!
//! ## Example
//!
//! ```no_run
//! use docholiday_core::event::{EventContext, EventPayload};
//! use docholiday_core::http::{JobSubmitter, ReqwestTransport, DEFAULT_API_URL};
//! use docholiday_core::ActionHost;
//!
//! # async fn example(host: &dyn ActionHost) -> Result<(), Box<dyn std::error::Error>> {
//! let payload = EventPayload::from_file(std::path::Path::new("event.json"))?;
//! let ctx = EventContext::new(payload, Some("acme/widgets"));
//! let submitter = JobSubmitter::new(ReqwestTransport::new(), DEFAULT_API_URL);
//!
//! let created = docholiday_core::run(host, &ctx, &submitter).await;
//! println!("job created: {}", created);
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs, rust_2018_idioms)]

pub mod changeset;
pub mod error;
pub mod event;
pub mod host;
pub mod http;
pub mod inputs;
pub mod orchestrator;
pub mod output;
pub mod types;

pub use error::{Error, ErrorKind, Result};
pub use host::ActionHost;
pub use orchestrator::run;
pub use types::{
    ActionInputs, ChangeSpec, ChangesetInput, DocHolidayRequest, DocHolidayResponse, EventType,
    JobState, SmartEvent,
};
