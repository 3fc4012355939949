//! Single-run pipeline from inputs to job outputs
//!
//! [`run`] is the only place errors stop propagating: every failure from the
//! stages below is reported through [`ActionHost::fail`] exactly once.

use crate::changeset::map_changeset;
use crate::error::{Error, Result};
use crate::event::{infer_source_connection, smart_defaults, EventContext};
use crate::host::ActionHost;
use crate::http::{JobSubmitter, Transport};
use crate::inputs::{names, read_inputs};
use crate::output::JobOutputs;
use crate::types::{ActionInputs, DocHolidayRequest, DocRequest};

/// Run the action once
///
/// Returns `true` when a job was created. On failure the host has been
/// told why and no outputs were set.
pub async fn run<H, T>(host: &H, ctx: &EventContext, submitter: &JobSubmitter<T>) -> bool
where
    H: ActionHost + ?Sized,
    T: Transport,
{
    match execute(host, ctx, submitter).await {
        Ok(outputs) => {
            tracing::info!(job_id = %outputs.job_id, state = %outputs.job_state, "Job created");
            true
        }
        Err(err) => {
            tracing::debug!(kind = ?err.kind(), "Action failed");
            host.fail(&err.to_string());
            false
        }
    }
}

async fn execute<H, T>(
    host: &H,
    ctx: &EventContext,
    submitter: &JobSubmitter<T>,
) -> Result<JobOutputs>
where
    H: ActionHost + ?Sized,
    T: Transport,
{
    let raw_token = host.input(names::API_TOKEN);
    let token = raw_token.trim();
    if !token.is_empty() {
        host.mask(token);
    }

    let inputs = read_inputs(host)?;
    let request = assemble_request(host, &inputs, ctx)?;

    host.info(&format!(
        "Creating doc.holiday job \"{}\" for {}",
        request.doc_request.title, request.doc_request.source_connection
    ));
    let response = submitter
        .submit(host, &inputs.api_token, &request)
        .await?;

    let outputs = JobOutputs::from_response(&response);
    for (name, value) in outputs.entries() {
        host.set_output(name, value);
    }

    host.info(&format!(
        "Successfully created job {} (state: {})",
        outputs.job_id, outputs.job_state
    ));
    host.info(&format!("View job: {}", outputs.job_url));
    host.summary(&outputs.summary_markdown());

    Ok(outputs)
}

/// Build the request body from validated inputs and the event context
///
/// Release and merge events take title and body from the event payload;
/// every other mode uses the supplied title and body.
pub fn assemble_request<H: ActionHost + ?Sized>(
    host: &H,
    inputs: &ActionInputs,
    ctx: &EventContext,
) -> Result<DocHolidayRequest> {
    let (title, body, event_type) = match inputs.smart_event() {
        Some(event) => {
            let defaults = smart_defaults(event, &ctx.payload)?;
            if defaults.title.is_empty() || defaults.body.is_empty() {
                return Err(Error::TitleAndBodyRequired);
            }
            host.info(&format!("Using {} event context for title and body", event.as_str()));
            (defaults.title, defaults.body, Some(defaults.event_type))
        }
        None => match (&inputs.title, &inputs.body) {
            (Some(title), Some(body)) => (title.clone(), body.clone(), None),
            _ => return Err(Error::TitleAndBodyRequired),
        },
    };

    let source_connection = match &inputs.source_connection {
        Some(connection) => connection.clone(),
        None => {
            let repo = ctx.repo.as_ref().ok_or(Error::MissingRepository)?;
            let inferred = infer_source_connection(repo);
            tracing::debug!(source_connection = %inferred, "Inferred source connection");
            inferred
        }
    };

    let changes = inputs
        .changeset
        .as_ref()
        .map(map_changeset)
        .filter(|changes| !changes.is_empty());
    if let Some(changes) = &changes {
        host.info(&format!("Added changeset: {}", describe(changes)));
        host.warning(
            "The changeset input overrides any change range described in the body text",
        );
    }

    Ok(DocHolidayRequest {
        doc_request: DocRequest {
            title,
            body,
            source_connection,
            publications: inputs.publications.clone(),
            labels: inputs.labels.clone(),
            comments: inputs.comments.clone(),
            relevant_links: inputs.relevant_links.clone(),
            event_type,
            changes,
        },
    })
}

fn describe(changes: &[crate::types::ChangeSpec]) -> String {
    serde_json::to_string(changes).unwrap_or_else(|_| format!("{} entries", changes.len()))
}
