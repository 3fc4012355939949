#[cfg(target_env = "musl")]
#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

mod host;

use anyhow::{Context, Result};
use clap::Parser;
use docholiday_core::event::{EventContext, EventPayload};
use docholiday_core::http::{JobSubmitter, ReqwestTransport, DEFAULT_API_URL};
use docholiday_core::inputs::names;
use docholiday_core::ActionHost;
use host::{GithubActionsHost, OutputFormat, RunnerFiles};
use std::collections::BTreeMap;
use std::path::PathBuf;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "docholiday",
    version,
    about = "Create doc.holiday documentation jobs from GitHub Actions"
)]
struct Cli {
    #[command(flatten)]
    inputs: ActionArgs,

    /// doc.holiday API base URL
    #[arg(long, env = "DOC_HOLIDAY_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    /// Output format: gha, json, text (default: auto-detect)
    #[arg(long, env = "DOCHOLIDAY_OUTPUT_FORMAT")]
    output_format: Option<String>,

    /// Log filter for diagnostics on stderr (trace, debug, info, warn, error)
    #[arg(long, env = "DOCHOLIDAY_LOG", default_value = "warn")]
    log_level: String,

    /// Event payload written by the runner
    #[arg(long, env = "GITHUB_EVENT_PATH")]
    event_path: Option<PathBuf>,

    /// Repository as owner/repo
    #[arg(long, env = "GITHUB_REPOSITORY")]
    repository: Option<String>,

    /// Outputs file written by the runner
    #[arg(long, env = "GITHUB_OUTPUT")]
    github_output: Option<PathBuf>,

    /// Job summary file
    #[arg(long, env = "GITHUB_STEP_SUMMARY")]
    step_summary: Option<PathBuf>,
}

/// Action inputs; the runner passes `with:` values as `INPUT_<NAME>`
#[derive(clap::Args)]
struct ActionArgs {
    /// doc.holiday API token
    #[arg(long, env = "INPUT_API-TOKEN", hide_env_values = true)]
    api_token: Option<String>,

    /// Event kind: release, merge or custom
    #[arg(long, env = "INPUT_EVENT-TYPE")]
    event_type: Option<String>,

    /// Job title (manual mode)
    #[arg(long, env = "INPUT_TITLE")]
    title: Option<String>,

    /// Job body (manual mode)
    #[arg(long, env = "INPUT_BODY")]
    body: Option<String>,

    /// Publication targets (comma-separated)
    #[arg(long, env = "INPUT_PUBLICATIONS")]
    publications: Option<String>,

    /// Source connection as owner/repo (default: the current repository)
    #[arg(long, env = "INPUT_SOURCE-CONNECTION")]
    source_connection: Option<String>,

    /// Labels (comma-separated)
    #[arg(long, env = "INPUT_LABELS")]
    labels: Option<String>,

    /// Comments (one per line)
    #[arg(long, env = "INPUT_COMMENTS")]
    comments: Option<String>,

    /// Relevant links (comma-separated)
    #[arg(long, env = "INPUT_RELEVANT-LINKS")]
    relevant_links: Option<String>,

    /// Number of recent releases
    #[arg(long, env = "INPUT_RELEASES-COUNT")]
    releases_count: Option<String>,

    /// Time range start
    #[arg(long, env = "INPUT_TIME-RANGE-START")]
    time_range_start: Option<String>,

    /// Time range end
    #[arg(long, env = "INPUT_TIME-RANGE-END")]
    time_range_end: Option<String>,

    /// Number of recent commits
    #[arg(long, env = "INPUT_COMMITS-COUNT")]
    commits_count: Option<String>,

    /// Commits after this SHA
    #[arg(long, env = "INPUT_COMMITS-SINCE-SHA")]
    commits_since_sha: Option<String>,

    /// Explicit commit SHAs (comma-separated)
    #[arg(long, env = "INPUT_COMMITS-SHAS")]
    commits_shas: Option<String>,

    /// Commit range start
    #[arg(long, env = "INPUT_COMMITS-START-SHA")]
    commits_start_sha: Option<String>,

    /// Commit range end
    #[arg(long, env = "INPUT_COMMITS-END-SHA")]
    commits_end_sha: Option<String>,

    /// Include the range start commit ("true" to enable)
    #[arg(long, env = "INPUT_COMMITS-INCLUDE-START")]
    commits_include_start: Option<String>,

    /// Tag range start
    #[arg(long, env = "INPUT_TAGS-START")]
    tags_start: Option<String>,

    /// Tag range end
    #[arg(long, env = "INPUT_TAGS-END")]
    tags_end: Option<String>,
}

impl ActionArgs {
    /// Named inputs, dropping unset ones
    fn into_map(self) -> BTreeMap<&'static str, String> {
        [
            (names::API_TOKEN, self.api_token),
            (names::EVENT_TYPE, self.event_type),
            (names::TITLE, self.title),
            (names::BODY, self.body),
            (names::PUBLICATIONS, self.publications),
            (names::SOURCE_CONNECTION, self.source_connection),
            (names::LABELS, self.labels),
            (names::COMMENTS, self.comments),
            (names::RELEVANT_LINKS, self.relevant_links),
            (names::RELEASES_COUNT, self.releases_count),
            (names::TIME_RANGE_START, self.time_range_start),
            (names::TIME_RANGE_END, self.time_range_end),
            (names::COMMITS_COUNT, self.commits_count),
            (names::COMMITS_SINCE_SHA, self.commits_since_sha),
            (names::COMMITS_SHAS, self.commits_shas),
            (names::COMMITS_START_SHA, self.commits_start_sha),
            (names::COMMITS_END_SHA, self.commits_end_sha),
            (names::COMMITS_INCLUDE_START, self.commits_include_start),
            (names::TAGS_START, self.tags_start),
            (names::TAGS_END, self.tags_end),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|v| (name, v)))
        .collect()
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);
    std::process::exit(run(cli));
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_new(log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .init();
}

/// Filter empty string from Option (env vars may produce "" for empty values)
fn clean_opt(v: &Option<String>) -> Option<&str> {
    v.as_deref().filter(|s| !s.is_empty())
}

fn run(cli: Cli) -> i32 {
    let format = OutputFormat::detect(
        clean_opt(&cli.output_format),
        std::env::var_os("GITHUB_ACTIONS").is_some(),
    );
    let files = RunnerFiles {
        output: cli.github_output.clone().filter(|p| !p.as_os_str().is_empty()),
        step_summary: cli.step_summary.clone().filter(|p| !p.as_os_str().is_empty()),
    };
    let host = GithubActionsHost::new(cli.inputs.into_map(), format, files);

    if let Err(err) = execute(&host, cli.event_path, cli.repository, &cli.api_url) {
        host.fail(&format!("{err:#}"));
    }
    host.finish();

    if host.failed() {
        1
    } else {
        0
    }
}

fn execute(
    host: &GithubActionsHost,
    event_path: Option<PathBuf>,
    repository: Option<String>,
    api_url: &str,
) -> Result<()> {
    let ctx = load_context(event_path, clean_opt(&repository));
    let submitter = JobSubmitter::new(ReqwestTransport::new(), api_url);
    tracing::debug!(endpoint = submitter.endpoint(), repo = ?ctx.repo, "Starting");

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .context("Failed to build tokio runtime")?;
    runtime.block_on(docholiday_core::run(host, &ctx, &submitter));
    Ok(())
}

/// Payload problems only matter to release and merge runs, so they are
/// carried in the context instead of failing here
fn load_context(event_path: Option<PathBuf>, repository: Option<&str>) -> EventContext {
    let payload = match event_path.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => EventPayload::from_file(&path).unwrap_or_else(|err| {
            let message = format!("Failed to load event payload from {}: {}", path.display(), err);
            tracing::warn!("{message}");
            EventPayload::unreadable(message)
        }),
        None => EventPayload::default(),
    };
    EventContext::new(payload, repository)
}
