//! CLI argument definitions, tracing setup, and the audit command.

use clap::Parser;
use color_eyre::eyre::{Result, eyre};
use colored::Colorize;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;
use url::Url;

use webaudit_core::{AuditOutcome, GeminiClient, Rubric, run_audit};
use webaudit_fetcher::PageFetcher;
use webaudit_shared::{api_key, load_config};

/// Fixed user-facing message for any non-200 fetch. All HTTP failures look
/// the same to the user, and the process still exits 0.
const FETCH_FAILURE_MESSAGE: &str = "❗ Something went wrong requesting the page.";

/// Disclaimer appended after every audit.
const DISCLAIMER: &str =
    "⚠️ The AI can make mistakes. This audit reviews the page structure as served to us, not the rendered page.";

// ---------------------------------------------------------------------------
// CLI structure
// ---------------------------------------------------------------------------

/// webaudit — ask Gemini to audit a web page's SEO.
#[derive(Parser)]
#[command(
    name = "webaudit",
    version,
    about = "Fetch a web page and have Gemini audit its SEO, performance, accessibility, and best practices.",
    long_about = None,
)]
pub(crate) struct Cli {
    /// The URL of the page to audit.
    pub url: String,

    /// Log format: text (default) or json.
    #[arg(long, default_value = "text", global = true)]
    pub log_format: LogFormat,

    /// Verbosity level (-v, -vv, -vvv).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,
}

/// Log output format.
#[derive(Clone, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    Text,
    Json,
}

// ---------------------------------------------------------------------------
// Tracing setup
// ---------------------------------------------------------------------------

/// Initialize tracing based on CLI flags.
pub(crate) fn init_tracing(cli: &Cli) {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter = match cli.verbose {
        0 => "webaudit=warn",
        1 => "webaudit=info",
        2 => "webaudit=debug",
        _ => "webaudit=trace",
    };

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    match cli.log_format {
        LogFormat::Text => {
            fmt().with_env_filter(env_filter).with_target(false).init();
        }
        LogFormat::Json => {
            fmt().json().with_env_filter(env_filter).init();
        }
    }
}

// ---------------------------------------------------------------------------
// Audit command
// ---------------------------------------------------------------------------

/// Run the audit for the given URL.
pub(crate) async fn run(cli: Cli) -> Result<()> {
    let url = Url::parse(&cli.url).map_err(|e| eyre!("invalid URL '{}': {e}", cli.url))?;

    let config = load_config()?;
    let key = api_key(&config)?;

    let rubric = match &config.gemini.rubric_path {
        Some(path) => Rubric::from_file(std::path::Path::new(path))?,
        None => Rubric::builtin(),
    };

    let fetcher = PageFetcher::new()?;
    let client = GeminiClient::new(key, &config.gemini.model, config.generation.clone());

    info!(url = %url, model = %config.gemini.model, "starting audit");

    println!("{}\n", format!("🔍 Auditing '{url}'...").blue());

    let spinner = audit_spinner();
    let outcome = run_audit(&url, &rubric, &fetcher, &client).await;
    spinner.finish_and_clear();

    match outcome? {
        AuditOutcome::Report(report) => {
            println!("{report}");
            println!("\n\n{}", DISCLAIMER.yellow());
        }
        AuditOutcome::FetchFailed { status } => {
            info!(status, "fetch failed");
            println!("\n\n{}", FETCH_FAILURE_MESSAGE.red());
        }
    }

    Ok(())
}

/// Spinner shown while the fetch and the model call are in flight.
fn audit_spinner() -> ProgressBar {
    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap()
            .tick_strings(&["⠋", "⠙", "⠹", "⠸", "⠼", "⠴", "⠦", "⠧", "⠇", "⠏"]),
    );
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner.set_message("Waiting for the audit...");
    spinner
}
