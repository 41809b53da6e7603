//! End-to-end audit pipeline: URL → fetch → normalize → compose → model → render.
//!
//! One straight-line sequence with a single branch: a non-200 fetch short
//! circuits before the model is ever invoked.

use tracing::{info, instrument};
use url::Url;

use webaudit_fetcher::{FetchOutcome, PageFetcher};
use webaudit_shared::Result;

use crate::gemini::GeminiClient;
use crate::render::unescape_color_codes;
use crate::rubric::{Rubric, compose_prompt};

/// Outcome of a complete audit run.
#[derive(Debug, Clone)]
pub enum AuditOutcome {
    /// The model's audit text, with color tokens already unescaped.
    Report(String),
    /// The page fetch returned a non-200 status; no audit was attempted.
    FetchFailed { status: u16 },
}

/// Run the full audit for `url`.
///
/// The fetcher and model client are constructed by the caller and passed in
/// explicitly, which keeps the remote dependency substitutable in tests.
#[instrument(skip_all, fields(url = %url, model = client.model()))]
pub async fn run_audit(
    url: &Url,
    rubric: &Rubric,
    fetcher: &PageFetcher,
    client: &GeminiClient,
) -> Result<AuditOutcome> {
    let body = match fetcher.fetch(url).await? {
        FetchOutcome::Ok { body, .. } => body,
        FetchOutcome::HttpError { status } => {
            info!(status, "fetch failed, skipping audit");
            return Ok(AuditOutcome::FetchFailed { status });
        }
    };

    let markup = webaudit_markup::normalize(&body);
    let prompt = compose_prompt(rubric, &markup);

    info!(
        markup_len = markup.len(),
        prompt_len = prompt.len(),
        "submitting audit prompt"
    );

    let audit = client.generate(&prompt).await?;

    info!(audit_len = audit.len(), "audit received");

    Ok(AuditOutcome::Report(unescape_color_codes(&audit)))
}
