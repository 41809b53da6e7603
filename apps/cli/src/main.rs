//! webaudit CLI — AI-assisted SEO/performance/accessibility audits.
//!
//! Fetches a page, normalizes its markup, and asks Gemini to score it
//! against a fixed Lighthouse-style rubric.

mod commands;

use clap::Parser;
use color_eyre::eyre::Result;

use commands::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    commands::init_tracing(&cli);
    commands::run(cli).await
}
