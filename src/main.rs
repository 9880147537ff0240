use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use dupecheck::fetch::{self, LocalOrRemote, PageSource};
use dupecheck::output::{export, terminal};
use dupecheck::pipeline;
use dupecheck::similarity::TfIdfEngine;

mod config;

/// Dupecheck: find near-duplicate content across web pages.
///
/// Scores every pair of pages by TF-IDF cosine similarity and shows the
/// passages that pages above the threshold share.
#[derive(Parser)]
#[command(name = "dupecheck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compare two or more pages (URLs or local HTML files)
    Compare {
        /// Page URLs (http/https) or file paths, in the order to report them
        #[arg(required = true)]
        sources: Vec<String>,

        /// Report pairs at or above this similarity (default: 0.8)
        #[arg(long)]
        threshold: Option<f64>,

        /// Only keep shared passages longer than this many characters (default: 50)
        #[arg(long)]
        min_span: Option<usize>,

        /// Show a side-by-side word diff for each reported pair
        #[arg(long)]
        diff: bool,

        /// Words of unchanged context around each diff change (default: 2)
        #[arg(long)]
        context: Option<usize>,

        /// Print the per-pair records as JSON instead of the terminal report
        #[arg(long)]
        json: bool,

        /// With --json, print the full report (matrix, diffs, warnings)
        #[arg(long, requires = "json")]
        full: bool,
    },

    /// Print the normalized text extracted from one page
    Normalize {
        /// Page URL or file path
        source: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging (stderr keeps --json output clean)
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("dupecheck=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Compare {
            sources,
            threshold,
            min_span,
            diff,
            context,
            json,
            full,
        } => {
            let mut config = config::Config::load()?;
            if let Some(t) = threshold {
                config.threshold = t;
            }
            if let Some(m) = min_span {
                config.min_span_chars = m;
            }
            if let Some(c) = context {
                config.diff_context = c;
            }
            config.validate()?;

            if sources.len() < 2 {
                anyhow::bail!("Please provide at least two pages to compare.");
            }

            let source = LocalOrRemote::new(&config.user_agent)?;
            if !json {
                println!("Loading {} pages...", sources.len());
            }
            let corpus = fetch::load_corpus(&source, &sources, config.fetch_concurrency).await;

            let report = pipeline::run(&corpus, &TfIdfEngine::default(), &config.compare_settings())
                .context("Comparison failed")?;
            info!(pairs = report.pairs.len(), "Comparison complete");

            if json {
                let out = if full {
                    export::report_json(&report)?
                } else {
                    export::records_json(&report)?
                };
                println!("{out}");
            } else {
                terminal::display_report(&report, diff);
                if !report.pairs.is_empty() {
                    println!(
                        "\n{}",
                        "Export these pairs with: dupecheck compare --json <pages...>".dimmed()
                    );
                }
            }
        }

        Commands::Normalize { source } => {
            let loader = LocalOrRemote::new(&config::Config::load()?.user_agent)?;
            let html = loader.load(&source).await?;
            let text = dupecheck::normalize(&html)
                .with_context(|| format!("No readable text in {source}"))?;
            println!("{text}");
        }
    }

    Ok(())
}
