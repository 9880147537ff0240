// Page loading — the thin I/O layer that feeds the comparison core.
//
// Loads each location (URL or local file) concurrently, normalizes it, and
// assembles a corpus in input order. A page that fails to load or parse
// becomes a degraded document; the run continues with the rest.

pub mod sources;

use anyhow::Result;
use async_trait::async_trait;
use futures::stream::{self, StreamExt};
use indicatif::{ProgressBar, ProgressStyle};
use tracing::{info, warn};

use crate::corpus::{Corpus, Document};

pub use sources::{FileSource, HttpSource, LocalOrRemote};

/// Trait for retrieving raw page content. Implementations decide what a
/// location means (URL, path, fixture key).
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Return the raw HTML for `location`.
    async fn load(&self, location: &str) -> Result<String>;
}

/// Load and normalize every location, `concurrency` at a time, preserving order.
pub async fn load_corpus(
    source: &dyn PageSource,
    locations: &[String],
    concurrency: usize,
) -> Corpus {
    let pb = ProgressBar::new(locations.len() as u64);
    if let Ok(style) = ProgressStyle::default_bar().template("  Loading [{bar:30}] {pos}/{len} ({eta})") {
        pb.set_style(style);
    }

    // `buffered` (not `buffer_unordered`) keeps results in input order,
    // which fixes each document's matrix index.
    let documents: Vec<Document> = stream::iter(locations.iter().map(|location| {
        let pb = &pb;
        async move {
            let doc = match source.load(location).await {
                Ok(html) => Document::from_html(location.as_str(), &html),
                Err(e) => {
                    warn!(location = %location, error = %e, "Failed to load page, using empty placeholder");
                    Document::degraded(location.as_str(), format!("{e:#}"))
                }
            };
            pb.inc(1);
            doc
        }
    }))
    .buffered(concurrency.max(1))
    .collect()
    .await;
    pb.finish_and_clear();

    let degraded = documents.iter().filter(|d| d.is_degraded()).count();
    info!(
        documents = documents.len(),
        degraded = degraded,
        "Corpus loaded"
    );

    Corpus::new(documents)
}
