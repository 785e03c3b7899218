//! Claims Triage - Batch Binary
//!
//! Triages every claim document in a directory and prints one JSON report per
//! document to stdout. Logs go to stderr.
//!
//! # Environment Variables
//!
//! * `TRIAGE_SOURCE_DIR` - Directory of documents (default: pdfs)
//! * `TRIAGE_BACKEND` - `document_intelligence` or `json` (default: document_intelligence)
//! * `TRIAGE_FILE_EXTENSION` - Extension to pick up (default: pdf, or json for the json backend)
//! * `TRIAGE_LOG_LEVEL` - Log level when `RUST_LOG` is unset (default: info)
//! * `TRIAGE_FAST_TRACK_THRESHOLD` - Fast-track threshold (default: 25000)
//! * `TRIAGE_CURRENCY` - Currency of estimates (default: INR)
//! * `TRIAGE_ENDPOINT` / `azure_endpoint` - Hosted service endpoint
//! * `TRIAGE_API_KEY` / `azure_key` - Hosted service key
//! * `TRIAGE_MODEL_ID`, `TRIAGE_API_VERSION`, `TRIAGE_POLL_INTERVAL_MS`,
//!   `TRIAGE_MAX_POLLS`, `TRIAGE_TIMEOUT_SECS` - Hosted service tuning

use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use domain_claims::ClaimTriage;
use interface_cli::{discover_documents, extractor_for, BatchRunner, TriageConfig};

/// Loads configuration, builds the adapter and runs the batch.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, the adapter cannot be
/// built, the source directory cannot be read, or stdout is closed. Failures
/// of individual documents are reported inline and do not end the run.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = TriageConfig::from_env().context("Failed to load configuration")?;
    init_tracing(&config.log_level);

    config.validate().context("Invalid configuration")?;

    tracing::info!(
        source_dir = %config.source_dir.display(),
        backend = %config.backend,
        extension = config.extension(),
        "Starting claims triage"
    );

    let extractor = extractor_for(&config).context("Failed to build extraction adapter")?;
    let triage = ClaimTriage::new(config.routing_policy()?)?;
    let documents = discover_documents(&config.source_dir, config.extension())?;

    if documents.is_empty() {
        tracing::warn!(source_dir = %config.source_dir.display(), "No documents found");
    }

    let runner = BatchRunner::new(extractor, triage);
    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    runner.run(&documents, &mut out).await?;

    Ok(())
}

/// Initializes the tracing subscriber, writing to stderr.
///
/// `RUST_LOG` wins over the configured level.
fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .init();
}
