//! Batch driver
//!
//! Walks a directory of claim documents in file-name order, extracts each
//! one through the configured adapter and triages it. A failing document is
//! reported and skipped; it never stops the batch.

use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use thiserror::Error;
use tracing::Instrument;

use core_kernel::{OperationMetadata, PortError};
use domain_claims::{ClaimError, ClaimReport, ClaimTriage, ExtractionPort, SourceDocument};
use infra_extraction::{DocumentIntelligenceAdapter, JsonFieldDumpAdapter};

use crate::config::{BackendKind, TriageConfig};
use crate::output;

/// Errors raised while processing a batch
#[derive(Debug, Error)]
pub enum BatchError {
    #[error("Cannot read source directory {}: {source}", path.display())]
    SourceDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Cannot read document: {0}")]
    Document(#[source] io::Error),

    #[error("Extraction failed: {0}")]
    Extraction(#[from] PortError),

    #[error("Triage failed: {0}")]
    Triage(#[from] ClaimError),

    #[error("Cannot write output: {0}")]
    Output(#[source] io::Error),
}

impl BatchError {
    /// True when the extraction service failed in a way a rerun may fix
    pub fn is_transient(&self) -> bool {
        matches!(self, BatchError::Extraction(error) if error.is_transient())
    }
}

/// Result of processing one document
#[derive(Debug)]
pub struct DocumentOutcome {
    pub name: String,
    pub result: Result<ClaimReport, BatchError>,
}

/// Counts for a finished batch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    fn record(&mut self, outcome: &DocumentOutcome) {
        self.processed += 1;
        if outcome.result.is_ok() {
            self.succeeded += 1;
        } else {
            self.failed += 1;
        }
    }
}

/// Lists the files in `dir` with the given extension, sorted by file name
///
/// The extension is matched case-insensitively and without its dot.
pub fn discover_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, BatchError> {
    let source_dir_error = |source| BatchError::SourceDir {
        path: dir.to_path_buf(),
        source,
    };

    let mut documents = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(source_dir_error)? {
        let path = entry.map_err(source_dir_error)?.path();
        let matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if matches && path.is_file() {
            documents.push(path);
        }
    }

    documents.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(documents)
}

/// Builds the extraction adapter selected by the configuration
pub fn extractor_for(config: &TriageConfig) -> Result<Arc<dyn ExtractionPort>, PortError> {
    match config.backend {
        BackendKind::Json => Ok(Arc::new(JsonFieldDumpAdapter::new())),
        BackendKind::DocumentIntelligence => Ok(Arc::new(DocumentIntelligenceAdapter::new(
            config.document_intelligence(),
        )?)),
    }
}

/// Runs extraction and triage over a list of documents
pub struct BatchRunner {
    extractor: Arc<dyn ExtractionPort>,
    triage: ClaimTriage,
}

impl BatchRunner {
    pub fn new(extractor: Arc<dyn ExtractionPort>, triage: ClaimTriage) -> Self {
        Self { extractor, triage }
    }

    /// Extracts and triages a single document
    pub async fn process(&self, path: &Path) -> DocumentOutcome {
        let name = display_name(path);
        let span = tracing::info_span!("document", name = %name);

        let result = self.triage_file(path, &name).instrument(span.clone()).await;
        span.in_scope(|| match &result {
            Ok(report) => tracing::info!(route = %report.recommended_route, "Document triaged"),
            Err(error) => {
                tracing::warn!(%error, transient = error.is_transient(), "Document failed")
            }
        });

        DocumentOutcome { name, result }
    }

    async fn triage_file(&self, path: &Path, name: &str) -> Result<ClaimReport, BatchError> {
        let content = tokio::fs::read(path).await.map_err(BatchError::Document)?;
        let document = SourceDocument::new(name, content);
        let metadata = OperationMetadata::with_correlation_id(name)
            .initiated_by("claims-triage")
            .with_context("adapter", self.extractor.adapter_id());

        let raw = self.extractor.extract(&document, Some(metadata)).await?;
        Ok(self.triage.triage(&raw)?)
    }

    /// Processes every document in order, rendering each outcome to `out`
    ///
    /// # Errors
    ///
    /// Only a failure to write to `out` stops the batch.
    pub async fn run<W: Write>(
        &self,
        documents: &[PathBuf],
        out: &mut W,
    ) -> Result<BatchSummary, BatchError> {
        tracing::info!(
            documents = documents.len(),
            adapter = self.extractor.adapter_id(),
            "Starting batch"
        );

        let mut summary = BatchSummary::default();
        for path in documents {
            let outcome = self.process(path).await;
            output::render_outcome(out, &outcome).map_err(BatchError::Output)?;
            summary.record(&outcome);
        }

        tracing::info!(
            processed = summary.processed,
            succeeded = summary.succeeded,
            failed = summary.failed,
            "Batch complete"
        );
        Ok(summary)
    }
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
