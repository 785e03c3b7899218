//! Claims Triage Command Line Interface
//!
//! Configuration, the batch driver and console rendering behind the
//! `claims-triage` binary.
//!
//! # Usage
//!
//! ```bash
//! # Triage every PDF under ./pdfs with the hosted layout model
//! TRIAGE_ENDPOINT=https://... TRIAGE_API_KEY=... cargo run --bin claims-triage
//!
//! # Re-run triage over saved field dumps
//! TRIAGE_BACKEND=json TRIAGE_SOURCE_DIR=dumps cargo run --bin claims-triage
//! ```

pub mod batch;
pub mod config;
pub mod output;

pub use batch::{discover_documents, extractor_for, BatchError, BatchRunner, BatchSummary, DocumentOutcome};
pub use config::{BackendKind, ConfigError, TriageConfig};
