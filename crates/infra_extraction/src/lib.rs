//! Extraction Infrastructure
//!
//! Adapters implementing `domain_claims::ExtractionPort`. The triage core only
//! sees `RawFieldSet`s; where they come from is decided here.
//!
//! # Adapters
//!
//! - [`DocumentIntelligenceAdapter`]: submits scanned forms to a hosted
//!   layout model and reads back the query fields
//! - [`JsonFieldDumpAdapter`]: reads field values saved as flat JSON
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_extraction::{DocumentIntelligenceAdapter, DocumentIntelligenceConfig};
//!
//! let adapter = DocumentIntelligenceAdapter::new(DocumentIntelligenceConfig {
//!     endpoint: "https://my-resource.cognitiveservices.azure.com".to_string(),
//!     api_key: key,
//!     ..Default::default()
//! })?;
//! let fields = adapter.extract(&document, None).await?;
//! ```

pub mod document_intelligence;
pub mod json_dump;

pub use document_intelligence::{DocumentIntelligenceAdapter, DocumentIntelligenceConfig};
pub use json_dump::JsonFieldDumpAdapter;
