//! Extraction port
//!
//! The triage core never talks to the document-understanding service
//! directly. Hosts construct an adapter implementing [`ExtractionPort`] and
//! pass it to whatever drives the batch.

use async_trait::async_trait;

use core_kernel::{AdapterType, DomainPort, OperationMetadata, PortError};

use crate::fields::RawFieldSet;

/// A document handed to an extraction adapter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDocument {
    /// File name, used for logging and correlation
    pub name: String,
    /// Raw document bytes
    pub content: Vec<u8>,
}

impl SourceDocument {
    pub fn new(name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            content: content.into(),
        }
    }
}

/// Turns a document into named raw field values
#[async_trait]
pub trait ExtractionPort: DomainPort {
    /// Identifier used in logs
    fn adapter_id(&self) -> &str;

    /// Kind of adapter
    fn adapter_type(&self) -> AdapterType;

    /// Extracts the canonical fields from a document
    ///
    /// # Errors
    ///
    /// Returns a [`PortError`] when the underlying service cannot process the
    /// document. Adapters do not retry on behalf of the caller unless their
    /// own configuration says so.
    async fn extract(
        &self,
        document: &SourceDocument,
        metadata: Option<OperationMetadata>,
    ) -> Result<RawFieldSet, PortError>;
}

/// In-memory extraction adapter for tests
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::HashMap;

    /// Returns canned field sets keyed by document name
    #[derive(Debug, Default)]
    pub struct MockExtractionPort {
        documents: HashMap<String, RawFieldSet>,
    }

    impl MockExtractionPort {
        pub fn new() -> Self {
            Self::default()
        }

        /// Registers the field set returned for a document name
        pub fn with_document(mut self, name: impl Into<String>, fields: RawFieldSet) -> Self {
            self.documents.insert(name.into(), fields);
            self
        }
    }

    impl DomainPort for MockExtractionPort {}

    #[async_trait]
    impl ExtractionPort for MockExtractionPort {
        fn adapter_id(&self) -> &str {
            "mock-extraction"
        }

        fn adapter_type(&self) -> AdapterType {
            AdapterType::Mock
        }

        async fn extract(
            &self,
            document: &SourceDocument,
            _metadata: Option<OperationMetadata>,
        ) -> Result<RawFieldSet, PortError> {
            self.documents
                .get(&document.name)
                .cloned()
                .ok_or_else(|| PortError::not_found("Document", &document.name))
        }
    }
}
