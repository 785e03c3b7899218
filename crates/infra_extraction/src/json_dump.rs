//! Local adapter reading pre-extracted field dumps
//!
//! A dump is a flat JSON object of canonical field name to string or null,
//! the same shape the hosted service's query fields produce. It lets the
//! batch driver re-run triage on saved extractions without calling out.

use async_trait::async_trait;

use core_kernel::{AdapterType, DomainPort, OperationMetadata, PortError};
use domain_claims::{ExtractionPort, RawFieldSet, SourceDocument};

/// Reads `RawFieldSet`s from JSON field dumps
#[derive(Debug, Clone, Default)]
pub struct JsonFieldDumpAdapter;

impl JsonFieldDumpAdapter {
    pub fn new() -> Self {
        Self
    }
}

impl DomainPort for JsonFieldDumpAdapter {}

#[async_trait]
impl ExtractionPort for JsonFieldDumpAdapter {
    fn adapter_id(&self) -> &str {
        "json-field-dump"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Local
    }

    async fn extract(
        &self,
        document: &SourceDocument,
        _metadata: Option<OperationMetadata>,
    ) -> Result<RawFieldSet, PortError> {
        let fields: RawFieldSet = serde_json::from_slice(&document.content).map_err(|e| {
            PortError::transformation(format!("{} is not a field dump: {}", document.name, e))
        })?;

        tracing::debug!(
            document = %document.name,
            fields = fields.len(),
            "Loaded field dump"
        );
        Ok(fields)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_claims::CanonicalField;

    #[tokio::test]
    async fn test_reads_flat_field_dump() {
        let dump = br#"{
            "PolicyNumber": "POL-88",
            "EstimateAmount": "12,500",
            "InjuredName": null
        }"#;
        let document = SourceDocument::new("claim.json", dump.to_vec());

        let fields = JsonFieldDumpAdapter::new().extract(&document, None).await.unwrap();

        assert_eq!(fields.get(CanonicalField::PolicyNumber), Some("POL-88"));
        assert_eq!(fields.get(CanonicalField::EstimateAmount), Some("12,500"));
        assert_eq!(fields.get(CanonicalField::InjuredName), None);
    }

    #[tokio::test]
    async fn test_malformed_dump_is_a_transformation_error() {
        let document = SourceDocument::new("broken.json", b"[1, 2".to_vec());

        let result = JsonFieldDumpAdapter::new().extract(&document, None).await;

        match result {
            Err(PortError::Transformation { message }) => assert!(message.contains("broken.json")),
            other => panic!("Expected Transformation error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_non_string_values_are_rejected() {
        let document = SourceDocument::new("numbers.json", br#"{"EstimateAmount": 12500}"#.to_vec());

        let result = JsonFieldDumpAdapter::new().extract(&document, None).await;
        assert!(matches!(result, Err(PortError::Transformation { .. })));
    }
}
