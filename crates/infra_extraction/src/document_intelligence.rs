//! Hosted layout-model adapter
//!
//! Submits a document to a Document Intelligence style REST endpoint with the
//! canonical field names as query fields, then polls the long-running
//! operation until the service reports a terminal status.
//!
//! # Error Handling
//!
//! Service responses are mapped to `PortError` variants:
//! - 401/403 -> `PortError::Unauthorized`
//! - 404 -> `PortError::NotFound`
//! - 429 -> `PortError::RateLimited`
//! - 5xx -> `PortError::ServiceUnavailable`
//! - Transport timeouts and exhausted polling -> `PortError::Timeout`
//! - Other -> `PortError::Internal`

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::RETRY_AFTER;
use reqwest::{Client, Response, StatusCode};
use serde::Deserialize;

use core_kernel::{AdapterType, DomainPort, OperationMetadata, PortError};
use domain_claims::{CanonicalField, ExtractionPort, RawFieldSet, SourceDocument};

const SUBSCRIPTION_KEY_HEADER: &str = "Ocp-Apim-Subscription-Key";
const OPERATION_LOCATION_HEADER: &str = "operation-location";
const SERVICE_NAME: &str = "document-intelligence";
const DEFAULT_RETRY_AFTER_SECS: u64 = 1;

/// Connection settings for the hosted service
#[derive(Debug, Clone)]
pub struct DocumentIntelligenceConfig {
    /// Resource endpoint, e.g. "https://my-resource.cognitiveservices.azure.com"
    pub endpoint: String,

    /// Subscription key
    pub api_key: String,

    /// Model to analyze with
    pub model_id: String,

    /// REST API version
    pub api_version: String,

    /// Delay between status polls
    pub poll_interval_ms: u64,

    /// Maximum number of status polls before giving up
    pub max_polls: u32,

    /// Per-request timeout
    pub timeout_secs: u64,
}

impl Default for DocumentIntelligenceConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            api_key: String::new(),
            model_id: "prebuilt-layout".to_string(),
            api_version: "2024-11-30".to_string(),
            poll_interval_ms: 1000,
            max_polls: 60,
            timeout_secs: 30,
        }
    }
}

impl DocumentIntelligenceConfig {
    /// Checks the settings needed to reach the service
    pub fn validate(&self) -> Result<(), PortError> {
        if self.endpoint.trim().is_empty() {
            return Err(PortError::validation_field("Endpoint is required", "endpoint"));
        }
        if self.api_key.trim().is_empty() {
            return Err(PortError::validation_field("API key is required", "api_key"));
        }
        if self.max_polls == 0 {
            return Err(PortError::validation_field(
                "At least one status poll is required",
                "max_polls",
            ));
        }
        Ok(())
    }

    /// URL of the analyze call, including the query-field list
    pub fn analyze_url(&self) -> String {
        let query_fields = CanonicalField::ALL
            .iter()
            .map(|f| f.as_str())
            .collect::<Vec<_>>()
            .join(",");

        format!(
            "{}/documentintelligence/documentModels/{}:analyze?api-version={}&features=queryFields&queryFields={}",
            self.endpoint.trim_end_matches('/'),
            self.model_id,
            self.api_version,
            query_fields
        )
    }
}

/// Status of a long-running analyze operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum OperationStatus {
    NotStarted,
    Running,
    Succeeded,
    Failed,
    Canceled,
    #[serde(other)]
    Unknown,
}

/// Body of a status poll
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeOperation {
    pub status: OperationStatus,
    #[serde(default)]
    pub analyze_result: Option<AnalyzeResult>,
    #[serde(default)]
    pub error: Option<ServiceError>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeResult {
    #[serde(default)]
    pub documents: Vec<AnalyzedDocument>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzedDocument {
    #[serde(default)]
    pub fields: HashMap<String, DocumentField>,
}

/// A single extracted field
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentField {
    #[serde(default)]
    pub value_string: Option<String>,
    #[serde(default)]
    pub content: Option<String>,
}

impl DocumentField {
    /// Typed string value, falling back to the matched text
    pub fn text(&self) -> Option<&str> {
        self.value_string.as_deref().or(self.content.as_deref())
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServiceError {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

/// Collects the query fields of the first analyzed document
///
/// Fields the service did not return, or returned without text, are absent.
pub fn raw_fields_from_result(result: &AnalyzeResult) -> RawFieldSet {
    let Some(document) = result.documents.first() else {
        return RawFieldSet::new();
    };

    RawFieldSet::from_named(
        document
            .fields
            .iter()
            .map(|(name, field)| (name.as_str(), field.text().map(str::to_string))),
    )
}

/// Maps a non-success status code to a port error
pub fn error_for_status(status: StatusCode, retry_after_secs: Option<u64>, body: &str) -> PortError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => PortError::Unauthorized {
            message: format!("{} rejected the credentials ({})", SERVICE_NAME, status),
        },
        StatusCode::NOT_FOUND => PortError::not_found("Model or operation", body),
        StatusCode::TOO_MANY_REQUESTS => PortError::RateLimited {
            retry_after_secs: retry_after_secs.unwrap_or(DEFAULT_RETRY_AFTER_SECS),
        },
        s if s.is_server_error() => PortError::ServiceUnavailable {
            service: format!("{} ({})", SERVICE_NAME, s),
        },
        s => PortError::internal(format!("Unexpected response {}: {}", s, body)),
    }
}

/// Extraction adapter backed by the hosted layout model
#[derive(Debug, Clone)]
pub struct DocumentIntelligenceAdapter {
    config: DocumentIntelligenceConfig,
    client: Client,
}

impl DocumentIntelligenceAdapter {
    /// Creates the adapter and its HTTP client
    ///
    /// # Errors
    ///
    /// Returns `PortError::Validation` for incomplete settings and
    /// `PortError::Internal` if the HTTP client cannot be built.
    pub fn new(config: DocumentIntelligenceConfig) -> Result<Self, PortError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| PortError::Internal {
                message: "Failed to build HTTP client".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(Self { config, client })
    }

    pub fn config(&self) -> &DocumentIntelligenceConfig {
        &self.config
    }

    /// Starts an analyze operation and returns its status URL
    async fn submit(&self, document: &SourceDocument) -> Result<String, PortError> {
        let response = self
            .client
            .post(self.config.analyze_url())
            .header(SUBSCRIPTION_KEY_HEADER, &self.config.api_key)
            .header(reqwest::header::CONTENT_TYPE, "application/octet-stream")
            .body(document.content.clone())
            .send()
            .await
            .map_err(|e| self.transport_error("analyze", e))?;

        let response = check_status(response).await?;

        response
            .headers()
            .get(OPERATION_LOCATION_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string)
            .ok_or_else(|| PortError::transformation("Analyze response carried no Operation-Location header"))
    }

    /// Polls the operation until it reaches a terminal status
    async fn await_result(&self, operation_url: &str) -> Result<AnalyzeResult, PortError> {
        let interval = Duration::from_millis(self.config.poll_interval_ms);

        for attempt in 1..=self.config.max_polls {
            let response = self
                .client
                .get(operation_url)
                .header(SUBSCRIPTION_KEY_HEADER, &self.config.api_key)
                .send()
                .await
                .map_err(|e| self.transport_error("poll", e))?;

            let operation: AnalyzeOperation = check_status(response)
                .await?
                .json()
                .await
                .map_err(|e| PortError::transformation(format!("Unreadable operation status: {}", e)))?;

            tracing::debug!(attempt, status = ?operation.status, "Polled analyze operation");

            match operation.status {
                OperationStatus::Succeeded => {
                    return Ok(operation.analyze_result.unwrap_or_default());
                }
                OperationStatus::Failed | OperationStatus::Canceled => {
                    let detail = operation
                        .error
                        .map(|e| format!("{}: {}", e.code, e.message))
                        .unwrap_or_else(|| format!("{:?}", operation.status));
                    return Err(PortError::internal(format!("Analyze operation ended: {}", detail)));
                }
                OperationStatus::NotStarted | OperationStatus::Running | OperationStatus::Unknown => {
                    tokio::time::sleep(interval).await;
                }
            }
        }

        Err(PortError::Timeout {
            operation: "analyze".to_string(),
            duration_ms: self.config.poll_interval_ms * u64::from(self.config.max_polls),
        })
    }

    fn transport_error(&self, operation: &str, error: reqwest::Error) -> PortError {
        if error.is_timeout() {
            PortError::Timeout {
                operation: operation.to_string(),
                duration_ms: self.config.timeout_secs * 1000,
            }
        } else if error.is_connect() {
            PortError::connection(format!("Could not reach {}", SERVICE_NAME), error)
        } else {
            PortError::Internal {
                message: format!("{} request failed", operation),
                source: Some(Box::new(error)),
            }
        }
    }
}

async fn check_status(response: Response) -> Result<Response, PortError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let retry_after = response
        .headers()
        .get(RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse().ok());
    let body = response.text().await.unwrap_or_default();

    Err(error_for_status(status, retry_after, &body))
}

impl DomainPort for DocumentIntelligenceAdapter {}

#[async_trait]
impl ExtractionPort for DocumentIntelligenceAdapter {
    fn adapter_id(&self) -> &str {
        "document-intelligence"
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::ExternalRestApi
    }

    async fn extract(
        &self,
        document: &SourceDocument,
        metadata: Option<OperationMetadata>,
    ) -> Result<RawFieldSet, PortError> {
        let correlation_id = metadata.and_then(|m| m.correlation_id);
        tracing::info!(
            document = %document.name,
            model = %self.config.model_id,
            correlation_id = ?correlation_id,
            "Submitting document for analysis"
        );

        let operation_url = self.submit(document).await?;
        let result = self.await_result(&operation_url).await?;
        let fields = raw_fields_from_result(&result);

        tracing::info!(document = %document.name, fields = fields.len(), "Analysis complete");
        Ok(fields)
    }
}
