//! Batch configuration
//!
//! Settings come from `TRIAGE_`-prefixed environment variables. The hosted
//! service credentials also fall back to the bare `azure_endpoint` and
//! `azure_key` variables older deployments set.

use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::Deserialize;
use thiserror::Error;

use core_kernel::{Currency, Money, MoneyError};
use domain_claims::{ClaimError, RoutingPolicy};
use infra_extraction::DocumentIntelligenceConfig;

const ENV_PREFIX: &str = "TRIAGE";
const ENDPOINT_FALLBACK: &str = "azure_endpoint";
const API_KEY_FALLBACK: &str = "azure_key";

/// Configuration errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration: {0}")]
    Load(#[from] config::ConfigError),

    #[error("{0} is required for the document_intelligence backend")]
    MissingSetting(&'static str),

    #[error("Invalid currency: {0}")]
    Currency(#[from] MoneyError),

    #[error(transparent)]
    Policy(#[from] ClaimError),
}

/// Where raw field values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BackendKind {
    /// Hosted layout model over REST
    DocumentIntelligence,
    /// Saved JSON field dumps
    Json,
}

impl BackendKind {
    /// File extension scanned for when none is configured
    pub fn default_extension(&self) -> &'static str {
        match self {
            BackendKind::DocumentIntelligence => "pdf",
            BackendKind::Json => "json",
        }
    }
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::DocumentIntelligence => write!(f, "document_intelligence"),
            BackendKind::Json => write!(f, "json"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "document_intelligence" => Ok(BackendKind::DocumentIntelligence),
            "json" => Ok(BackendKind::Json),
            other => Err(format!("Unknown backend: {}", other)),
        }
    }
}

/// Batch triage configuration
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct TriageConfig {
    /// Directory scanned for documents
    pub source_dir: PathBuf,
    /// Extraction backend
    pub backend: BackendKind,
    /// Extension of the documents to pick up, without the dot
    pub file_extension: Option<String>,
    /// Log level used when `RUST_LOG` is unset
    pub log_level: String,
    /// Fast-track threshold amount
    pub fast_track_threshold: Decimal,
    /// ISO code of the currency estimates are read in
    pub currency: String,
    /// Hosted service endpoint
    pub endpoint: Option<String>,
    /// Hosted service subscription key
    pub api_key: Option<String>,
    pub model_id: String,
    pub api_version: String,
    pub poll_interval_ms: u64,
    pub max_polls: u32,
    pub timeout_secs: u64,
}

impl Default for TriageConfig {
    fn default() -> Self {
        let service = DocumentIntelligenceConfig::default();
        Self {
            source_dir: PathBuf::from("pdfs"),
            backend: BackendKind::DocumentIntelligence,
            file_extension: None,
            log_level: "info".to_string(),
            fast_track_threshold: dec!(25000),
            currency: Currency::INR.code().to_string(),
            endpoint: None,
            api_key: None,
            model_id: service.model_id,
            api_version: service.api_version,
            poll_interval_ms: service.poll_interval_ms,
            max_polls: service.max_polls,
            timeout_secs: service.timeout_secs,
        }
    }
}

impl TriageConfig {
    /// Loads configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::load(config::Environment::with_prefix(ENV_PREFIX), |name| {
            std::env::var(name).ok()
        })
    }

    /// Loads configuration from an explicit variable map
    ///
    /// Keys are full variable names, e.g. `TRIAGE_BACKEND`.
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, ConfigError> {
        let source = config::Environment::with_prefix(ENV_PREFIX).source(Some(vars.clone()));
        Self::load(source, |name| vars.get(name).cloned())
    }

    fn load(
        source: config::Environment,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config: TriageConfig = config::Config::builder()
            .add_source(source)
            .build()?
            .try_deserialize()?;

        if config.endpoint.is_none() {
            config.endpoint = lookup(ENDPOINT_FALLBACK);
        }
        if config.api_key.is_none() {
            config.api_key = lookup(API_KEY_FALLBACK);
        }
        Ok(config)
    }

    /// Checks that the configuration can run a batch
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.currency()?;
        if self.backend == BackendKind::DocumentIntelligence {
            if is_blank(&self.endpoint) {
                return Err(ConfigError::MissingSetting("Endpoint"));
            }
            if is_blank(&self.api_key) {
                return Err(ConfigError::MissingSetting("API key"));
            }
        }
        self.routing_policy()?.validate()?;
        Ok(())
    }

    pub fn currency(&self) -> Result<Currency, ConfigError> {
        Ok(self.currency.parse::<Currency>()?)
    }

    /// Extension scanned for, configured or backend default
    pub fn extension(&self) -> &str {
        self.file_extension
            .as_deref()
            .map(|e| e.trim_start_matches('.'))
            .unwrap_or_else(|| self.backend.default_extension())
    }

    /// Routing policy with the configured threshold and default keywords
    pub fn routing_policy(&self) -> Result<RoutingPolicy, ConfigError> {
        let threshold = Money::new(self.fast_track_threshold, self.currency()?);
        Ok(RoutingPolicy::with_threshold(threshold))
    }

    /// Settings for the hosted extraction adapter
    pub fn document_intelligence(&self) -> DocumentIntelligenceConfig {
        DocumentIntelligenceConfig {
            endpoint: self.endpoint.clone().unwrap_or_default(),
            api_key: self.api_key.clone().unwrap_or_default(),
            model_id: self.model_id.clone(),
            api_version: self.api_version.clone(),
            poll_interval_ms: self.poll_interval_ms,
            max_polls: self.max_polls,
            timeout_secs: self.timeout_secs,
        }
    }
}

fn is_blank(value: &Option<String>) -> bool {
    value.as_deref().map_or(true, |v| v.trim().is_empty())
}
