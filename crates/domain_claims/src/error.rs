//! Claims triage errors

use thiserror::Error;

use core_kernel::MoneyError;

/// Errors that can occur while triaging a claim document
#[derive(Debug, Error)]
pub enum ClaimError {
    #[error("Estimate amount is not numeric: {value:?}")]
    EstimateNotNumeric {
        value: String,
        #[source]
        source: MoneyError,
    },

    #[error("Invalid routing policy: {0}")]
    InvalidPolicy(String),
}
