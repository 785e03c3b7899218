//! Claims Triage Domain
//!
//! This crate turns the raw field values extracted from a scanned claim form
//! into a routing decision and a presentation report.
//!
//! # Pipeline
//!
//! ```text
//! RawFieldSet -> Normalizer -> Missing-Field Check -> Risk Scan -> Router -> ClaimReport
//! ```
//!
//! Every stage is a pure function of its inputs; the only fatal condition is
//! an estimate amount that cannot be read as a number.

pub mod fields;
pub mod normalizer;
pub mod screening;
pub mod routing;
pub mod report;
pub mod triage;
pub mod ports;
pub mod error;

pub use fields::{BusinessField, CanonicalField, NormalizedFieldSet, RawFieldSet};
pub use screening::{RiskAssessment, MANDATORY_FIELDS};
pub use routing::{Route, RoutingDecision, RoutingPolicy};
pub use report::ClaimReport;
pub use triage::{ClaimTriage, TriageOutcome};
pub use ports::{ExtractionPort, SourceDocument};
pub use error::ClaimError;
