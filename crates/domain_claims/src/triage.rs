//! Per-document triage pipeline
//!
//! ```text
//! RawFieldSet -> normalize -> missing check -> risk scan -> route -> ClaimReport
//! ```
//!
//! The pipeline is synchronous and keeps no state between documents, so one
//! [`ClaimTriage`] can be shared freely across workers.

use core_kernel::Money;

use crate::error::ClaimError;
use crate::fields::{BusinessField, NormalizedFieldSet, RawFieldSet};
use crate::normalizer::normalize;
use crate::report::ClaimReport;
use crate::routing::{parse_estimate, route, RoutingContext, RoutingDecision, RoutingPolicy};
use crate::screening::{assess_risk, missing_mandatory, RiskAssessment};

/// Intermediate results of triaging one document
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TriageOutcome {
    pub fields: NormalizedFieldSet,
    pub missing: Vec<BusinessField>,
    pub risk: RiskAssessment,
    pub estimate: Money,
    pub decision: RoutingDecision,
}

impl TriageOutcome {
    /// Builds the externally visible report
    pub fn report(&self) -> ClaimReport {
        ClaimReport::assemble(&self.fields, &self.missing, self.decision.clone())
    }
}

/// Stateless triage engine configured with a routing policy
#[derive(Debug, Clone, Default)]
pub struct ClaimTriage {
    policy: RoutingPolicy,
}

impl ClaimTriage {
    /// Creates an engine after validating the policy
    pub fn new(policy: RoutingPolicy) -> Result<Self, ClaimError> {
        policy.validate()?;
        Ok(Self { policy })
    }

    pub fn policy(&self) -> &RoutingPolicy {
        &self.policy
    }

    /// Runs every stage and keeps the intermediate results
    ///
    /// # Errors
    ///
    /// Returns [`ClaimError::EstimateNotNumeric`] when the estimate passed
    /// normalization but cannot be read as a number. The estimate is parsed
    /// before the decision table runs, so this fails the document even when
    /// mandatory fields are missing.
    pub fn evaluate(&self, raw: &RawFieldSet) -> Result<TriageOutcome, ClaimError> {
        let fields = normalize(raw);
        let missing = missing_mandatory(&fields);
        let risk = assess_risk(raw, &self.policy.risk_keywords);
        let estimate = parse_estimate(&fields, self.policy.currency())?;

        let decision = route(&RoutingContext {
            fields: &fields,
            missing: &missing,
            risk: &risk,
            estimate,
            threshold: self.policy.fast_track_threshold,
        });

        tracing::info!(
            route = %decision.route,
            missing = missing.len(),
            risk_keywords = risk.keywords.len(),
            "Claim triaged"
        );

        Ok(TriageOutcome {
            fields,
            missing,
            risk,
            estimate,
            decision,
        })
    }

    /// Triages a document and returns its report
    pub fn triage(&self, raw: &RawFieldSet) -> Result<ClaimReport, ClaimError> {
        Ok(self.evaluate(raw)?.report())
    }
}
