//! Claim routing decision table
//!
//! Routing is an ordered list of named rules evaluated top-down; the first
//! rule that matches decides the route. When no rule matches the claim is
//! explicitly [`Route::Unrouted`].
//!
//! ```text
//! missing mandatory fields  -> Manual Review
//! estimate below threshold  -> Fast-Track
//! risk keywords in narrative -> Investigation Flag
//! injured party named       -> Specialist Queue
//! otherwise                 -> Unrouted
//! ```

use std::cmp::Ordering;
use std::fmt;

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use core_kernel::{Currency, Money, MoneyError};

use crate::error::ClaimError;
use crate::fields::{BusinessField, NormalizedFieldSet};
use crate::screening::{RiskAssessment, DEFAULT_RISK_KEYWORDS};

/// Queue a claim is sent to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Route {
    /// Small, complete claims settled without adjuster review
    #[serde(rename = "Fast-Track")]
    FastTrack,
    /// Mandatory data missing
    #[serde(rename = "Manual Review")]
    ManualReview,
    /// Narrative carries fraud indicators
    #[serde(rename = "Investigation Flag")]
    InvestigationFlag,
    /// Bodily injury claims
    #[serde(rename = "Specialist Queue")]
    SpecialistQueue,
    /// No routing rule applied
    #[serde(rename = "Unrouted")]
    Unrouted,
}

impl Route {
    /// Display name of the queue
    pub fn as_str(&self) -> &'static str {
        match self {
            Route::FastTrack => "Fast-Track",
            Route::ManualReview => "Manual Review",
            Route::InvestigationFlag => "Investigation Flag",
            Route::SpecialistQueue => "Specialist Queue",
            Route::Unrouted => "Unrouted",
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The chosen route and why
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoutingDecision {
    pub route: Route,
    pub reason: String,
}

impl RoutingDecision {
    pub fn new(route: Route, reason: impl Into<String>) -> Self {
        Self {
            route,
            reason: reason.into(),
        }
    }

    /// Terminal outcome when the decision table has no match
    pub fn unrouted() -> Self {
        Self::new(Route::Unrouted, "No applicable rule matched.")
    }
}

/// Tunable routing parameters
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoutingPolicy {
    /// Estimates strictly below this amount are fast-tracked
    pub fast_track_threshold: Money,
    /// Narrative keywords that raise the investigation flag
    pub risk_keywords: Vec<String>,
}

impl Default for RoutingPolicy {
    fn default() -> Self {
        Self {
            fast_track_threshold: Money::new(dec!(25000), Currency::INR),
            risk_keywords: DEFAULT_RISK_KEYWORDS.iter().map(|k| k.to_string()).collect(),
        }
    }
}

impl RoutingPolicy {
    /// Creates a policy with the given threshold and the default keywords
    pub fn with_threshold(fast_track_threshold: Money) -> Self {
        Self {
            fast_track_threshold,
            ..Default::default()
        }
    }

    /// Currency estimates are read in
    pub fn currency(&self) -> Currency {
        self.fast_track_threshold.currency()
    }

    /// Rejects policies that could never route sensibly
    pub fn validate(&self) -> Result<(), ClaimError> {
        if self.fast_track_threshold.is_negative() {
            return Err(ClaimError::InvalidPolicy(format!(
                "fast-track threshold must not be negative, got {}",
                self.fast_track_threshold
            )));
        }
        if self.risk_keywords.iter().any(|k| k.trim().is_empty()) {
            return Err(ClaimError::InvalidPolicy(
                "risk keywords must not be blank".to_string(),
            ));
        }
        Ok(())
    }
}

/// Parses the normalized estimate; an absent estimate counts as zero
///
/// A figure too large to represent saturates at the largest amount of its
/// sign, so it still compares against the threshold.
pub fn parse_estimate(
    fields: &NormalizedFieldSet,
    currency: Currency,
) -> Result<Money, ClaimError> {
    let Some(text) = fields.get(BusinessField::EstimateAmount) else {
        return Ok(Money::zero(currency));
    };

    match Money::parse(text, currency) {
        Ok(estimate) => Ok(estimate),
        Err(MoneyError::OutOfRange(_)) => {
            let bound = if text.trim_start().starts_with('-') {
                Decimal::MIN
            } else {
                Decimal::MAX
            };
            tracing::debug!(value = text, "Estimate out of range, saturating");
            Ok(Money::new(bound, currency))
        }
        Err(source) => Err(ClaimError::EstimateNotNumeric {
            value: text.to_string(),
            source,
        }),
    }
}

/// Everything the decision table looks at
#[derive(Debug, Clone)]
pub struct RoutingContext<'a> {
    pub fields: &'a NormalizedFieldSet,
    pub missing: &'a [BusinessField],
    pub risk: &'a RiskAssessment,
    pub estimate: Money,
    pub threshold: Money,
}

/// A named predicate that either decides the route or defers
pub struct RoutingRule {
    pub name: &'static str,
    evaluate: fn(&RoutingContext<'_>) -> Option<RoutingDecision>,
}

impl RoutingRule {
    pub fn evaluate(&self, ctx: &RoutingContext<'_>) -> Option<RoutingDecision> {
        (self.evaluate)(ctx)
    }
}

impl fmt::Debug for RoutingRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoutingRule").field("name", &self.name).finish()
    }
}

/// Rules in priority order
pub const DECISION_TABLE: [RoutingRule; 4] = [
    RoutingRule {
        name: "missing_mandatory_fields",
        evaluate: missing_fields_rule,
    },
    RoutingRule {
        name: "estimate_below_threshold",
        evaluate: fast_track_rule,
    },
    RoutingRule {
        name: "risk_keywords_present",
        evaluate: investigation_rule,
    },
    RoutingRule {
        name: "injured_party_named",
        evaluate: injury_rule,
    },
];

/// Runs the decision table, falling back to [`Route::Unrouted`]
pub fn route(ctx: &RoutingContext<'_>) -> RoutingDecision {
    for rule in &DECISION_TABLE {
        if let Some(decision) = rule.evaluate(ctx) {
            tracing::debug!(rule = rule.name, route = %decision.route, "Routing rule matched");
            return decision;
        }
    }

    tracing::debug!("No routing rule matched");
    RoutingDecision::unrouted()
}

fn missing_fields_rule(ctx: &RoutingContext<'_>) -> Option<RoutingDecision> {
    if ctx.missing.is_empty() {
        return None;
    }
    let names: Vec<&str> = ctx.missing.iter().map(BusinessField::label).collect();
    Some(RoutingDecision::new(
        Route::ManualReview,
        format!("Missing fields: {}", names.join(", ")),
    ))
}

fn fast_track_rule(ctx: &RoutingContext<'_>) -> Option<RoutingDecision> {
    let below = matches!(ctx.estimate.checked_cmp(&ctx.threshold), Ok(Ordering::Less));
    below.then(|| {
        let prefix = ctx.threshold.currency().text_prefix();
        let estimate = ctx
            .fields
            .get(BusinessField::EstimateAmount)
            .map(str::to_string)
            .unwrap_or_else(|| ctx.estimate.grouped());
        RoutingDecision::new(
            Route::FastTrack,
            format!(
                "Estimate Amount- {prefix}{estimate}, is less than {prefix}{}.",
                ctx.threshold.grouped()
            ),
        )
    })
}

fn investigation_rule(ctx: &RoutingContext<'_>) -> Option<RoutingDecision> {
    ctx.risk.is_flagged().then(|| {
        RoutingDecision::new(
            Route::InvestigationFlag,
            format!("Risk keywords found- {}", ctx.risk.keywords.join(", ")),
        )
    })
}

fn injury_rule(ctx: &RoutingContext<'_>) -> Option<RoutingDecision> {
    ctx.fields.get(BusinessField::Injured).map(|injured| {
        RoutingDecision::new(
            Route::SpecialistQueue,
            format!("Injured person name-{}. So claim type is 'Injury'", injured),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn context<'a>(
        fields: &'a NormalizedFieldSet,
        missing: &'a [BusinessField],
        risk: &'a RiskAssessment,
        estimate: Money,
    ) -> RoutingContext<'a> {
        RoutingContext {
            fields,
            missing,
            risk,
            estimate,
            threshold: RoutingPolicy::default().fast_track_threshold,
        }
    }

    #[test]
    fn test_estimate_equal_to_threshold_is_not_fast_tracked() {
        let fields = NormalizedFieldSet::default();
        let risk = RiskAssessment::default();
        let ctx = context(&fields, &[], &risk, Money::new(dec!(25000), Currency::INR));

        assert_eq!(route(&ctx), RoutingDecision::unrouted());
    }

    #[test]
    fn test_fast_track_reason_names_estimate_and_threshold() {
        let fields = NormalizedFieldSet::default();
        let risk = RiskAssessment::default();
        let ctx = context(&fields, &[], &risk, Money::new(dec!(24999.5), Currency::INR));

        let decision = route(&ctx);
        assert_eq!(decision.route, Route::FastTrack);
        assert_eq!(
            decision.reason,
            "Estimate Amount- Rs.24,999.5, is less than Rs.25,000."
        );
    }

    #[test]
    fn test_decision_table_order() {
        let names: Vec<&str> = DECISION_TABLE.iter().map(|r| r.name).collect();
        assert_eq!(
            names,
            [
                "missing_mandatory_fields",
                "estimate_below_threshold",
                "risk_keywords_present",
                "injured_party_named",
            ]
        );
    }

    #[test]
    fn test_policy_rejects_negative_threshold() {
        let policy = RoutingPolicy::with_threshold(Money::new(dec!(-1), Currency::INR));
        assert!(matches!(policy.validate(), Err(ClaimError::InvalidPolicy(_))));
    }
}
