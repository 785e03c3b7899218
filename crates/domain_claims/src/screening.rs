//! Pre-routing screening: mandatory field coverage and narrative risk keywords

use serde::Serialize;

use crate::fields::{BusinessField, NormalizedFieldSet, RawFieldSet};

/// Fields without which a claim cannot be processed automatically
pub const MANDATORY_FIELDS: [BusinessField; 4] = [
    BusinessField::PolicyNumber,
    BusinessField::PolicyholderName,
    BusinessField::Carrier,
    BusinessField::EstimateAmount,
];

/// Narrative keywords that raise the investigation flag
pub const DEFAULT_RISK_KEYWORDS: [&str; 3] = ["inconsistent", "fraud", "staged"];

/// Returns the mandatory fields that have no usable value, in mandatory-list order
pub fn missing_mandatory(fields: &NormalizedFieldSet) -> Vec<BusinessField> {
    MANDATORY_FIELDS
        .into_iter()
        .filter(|field| !fields.is_present(*field))
        .collect()
}

/// Outcome of scanning the narrative text for risk keywords
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct RiskAssessment {
    /// Matched keywords, in keyword-list order
    pub keywords: Vec<String>,
}

impl RiskAssessment {
    /// True when at least one keyword matched
    pub fn is_flagged(&self) -> bool {
        !self.keywords.is_empty()
    }
}

/// Scans accident and damage descriptions for the given keywords
///
/// Matching is a case-insensitive substring test over both narratives
/// joined by a space.
pub fn assess_risk<S: AsRef<str>>(raw: &RawFieldSet, keywords: &[S]) -> RiskAssessment {
    let narrative = format!(
        "{} {}",
        raw.accident_description().unwrap_or_default(),
        raw.damage_description().unwrap_or_default()
    )
    .to_lowercase();

    let keywords = keywords
        .iter()
        .map(AsRef::as_ref)
        .filter(|keyword| narrative.contains(&keyword.to_lowercase()))
        .map(str::to_string)
        .collect();

    RiskAssessment { keywords }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::CanonicalField;

    #[test]
    fn test_keywords_do_not_match_across_the_narrative_join() {
        let raw = RawFieldSet::new()
            .with(CanonicalField::AccidentDescription, "rear ended at st")
            .with(CanonicalField::DamageDescription, "aged bumper");

        let risk = assess_risk(&raw, &DEFAULT_RISK_KEYWORDS);
        assert!(!risk.is_flagged());
    }

    #[test]
    fn test_no_narratives_means_no_flag() {
        let risk = assess_risk(&RawFieldSet::new(), &DEFAULT_RISK_KEYWORDS);
        assert_eq!(risk, RiskAssessment::default());
    }
}
