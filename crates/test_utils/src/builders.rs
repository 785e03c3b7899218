//! Test Data Builders
//!
//! Provides builder patterns for constructing claim field sets with sensible
//! defaults. Tests state only the fields that matter to them.

use domain_claims::{CanonicalField, RawFieldSet};

use crate::fixtures::ClaimFormFixtures;

/// Builder for raw extracted field sets
pub struct RawFieldSetBuilder {
    fields: RawFieldSet,
}

impl Default for RawFieldSetBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl RawFieldSetBuilder {
    /// Starts from a complete, fast-track eligible claim
    pub fn new() -> Self {
        Self {
            fields: ClaimFormFixtures::complete_claim(),
        }
    }

    /// Starts from a field set with nothing extracted
    pub fn empty() -> Self {
        Self {
            fields: RawFieldSet::new(),
        }
    }

    /// Sets any canonical field
    pub fn with_field(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        self.fields.insert(field, value);
        self
    }

    /// Removes a canonical field
    pub fn without(mut self, field: CanonicalField) -> Self {
        self.fields.insert(field, "");
        self
    }

    /// Sets the estimate amount text
    pub fn with_estimate(self, estimate: impl Into<String>) -> Self {
        self.with_field(CanonicalField::EstimateAmount, estimate)
    }

    /// Sets the injured party text
    pub fn with_injured(self, injured: impl Into<String>) -> Self {
        self.with_field(CanonicalField::InjuredName, injured)
    }

    /// Sets the accident narrative
    pub fn with_accident_description(self, text: impl Into<String>) -> Self {
        self.with_field(CanonicalField::AccidentDescription, text)
    }

    /// Sets the damage narrative
    pub fn with_damage_description(self, text: impl Into<String>) -> Self {
        self.with_field(CanonicalField::DamageDescription, text)
    }

    /// Builds the field set
    pub fn build(self) -> RawFieldSet {
        self.fields
    }
}
