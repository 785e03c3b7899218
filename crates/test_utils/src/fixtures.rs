//! Pre-built Test Fixtures
//!
//! Provides ready-to-use field sets modelled on real claim forms, plus the
//! template label text the extraction service returns for blank boxes.

use core_kernel::{Currency, Money};
use domain_claims::{CanonicalField, RawFieldSet};
use rust_decimal_macros::dec;

/// Fixture for field sets extracted from claim forms
pub struct ClaimFormFixtures;

impl ClaimFormFixtures {
    /// A fully filled-in motor claim with a small estimate
    pub fn complete_claim() -> RawFieldSet {
        RawFieldSet::new()
            .with(CanonicalField::PolicyNumber, StringFixtures::policy_number())
            .with(CanonicalField::InsuredName, "John Smith")
            .with(CanonicalField::CarrierName, "Acme Mutual Insurance")
            .with(CanonicalField::InsuredEmail, "john.smith@example.com")
            .with(CanonicalField::ContactEmail, "claims@acme-mutual.example")
            .with(CanonicalField::LossDate, "03/14/2024")
            .with(CanonicalField::LossTime, "08:36")
            .with(CanonicalField::LossLocation, "Main St")
            .with(CanonicalField::CityStateZip, "Springfield, IL 62704")
            .with(CanonicalField::EstimateAmount, "10,000")
            .with(CanonicalField::VehicleMake, "Honda")
            .with(CanonicalField::PlateNumber, "IL 4821 KX")
            .with(CanonicalField::AgencyName, "Lakeside Brokers")
            .with(CanonicalField::ContactName, "Priya Raman")
            .with(
                CanonicalField::AccidentDescription,
                "Vehicle was rear-ended while stopped at a signal",
            )
            .with(CanonicalField::DamageDescription, "Rear bumper and tail light damaged")
    }

    /// A complete claim whose estimate is above the fast-track threshold
    pub fn high_value_claim() -> RawFieldSet {
        Self::complete_claim().with(CanonicalField::EstimateAmount, "60,000")
    }

    /// What the service returns for a blank form: labels instead of values
    pub fn template_form() -> RawFieldSet {
        RawFieldSet::new()
            .with(CanonicalField::PolicyNumber, "POLICY NUMBER")
            .with(CanonicalField::InsuredName, "NAME OF INSURED")
            .with(CanonicalField::CarrierName, "CARRIER")
            .with(CanonicalField::LossDate, "DATE OF LOSS")
            .with(CanonicalField::LossTime, "AM PM")
            .with(CanonicalField::LossLocation, "STREET")
            .with(CanonicalField::CityStateZip, "CITY, STATE, ZIP")
            .with(CanonicalField::VehicleMake, "MAKE")
            .with(CanonicalField::AgencyName, "AGENCY")
            .with(CanonicalField::ContactName, "CONTACT")
            .with(CanonicalField::InjuredName, "NAME & ADDRESS")
    }
}

/// Fixture for individual string values
pub struct StringFixtures;

impl StringFixtures {
    pub fn policy_number() -> &'static str {
        "POL-2024-000123"
    }

    pub fn injured_with_phone() -> &'static str {
        "John Smith\nPhone: 555-1234"
    }
}

/// Fixture for money values
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// The default fast-track threshold
    pub fn inr_threshold() -> Money {
        Money::new(dec!(25000), Currency::INR)
    }

    pub fn usd_threshold() -> Money {
        Money::new(dec!(5000), Currency::USD)
    }
}
