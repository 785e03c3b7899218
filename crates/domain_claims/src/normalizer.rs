//! Field normalization rules
//!
//! Each business field has one rule: a validation predicate plus a cleanup
//! transform over the raw text. Rules are pure and independent of each other,
//! and a rule that rejects its input yields `None` rather than an error.
//!
//! Several rules reject template label text that the extraction service
//! sometimes returns in place of a filled-in value (e.g. `"CARRIER"`,
//! `"NAME & ADDRESS"`). Those checks are literal substring matches and are
//! intentionally kept as-is.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::fields::{CanonicalField, NormalizedFieldSet, RawFieldSet};

/// A checkbox glyph or letter mark followed by the `PM` token
static PM_MARK: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)[\u{2713}\u{2714}\u{2611}x]\s*PM").expect("PM mark pattern is valid")
});

/// Normalizes every business field of a document
pub fn normalize(raw: &RawFieldSet) -> NormalizedFieldSet {
    let fields = NormalizedFieldSet {
        policy_number: policy_number(raw.get(CanonicalField::PolicyNumber)),
        policyholder_name: policyholder_name(raw.get(CanonicalField::InsuredName)),
        carrier: carrier(raw.get(CanonicalField::CarrierName)),
        insured_email: email(raw.get(CanonicalField::InsuredEmail)),
        contact_email: email(raw.get(CanonicalField::ContactEmail)),
        date_of_loss: date_of_loss(raw.get(CanonicalField::LossDate)),
        time: time_of_loss(raw.get(CanonicalField::LossTime)),
        location: location(
            raw.get(CanonicalField::LossLocation),
            raw.get(CanonicalField::CityStateZip),
        ),
        estimate_amount: estimate_amount(raw.get(CanonicalField::EstimateAmount)),
        make: vehicle_make(raw.get(CanonicalField::VehicleMake)),
        plate_number: plate_number(raw.get(CanonicalField::PlateNumber)),
        contact_name: contact_name(raw.get(CanonicalField::ContactName)),
        agency: agency(raw.get(CanonicalField::AgencyName)),
        injured: injured(raw.get(CanonicalField::InjuredName)),
    };

    for field in crate::fields::BusinessField::ALL {
        if !fields.is_present(field) {
            tracing::debug!(field = field.label(), "Field normalized to no value");
        }
    }

    fields
}

/// Policy No: kept when it carries at least one digit
pub fn policy_number(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|v| has_digit(v))
        .map(str::to_string)
}

/// Policyholder Name: longer than two characters and not an all-caps label
pub fn policyholder_name(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|v| v.chars().count() > 2 && !is_all_caps(v))
        .map(str::to_string)
}

/// Carrier: rejected when it is the `CARRIER` template label
pub fn carrier(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|v| !contains_label(v, "CARRIER"))
        .map(str::to_string)
}

/// Insured or contact email: must contain `@`
pub fn email(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|v| v.contains('@'))
        .map(str::to_string)
}

/// Date of Loss: has a digit and no time or label text mixed in
pub fn date_of_loss(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|v| has_digit(v) && !contains_any_label(v, &["AM", "PM", "DATE"]))
        .map(str::to_string)
}

/// Time: digits and colons only, suffixed with `PM` when a checkbox mark
/// precedes the `PM` token and `AM` otherwise
pub fn time_of_loss(raw: Option<&str>) -> Option<String> {
    let raw = non_blank(raw).filter(|v| has_digit(v))?;

    let clock: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ':')
        .collect();
    let meridiem = if PM_MARK.is_match(raw) { "PM" } else { "AM" };

    Some(format!("{} {}", clock, meridiem))
}

/// Location: street line joined with the city/state/zip line
pub fn location(street: Option<&str>, city: Option<&str>) -> Option<String> {
    let street = non_blank(street)?;
    let city = non_blank(city)?;

    if contains_label(street, "STREET") {
        return None;
    }
    Some(format!("{}, {}", street, city))
}

/// Estimate Amount: raw text kept untouched when it carries a digit;
/// numeric parsing happens at routing time
pub fn estimate_amount(raw: Option<&str>) -> Option<String> {
    raw.filter(|v| !v.trim().is_empty() && has_digit(v))
        .map(str::to_string)
}

/// Make: rejected when it is the `MAKE` template label
pub fn vehicle_make(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|v| !contains_label(v, "MAKE"))
        .map(str::to_string)
}

/// Plate Number: must carry a digit
pub fn plate_number(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|v| has_digit(v))
        .map(str::to_string)
}

/// Contact Name: not an all-caps label and not the `CONTACT` label
pub fn contact_name(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|v| !is_all_caps(v) && !contains_label(v, "CONTACT"))
        .map(str::to_string)
}

/// Agency: longer than two characters and not the `AGENCY` label
pub fn agency(raw: Option<&str>) -> Option<String> {
    non_blank(raw)
        .filter(|v| v.chars().count() > 2 && !contains_label(v, "AGENCY"))
        .map(str::to_string)
}

/// Injured: first line only, rejected when template label text bleeds in
pub fn injured(raw: Option<&str>) -> Option<String> {
    let first_line = raw?.split('\n').next()?.trim();

    if first_line.chars().count() <= 2
        || contains_any_label(first_line, &["NAME & ADDRESS", "PHONE", "INJURED"])
    {
        return None;
    }
    Some(first_line.to_string())
}

fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|v| !v.is_empty())
}

fn has_digit(value: &str) -> bool {
    value.chars().any(|c| c.is_ascii_digit())
}

/// At least one cased character and no lower-case ones
fn is_all_caps(value: &str) -> bool {
    value.chars().any(char::is_uppercase) && !value.chars().any(char::is_lowercase)
}

fn contains_label(value: &str, label: &str) -> bool {
    value.to_uppercase().contains(label)
}

fn contains_any_label(value: &str, labels: &[&str]) -> bool {
    let upper = value.to_uppercase();
    labels.iter().any(|label| upper.contains(label))
}
