//! Claim report assembly
//!
//! The report is the only artifact that leaves the triage core. It groups the
//! normalized values for presentation, explains which mandatory fields were
//! missing, and carries the routing decision. Absent values are rendered as
//! the literal string `"null"` here and nowhere else.

use serde::{Deserialize, Serialize};

use crate::fields::{BusinessField, NormalizedFieldSet};
use crate::routing::{Route, RoutingDecision};
use crate::screening::MANDATORY_FIELDS;

/// Serde adapter rendering `None` as the `"null"` marker string
pub mod sentinel {
    use serde::{Deserialize, Deserializer, Serializer};

    /// Marker written for fields with no usable value
    pub const NULL_MARKER: &str = "null";

    pub fn serialize<S: Serializer>(value: &Option<String>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(value.as_deref().unwrap_or(NULL_MARKER))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(value.filter(|v| v != NULL_MARKER))
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyInformation {
    #[serde(rename = "Policy No.", with = "sentinel")]
    pub policy_number: Option<String>,
    #[serde(rename = "PolicyHolder Name", with = "sentinel")]
    pub policyholder_name: Option<String>,
    #[serde(rename = "PolicyHolder Email", with = "sentinel")]
    pub policyholder_email: Option<String>,
    #[serde(rename = "Carrier", with = "sentinel")]
    pub carrier: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncidentInformation {
    #[serde(rename = "Date Of Loss", with = "sentinel")]
    pub date_of_loss: Option<String>,
    #[serde(rename = "Time", with = "sentinel")]
    pub time: Option<String>,
    #[serde(rename = "Location", with = "sentinel")]
    pub location: Option<String>,
    #[serde(rename = "Estimated Damage", with = "sentinel")]
    pub estimated_damage: Option<String>,
    #[serde(rename = "Injured", with = "sentinel")]
    pub injured: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvolvedParties {
    #[serde(rename = "Agency", with = "sentinel")]
    pub agency: Option<String>,
    #[serde(rename = "Contact Name", with = "sentinel")]
    pub contact_name: Option<String>,
    #[serde(rename = "Contact Email", with = "sentinel")]
    pub contact_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDetails {
    #[serde(rename = "Vehicle Make", with = "sentinel")]
    pub vehicle_make: Option<String>,
    #[serde(rename = "Vehicle Plate Number", with = "sentinel")]
    pub vehicle_plate_number: Option<String>,
}

/// Normalized values in their presentation groups
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtractedFields {
    #[serde(rename = "Policy Information")]
    pub policy: PolicyInformation,
    #[serde(rename = "Incident Information")]
    pub incident: IncidentInformation,
    #[serde(rename = "Involved Parties")]
    pub parties: InvolvedParties,
    #[serde(rename = "Asset Details")]
    pub asset: AssetDetails,
}

impl From<&NormalizedFieldSet> for ExtractedFields {
    fn from(fields: &NormalizedFieldSet) -> Self {
        let value = |field: BusinessField| fields.get(field).map(str::to_string);

        Self {
            policy: PolicyInformation {
                policy_number: value(BusinessField::PolicyNumber),
                policyholder_name: value(BusinessField::PolicyholderName),
                policyholder_email: value(BusinessField::InsuredEmail),
                carrier: value(BusinessField::Carrier),
            },
            incident: IncidentInformation {
                date_of_loss: value(BusinessField::DateOfLoss),
                time: value(BusinessField::Time),
                location: value(BusinessField::Location),
                estimated_damage: value(BusinessField::EstimateAmount),
                injured: value(BusinessField::Injured),
            },
            parties: InvolvedParties {
                agency: value(BusinessField::Agency),
                contact_name: value(BusinessField::ContactName),
                contact_email: value(BusinessField::ContactEmail),
            },
            asset: AssetDetails {
                vehicle_make: value(BusinessField::Make),
                vehicle_plate_number: value(BusinessField::PlateNumber),
            },
        }
    }
}

/// Final triage output for one document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimReport {
    #[serde(rename = "extractedFields")]
    pub extracted_fields: ExtractedFields,
    #[serde(rename = "missingFields")]
    pub missing_fields: Vec<String>,
    #[serde(rename = "recommendedRoute")]
    pub recommended_route: Route,
    #[serde(rename = "reasoning")]
    pub reasoning: String,
}

impl ClaimReport {
    /// Assembles the report; performs no validation of its own
    pub fn assemble(
        fields: &NormalizedFieldSet,
        missing: &[BusinessField],
        decision: RoutingDecision,
    ) -> Self {
        Self {
            extracted_fields: ExtractedFields::from(fields),
            missing_fields: explain_missing(missing),
            recommended_route: decision.route,
            reasoning: decision.reason,
        }
    }

    /// The routing decision carried by this report
    pub fn decision(&self) -> RoutingDecision {
        RoutingDecision::new(self.recommended_route, self.reasoning.clone())
    }
}

/// One explanation line per missing mandatory field, or a single all-clear line
///
/// The mandatory list renders as a quoted list, e.g. `['Policy No', 'Carrier']`.
pub fn explain_missing(missing: &[BusinessField]) -> Vec<String> {
    let mandatory = MANDATORY_FIELDS
        .iter()
        .map(|field| format!("'{}'", field.label()))
        .collect::<Vec<_>>()
        .join(", ");

    if missing.is_empty() {
        return vec![format!(
            " No Missing values out of mandatory fields-[{}]",
            mandatory
        )];
    }

    missing
        .iter()
        .map(|field| {
            format!(
                "{} MISSING VALUE(S)-{},out of {} mandatory fields-[{}]",
                missing.len(),
                field.label().to_uppercase(),
                MANDATORY_FIELDS.len(),
                mandatory
            )
        })
        .collect()
}
