//! Raw and normalized claim field sets
//!
//! A [`RawFieldSet`] is what an extraction adapter hands over for one
//! document: canonical field name to raw text. A [`NormalizedFieldSet`] is the
//! cleaned view the routing rules work on, with one slot per business field.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Canonical field names requested from the extraction service
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum CanonicalField {
    PolicyNumber,
    InsuredName,
    CarrierName,
    LossDate,
    LossTime,
    LossLocation,
    EstimateAmount,
    VehicleMake,
    PlateNumber,
    AgencyName,
    ContactName,
    CityStateZip,
    InjuredName,
    AccidentDescription,
    DamageDescription,
    InsuredEmail,
    ContactEmail,
}

impl CanonicalField {
    /// All canonical fields, in the order they are requested from the service
    pub const ALL: [CanonicalField; 17] = [
        CanonicalField::PolicyNumber,
        CanonicalField::InsuredName,
        CanonicalField::CarrierName,
        CanonicalField::LossDate,
        CanonicalField::LossTime,
        CanonicalField::LossLocation,
        CanonicalField::EstimateAmount,
        CanonicalField::VehicleMake,
        CanonicalField::PlateNumber,
        CanonicalField::AgencyName,
        CanonicalField::ContactName,
        CanonicalField::CityStateZip,
        CanonicalField::InjuredName,
        CanonicalField::AccidentDescription,
        CanonicalField::DamageDescription,
        CanonicalField::InsuredEmail,
        CanonicalField::ContactEmail,
    ];

    /// Wire name used by the extraction service
    pub fn as_str(&self) -> &'static str {
        match self {
            CanonicalField::PolicyNumber => "PolicyNumber",
            CanonicalField::InsuredName => "InsuredName",
            CanonicalField::CarrierName => "CarrierName",
            CanonicalField::LossDate => "LossDate",
            CanonicalField::LossTime => "LossTime",
            CanonicalField::LossLocation => "LossLocation",
            CanonicalField::EstimateAmount => "EstimateAmount",
            CanonicalField::VehicleMake => "VehicleMake",
            CanonicalField::PlateNumber => "PlateNumber",
            CanonicalField::AgencyName => "AgencyName",
            CanonicalField::ContactName => "ContactName",
            CanonicalField::CityStateZip => "CityStateZip",
            CanonicalField::InjuredName => "InjuredName",
            CanonicalField::AccidentDescription => "AccidentDescription",
            CanonicalField::DamageDescription => "DamageDescription",
            CanonicalField::InsuredEmail => "InsuredEmail",
            CanonicalField::ContactEmail => "ContactEmail",
        }
    }
}

impl fmt::Display for CanonicalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returned when a field name is not one of the canonical names
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownField(pub String);

impl fmt::Display for UnknownField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown canonical field: {}", self.0)
    }
}

impl std::error::Error for UnknownField {}

impl FromStr for CanonicalField {
    type Err = UnknownField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        CanonicalField::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| UnknownField(s.to_string()))
    }
}

/// Field values extracted from one document
///
/// Values are kept verbatim except that blank values are stored as absent.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawFieldSet {
    values: BTreeMap<CanonicalField, String>,
}

impl RawFieldSet {
    /// Creates an empty field set
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets a field value; blank text clears the field
    pub fn insert(&mut self, field: CanonicalField, value: impl Into<String>) {
        let value = value.into();
        if value.trim().is_empty() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// Builder-style variant of [`RawFieldSet::insert`]
    pub fn with(mut self, field: CanonicalField, value: impl Into<String>) -> Self {
        self.insert(field, value);
        self
    }

    /// Builds a field set from wire names, skipping unknown names and nulls
    pub fn from_named<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Option<String>)>,
        K: AsRef<str>,
    {
        let mut fields = Self::new();
        for (name, value) in entries {
            let name = name.as_ref();
            match (name.parse::<CanonicalField>(), value) {
                (Ok(field), Some(value)) => fields.insert(field, value),
                (Ok(_), None) => {}
                (Err(_), _) => {
                    tracing::debug!(field = name, "Ignoring unknown extracted field");
                }
            }
        }
        fields
    }

    /// Returns the raw value of a field, if present
    pub fn get(&self, field: CanonicalField) -> Option<&str> {
        self.values.get(&field).map(String::as_str)
    }

    /// Narrative text describing how the accident happened
    pub fn accident_description(&self) -> Option<&str> {
        self.get(CanonicalField::AccidentDescription)
    }

    /// Narrative text describing the damage
    pub fn damage_description(&self) -> Option<&str> {
        self.get(CanonicalField::DamageDescription)
    }

    /// Number of fields carrying a value
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no field carries a value
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Iterates over present fields in canonical order
    pub fn iter(&self) -> impl Iterator<Item = (CanonicalField, &str)> {
        self.values.iter().map(|(field, value)| (*field, value.as_str()))
    }
}

impl Serialize for RawFieldSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter().map(|(field, value)| (field.as_str(), value)))
    }
}

impl<'de> Deserialize<'de> for RawFieldSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let entries = HashMap::<String, Option<String>>::deserialize(deserializer)?;
        Ok(Self::from_named(entries))
    }
}

/// Business fields produced by normalization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BusinessField {
    PolicyNumber,
    PolicyholderName,
    Carrier,
    InsuredEmail,
    ContactEmail,
    DateOfLoss,
    Time,
    Location,
    EstimateAmount,
    Make,
    PlateNumber,
    ContactName,
    Agency,
    Injured,
}

impl BusinessField {
    /// All business fields in report order
    pub const ALL: [BusinessField; 14] = [
        BusinessField::PolicyNumber,
        BusinessField::PolicyholderName,
        BusinessField::Carrier,
        BusinessField::InsuredEmail,
        BusinessField::ContactEmail,
        BusinessField::DateOfLoss,
        BusinessField::Time,
        BusinessField::Location,
        BusinessField::EstimateAmount,
        BusinessField::Make,
        BusinessField::PlateNumber,
        BusinessField::ContactName,
        BusinessField::Agency,
        BusinessField::Injured,
    ];

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            BusinessField::PolicyNumber => "Policy No",
            BusinessField::PolicyholderName => "Policyholder Name",
            BusinessField::Carrier => "Carrier",
            BusinessField::InsuredEmail => "Insured Email",
            BusinessField::ContactEmail => "Contact Email",
            BusinessField::DateOfLoss => "Date of Loss",
            BusinessField::Time => "Time",
            BusinessField::Location => "Location",
            BusinessField::EstimateAmount => "Estimate Amount",
            BusinessField::Make => "Make",
            BusinessField::PlateNumber => "Plate Number",
            BusinessField::ContactName => "Contact Name",
            BusinessField::Agency => "Agency",
            BusinessField::Injured => "Injured",
        }
    }
}

impl fmt::Display for BusinessField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Cleaned field values; `None` means no usable value
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedFieldSet {
    pub policy_number: Option<String>,
    pub policyholder_name: Option<String>,
    pub carrier: Option<String>,
    pub insured_email: Option<String>,
    pub contact_email: Option<String>,
    pub date_of_loss: Option<String>,
    pub time: Option<String>,
    pub location: Option<String>,
    pub estimate_amount: Option<String>,
    pub make: Option<String>,
    pub plate_number: Option<String>,
    pub contact_name: Option<String>,
    pub agency: Option<String>,
    pub injured: Option<String>,
}

impl NormalizedFieldSet {
    /// Returns the value of a business field, treating empty text as absent
    pub fn get(&self, field: BusinessField) -> Option<&str> {
        let value = match field {
            BusinessField::PolicyNumber => &self.policy_number,
            BusinessField::PolicyholderName => &self.policyholder_name,
            BusinessField::Carrier => &self.carrier,
            BusinessField::InsuredEmail => &self.insured_email,
            BusinessField::ContactEmail => &self.contact_email,
            BusinessField::DateOfLoss => &self.date_of_loss,
            BusinessField::Time => &self.time,
            BusinessField::Location => &self.location,
            BusinessField::EstimateAmount => &self.estimate_amount,
            BusinessField::Make => &self.make,
            BusinessField::PlateNumber => &self.plate_number,
            BusinessField::ContactName => &self.contact_name,
            BusinessField::Agency => &self.agency,
            BusinessField::Injured => &self.injured,
        };
        value.as_deref().filter(|v| !v.is_empty())
    }

    /// Returns true if the field has a usable value
    pub fn is_present(&self, field: BusinessField) -> bool {
        self.get(field).is_some()
    }
}
