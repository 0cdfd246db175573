use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

use super::entity::{Entity, EntityId, Resource};
use super::form::{amount_field, date_field, FormFields, DATE_FORMAT};

/// Policy category offered by the insurance form's select box.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InsuranceType {
    Term,
    Health,
    Auto,
    Home,
    Disability,
    Other,
}

impl InsuranceType {
    pub const ALL: [InsuranceType; 6] = [
        InsuranceType::Term,
        InsuranceType::Health,
        InsuranceType::Auto,
        InsuranceType::Home,
        InsuranceType::Disability,
        InsuranceType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InsuranceType::Term => "Term",
            InsuranceType::Health => "Health",
            InsuranceType::Auto => "Auto",
            InsuranceType::Home => "Home",
            InsuranceType::Disability => "Disability",
            InsuranceType::Other => "Other",
        }
    }
}

impl fmt::Display for InsuranceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InsuranceType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        InsuranceType::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown insurance type '{s}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum PolicyStatus {
    #[default]
    Active,
    Expired,
    Cancelled,
}

impl PolicyStatus {
    pub const ALL: [PolicyStatus; 3] = [
        PolicyStatus::Active,
        PolicyStatus::Expired,
        PolicyStatus::Cancelled,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            PolicyStatus::Active => "Active",
            PolicyStatus::Expired => "Expired",
            PolicyStatus::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for PolicyStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for PolicyStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PolicyStatus::ALL
            .into_iter()
            .find(|t| t.as_str() == s)
            .ok_or_else(|| CoreError::Validation(format!("Unknown policy status '{s}'")))
    }
}

/// An insurance policy. `premium` is the annual premium.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Insurance {
    pub id: EntityId,
    pub policy_number: String,
    pub insurance_type: InsuranceType,
    pub provider: String,
    #[serde(default)]
    pub premium: f64,
    #[serde(default)]
    pub coverage_amount: f64,
    pub start_date: NaiveDate,
    #[serde(default)]
    pub end_date: Option<NaiveDate>,
    #[serde(default)]
    pub status: PolicyStatus,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsurancePayload {
    pub policy_number: String,
    pub insurance_type: InsuranceType,
    pub provider: String,
    pub premium: f64,
    pub coverage_amount: f64,
    pub start_date: NaiveDate,
    pub end_date: Option<NaiveDate>,
    pub status: PolicyStatus,
    pub description: Option<String>,
}

impl Entity for Insurance {
    type Payload = InsurancePayload;

    const RESOURCE: Resource = Resource::Insurances;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn to_payload(&self) -> InsurancePayload {
        InsurancePayload {
            policy_number: self.policy_number.clone(),
            insurance_type: self.insurance_type,
            provider: self.provider.clone(),
            premium: self.premium,
            coverage_amount: self.coverage_amount,
            start_date: self.start_date,
            end_date: self.end_date,
            status: self.status,
            description: self.description.clone(),
        }
    }

    fn default_fields() -> FormFields {
        FormFields::new()
            .with("policyNumber", "")
            .with("insuranceType", "")
            .with("provider", "")
            .with("premium", "")
            .with("coverageAmount", "")
            .with("startDate", "")
            .with("endDate", "")
            .with("status", PolicyStatus::default().as_str())
            .with("description", "")
    }

    fn to_fields(&self) -> FormFields {
        FormFields::new()
            .with("policyNumber", self.policy_number.as_str())
            .with("insuranceType", self.insurance_type.as_str())
            .with("provider", self.provider.as_str())
            .with("premium", amount_field(self.premium))
            .with("coverageAmount", amount_field(self.coverage_amount))
            .with("startDate", self.start_date.format(DATE_FORMAT).to_string())
            .with("endDate", date_field(self.end_date))
            .with("status", self.status.as_str())
            .with("description", self.description.clone().unwrap_or_default())
    }

    fn parse_fields(fields: &FormFields) -> Result<InsurancePayload, CoreError> {
        let insurance_type = fields
            .required_text("insuranceType", "Insurance type")?
            .parse::<InsuranceType>()?;
        let status = match fields.get("status") {
            "" => PolicyStatus::default(),
            s => s.parse::<PolicyStatus>()?,
        };

        Ok(InsurancePayload {
            policy_number: fields.required_text("policyNumber", "Policy number")?,
            insurance_type,
            provider: fields.required_text("provider", "Provider")?,
            premium: fields.required_amount("premium", "Premium", 0.0)?,
            coverage_amount: fields.required_amount("coverageAmount", "Coverage amount", 0.0)?,
            start_date: fields.required_date("startDate", "Start date")?,
            end_date: fields.optional_date("endDate", "End date")?,
            status,
            description: fields.optional_text("description"),
        })
    }
}
