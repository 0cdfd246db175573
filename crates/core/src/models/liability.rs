use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::entity::{Entity, EntityId, Resource};
use super::form::{amount_field, FormFields};

/// A debt: mortgage, car loan, credit card balance, student loan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Liability {
    pub id: EntityId,
    pub name: String,
    pub liability_type: String,
    /// Outstanding amount.
    #[serde(default)]
    pub amount: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LiabilityPayload {
    pub name: String,
    pub liability_type: String,
    pub amount: f64,
    pub description: Option<String>,
}

impl Entity for Liability {
    type Payload = LiabilityPayload;

    const RESOURCE: Resource = Resource::Liabilities;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn to_payload(&self) -> LiabilityPayload {
        LiabilityPayload {
            name: self.name.clone(),
            liability_type: self.liability_type.clone(),
            amount: self.amount,
            description: self.description.clone(),
        }
    }

    fn default_fields() -> FormFields {
        FormFields::new()
            .with("name", "")
            .with("liabilityType", "")
            .with("amount", "")
            .with("description", "")
    }

    fn to_fields(&self) -> FormFields {
        FormFields::new()
            .with("name", self.name.as_str())
            .with("liabilityType", self.liability_type.as_str())
            .with("amount", amount_field(self.amount))
            .with("description", self.description.clone().unwrap_or_default())
    }

    fn parse_fields(fields: &FormFields) -> Result<LiabilityPayload, CoreError> {
        Ok(LiabilityPayload {
            name: fields.required_text("name", "Name")?,
            liability_type: fields.required_text("liabilityType", "Liability type")?,
            amount: fields.required_amount("amount", "Amount", 0.0)?,
            description: fields.optional_text("description"),
        })
    }
}
