use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::entity::{Entity, EntityId, Resource};
use super::form::{amount_field, FormFields};

/// Something of value the user owns: property, vehicle, cash, jewellery.
///
/// `asset_type` is free text; the views group and pick icons by it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Asset {
    pub id: EntityId,
    pub name: String,
    pub asset_type: String,
    #[serde(default)]
    pub value: f64,
    #[serde(default)]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetPayload {
    pub name: String,
    pub asset_type: String,
    pub value: f64,
    pub description: Option<String>,
}

impl Entity for Asset {
    type Payload = AssetPayload;

    const RESOURCE: Resource = Resource::Assets;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn to_payload(&self) -> AssetPayload {
        AssetPayload {
            name: self.name.clone(),
            asset_type: self.asset_type.clone(),
            value: self.value,
            description: self.description.clone(),
        }
    }

    fn default_fields() -> FormFields {
        FormFields::new()
            .with("name", "")
            .with("assetType", "")
            .with("value", "")
            .with("description", "")
    }

    fn to_fields(&self) -> FormFields {
        FormFields::new()
            .with("name", self.name.as_str())
            .with("assetType", self.asset_type.as_str())
            .with("value", amount_field(self.value))
            .with("description", self.description.clone().unwrap_or_default())
    }

    fn parse_fields(fields: &FormFields) -> Result<AssetPayload, CoreError> {
        Ok(AssetPayload {
            name: fields.required_text("name", "Name")?,
            asset_type: fields.required_text("assetType", "Asset type")?,
            value: fields.required_amount("value", "Value", 0.0)?,
            description: fields.optional_text("description"),
        })
    }
}
