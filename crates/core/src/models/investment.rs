use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::entity::{Entity, EntityId, Resource};
use super::form::{amount_field, date_field, FormFields};

/// Smallest amount the backend accepts for `investmentAmount`.
pub const MIN_INVESTMENT_AMOUNT: f64 = 0.01;

/// A tracked investment position (fund, stock basket, deposit, …).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Investment {
    pub id: EntityId,

    /// Free text category, e.g. "Mutual Funds".
    pub investment_type: String,

    pub provider_broker: String,

    /// Amount originally invested.
    #[serde(default)]
    pub investment_amount: f64,

    /// Current market value.
    #[serde(default)]
    pub current_amount: f64,

    #[serde(default)]
    pub purchased_date: Option<NaiveDate>,

    #[serde(default)]
    pub maturity_date: Option<NaiveDate>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvestmentPayload {
    pub investment_type: String,
    pub provider_broker: String,
    pub investment_amount: f64,
    pub current_amount: f64,
    pub purchased_date: Option<NaiveDate>,
    pub maturity_date: Option<NaiveDate>,
}

impl Entity for Investment {
    type Payload = InvestmentPayload;

    const RESOURCE: Resource = Resource::Investments;

    fn id(&self) -> &EntityId {
        &self.id
    }

    fn to_payload(&self) -> InvestmentPayload {
        InvestmentPayload {
            investment_type: self.investment_type.clone(),
            provider_broker: self.provider_broker.clone(),
            investment_amount: self.investment_amount,
            current_amount: self.current_amount,
            purchased_date: self.purchased_date,
            maturity_date: self.maturity_date,
        }
    }

    fn default_fields() -> FormFields {
        FormFields::new()
            .with("investmentType", "")
            .with("providerBroker", "")
            .with("investmentAmount", "")
            .with("currentAmount", "")
            .with("purchasedDate", "")
            .with("maturityDate", "")
    }

    fn to_fields(&self) -> FormFields {
        FormFields::new()
            .with("investmentType", self.investment_type.as_str())
            .with("providerBroker", self.provider_broker.as_str())
            .with("investmentAmount", amount_field(self.investment_amount))
            .with("currentAmount", amount_field(self.current_amount))
            .with("purchasedDate", date_field(self.purchased_date))
            .with("maturityDate", date_field(self.maturity_date))
    }

    fn parse_fields(fields: &FormFields) -> Result<InvestmentPayload, CoreError> {
        Ok(InvestmentPayload {
            investment_type: fields.required_text("investmentType", "Investment type")?,
            provider_broker: fields.required_text("providerBroker", "Provider/Broker")?,
            investment_amount: fields.required_amount(
                "investmentAmount",
                "Investment amount",
                MIN_INVESTMENT_AMOUNT,
            )?,
            current_amount: fields.required_amount("currentAmount", "Current amount", 0.0)?,
            purchased_date: fields.optional_date("purchasedDate", "Purchased date")?,
            maturity_date: fields.optional_date("maturityDate", "Maturity date")?,
        })
    }
}
