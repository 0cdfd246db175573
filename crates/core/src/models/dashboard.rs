use serde::{Deserialize, Serialize};

/// Cross-resource totals computed by the backend (`GET /dashboard`).
///
/// Read-only to the client.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(default)]
    pub net_worth: f64,
    #[serde(default)]
    pub total_assets: f64,
    #[serde(default)]
    pub total_assets_with_investments: f64,
    #[serde(default)]
    pub total_liabilities: f64,
    #[serde(default)]
    pub total_investments: f64,
    #[serde(default)]
    pub asset_count: u64,
    #[serde(default)]
    pub investment_count: u64,
    #[serde(default)]
    pub liability_count: u64,
}

/// Headline figures of the dashboard's metric cards.
///
/// The "change" figures compare against synthetic previous values until a
/// history endpoint exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardMetrics {
    /// Month-over-month net worth change, percent.
    pub net_worth_change: f64,
    /// Month-over-month total assets change, percent.
    pub assets_change: f64,
    /// Month-over-month total liabilities change, percent.
    pub liabilities_change: f64,
    /// Profit/loss on net worth over the period.
    pub total_pl: f64,
    /// `total_pl` relative to total investments, percent.
    pub roi: f64,
}

/// One slice of the asset-allocation pie.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationSlice {
    pub name: String,
    /// Displayed value, never negative.
    pub value: f64,
    /// Amount cut off by clamping at zero. Non-zero means the placeholder
    /// categories exceed the real totals.
    pub shortfall: f64,
}

impl AllocationSlice {
    pub fn new(name: impl Into<String>, raw_value: f64) -> Self {
        let (value, shortfall) = if raw_value < 0.0 {
            (0.0, -raw_value)
        } else {
            (raw_value, 0.0)
        };
        Self {
            name: name.into(),
            value,
            shortfall,
        }
    }

    pub fn is_clamped(&self) -> bool {
        self.shortfall > 0.0
    }
}
