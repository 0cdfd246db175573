use serde::{Deserialize, Serialize};

/// A single point of a line chart (e.g. net worth per month).
///
/// The core generates these; the frontend just renders them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartDataPoint {
    /// X-axis label, e.g. "Jan"
    pub label: String,

    pub value: f64,
}

impl ChartDataPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// One bar group of the profit/loss chart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfitLossPoint {
    pub label: String,
    pub profit: f64,
    pub loss: f64,
}

impl ProfitLossPoint {
    pub fn new(label: impl Into<String>, profit: f64, loss: f64) -> Self {
        Self {
            label: label.into(),
            profit,
            loss,
        }
    }

    pub fn net(&self) -> f64 {
        self.profit - self.loss
    }
}
