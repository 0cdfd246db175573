use log::warn;

use crate::models::chart::{ChartDataPoint, ProfitLossPoint};
use crate::models::dashboard::{AllocationSlice, DashboardMetrics, DashboardSummary};

// ── Placeholder history ─────────────────────────────────────────────
//
// There is no time-series endpoint yet. "Previous month" values are the
// current value scaled by these ratios.

pub const NET_WORTH_PREVIOUS_RATIO: f64 = 0.8875;
pub const ASSETS_PREVIOUS_RATIO: f64 = 0.957;
pub const LIABILITIES_PREVIOUS_RATIO: f64 = 1.021;
/// Net worth at the start of the profit/loss period, relative to today.
pub const PL_BASELINE_RATIO: f64 = 0.974;

/// Fixed allocation amounts until assets are categorised server-side.
pub const REAL_ESTATE_PLACEHOLDER: f64 = 530_000.0;
pub const CASH_PLACEHOLDER: f64 = 18_500.0;

const MONTH_LABELS: [&str; 6] = ["Jan", "Feb", "Mar", "Apr", "May", "Jun"];
const NET_WORTH_HISTORY: [f64; 6] = [
    450_000.0, 470_000.0, 490_000.0, 500_000.0, 510_000.0, 513_993.0,
];
const PROFIT_HISTORY: [f64; 6] = [5_000.0, 6_000.0, 8_000.0, 12_000.0, 10_000.0, 11_000.0];
const LOSS_HISTORY: [f64; 6] = [2_000.0, 1_500.0, 3_000.0, 2_500.0, 2_000.0, 1_800.0];

/// Cross-resource dashboard figures derived from the backend summary.
pub struct DashboardService;

impl DashboardService {
    pub fn new() -> Self {
        Self
    }

    pub fn metrics(&self, summary: &DashboardSummary) -> DashboardMetrics {
        let total_pl = summary.net_worth - summary.net_worth * PL_BASELINE_RATIO;
        let roi = if summary.total_investments != 0.0 {
            total_pl / summary.total_investments * 100.0
        } else {
            0.0
        };

        DashboardMetrics {
            net_worth_change: percentage_change(
                summary.net_worth,
                summary.net_worth * NET_WORTH_PREVIOUS_RATIO,
            ),
            assets_change: percentage_change(
                summary.total_assets,
                summary.total_assets * ASSETS_PREVIOUS_RATIO,
            ),
            liabilities_change: percentage_change(
                summary.total_liabilities,
                summary.total_liabilities * LIABILITIES_PREVIOUS_RATIO,
            ),
            total_pl,
            roi,
        }
    }

    /// Pie slices: investments, the placeholder real estate and cash
    /// amounts, and whatever remains of total assets.
    ///
    /// The remainder is clamped at zero; when the placeholders exceed the
    /// real total the slice records the shortfall.
    pub fn asset_allocation(&self, summary: &DashboardSummary) -> Vec<AllocationSlice> {
        let other = summary.total_assets
            - summary.total_investments
            - REAL_ESTATE_PLACEHOLDER
            - CASH_PLACEHOLDER;

        let other_slice = AllocationSlice::new("Other Assets", other);
        if other_slice.is_clamped() {
            warn!(
                "Asset allocation placeholders exceed total assets by {:.2}; clamping 'Other Assets' to 0",
                other_slice.shortfall
            );
        }

        vec![
            AllocationSlice::new("Investments", summary.total_investments),
            AllocationSlice::new("Real Estate", REAL_ESTATE_PLACEHOLDER),
            AllocationSlice::new("Cash", CASH_PLACEHOLDER),
            other_slice,
        ]
    }

    /// Monthly net worth for the trend chart (placeholder history).
    pub fn net_worth_series(&self) -> Vec<ChartDataPoint> {
        MONTH_LABELS
            .iter()
            .zip(NET_WORTH_HISTORY)
            .map(|(label, value)| ChartDataPoint::new(*label, value))
            .collect()
    }

    /// Monthly profit and loss bars (placeholder history).
    pub fn profit_loss_series(&self) -> Vec<ProfitLossPoint> {
        MONTH_LABELS
            .iter()
            .zip(PROFIT_HISTORY.iter().zip(LOSS_HISTORY))
            .map(|(label, (profit, loss))| ProfitLossPoint::new(*label, *profit, loss))
            .collect()
    }
}

impl Default for DashboardService {
    fn default() -> Self {
        Self::new()
    }
}

/// Percent change from `previous` to `current`; 0 when there is no base.
pub fn percentage_change(current: f64, previous: f64) -> f64 {
    if previous == 0.0 {
        return 0.0;
    }
    (current - previous) / previous * 100.0
}
