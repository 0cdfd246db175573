use crate::models::analytics::{
    AssetSummary, CategoryTotals, GainLoss, InsuranceSummary, InvestmentSummary,
    LiabilityProgress, LiabilitySummary,
};
use crate::models::asset::Asset;
use crate::models::insurance::Insurance;
use crate::models::investment::Investment;
use crate::models::liability::Liability;

// ── Placeholder rates ───────────────────────────────────────────────
//
// The views show appreciation and repayment figures the backend does not
// provide yet (no purchase prices, no payment history). These fixed rates
// stand in for them and must be replaced once real data exists.

/// Share of total asset value shown as appreciation.
pub const ASSET_TOTAL_APPRECIATION_RATE: f64 = 0.1521;
pub const ASSET_APPRECIATION_PERCENT: f64 = 15.21;
/// Share of a single asset's value shown as its appreciation.
pub const ASSET_ITEM_APPRECIATION_RATE: f64 = 0.15;

/// Share of total liabilities shown as monthly payments.
pub const LIABILITY_MONTHLY_PAYMENT_RATE: f64 = 0.01;
/// Share of total liabilities shown as already paid.
pub const LIABILITY_PAID_RATE: f64 = 0.202;
pub const LIABILITY_PAID_PERCENT: f64 = 20.2;
/// Share of one liability still outstanding.
pub const LIABILITY_REMAINING_RATE: f64 = 0.875;
/// Share of one liability shown as its monthly payment.
pub const LIABILITY_ITEM_MONTHLY_RATE: f64 = 0.006;

/// Category used when an item has no category text.
pub const OTHER_CATEGORY: &str = "Other";

const MONTHS_PER_YEAR: f64 = 12.0;

/// Derived figures for the resource views: totals, category breakdowns and
/// per-item metrics.
///
/// Pure functions of the in-memory collection; no I/O.
pub struct SummaryService;

impl SummaryService {
    pub fn new() -> Self {
        Self
    }

    // ── Investments ─────────────────────────────────────────────────

    pub fn investment_summary(&self, investments: &[Investment]) -> InvestmentSummary {
        let total_invested: f64 = investments.iter().map(|i| i.investment_amount).sum();
        let total_current: f64 = investments.iter().map(|i| i.current_amount).sum();
        let total_gain_loss = total_current - total_invested;
        let total_gain_loss_percent = if total_invested > 0.0 {
            round_to(total_gain_loss / total_invested * 100.0, 2)
        } else {
            0.0
        };

        InvestmentSummary {
            total_invested,
            total_current,
            total_gain_loss,
            total_gain_loss_percent,
        }
    }

    /// Gain/loss of one investment. A zero investment amount yields 0%
    /// instead of dividing by zero.
    pub fn gain_loss(&self, investment: &Investment) -> GainLoss {
        let difference = investment.current_amount - investment.investment_amount;
        let percentage = if investment.investment_amount != 0.0 {
            round_to(difference / investment.investment_amount * 100.0, 2)
        } else {
            0.0
        };
        GainLoss {
            difference,
            percentage,
        }
    }

    // ── Assets ──────────────────────────────────────────────────────

    pub fn asset_summary(&self, assets: &[Asset]) -> AssetSummary {
        let total_value: f64 = assets.iter().map(|a| a.value).sum();
        AssetSummary {
            total_value,
            total_appreciation: total_value * ASSET_TOTAL_APPRECIATION_RATE,
            appreciation_percent: ASSET_APPRECIATION_PERCENT,
        }
    }

    pub fn asset_appreciation(&self, asset: &Asset) -> f64 {
        asset.value * ASSET_ITEM_APPRECIATION_RATE
    }

    /// Value per asset type, first-seen order.
    pub fn asset_category_totals(&self, assets: &[Asset]) -> CategoryTotals {
        group_totals(assets.iter().map(|a| (a.asset_type.as_str(), a.value)))
    }

    // ── Liabilities ─────────────────────────────────────────────────

    pub fn liability_summary(&self, liabilities: &[Liability]) -> LiabilitySummary {
        let total_liabilities: f64 = liabilities.iter().map(|l| l.amount).sum();
        LiabilitySummary {
            total_liabilities,
            monthly_payments: total_liabilities * LIABILITY_MONTHLY_PAYMENT_RATE,
            total_paid: total_liabilities * LIABILITY_PAID_RATE,
            paid_percent: LIABILITY_PAID_PERCENT,
        }
    }

    pub fn liability_progress(&self, liability: &Liability) -> LiabilityProgress {
        let original_amount = liability.amount;
        let remaining_balance = original_amount * LIABILITY_REMAINING_RATE;
        let paid = original_amount - remaining_balance;
        let percent_paid = if original_amount > 0.0 {
            round_to(paid / original_amount * 100.0, 1)
        } else {
            0.0
        };
        LiabilityProgress {
            original_amount,
            remaining_balance,
            paid,
            percent_paid,
        }
    }

    pub fn liability_monthly_payment(&self, liability: &Liability) -> f64 {
        liability.amount * LIABILITY_ITEM_MONTHLY_RATE
    }

    /// Outstanding amount per liability type, first-seen order.
    pub fn liability_category_totals(&self, liabilities: &[Liability]) -> CategoryTotals {
        group_totals(liabilities.iter().map(|l| (l.liability_type.as_str(), l.amount)))
    }

    // ── Insurances ──────────────────────────────────────────────────

    pub fn insurance_summary(&self, insurances: &[Insurance]) -> InsuranceSummary {
        InsuranceSummary {
            total_annual_premiums: insurances.iter().map(|i| i.premium).sum(),
            total_coverage: insurances.iter().map(|i| i.coverage_amount).sum(),
            policy_count: insurances.len(),
        }
    }

    /// Coverage per insurance type, first-seen order.
    pub fn coverage_by_type(&self, insurances: &[Insurance]) -> CategoryTotals {
        group_totals(
            insurances
                .iter()
                .map(|i| (i.insurance_type.as_str(), i.coverage_amount)),
        )
    }

    pub fn monthly_premium(&self, insurance: &Insurance) -> f64 {
        insurance.premium / MONTHS_PER_YEAR
    }
}

impl Default for SummaryService {
    fn default() -> Self {
        Self::new()
    }
}

fn group_totals<'a>(items: impl Iterator<Item = (&'a str, f64)>) -> CategoryTotals {
    let mut totals = CategoryTotals::new();
    for (category, amount) in items {
        let category = if category.trim().is_empty() {
            OTHER_CATEGORY
        } else {
            category
        };
        totals.add(category, amount);
    }
    totals
}

/// Round half away from zero to `decimals` places.
pub(crate) fn round_to(value: f64, decimals: i32) -> f64 {
    let factor = 10f64.powi(decimals);
    (value * factor).round() / factor
}
