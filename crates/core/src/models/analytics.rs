use serde::{Deserialize, Serialize};

/// Summary cards of the investments view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentSummary {
    /// Sum of `investment_amount` over all investments
    pub total_invested: f64,

    /// Sum of `current_amount` over all investments
    pub total_current: f64,

    /// total_current - total_invested
    pub total_gain_loss: f64,

    /// Percentage return, 2 dp; 0 when nothing is invested
    pub total_gain_loss_percent: f64,
}

/// Gain/loss of one investment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GainLoss {
    /// current_amount - investment_amount
    pub difference: f64,

    /// difference / investment_amount * 100, rounded to 2 dp
    pub percentage: f64,
}

impl GainLoss {
    /// Percentage with exactly two decimals, e.g. "20.00".
    pub fn percentage_label(&self) -> String {
        format!("{:.2}", self.percentage)
    }

    pub fn is_gain(&self) -> bool {
        self.difference >= 0.0
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssetSummary {
    pub total_value: f64,
    pub total_appreciation: f64,
    pub appreciation_percent: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilitySummary {
    pub total_liabilities: f64,
    pub monthly_payments: f64,
    pub total_paid: f64,
    pub paid_percent: f64,
}

/// Repayment progress of one liability.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LiabilityProgress {
    pub original_amount: f64,
    pub remaining_balance: f64,
    pub paid: f64,
    /// Percent paid, 1 dp
    pub percent_paid: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsuranceSummary {
    pub total_annual_premiums: f64,
    pub total_coverage: f64,
    pub policy_count: usize,
}

/// Amount per category, in the order categories were first seen.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotals {
    entries: Vec<(String, f64)>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `amount` to `category`, appending the category if it is new.
    pub fn add(&mut self, category: &str, amount: f64) {
        match self.entries.iter_mut().find(|(c, _)| c == category) {
            Some((_, total)) => *total += amount,
            None => self.entries.push((category.to_string(), amount)),
        }
    }

    pub fn get(&self, category: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(c, _)| c == category)
            .map(|(_, total)| *total)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.entries.iter().map(|(c, t)| (c.as_str(), *t))
    }

    pub fn categories(&self) -> Vec<&str> {
        self.entries.iter().map(|(c, _)| c.as_str()).collect()
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|(_, t)| t).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
