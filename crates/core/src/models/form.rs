use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

/// Date format used by HTML date inputs and the backend's JSON dates.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Raw string values of a form, keyed by field name.
///
/// Insertion order is kept so the rendering layer can lay fields out in the
/// order the entity declares them. Values are never validated here; that
/// happens when the form is submitted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormFields {
    entries: Vec<(String, String)>,
}

impl FormFields {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert used when declaring defaults.
    pub fn with(mut self, name: &str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    /// Set one field. Unknown names are appended.
    pub fn set(&mut self, name: &str, value: impl Into<String>) {
        let value = value.into();
        match self.entries.iter_mut().find(|(n, _)| n == name) {
            Some((_, v)) => *v = value,
            None => self.entries.push((name.to_string(), value)),
        }
    }

    /// Current value of a field, `""` when absent.
    pub fn get(&self, name: &str) -> &str {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
            .unwrap_or("")
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.iter().any(|(n, _)| n == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // ── Parsing helpers for `Entity::parse_fields` ──────────────────

    /// A required text field; surrounding whitespace does not count as content.
    pub fn required_text(&self, name: &str, label: &str) -> Result<String, CoreError> {
        let value = self.get(name);
        if value.trim().is_empty() {
            return Err(CoreError::Validation(format!("{label} is required")));
        }
        Ok(value.to_string())
    }

    /// An optional text field: empty input becomes `None`.
    pub fn optional_text(&self, name: &str) -> Option<String> {
        let value = self.get(name);
        if value.is_empty() {
            None
        } else {
            Some(value.to_string())
        }
    }

    /// A required amount that must parse as a finite number `>= min`.
    pub fn required_amount(&self, name: &str, label: &str, min: f64) -> Result<f64, CoreError> {
        let raw = self.get(name).trim();
        if raw.is_empty() {
            return Err(CoreError::Validation(format!("{label} is required")));
        }
        let amount: f64 = raw
            .parse()
            .map_err(|_| CoreError::Validation(format!("{label} must be a number, got '{raw}'")))?;
        if !amount.is_finite() {
            return Err(CoreError::Validation(format!("{label} must be a finite number")));
        }
        if amount < min {
            return Err(CoreError::Validation(format!(
                "{label} must be at least {min}"
            )));
        }
        Ok(amount)
    }

    /// An optional `YYYY-MM-DD` date: empty input becomes `None`.
    pub fn optional_date(&self, name: &str, label: &str) -> Result<Option<NaiveDate>, CoreError> {
        let raw = self.get(name).trim();
        if raw.is_empty() {
            return Ok(None);
        }
        NaiveDate::parse_from_str(raw, DATE_FORMAT)
            .map(Some)
            .map_err(|_| CoreError::Validation(format!("{label} must be a date (YYYY-MM-DD), got '{raw}'")))
    }

    pub fn required_date(&self, name: &str, label: &str) -> Result<NaiveDate, CoreError> {
        self.optional_date(name, label)?
            .ok_or_else(|| CoreError::Validation(format!("{label} is required")))
    }
}

/// Stringify an amount the way a number input displays it (`1000`, `1200.5`).
pub fn amount_field(amount: f64) -> String {
    amount.to_string()
}

/// Stringify an optional date; `None` becomes an empty input.
pub fn date_field(date: Option<NaiveDate>) -> String {
    date.map(|d| d.format(DATE_FORMAT).to_string())
        .unwrap_or_default()
}
