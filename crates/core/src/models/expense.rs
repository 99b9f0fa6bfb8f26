use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

use crate::errors::CoreError;

/// Date layout used everywhere an expense date crosses a text boundary.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// A single recorded expense.
///
/// Serialized field order is `amount`, `date`, `description`, `id`.
/// Records persisted before ids existed are still readable: a missing `id`
/// is filled with a fresh one on load.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Expense {
    /// Monetary value in the single implicit currency (non-negative)
    #[serde(deserialize_with = "number_or_numeric_string")]
    pub amount: f64,

    /// Calendar date, no time component, stored as `YYYY-MM-DD`
    pub date: NaiveDate,

    /// Free-text label, searchable
    pub description: String,

    /// Unique identifier assigned at creation
    #[serde(default = "Uuid::new_v4")]
    pub id: Uuid,
}

impl Expense {
    pub fn new(amount: f64, date: NaiveDate, description: impl Into<String>) -> Self {
        Self {
            amount,
            date,
            description: description.into(),
            id: Uuid::new_v4(),
        }
    }

    /// Amounts must be finite and non-negative; anything else cannot be
    /// stored as a JSON number.
    pub fn validate(&self) -> Result<(), CoreError> {
        validate_amount(self.amount)
    }

    /// The legacy `(date, amount)` identity key of this record.
    #[must_use]
    pub fn key(&self) -> ExpenseKey {
        ExpenseKey {
            date: self.date,
            amount: self.amount,
        }
    }
}

/// Reject amounts that are infinite, NaN or negative.
pub fn validate_amount(amount: f64) -> Result<(), CoreError> {
    if !amount.is_finite() {
        return Err(CoreError::ValidationError(format!(
            "Amount {amount} is out of range"
        )));
    }
    if amount < 0.0 {
        return Err(CoreError::ValidationError(format!(
            "Amount {amount} must not be negative"
        )));
    }
    Ok(())
}

/// Legacy identity of an expense: its date and amount.
///
/// Two different expenses sharing a date and amount produce the same key.
/// Lookups by key always resolve to the first match in ledger order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExpenseKey {
    pub date: NaiveDate,
    pub amount: f64,
}

impl ExpenseKey {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }

    /// Build a key from the textual date and amount a list row carries,
    /// e.g. `("2024-01-05", "12.50")`.
    pub fn parse(date: &str, amount: &str) -> Result<Self, CoreError> {
        let date = NaiveDate::parse_from_str(date.trim(), DATE_FORMAT).map_err(|e| {
            CoreError::ValidationError(format!("Invalid date '{date}': {e}"))
        })?;
        let amount = amount.trim().parse::<f64>().map_err(|e| {
            CoreError::ValidationError(format!("Invalid amount '{amount}': {e}"))
        })?;
        Ok(Self { date, amount })
    }

    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        expense.date == self.date && expense.amount == self.amount
    }
}

impl std::fmt::Display for ExpenseKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}/{}", self.date.format(DATE_FORMAT), self.amount)
    }
}

impl From<(NaiveDate, f64)> for ExpenseKey {
    fn from((date, amount): (NaiveDate, f64)) -> Self {
        Self { date, amount }
    }
}

impl From<&Expense> for ExpenseKey {
    fn from(expense: &Expense) -> Self {
        expense.key()
    }
}

/// How a caller addresses an existing record for edit or delete.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ExpenseRef {
    /// Stable identifier (preferred)
    Id(Uuid),
    /// Legacy `(date, amount)` key
    Key(ExpenseKey),
}

impl ExpenseRef {
    #[must_use]
    pub fn matches(&self, expense: &Expense) -> bool {
        match self {
            ExpenseRef::Id(id) => expense.id == *id,
            ExpenseRef::Key(key) => key.matches(expense),
        }
    }
}

impl From<Uuid> for ExpenseRef {
    fn from(id: Uuid) -> Self {
        ExpenseRef::Id(id)
    }
}

impl From<ExpenseKey> for ExpenseRef {
    fn from(key: ExpenseKey) -> Self {
        ExpenseRef::Key(key)
    }
}

impl From<(NaiveDate, f64)> for ExpenseRef {
    fn from(pair: (NaiveDate, f64)) -> Self {
        ExpenseRef::Key(pair.into())
    }
}

impl std::fmt::Display for ExpenseRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExpenseRef::Id(id) => write!(f, "id {id}"),
            ExpenseRef::Key(key) => write!(f, "key {key}"),
        }
    }
}

/// Older blobs may carry the amount as a string (`"12.5"`) instead of a number.
fn number_or_numeric_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Amount {
        Number(f64),
        Text(String),
    }

    match Amount::deserialize(deserializer)? {
        Amount::Number(n) => Ok(n),
        Amount::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|e| serde::de::Error::custom(format!("invalid amount '{s}': {e}"))),
    }
}
