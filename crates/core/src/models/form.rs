use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

use super::expense::{validate_amount, Expense, DATE_FORMAT};

/// Maximum length of the date field (`YYYY-MM-DD`).
pub const DATE_FIELD_LEN: usize = 10;

/// Keep only digits and dots from a typed amount.
#[must_use]
pub fn sanitize_amount(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '.')
        .collect()
}

/// Keep only digits and dashes from a typed date, capped at 10 characters.
#[must_use]
pub fn sanitize_date(text: &str) -> String {
    text.chars()
        .filter(|c| c.is_ascii_digit() || *c == '-')
        .take(DATE_FIELD_LEN)
        .collect()
}

/// Raw text state of the add/edit form.
///
/// Setters run the field sanitizers, so the fields only ever hold what the
/// input filter lets through. Nothing reaches the ledger until
/// [`ExpenseForm::into_expense`] accepts it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExpenseForm {
    pub amount: String,
    pub date: String,
    pub description: String,
}

impl ExpenseForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prefill the form from an existing expense (edit flow).
    pub fn from_expense(expense: &Expense) -> Self {
        Self {
            amount: expense.amount.to_string(),
            date: expense.date.format(DATE_FORMAT).to_string(),
            description: expense.description.clone(),
        }
    }

    pub fn set_amount(&mut self, text: &str) {
        self.amount = sanitize_amount(text);
    }

    pub fn set_date(&mut self, text: &str) {
        self.date = sanitize_date(text);
    }

    pub fn set_description(&mut self, text: &str) {
        self.description = text.to_string();
    }

    /// Reset every field (the form's cancel action).
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    #[must_use]
    pub fn is_complete(&self) -> bool {
        !self.amount.is_empty() && !self.date.is_empty() && !self.description.is_empty()
    }

    /// Validate the form and build a new expense from it.
    ///
    /// Empty fields yield [`CoreError::IncompleteForm`]. The amount takes the
    /// longest numeric prefix (`"12.5.3"` reads as 12.5); a prefix too large
    /// to be a finite number is a [`CoreError::ValidationError`].
    pub fn into_expense(self) -> Result<Expense, CoreError> {
        if !self.is_complete() {
            return Err(CoreError::IncompleteForm);
        }

        let amount = parse_amount_prefix(&self.amount).ok_or_else(|| {
            CoreError::ValidationError(format!("Amount '{}' is not a number", self.amount))
        })?;
        validate_amount(amount)?;

        let date = NaiveDate::parse_from_str(&self.date, DATE_FORMAT).map_err(|_| {
            CoreError::ValidationError(format!(
                "Date '{}' is not a valid YYYY-MM-DD date",
                self.date
            ))
        })?;

        Ok(Expense::new(amount, date, self.description))
    }
}

/// Parse the longest leading `digits[.digits]` run of an amount field.
fn parse_amount_prefix(text: &str) -> Option<f64> {
    let mut end = 0;
    let mut seen_dot = false;
    for (i, c) in text.char_indices() {
        match c {
            '0'..='9' => end = i + 1,
            '.' if !seen_dot => {
                seen_dot = true;
                end = i + 1;
            }
            _ => break,
        }
    }
    let prefix = text[..end].trim_end_matches('.');
    if prefix.is_empty() || prefix == "." {
        return None;
    }
    prefix.parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn amount_prefix_stops_at_second_dot() {
        assert_eq!(parse_amount_prefix("12.5.3"), Some(12.5));
    }

    #[test]
    fn amount_prefix_accepts_leading_dot() {
        assert_eq!(parse_amount_prefix(".5"), Some(0.5));
    }

    #[test]
    fn amount_prefix_trailing_dot() {
        assert_eq!(parse_amount_prefix("7."), Some(7.0));
    }

    #[test]
    fn amount_prefix_rejects_lone_dot() {
        assert_eq!(parse_amount_prefix("."), None);
        assert_eq!(parse_amount_prefix(".."), None);
    }
}
