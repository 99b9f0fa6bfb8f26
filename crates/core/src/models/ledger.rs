use serde::{Deserialize, Serialize};

use super::expense::{Expense, ExpenseRef};

/// The authoritative in-memory collection of expenses.
///
/// Insertion order is preserved; edits replace a record in place. Mutating
/// operations consume the ledger and hand back the new one, so callers keep
/// the read-modify-write cycle explicit. No operation here can fail.
///
/// Serializes as a bare JSON array of expenses.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ledger {
    expenses: Vec<Expense>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Initialize from a possibly missing persisted sequence.
    pub fn load(raw: Option<Vec<Expense>>) -> Self {
        Self {
            expenses: raw.unwrap_or_default(),
        }
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Append an expense at the end.
    #[must_use]
    pub fn add(mut self, expense: Expense) -> Self {
        self.expenses.push(expense);
        self
    }

    /// Single mutation path for both the add and the edit flow.
    ///
    /// `original` is the edit flag: it addresses the record as it was
    /// before the edit. When it resolves, that record's value is fully
    /// replaced by `expense` (keeping the stored id). When it is `None` or
    /// matches nothing, `expense` is appended.
    #[must_use]
    pub fn upsert(mut self, expense: Expense, original: Option<ExpenseRef>) -> Self {
        match original.and_then(|target| self.position(&target)) {
            Some(idx) => {
                let id = self.expenses[idx].id;
                self.expenses[idx] = Expense { id, ..expense };
                self
            }
            None => self.add(expense),
        }
    }

    /// Remove the first record matching `target`. No-op if nothing matches.
    #[must_use]
    pub fn remove(mut self, target: impl Into<ExpenseRef>) -> Self {
        let target = target.into();
        if let Some(idx) = self.position(&target) {
            self.expenses.remove(idx);
        }
        self
    }

    /// Remove the record at a list position. Out-of-range is a no-op.
    #[must_use]
    pub fn remove_at(mut self, index: usize) -> Self {
        if index < self.expenses.len() {
            self.expenses.remove(index);
        }
        self
    }

    /// Drop every record.
    #[must_use]
    pub fn clear(self) -> Self {
        Self::new()
    }

    // ── Views ───────────────────────────────────────────────────────

    /// Records whose description contains `query`, case-insensitively.
    /// An empty query returns every record. Order is preserved.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Expense> {
        let q = query.to_lowercase();
        self.expenses
            .iter()
            .filter(|e| e.description.to_lowercase().contains(&q))
            .collect()
    }

    /// Plain floating-point sum of all amounts; `0.0` when empty.
    #[must_use]
    pub fn total(&self) -> f64 {
        self.expenses.iter().map(|e| e.amount).sum()
    }

    #[must_use]
    pub fn get(&self, target: &ExpenseRef) -> Option<&Expense> {
        self.expenses.iter().find(|e| target.matches(e))
    }

    #[must_use]
    pub fn position(&self, target: &ExpenseRef) -> Option<usize> {
        self.expenses.iter().position(|e| target.matches(e))
    }

    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        &self.expenses
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }

    pub fn into_expenses(self) -> Vec<Expense> {
        self.expenses
    }
}

impl From<Vec<Expense>> for Ledger {
    fn from(expenses: Vec<Expense>) -> Self {
        Self { expenses }
    }
}

impl FromIterator<Expense> for Ledger {
    fn from_iter<I: IntoIterator<Item = Expense>>(iter: I) -> Self {
        Self {
            expenses: iter.into_iter().collect(),
        }
    }
}
