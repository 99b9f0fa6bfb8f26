pub mod errors;
pub mod models;
pub mod services;
pub mod storage;

use models::{
    expense::{Expense, ExpenseRef},
    form::ExpenseForm,
    ledger::Ledger,
    settings::Settings,
};
use services::format_service::FormatService;
use storage::{manager::StorageManager, store::KeyValueStore};

use errors::CoreError;

/// What a screen renders after a mutation: the full sequence and its total.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Snapshot<'a> {
    pub expenses: &'a [Expense],
    pub total: f64,
}

/// Main entry point for the Expense Tracker core library.
///
/// Owns the in-memory ledger and the store it is persisted to. Every
/// mutation is applied in memory first, then written back immediately.
#[must_use]
pub struct ExpenseTracker<S: KeyValueStore> {
    ledger: Ledger,
    store: S,
    settings: Settings,
    format_service: FormatService,
    /// Set while the in-memory ledger is ahead of the store.
    dirty: bool,
}

impl<S: KeyValueStore> std::fmt::Debug for ExpenseTracker<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExpenseTracker")
            .field("expenses", &self.ledger.len())
            .field("settings", &self.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl<S: KeyValueStore> ExpenseTracker<S> {
    /// Open the tracker, loading whatever the store holds.
    /// Missing or unreadable data starts an empty ledger.
    pub async fn open(store: S, settings: Settings) -> Self {
        let ledger = StorageManager::load(&store, &settings.storage_key).await;
        Self::build(store, settings, ledger)
    }

    /// Open the tracker, failing on read errors or corrupt stored data.
    pub async fn try_open(store: S, settings: Settings) -> Result<Self, CoreError> {
        let ledger = StorageManager::try_load(&store, &settings.storage_key).await?;
        Ok(Self::build(store, settings, ledger))
    }

    /// Re-read the store, discarding in-memory state (screen re-entry).
    pub async fn reload(&mut self) {
        self.ledger = StorageManager::load(&self.store, &self.settings.storage_key).await;
        self.dirty = false;
    }

    // ── Mutations ───────────────────────────────────────────────────

    /// Add a new expense, or replace the one `original` addresses (edit flow).
    /// An expense with a negative or non-finite amount is rejected unchanged.
    pub async fn submit(
        &mut self,
        expense: Expense,
        original: Option<ExpenseRef>,
    ) -> Result<Snapshot<'_>, CoreError> {
        expense.validate()?;
        tracing::debug!(
            "submitting expense on {} ({})",
            expense.date,
            if original.is_some() { "edit" } else { "add" }
        );
        self.commit(|ledger| ledger.upsert(expense, original)).await
    }

    /// Validate a filled-in form, then submit it.
    /// An incomplete or invalid form leaves the ledger untouched.
    pub async fn submit_form(
        &mut self,
        form: ExpenseForm,
        original: Option<ExpenseRef>,
    ) -> Result<Snapshot<'_>, CoreError> {
        let expense = form.into_expense()?;
        self.submit(expense, original).await
    }

    /// Delete the first expense matching `target`. Unknown targets are a no-op.
    pub async fn delete(
        &mut self,
        target: impl Into<ExpenseRef>,
    ) -> Result<Snapshot<'_>, CoreError> {
        let target = target.into();
        tracing::debug!("deleting expense by {target}");
        self.commit(|ledger| ledger.remove(target)).await
    }

    /// Delete the expense at a list position. Out-of-range is a no-op.
    pub async fn delete_at(&mut self, index: usize) -> Result<Snapshot<'_>, CoreError> {
        tracing::debug!("deleting expense at position {index}");
        self.commit(|ledger| ledger.remove_at(index)).await
    }

    /// Delete every expense.
    pub async fn clear(&mut self) -> Result<Snapshot<'_>, CoreError> {
        tracing::debug!("clearing all expenses");
        self.commit(Ledger::clear).await
    }

    /// Retry writing the current ledger after a failed save.
    pub async fn sync(&mut self) -> Result<(), CoreError> {
        self.persist().await
    }

    // ── Views ───────────────────────────────────────────────────────

    #[must_use]
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            expenses: self.ledger.expenses(),
            total: self.ledger.total(),
        }
    }

    #[must_use]
    pub fn expenses(&self) -> &[Expense] {
        self.ledger.expenses()
    }

    #[must_use]
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    #[must_use]
    pub fn get(&self, target: impl Into<ExpenseRef>) -> Option<&Expense> {
        self.ledger.get(&target.into())
    }

    /// Case-insensitive description search.
    #[must_use]
    pub fn search(&self, query: &str) -> Vec<&Expense> {
        self.ledger.search(query)
    }

    #[must_use]
    pub fn total(&self) -> f64 {
        self.ledger.total()
    }

    /// The total rendered in the configured currency, e.g. `$52.50`.
    #[must_use]
    pub fn formatted_total(&self) -> String {
        self.format_service.format_currency(self.ledger.total())
    }

    #[must_use]
    pub fn format_currency(&self, amount: f64) -> String {
        self.format_service.format_currency(amount)
    }

    /// A form prefilled from the addressed expense, for the edit screen.
    #[must_use]
    pub fn edit_form(&self, target: impl Into<ExpenseRef>) -> Option<ExpenseForm> {
        self.get(target).map(ExpenseForm::from_expense)
    }

    #[must_use]
    pub fn expense_count(&self) -> usize {
        self.ledger.len()
    }

    /// Returns `true` if the last write failed and memory is ahead of the store.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(store: S, settings: Settings, ledger: Ledger) -> Self {
        let format_service = FormatService::new(settings.currency.clone());
        Self {
            ledger,
            store,
            settings,
            format_service,
            dirty: false,
        }
    }

    /// Apply a ledger transformation, then write the result back.
    ///
    /// The in-memory change is kept even if the write fails; the error is
    /// returned and the tracker stays dirty until a later save succeeds.
    async fn commit(
        &mut self,
        mutate: impl FnOnce(Ledger) -> Ledger,
    ) -> Result<Snapshot<'_>, CoreError> {
        let ledger = std::mem::take(&mut self.ledger);
        self.ledger = mutate(ledger);
        self.dirty = true;
        self.persist().await?;
        Ok(self.snapshot())
    }

    async fn persist(&mut self) -> Result<(), CoreError> {
        let result =
            StorageManager::save(&self.store, &self.settings.storage_key, &self.ledger).await;
        match result {
            Ok(()) => {
                self.dirty = false;
                Ok(())
            }
            Err(e) => {
                tracing::error!("failed to save expenses: {e}");
                Err(e)
            }
        }
    }
}
