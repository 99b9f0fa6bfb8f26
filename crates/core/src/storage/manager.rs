use crate::errors::CoreError;
use crate::models::ledger::Ledger;

use super::codec;
use super::store::KeyValueStore;

/// High-level storage operations: load/save the ledger through a key-value store.
pub struct StorageManager;

impl StorageManager {
    /// Load the ledger stored under `key`.
    ///
    /// Never fails: a read error, a missing key and corrupt data all yield
    /// an empty ledger. Each case is logged.
    pub async fn load<S>(store: &S, key: &str) -> Ledger
    where
        S: KeyValueStore + ?Sized,
    {
        match store.get(key).await {
            Ok(Some(text)) => {
                let ledger = codec::deserialize(&text);
                tracing::debug!("loaded {} expenses from '{key}'", ledger.len());
                ledger
            }
            Ok(None) => {
                tracing::debug!("no expenses stored under '{key}'");
                Ledger::new()
            }
            Err(e) => {
                tracing::warn!("failed to read expenses from '{key}': {e}");
                Ledger::new()
            }
        }
    }

    /// Load the ledger stored under `key`, surfacing read errors and corrupt data.
    /// A missing key is still an empty ledger.
    pub async fn try_load<S>(store: &S, key: &str) -> Result<Ledger, CoreError>
    where
        S: KeyValueStore + ?Sized,
    {
        match store.get(key).await? {
            Some(text) => codec::try_deserialize(&text),
            None => Ok(Ledger::new()),
        }
    }

    /// Serialize the ledger and write it under `key`.
    pub async fn save<S>(store: &S, key: &str, ledger: &Ledger) -> Result<(), CoreError>
    where
        S: KeyValueStore + ?Sized,
    {
        let text = codec::serialize(ledger)?;
        store.set(key, &text).await?;
        tracing::debug!("saved {} expenses to '{key}'", ledger.len());
        Ok(())
    }
}
