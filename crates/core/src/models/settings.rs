use serde::{Deserialize, Serialize};

/// Key under which the ledger blob is stored unless configured otherwise.
pub const DEFAULT_STORAGE_KEY: &str = "expenses";

/// Tracker configuration, supplied by the embedding application.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Settings {
    /// Store key holding the serialized ledger.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Display currency code. Amounts are never converted.
    #[serde(default = "default_currency")]
    pub currency: String,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            storage_key: default_storage_key(),
            currency: default_currency(),
        }
    }
}

fn default_storage_key() -> String {
    DEFAULT_STORAGE_KEY.to_string()
}

fn default_currency() -> String {
    "USD".to_string()
}
