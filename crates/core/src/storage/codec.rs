use crate::errors::CoreError;
use crate::models::ledger::Ledger;

/// Encode the full ledger as a compact JSON array.
///
/// Output is deterministic: records in ledger order, fields in the order
/// `amount`, `date`, `description`, `id`.
///
/// Fails rather than writing a non-finite amount, which JSON would store as
/// `null` and make the whole blob unreadable.
pub fn serialize(ledger: &Ledger) -> Result<String, CoreError> {
    if let Some(bad) = ledger.expenses().iter().find(|e| !e.amount.is_finite()) {
        return Err(CoreError::Serialization(format!(
            "Refusing to serialize expense {} with amount {}",
            bad.id, bad.amount
        )));
    }
    serde_json::to_string(ledger)
        .map_err(|e| CoreError::Serialization(format!("Failed to serialize ledger: {e}")))
}

/// Decode a stored blob, surfacing corrupt data as an error.
///
/// Blank text counts as "nothing stored yet" and yields an empty ledger.
pub fn try_deserialize(text: &str) -> Result<Ledger, CoreError> {
    if text.trim().is_empty() {
        return Ok(Ledger::new());
    }
    serde_json::from_str(text)
        .map_err(|e| CoreError::Deserialization(format!("Failed to deserialize ledger: {e}")))
}

/// Decode a stored blob, treating corrupt data the same as missing data.
pub fn deserialize(text: &str) -> Ledger {
    match try_deserialize(text) {
        Ok(ledger) => ledger,
        Err(e) => {
            tracing::warn!("discarding unreadable expense data: {e}");
            Ledger::new()
        }
    }
}
