use crate::error::PersistenceError;
use serde_json::Value;

/// A durable key-value store holding JSON values.
///
/// The ledger is the only writer within a session, so implementations need
/// no read-modify-write protection.
pub trait KeyValueStore: Send {
    /// Reads the value under `key`.
    ///
    /// # Returns
    ///
    /// * `Ok(None)` if nothing was ever stored under `key`.
    /// * `Err` on IO failure or unparseable content.
    fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError>;

    /// Replaces the value under `key`.
    fn save(&mut self, key: &str, value: &Value) -> Result<(), PersistenceError>;
}

impl KeyValueStore for Box<dyn KeyValueStore> {
    fn load(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        (**self).load(key)
    }

    fn save(&mut self, key: &str, value: &Value) -> Result<(), PersistenceError> {
        (**self).save(key, value)
    }
}
