use crate::error::StorageError;

/// A string-to-string slot store shared by every tab of an origin.
pub trait KeyValueStorage: Send + Sync {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value under `key`.
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Returns true if it existed.
    fn remove_item(&self, key: &str) -> Result<bool, StorageError>;
}
