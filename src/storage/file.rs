use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::StorageError;

use super::storage::KeyValueStorage;

type Slots = BTreeMap<String, String>;

/// Slot store persisted as a single JSON object on disk.
///
/// Survives process restarts, so a reopened origin finds the cart it left.
/// Writes go to a sibling temp file that is renamed over the original. The
/// mutex only serializes writers inside this process; two processes sharing
/// the file race exactly like two tabs do.
#[derive(Clone, Debug)]
pub struct JsonFileStorage {
    path: PathBuf,
    guard: Arc<Mutex<()>>,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Arc::new(Mutex::new(())),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read_slots(&self) -> Result<Slots, StorageError> {
        match fs::read_to_string(&self.path) {
            Ok(raw) if raw.trim().is_empty() => Ok(Slots::new()),
            Ok(raw) => Ok(serde_json::from_str(&raw)?),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(Slots::new()),
            Err(err) => Err(err.into()),
        }
    }

    fn write_slots(&self, slots: &Slots) -> Result<(), StorageError> {
        let raw = serde_json::to_string_pretty(slots)?;
        let tmp = self.path.with_extension("tmp");
        fs::write(&tmp, raw)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }
}

impl KeyValueStorage for JsonFileStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| StorageError::LockPoisoned("file read"))?;
        Ok(self.read_slots()?.remove(key))
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| StorageError::LockPoisoned("file write"))?;
        let mut slots = self.read_slots()?;
        slots.insert(key.to_string(), value.to_string());
        self.write_slots(&slots)
    }

    fn remove_item(&self, key: &str) -> Result<bool, StorageError> {
        let _guard = self
            .guard
            .lock()
            .map_err(|_| StorageError::LockPoisoned("file write"))?;
        let mut slots = self.read_slots()?;
        let existed = slots.remove(key).is_some();
        if existed {
            self.write_slots(&slots)?;
        }
        Ok(existed)
    }
}
