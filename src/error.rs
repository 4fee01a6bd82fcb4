use thiserror::Error;

/// Failure of a key/value storage backend.
///
/// The cart codec never surfaces these to callers of `load`/`save`; they are
/// logged and degraded. They stay typed so backends and `try_*` callers can
/// match on them.
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage lock poisoned during {0}")]
    LockPoisoned(&'static str),

    #[error("storage io failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("storage encoding failed: {0}")]
    Encoding(#[from] serde_json::Error),
}

/// Failure to register, remove or deliver on a notification channel.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BusError {
    #[error("notification channel lock poisoned during {0}")]
    LockPoisoned(&'static str),
}
