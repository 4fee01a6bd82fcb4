//! Origin-scoped key/value slots, the Rust stand-in for browser local storage.
//!
//! Values are opaque strings; encoding is the caller's business. There is no
//! compare-and-swap: a write replaces whatever was there.

mod file;
mod in_memory;
mod storage;

pub use file::JsonFileStorage;
pub use in_memory::InMemoryStorage;
pub use storage::KeyValueStorage;
