//! Changeset identifier allocation.
//!
//! Every generated `changeSet` carries an identifier of the form
//! `<prefix>-<N>`, where `N` comes from a single counter persisted across
//! runs. The counter is saved before an identifier is handed out, so two
//! sequential runs can never reuse a suffix even when the second run starts
//! from the file the first one left behind.

use std::io::ErrorKind;
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::error::{DiffError, Result};

/// Backing store for the persisted changeset counter.
pub trait CounterStore {
    /// Loads the persisted counter value, `None` when no usable value exists.
    ///
    /// # Errors
    ///
    /// Returns an error when the store exists but cannot be read.
    fn load(&mut self) -> Result<Option<u64>>;

    /// Durably replaces the persisted counter value.
    ///
    /// # Errors
    ///
    /// Returns an error when the value cannot be written.
    fn save(&mut self, value: u64) -> Result<()>;
}

/// Counter stored as a decimal integer in a plain text file.
#[derive(Debug)]
pub struct FsCounterStore {
    path: PathBuf,
}

impl FsCounterStore {
    /// Creates a store backed by the given file path. The file is created on
    /// the first save.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl CounterStore for FsCounterStore {
    fn load(&mut self) -> Result<Option<u64>> {
        let text = match std::fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(source) if source.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(DiffError::Counter {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match text.trim().parse::<u64>() {
            Ok(value) => Ok(Some(value)),
            Err(_) => {
                warn!(
                    path = %self.path.display(),
                    "Counter file does not hold a decimal integer, ignoring it"
                );
                Ok(None)
            }
        }
    }

    fn save(&mut self, value: u64) -> Result<()> {
        std::fs::write(&self.path, value.to_string()).map_err(|source| DiffError::Counter {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory counter store for tests and embedding.
#[derive(Debug, Default)]
pub struct MemoryCounterStore {
    value: Option<u64>,
}

impl MemoryCounterStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store already holding a value, as if left by an earlier run.
    #[must_use]
    pub const fn with_value(value: u64) -> Self {
        Self { value: Some(value) }
    }

    /// The currently stored value, if any.
    #[must_use]
    pub const fn value(&self) -> Option<u64> {
        self.value
    }
}

impl CounterStore for MemoryCounterStore {
    fn load(&mut self) -> Result<Option<u64>> {
        Ok(self.value)
    }

    fn save(&mut self, value: u64) -> Result<()> {
        self.value = Some(value);
        Ok(())
    }
}

/// Allocates unique changeset identifiers backed by a [`CounterStore`].
///
/// Uniqueness holds across sequential runs sharing one store. Nothing guards
/// against two processes advancing the same store concurrently.
#[derive(Debug)]
pub struct ChangesetIds<S: CounterStore> {
    store: S,
    next: u64,
}

impl<S: CounterStore> ChangesetIds<S> {
    /// Creates an allocator, resuming from the store's persisted value.
    ///
    /// A fresh, empty, or unreadable store starts the counter at 1. Load
    /// failures are logged, not surfaced.
    pub fn new(mut store: S) -> Self {
        let next = match store.load() {
            Ok(Some(value)) => value,
            Ok(None) => 1,
            Err(error) => {
                warn!(%error, "Could not load the persisted counter, starting from 1");
                1
            }
        };
        debug!(next, "Changeset counter initialized");
        Self { store, next }
    }

    /// Returns `"<prefix>-<N>"` where `N` is the current counter value.
    ///
    /// The advanced counter is persisted before the identifier is returned.
    /// On a save failure the counter does not advance and no identifier is
    /// handed out.
    ///
    /// # Errors
    ///
    /// Returns a persistence error when the store cannot save.
    pub fn next_id(&mut self, prefix: &str) -> Result<String> {
        let value = self.next;
        self.store.save(value + 1)?;
        self.next = value + 1;
        Ok(format!("{prefix}-{value}"))
    }

    /// The value the next allocated identifier will carry.
    #[must_use]
    pub const fn current(&self) -> u64 {
        self.next
    }

    /// Consumes the allocator and hands the store back.
    pub fn into_store(self) -> S {
        self.store
    }
}
