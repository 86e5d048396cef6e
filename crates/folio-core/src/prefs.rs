//! Preference storage for the handful of flags the site persists.
//!
//! Components never reach for ambient browser storage. Instead they receive a
//! [`PreferenceStore`] and read/write string values by key.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │                     PreferenceStore                           │
//! │   - MemoryStore: in-memory (tests, storage denied)            │
//! │   - WebStorage:  localStorage / sessionStorage (folio-web)    │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! # Keys
//!
//! | Key | Scope | Values |
//! |-----|-------|--------|
//! | `visitCount` | durable | non-negative integer as text |
//! | `theme` | durable | `"light"` / `"dark"` / absent (= dark) |
//! | `navClick` | session | `"true"` / absent |
//!
//! # Failure Modes
//!
//! Storage failures never panic. Writers return [`StoreResult`]; callers log
//! the failure and continue with the in-memory value.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;

/// Storage key names shared with the markup layer and older page versions.
pub mod keys {
    /// Durable count of page loads, used for splash cadence.
    pub const VISIT_COUNT: &str = "visitCount";
    /// Durable theme preference.
    pub const THEME: &str = "theme";
    /// Session flag set by internal navigation clicks.
    pub const NAV_CLICK: &str = "navClick";
}

/// Errors that can occur while writing a preference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// The backing storage is not reachable (privacy mode, sandboxed frame).
    Unavailable(String),
    /// The backing storage rejected the write (quota, security error).
    Rejected { key: String, reason: String },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::Unavailable(msg) => write!(f, "storage unavailable: {msg}"),
            StoreError::Rejected { key, reason } => {
                write!(f, "storage rejected write to {key:?}: {reason}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

/// Result type for preference writes.
pub type StoreResult<T> = Result<T, StoreError>;

/// Key/value preference storage scoped to the browsing origin.
///
/// All methods take `&self`: browser storage is interior-mutable and the page
/// runs on a single thread.
pub trait PreferenceStore {
    /// Human-readable name for logging.
    fn name(&self) -> &str;

    /// Read a value. Missing keys and read failures both yield `None`.
    fn get(&self, key: &str) -> Option<String>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> StoreResult<()>;

    /// Delete a value. Deleting a missing key is not an error.
    fn remove(&self, key: &str) -> StoreResult<()>;
}

/// In-memory store for tests and for pages where browser storage is denied.
#[derive(Default)]
pub struct MemoryStore {
    data: RefCell<HashMap<String, String>>,
}

impl MemoryStore {
    /// Create an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with `(key, value)` pairs.
    #[must_use]
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let data = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            data: RefCell::new(data),
        }
    }

    /// Number of stored keys.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.borrow().len()
    }

    /// Whether the store holds no keys.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.borrow().is_empty()
    }
}

impl PreferenceStore for MemoryStore {
    fn name(&self) -> &str {
        "MemoryStore"
    }

    fn get(&self, key: &str) -> Option<String> {
        self.data.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.data
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.data.borrow_mut().remove(key);
        Ok(())
    }
}

impl fmt::Debug for MemoryStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MemoryStore")
            .field("entries", &self.len())
            .finish()
    }
}

/// Durable page-load counter.
#[derive(Debug, Clone, Copy, Default)]
pub struct VisitCounter;

impl VisitCounter {
    /// Read the stored count. Absent or unparseable values count as zero.
    #[must_use]
    pub fn read(store: &dyn PreferenceStore) -> u64 {
        store
            .get(keys::VISIT_COUNT)
            .and_then(|raw| raw.trim().parse::<u64>().ok())
            .unwrap_or(0)
    }

    /// Record one page load and return the count as it was **before** this load.
    ///
    /// The increment is attempted on every call; a rejected write is logged and
    /// the pre-increment value is still returned.
    pub fn record_load(store: &dyn PreferenceStore) -> u64 {
        let previous = Self::read(store);
        let next = previous.saturating_add(1);
        if let Err(err) = store.set(keys::VISIT_COUNT, &next.to_string()) {
            tracing::warn!(store = store.name(), error = %err, "failed to persist visit count");
        }
        previous
    }
}

/// Read a flag-like key and delete it, returning whether it was `"true"`.
pub(crate) fn take_flag(store: &dyn PreferenceStore, key: &str) -> bool {
    let set = store.get(key).is_some_and(|v| v == "true");
    if set {
        if let Err(err) = store.remove(key) {
            tracing::warn!(store = store.name(), key, error = %err, "failed to clear session flag");
        }
    }
    set
}
