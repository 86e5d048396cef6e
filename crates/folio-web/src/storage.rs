//! Browser storage adapters for [`PreferenceStore`].

use std::rc::Rc;

use folio_core::{MemoryStore, PreferenceStore, StoreError, StoreResult};
use web_sys::{Storage, Window};

/// `localStorage` / `sessionStorage` behind the preference-store trait.
pub(crate) struct WebStorage {
    name: &'static str,
    storage: Storage,
}

impl WebStorage {
    /// Durable store, or an in-memory fallback when storage access is denied.
    pub(crate) fn local(window: &Window) -> Rc<dyn PreferenceStore> {
        Self::open("localStorage", window.local_storage())
    }

    /// Session store, or an in-memory fallback when storage access is denied.
    pub(crate) fn session(window: &Window) -> Rc<dyn PreferenceStore> {
        Self::open("sessionStorage", window.session_storage())
    }

    fn open(
        name: &'static str,
        storage: Result<Option<Storage>, wasm_bindgen::JsValue>,
    ) -> Rc<dyn PreferenceStore> {
        match storage {
            Ok(Some(storage)) => Rc::new(Self { name, storage }),
            Ok(None) | Err(_) => {
                tracing::warn!(storage = name, "browser storage unavailable, using memory");
                Rc::new(MemoryStore::new())
            }
        }
    }
}

impl PreferenceStore for WebStorage {
    fn name(&self) -> &str {
        self.name
    }

    fn get(&self, key: &str) -> Option<String> {
        self.storage.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.storage
            .set_item(key, value)
            .map_err(|e| StoreError::Rejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }

    fn remove(&self, key: &str) -> StoreResult<()> {
        self.storage
            .remove_item(key)
            .map_err(|e| StoreError::Unavailable(format!("{e:?}")))
    }
}
