use healthchat_core::{KeyValueStore, StorageError};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// `window.localStorage` as a key-value store
#[derive(Clone)]
pub struct LocalStorageStore {
    storage: Storage,
}

impl LocalStorageStore {
    pub fn new() -> Result<Self, JsValue> {
        let storage = crate::window()?
            .local_storage()?
            .ok_or_else(|| JsValue::from_str("localStorage is not available"))?;
        Ok(Self { storage })
    }
}

fn unavailable(err: JsValue) -> StorageError {
    StorageError::Unavailable(format!("{:?}", err))
}

impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        self.storage.get_item(key).map_err(unavailable)
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.storage.set_item(key, value).map_err(unavailable)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        self.storage.remove_item(key).map_err(unavailable)
    }
}
