use serde::Serialize;
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Storage unavailable: {0}")]
    Unavailable(String),
    #[error("Storage I/O failed")]
    Io(#[from] std::io::Error),
    #[error("Stored value is not valid JSON")]
    Json(#[from] serde_json::Error),
}

pub type StoreResult<T> = std::result::Result<T, StoreError>;

/// Types persisted under one fixed key.
pub trait StorageKey {
    const KEY: &'static str;
}

/// String key-value storage, every write replaces the whole value.
pub trait KeyValueStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>>;

    fn set_raw(&mut self, key: &str, value: &str) -> StoreResult<()>;

    fn remove(&mut self, key: &str) -> StoreResult<()>;

    fn load<T: StorageKey + DeserializeOwned>(&self) -> StoreResult<Option<T>> {
        self.get_raw(T::KEY)?
            .map(|raw| serde_json::from_str(&raw))
            .transpose()
            .map_err(StoreError::from)
    }

    fn save<T: StorageKey + Serialize>(&mut self, value: &T) -> StoreResult<()> {
        let raw = serde_json::to_string(value)?;
        self.set_raw(T::KEY, &raw)
    }

    fn delete<T: StorageKey>(&mut self) -> StoreResult<()> {
        self.remove(T::KEY)
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for &mut S {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        (**self).get_raw(key)
    }

    fn set_raw(&mut self, key: &str, value: &str) -> StoreResult<()> {
        (**self).set_raw(key, value)
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        (**self).remove(key)
    }
}

/// Volatile store, for tests and hosts without persistence.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct MemoryStore {
    values: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get_raw(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set_raw(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.values.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StoreResult<()> {
        self.values.remove(key);
        Ok(())
    }
}
