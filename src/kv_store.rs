use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use strum_macros::{AsRefStr, EnumIter};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, AsRefStr, EnumIter)]
#[strum(serialize_all = "snake_case")]
pub enum StorageKey {
    Route,
    IsTracking,
}

pub trait KeyValueStore {
    fn get(&self, key: StorageKey) -> Result<Option<Vec<u8>>>;
    fn set(&mut self, key: StorageKey, value: &[u8]) -> Result<()>;
    // removing a missing key is not an error
    fn remove(&mut self, key: StorageKey) -> Result<()>;
}

/// In-memory store. Clones share the same map, so a test can keep a handle
/// and look at what was written through another one.
#[derive(Clone, Default)]
pub struct MemoryStore {
    map: Arc<Mutex<HashMap<StorageKey, Vec<u8>>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        MemoryStore::default()
    }

    pub fn contains(&self, key: StorageKey) -> bool {
        self.map.lock().unwrap().contains_key(&key)
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: StorageKey) -> Result<Option<Vec<u8>>> {
        Ok(self.map.lock().unwrap().get(&key).cloned())
    }

    fn set(&mut self, key: StorageKey, value: &[u8]) -> Result<()> {
        self.map.lock().unwrap().insert(key, value.to_vec());
        Ok(())
    }

    fn remove(&mut self, key: StorageKey) -> Result<()> {
        self.map.lock().unwrap().remove(&key);
        Ok(())
    }
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: StorageKey) -> Result<Option<Vec<u8>>> {
        (**self).get(key)
    }

    fn set(&mut self, key: StorageKey, value: &[u8]) -> Result<()> {
        (**self).set(key, value)
    }

    fn remove(&mut self, key: StorageKey) -> Result<()> {
        (**self).remove(key)
    }
}
