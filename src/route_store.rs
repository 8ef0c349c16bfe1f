use anyhow::Result;

use crate::kv_store::{KeyValueStore, StorageKey};
use crate::route::Route;

/// Persists the route (and whether tracking was on) into a key-value store.
///
/// The route is stored as one versionless json blob under a fixed key, so a
/// blob written by an incompatible schema simply fails to decode and is
/// treated as "no saved route".
pub struct RouteStore<S: KeyValueStore> {
    store: S,
}

impl<S: KeyValueStore> RouteStore<S> {
    pub fn new(store: S) -> Self {
        RouteStore { store }
    }

    pub fn save(&mut self, route: &Route) -> Result<()> {
        let data = serde_json::to_vec(route)?;
        self.store.set(StorageKey::Route, &data)
    }

    pub fn try_load(&self) -> Result<Option<Route>> {
        match self.store.get(StorageKey::Route)? {
            None => Ok(None),
            Some(data) => Ok(Some(serde_json::from_slice(&data)?)),
        }
    }

    pub fn load(&self) -> Route {
        match self.try_load() {
            Ok(route) => route.unwrap_or_default(),
            Err(error) => {
                warn!("[route_store.load] treating as no saved route, error:{}", error);
                Route::new()
            }
        }
    }

    pub fn clear(&mut self) -> Result<()> {
        self.store.remove(StorageKey::Route)
    }

    pub fn save_tracking(&mut self, is_tracking: bool) -> Result<()> {
        let data = serde_json::to_vec(&is_tracking)?;
        self.store.set(StorageKey::IsTracking, &data)
    }

    pub fn load_tracking(&self) -> Option<bool> {
        let data = match self.store.get(StorageKey::IsTracking) {
            Ok(data) => data?,
            Err(error) => {
                warn!("[route_store.load_tracking] error:{}", error);
                return None;
            }
        };
        match serde_json::from_slice(&data) {
            Ok(v) => Some(v),
            Err(error) => {
                warn!("[route_store.load_tracking] bad value, error:{}", error);
                None
            }
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}
