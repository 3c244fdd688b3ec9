use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;

use crate::addr::ResolvedAddress;

/// Hostname to address store. Entries never expire; the resolver decides when to overwrite.
#[derive(Default)]
pub struct ResolutionCache {
    entries: RwLock<HashMap<String, Arc<[ResolvedAddress]>>>,
}

impl ResolutionCache {
    pub fn new() -> Arc<Self> {
        Default::default()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.read().contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<Arc<[ResolvedAddress]>> {
        self.entries.read().get(name).cloned()
    }

    /// Stores `addresses` under `name`, replacing whatever was there. Empty sets are dropped.
    pub fn put(&self, name: &str, addresses: impl Into<Arc<[ResolvedAddress]>>) {
        let addresses = addresses.into();
        if addresses.is_empty() {
            log::warn!("Refusing to cache an empty address set for {name}");
            return;
        }

        self.entries.write().insert(name.to_string(), addresses);
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }
}
