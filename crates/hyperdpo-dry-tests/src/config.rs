// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory config store fake for testing without filesystem I/O.

use std::collections::BTreeMap;
use std::sync::{Arc, Mutex, MutexGuard};

use hyperdpo_api::{ConfigError, ConfigStore, Limits, ServiceConfig};

/// In-memory [`ConfigStore`] with call accounting and injectable failures.
///
/// Clones share state, so a test can hand one clone to a
/// [`ConfigService`](hyperdpo_api::ConfigService) and inspect another.
///
/// ```
/// use hyperdpo_api::{ConfigService, ServiceConfig};
/// use hyperdpo_dry_tests::InMemoryConfigStore;
///
/// let store = InMemoryConfigStore::new();
/// let service = ConfigService::new(store.clone());
/// service.save(ServiceConfig::KEY, &ServiceConfig::default()).unwrap();
/// assert_eq!(store.save_count(), 1);
/// assert!(store.contains_key(ServiceConfig::KEY));
/// ```
#[derive(Clone, Default)]
pub struct InMemoryConfigStore {
    inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
    data: BTreeMap<String, Vec<u8>>,
    load_count: usize,
    save_count: usize,
    fail_on_load: bool,
    fail_on_save: bool,
}

impl InMemoryConfigStore {
    /// Empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Store holding `config` under [`ServiceConfig::KEY`].
    pub fn with_service_config(config: &ServiceConfig) -> Self {
        let store = Self::new();
        // Serializing plain data into a Vec cannot fail.
        if let Ok(bytes) = serde_json::to_vec(config) {
            store.lock().data.insert(ServiceConfig::KEY.to_owned(), bytes);
        }
        store
    }

    /// Store holding default config with the given limits.
    pub fn with_limits(limits: Limits) -> Self {
        Self::with_service_config(&ServiceConfig {
            limits,
            ..ServiceConfig::default()
        })
    }

    /// Store holding `raw` under `key`, verbatim.
    pub fn with_raw(key: &str, raw: &[u8]) -> Self {
        let store = Self::new();
        store.lock().data.insert(key.to_owned(), raw.to_vec());
        store
    }

    fn lock(&self) -> MutexGuard<'_, Inner> {
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Makes every subsequent `load_raw` fail (or succeed again).
    pub fn set_fail_on_load(&self, fail: bool) {
        self.lock().fail_on_load = fail;
    }

    /// Makes every subsequent `save_raw` fail (or succeed again).
    pub fn set_fail_on_save(&self, fail: bool) {
        self.lock().fail_on_save = fail;
    }

    /// `load_raw` attempts, failed ones included.
    pub fn load_count(&self) -> usize {
        self.lock().load_count
    }

    /// `save_raw` attempts, failed ones included.
    pub fn save_count(&self) -> usize {
        self.lock().save_count
    }

    /// Whether `key` holds a blob.
    pub fn contains_key(&self, key: &str) -> bool {
        self.lock().data.contains_key(key)
    }

    /// Stored keys in ascending order.
    pub fn keys(&self) -> Vec<String> {
        self.lock().data.keys().cloned().collect()
    }
}

impl ConfigStore for InMemoryConfigStore {
    fn load_raw(&self, key: &str) -> Result<Vec<u8>, ConfigError> {
        let mut inner = self.lock();
        inner.load_count += 1;
        if inner.fail_on_load {
            return Err(ConfigError::Other("simulated load failure".into()));
        }
        inner.data.get(key).cloned().ok_or(ConfigError::NotFound)
    }

    fn save_raw(&self, key: &str, data: &[u8]) -> Result<(), ConfigError> {
        let mut inner = self.lock();
        inner.save_count += 1;
        if inner.fail_on_save {
            return Err(ConfigError::Other("simulated save failure".into()));
        }
        inner.data.insert(key.to_owned(), data.to_vec());
        Ok(())
    }
}
