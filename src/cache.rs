//! In-process cache of extension configuration documents.
//!
//! Dependency resolution reads the same `chassis.yaml` files several times
//! in one run. The cache is an explicit value owned by the
//! [`ExtensionRegistry`](crate::extension::registry::ExtensionRegistry)
//! rather than process-global state.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::extension::ExtensionConfig;

/// Cache key combining extension name and the directory it lives in
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey {
    pub extension: String,
    pub base_dir: PathBuf,
}

impl CacheKey {
    pub fn new(extension: &str, base_dir: &Path) -> Self {
        Self {
            extension: extension.to_string(),
            base_dir: base_dir.to_path_buf(),
        }
    }
}

/// Cache of parsed extension configuration
#[derive(Debug, Clone)]
pub struct ConfigCache {
    cache: Arc<Mutex<HashMap<CacheKey, ExtensionConfig>>>,
}

impl ConfigCache {
    /// Create a new empty cache
    pub fn new() -> Self {
        Self {
            cache: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Get a cached configuration, or load and cache it if not present
    pub fn get_or_load<F>(&self, key: CacheKey, loader: F) -> Result<ExtensionConfig>
    where
        F: FnOnce() -> Result<ExtensionConfig>,
    {
        if let Some(cached) = self.get(&key)? {
            return Ok(cached);
        }

        let result = loader()?;
        self.insert(key, result.clone())?;
        Ok(result)
    }

    /// Manually insert a value into the cache
    pub fn insert(&self, key: CacheKey, value: ExtensionConfig) -> Result<()> {
        self.lock()?.insert(key, value);
        Ok(())
    }

    /// Get a value from cache without loading
    pub fn get(&self, key: &CacheKey) -> Result<Option<ExtensionConfig>> {
        Ok(self.lock()?.get(key).cloned())
    }

    /// Drop every entry looked up in `base_dir`.
    ///
    /// Used after extensions are deleted or cloned so the next lookup reads
    /// the disk again.
    pub fn invalidate_dir(&self, base_dir: &Path) -> Result<()> {
        self.lock()?.retain(|key, _| key.base_dir != base_dir);
        Ok(())
    }

    /// Clear all cached entries
    pub fn clear(&self) -> Result<()> {
        self.lock()?.clear();
        Ok(())
    }

    /// Get the number of cached entries
    pub fn len(&self) -> Result<usize> {
        Ok(self.lock()?.len())
    }

    /// Check if cache is empty
    pub fn is_empty(&self) -> Result<bool> {
        Ok(self.lock()?.is_empty())
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, HashMap<CacheKey, ExtensionConfig>>> {
        self.cache.lock().map_err(|_| Error::LockPoisoned {
            context: "extension config cache".to_string(),
        })
    }
}

impl Default for ConfigCache {
    fn default() -> Self {
        Self::new()
    }
}
