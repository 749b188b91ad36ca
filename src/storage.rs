//! Local key/value storage.
//!
//! Plays the role browser `localStorage` plays for the web client: a flat map
//! of string keys to string values that survives restarts. [`FileStore`] keeps
//! the map in a single JSON file; [`MemoryStore`] is the in-process fake used
//! by tests.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::warn;

use crate::errors::StorageError;

/// Username for admin basic auth, stored after a successful verify call.
pub const ADMIN_BASIC_USER: &str = "adminBasicUser";
/// Password for admin basic auth, stored alongside [`ADMIN_BASIC_USER`].
pub const ADMIN_BASIC_PASSWORD: &str = "adminBasicPassword";
/// Bearer token from `/auth/login`.
pub const ADMIN_TOKEN: &str = "adminToken";
/// Serialized list of locally tracked orders.
pub const ORDERS: &str = "orders";

/// String-keyed persistent storage.
///
/// Each call is atomic on its own; callers that need read-modify-write must
/// serialize themselves (see `OrderRegistry`).
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

pub type SharedStore = Arc<dyn KeyValueStore>;

/// A JSON object on disk, rewritten in full on every change.
pub struct FileStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    /// Store under `data_dir/storage.json`.
    pub fn in_dir(data_dir: &Path) -> Self {
        Self::new(data_dir.join("storage.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<BTreeMap<String, String>, StorageError> {
        if !self.path.exists() {
            return Ok(BTreeMap::new());
        }
        let content = std::fs::read_to_string(&self.path).map_err(|source| StorageError::Read {
            path: self.path.clone(),
            source,
        })?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        match serde_json::from_str(&content) {
            Ok(map) => Ok(map),
            Err(e) => {
                self.quarantine(&e);
                Ok(BTreeMap::new())
            }
        }
    }

    /// Move an unparseable file aside so the next write starts clean.
    fn quarantine(&self, error: &serde_json::Error) {
        let aside = self.path.with_extension("json.corrupt");
        warn!(
            path = %self.path.display(),
            moved_to = %aside.display(),
            %error,
            "Storage file is not valid JSON; starting empty"
        );
        if let Err(e) = std::fs::rename(&self.path, &aside) {
            warn!(error = %e, "Could not move corrupt storage file aside");
        }
    }

    fn save(&self, map: &BTreeMap<String, String>) -> Result<(), StorageError> {
        let write_err = |source| StorageError::Write {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(write_err)?;
        }
        let content = serde_json::to_string_pretty(map).map_err(|source| StorageError::Encode {
            key: "*".to_string(),
            source,
        })?;
        // Write-then-rename so a crash never leaves a half-written file.
        let tmp = self.path.with_extension("json.tmp");
        std::fs::write(&tmp, content).map_err(write_err)?;
        std::fs::rename(&tmp, &self.path).map_err(write_err)
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(self.load()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut map = self.load()?;
        map.insert(key.to_string(), value.to_string());
        self.save(&map)
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let _guard = self.lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut map = self.load()?;
        if map.remove(key).is_some() {
            self.save(&map)?;
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStore {
    map: Mutex<BTreeMap<String, String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn shared() -> Arc<Self> {
        Arc::new(Self::new())
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let map = self.map.lock().map_err(|_| StorageError::LockPoisoned)?;
        Ok(map.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), StorageError> {
        let mut map = self.map.lock().map_err(|_| StorageError::LockPoisoned)?;
        map.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<(), StorageError> {
        let mut map = self.map.lock().map_err(|_| StorageError::LockPoisoned)?;
        map.remove(key);
        Ok(())
    }
}

/// Cached admin basic-auth credentials, if both halves are present.
pub fn admin_credentials(store: &dyn KeyValueStore) -> Result<Option<(String, String)>, StorageError> {
    let user = store.get(ADMIN_BASIC_USER)?;
    let password = store.get(ADMIN_BASIC_PASSWORD)?;
    Ok(match (user, password) {
        (Some(user), Some(password)) if !user.is_empty() && !password.is_empty() => {
            Some((user, password))
        }
        _ => None,
    })
}

pub fn save_admin_credentials(
    store: &dyn KeyValueStore,
    user: &str,
    password: &str,
) -> Result<(), StorageError> {
    store.set(ADMIN_BASIC_USER, user)?;
    store.set(ADMIN_BASIC_PASSWORD, password)
}

pub fn clear_admin_credentials(store: &dyn KeyValueStore) -> Result<(), StorageError> {
    store.remove(ADMIN_BASIC_USER)?;
    store.remove(ADMIN_BASIC_PASSWORD)
}
