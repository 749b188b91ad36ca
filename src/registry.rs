//! Locally tracked orders.
//!
//! The registry is advisory: losing it loses nothing on the backend, only the
//! convenience of reopening a tracking page. It therefore favours staying
//! usable over strictness, and a corrupt `orders` slot reads as empty.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use lockopener_common::LocalOrder;
use tracing::{debug, info, warn};

use crate::errors::StorageError;
use crate::storage::{KeyValueStore, ORDERS, SharedStore};

/// Ordered set of [`LocalOrder`] records keyed by order id.
#[derive(Clone)]
pub struct OrderRegistry {
    store: SharedStore,
    // Serializes read-modify-write cycles within this process.
    write_lock: Arc<Mutex<()>>,
}

impl OrderRegistry {
    pub fn new(store: SharedStore) -> Self {
        Self {
            store,
            write_lock: Arc::new(Mutex::new(())),
        }
    }

    pub fn store(&self) -> &dyn KeyValueStore {
        self.store.as_ref()
    }

    /// All records, in insertion order.
    pub fn list(&self) -> Result<Vec<LocalOrder>, StorageError> {
        let Some(raw) = self.store.get(ORDERS)? else {
            return Ok(Vec::new());
        };
        match serde_json::from_str::<Vec<LocalOrder>>(&raw) {
            Ok(records) => Ok(records),
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable tracked orders");
                Ok(Vec::new())
            }
        }
    }

    pub fn get(&self, id: &str) -> Result<Option<LocalOrder>, StorageError> {
        Ok(self.list()?.into_iter().find(|r| r.id == id))
    }

    /// Append `record` unless a record with the same id exists.
    ///
    /// Returns `true` when the record was added.
    pub fn add(&self, record: LocalOrder) -> Result<bool, StorageError> {
        let _guard = self.write_lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let mut records = self.list()?;
        if records.iter().any(|r| r.id == record.id) {
            debug!(order_id = %record.id, "Order already tracked");
            return Ok(false);
        }
        info!(order_id = %record.id, "Tracking order");
        records.push(record);
        self.save(&records)?;
        Ok(true)
    }

    /// Returns `true` when a record was removed.
    pub fn remove(&self, id: &str) -> Result<bool, StorageError> {
        Ok(self.remove_all(&[id.to_string()])? > 0)
    }

    /// Remove every record whose id is in `ids`, in a single update.
    ///
    /// Re-reads the store under the write lock, so records added since the
    /// caller last listed are preserved. Returns how many records were removed.
    pub fn remove_all(&self, ids: &[String]) -> Result<usize, StorageError> {
        if ids.is_empty() {
            return Ok(0);
        }
        let _guard = self.write_lock.lock().map_err(|_| StorageError::LockPoisoned)?;
        let doomed: HashSet<&str> = ids.iter().map(String::as_str).collect();
        let records = self.list()?;
        let before = records.len();
        let kept: Vec<LocalOrder> = records
            .into_iter()
            .filter(|r| !doomed.contains(r.id.as_str()))
            .collect();
        let removed = before - kept.len();
        if removed > 0 {
            info!(removed, remaining = kept.len(), "Pruned tracked orders");
            self.save(&kept)?;
        }
        Ok(removed)
    }

    fn save(&self, records: &[LocalOrder]) -> Result<(), StorageError> {
        let raw = serde_json::to_string(records).map_err(|source| StorageError::Encode {
            key: ORDERS.to_string(),
            source,
        })?;
        self.store.set(ORDERS, &raw)
    }
}
