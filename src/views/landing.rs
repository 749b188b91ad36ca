//! The customer's list of tracked orders.

use chrono::{DateTime, Utc};
use lockopener_common::{LocalOrder, format_elapsed};

use crate::errors::StorageError;
use crate::i18n::Messages;
use crate::poller::{StatusPoller, SweepReport};
use crate::registry::OrderRegistry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrackedOrderRow {
    /// 1-based position in the list.
    pub position: usize,
    pub title: String,
    pub elapsed: String,
    pub record: LocalOrder,
}

impl TrackedOrderRow {
    pub fn tracking_path(&self) -> String {
        self.record.tracking_path()
    }
}

pub struct TrackedOrders {
    poller: StatusPoller,
}

impl TrackedOrders {
    pub fn new(poller: StatusPoller) -> Self {
        Self { poller }
    }

    pub fn registry(&self) -> &OrderRegistry {
        self.poller.registry()
    }

    /// Initial load: one status sweep, then the surviving rows.
    pub async fn load(
        &self,
        now: DateTime<Utc>,
        messages: &Messages,
    ) -> Result<(Vec<TrackedOrderRow>, SweepReport), StorageError> {
        let report = self.refresh().await?;
        Ok((self.rows(now, messages)?, report))
    }

    /// Re-check every tracked order against the backend.
    pub async fn refresh(&self) -> Result<SweepReport, StorageError> {
        self.poller.sweep().await
    }

    /// Current rows from local data only; used for the per-second timer.
    pub fn rows(
        &self,
        now: DateTime<Utc>,
        messages: &Messages,
    ) -> Result<Vec<TrackedOrderRow>, StorageError> {
        let records = self.registry().list()?;
        let total = records.len();
        Ok(records
            .into_iter()
            .enumerate()
            .map(|(i, record)| TrackedOrderRow {
                position: i + 1,
                title: messages.tracked_order_title(i + 1, total),
                elapsed: format_elapsed(record.created_at, now),
                record,
            })
            .collect())
    }

    /// Stop tracking an order locally. The backend is not told.
    pub fn forget(&self, id: &str) -> Result<bool, StorageError> {
        self.registry().remove(id)
    }
}
