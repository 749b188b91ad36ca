//! Re-validates locally tracked orders against the backend and prunes the
//! ones that no longer need tracking.

use std::sync::Arc;

use async_trait::async_trait;
use futures::future::join_all;
use lockopener_common::{LocalOrder, Order, OrderStatus};
use tracing::{debug, info, warn};

use crate::api::ApiClient;
use crate::errors::{ApiError, StorageError};
use crate::registry::OrderRegistry;

/// Fetch one order by id and access token.
/// Real implementation: `ApiClient`. Test double: a canned map of outcomes.
#[async_trait]
pub trait OrderLookup: Send + Sync {
    async fn lookup(&self, id: &str, token: &str) -> Result<Order, ApiError>;
}

#[async_trait]
impl OrderLookup for ApiClient {
    async fn lookup(&self, id: &str, token: &str) -> Result<Order, ApiError> {
        self.get_order_by_token(id, token).await
    }
}

/// Which failures count as "stale" besides 404.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PrunePolicy {
    /// Treat HTTP 400 (e.g. a token the backend no longer accepts) as stale.
    pub prune_on_bad_request: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RemovalReason {
    Finished(OrderStatus),
    NotFound,
    BadRequest,
}

impl std::fmt::Display for RemovalReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Finished(status) => write!(f, "status {}", status),
            Self::NotFound => f.write_str("not found"),
            Self::BadRequest => f.write_str("rejected as bad request"),
        }
    }
}

/// Outcome of one sweep.
#[derive(Debug, Default)]
pub struct SweepReport {
    pub kept: Vec<String>,
    pub removed: Vec<(String, RemovalReason)>,
    /// Lookups that failed without marking the record stale.
    pub failures: Vec<(String, ApiError)>,
}

impl SweepReport {
    pub fn removed_ids(&self) -> Vec<String> {
        self.removed.iter().map(|(id, _)| id.clone()).collect()
    }
}

enum Verdict {
    Keep,
    Remove(RemovalReason),
    KeepAfterError(ApiError),
}

pub struct StatusPoller {
    lookup: Arc<dyn OrderLookup>,
    registry: OrderRegistry,
    policy: PrunePolicy,
}

impl StatusPoller {
    pub fn new(lookup: Arc<dyn OrderLookup>, registry: OrderRegistry, policy: PrunePolicy) -> Self {
        Self {
            lookup,
            registry,
            policy,
        }
    }

    pub fn registry(&self) -> &OrderRegistry {
        &self.registry
    }

    /// Look up every tracked order concurrently, then drop the finished and
    /// stale ones in a single registry update.
    ///
    /// Lookup failures never fail the sweep; only a storage error does.
    pub async fn sweep(&self) -> Result<SweepReport, StorageError> {
        let records = self.registry.list()?;
        if records.is_empty() {
            return Ok(SweepReport::default());
        }
        debug!(count = records.len(), "Checking tracked orders");

        let verdicts = join_all(records.iter().map(|r| self.judge(r))).await;

        let mut report = SweepReport::default();
        for (record, verdict) in records.into_iter().zip(verdicts) {
            match verdict {
                Verdict::Keep => report.kept.push(record.id),
                Verdict::Remove(reason) => {
                    info!(order_id = %record.id, %reason, "Dropping tracked order");
                    report.removed.push((record.id, reason));
                }
                Verdict::KeepAfterError(err) => {
                    report.kept.push(record.id.clone());
                    report.failures.push((record.id, err));
                }
            }
        }

        self.registry.remove_all(&report.removed_ids())?;
        Ok(report)
    }

    async fn judge(&self, record: &LocalOrder) -> Verdict {
        match self.lookup.lookup(&record.id, &record.token).await {
            Ok(order) if order.status.is_terminal() => {
                Verdict::Remove(RemovalReason::Finished(order.status))
            }
            Ok(_) => Verdict::Keep,
            Err(e) if e.is_not_found() => Verdict::Remove(RemovalReason::NotFound),
            Err(e) if e.is_bad_request() && self.policy.prune_on_bad_request => {
                Verdict::Remove(RemovalReason::BadRequest)
            }
            Err(e) => {
                warn!(order_id = %record.id, error = %e, "Order status check failed; keeping record");
                Verdict::KeepAfterError(e)
            }
        }
    }
}
