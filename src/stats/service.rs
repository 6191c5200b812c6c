use super::{Aggregator, Clock, Snapshot, StatsReport, SwrCache};
use crate::Result;
use crate::registry::Registry;
use chrono::DateTime;
use core::time::Duration;
use std::sync::Arc;

const LOG_TARGET: &str = "     stats";

/// Cache key of the combined report.
pub const STATS_KEY: &str = "stats";

/// Serves the statistics report of the registered modules through a stale-while-revalidate cache.
///
/// Every successful refresh is written to the snapshot, and a snapshot found at
/// construction time warms the cache.
#[derive(Debug, Clone)]
pub struct StatsService {
    aggregator: Aggregator,
    registry: Registry,
    cache: SwrCache<StatsReport>,
    snapshot: Option<Snapshot>,
}

impl StatsService {
    #[must_use]
    pub fn new(aggregator: Aggregator, registry: Registry, ttl: Duration, clock: Arc<dyn Clock>, snapshot: Option<Snapshot>) -> Self {
        let cache = SwrCache::new(STATS_KEY, ttl, clock);

        if let Some((report, stored_at)) = snapshot.as_ref().and_then(Snapshot::load::<StatsReport>) {
            log::info!(target: LOG_TARGET, "Warming stats from snapshot taken at {stored_at}");
            cache.seed(report, stored_at);
        }

        Self {
            aggregator,
            registry,
            cache,
            snapshot,
        }
    }

    /// The current report, computing it when nothing is cached yet.
    pub async fn report(&self) -> Result<Arc<StatsReport>> {
        let aggregator = self.aggregator.clone();
        let registry = self.registry.clone();
        let snapshot = self.snapshot.clone();

        self.cache
            .get_with(move || async move {
                let report = aggregator.compute_stats(registry.all()).await?;

                if let Some(snapshot) = snapshot {
                    let stored_at = DateTime::from_timestamp_millis(report.fetched_at).unwrap_or_default();
                    if let Err(e) = snapshot.save(&report, stored_at) {
                        log::warn!(target: LOG_TARGET, "Could not save stats snapshot: {e:#}");
                    }
                }

                Ok(report)
            })
            .await
    }

    /// The cached report, fresh or stale, without triggering a refresh.
    #[must_use]
    pub fn cached(&self) -> Option<Arc<StatsReport>> {
        self.cache.peek()
    }
}
