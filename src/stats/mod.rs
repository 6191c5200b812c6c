//! Module statistics aggregation
//!
//! Popularity statistics of every released module are gathered from three external
//! APIs and combined into one [`StatsReport`]:
//!
//! - **Module registry**: downloads, stars, contributors and listing dates. Best-effort,
//!   with a short timeout and a zero-valued fallback.
//! - **GitHub**: stars, commit count, closed issues and releases.
//! - **npm**: daily downloads over the last 180 days.
//!
//! All requests for all modules run concurrently and are joined. Any failure other
//! than the registry's fails the whole report.
//!
//! [`StatsService`] puts the [`Aggregator`] behind a [`SwrCache`]: stale reports are
//! served while a single background refresh runs, and the last good report is kept
//! in a [`Snapshot`] on disk to warm the cache on the next start.

mod aggregator;
mod client;
mod clock;
mod github;
mod module_stats;
mod npm;
mod registry_api;
mod resilient_http;
mod service;
mod snapshot;
mod swr_cache;
mod versions;

pub use aggregator::{Aggregator, Sources, merge_module};
pub use client::{ApiClient, RateLimitInfo};
pub use clock::{Clock, ManualClock, SystemClock};
pub use github::{GitHubApi, Release, last_page_from_link};
pub use module_stats::{ModuleMetrics, ModuleStats, StatsReport};
pub use npm::{DownloadStats, NpmApi, summarize};
pub use registry_api::{Contributor, ContributorId, ModuleRegistry, RegistryModule, RegistryStats};
pub use resilient_http::{HttpPolicy, resilient_get};
pub use service::{STATS_KEY, StatsService};
pub use snapshot::Snapshot;
pub use swr_cache::SwrCache;
pub use versions::{major_versions, parse_int_prefix, reverse_semver_cmp};
