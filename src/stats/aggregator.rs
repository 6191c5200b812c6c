use super::{Clock, DownloadStats, GitHubApi, ModuleMetrics, ModuleRegistry, ModuleStats, NpmApi, RegistryModule, Release, StatsReport, major_versions};
use crate::Result;
use crate::registry::ModuleDescriptor;
use chrono::NaiveDate;
use ohno::EnrichableExt;
use std::collections::BTreeSet;
use std::sync::Arc;

const LOG_TARGET: &str = "     stats";

/// The external APIs statistics are gathered from.
#[derive(Debug, Clone)]
pub struct Sources {
    pub registry: ModuleRegistry,
    pub github: GitHubApi,
    pub npm: NpmApi,
}

/// Computes the combined statistics report of a set of modules.
#[derive(Debug, Clone)]
pub struct Aggregator {
    sources: Arc<Sources>,
    clock: Arc<dyn Clock>,
}

/// Everything fetched for a single module.
#[derive(Debug)]
struct ModuleFetch {
    stats: ModuleStats,
    contributors: Vec<String>,
}

impl Aggregator {
    #[must_use]
    pub fn new(sources: Sources, clock: Arc<dyn Clock>) -> Self {
        Self {
            sources: Arc::new(sources),
            clock,
        }
    }

    /// Fetch and combine the statistics of every released module.
    ///
    /// Modules flagged `soon` are skipped. The module registry degrades to zero-valued
    /// metadata, any other failed request fails the whole report.
    pub async fn compute_stats(&self, modules: &[ModuleDescriptor]) -> Result<StatsReport> {
        let now = self.clock.now();
        let today = now.date_naive();

        let active: Vec<&ModuleDescriptor> = modules.iter().filter(|m| !m.soon).collect();
        log::info!(target: LOG_TARGET, "Computing stats for {} modules", active.len());

        let fetched = futures::future::try_join_all(active.iter().map(|m| self.fetch_module(m, today))).await?;

        let mut contributors = BTreeSet::new();
        let mut stats = Vec::with_capacity(fetched.len());
        for fetch in fetched {
            contributors.extend(fetch.contributors);
            stats.push(fetch.stats);
        }

        let total_commits: u64 = stats.iter().map(|s| s.metrics.commit_count).sum();
        let total_issue_closed: u64 = stats.iter().map(|s| s.metrics.issues_closed).sum();

        log::info!(
            target: LOG_TARGET,
            "Computed stats: {} modules, {} contributors, {total_commits} commits",
            stats.len(),
            contributors.len()
        );

        Ok(StatsReport {
            fetched_at: now.timestamp_millis(),
            modules: stats,
            unique_contributors: contributors.into_iter().collect(),
            total_commits,
            total_issue_closed,
        })
    }

    async fn fetch_module(&self, module: &ModuleDescriptor, today: NaiveDate) -> Result<ModuleFetch> {
        let repo = module.repo.as_str();
        let github = &self.sources.github;

        log::debug!(target: LOG_TARGET, "Fetching stats for '{}'", module.slug);

        let (registry, stars, commit_count, issues_closed, releases, downloads) = tokio::join!(
            self.sources.registry.module(module.registry_slug()),
            github.stars(repo),
            github.commit_count(repo),
            github.closed_issues(repo),
            github.releases(repo),
            self.sources.npm.downloads(&module.npm, today),
        );

        let context = || format!("fetching stats of module '{}'", module.slug);
        let stars = stars.map_err(|e| e.enrich_with(context))?;
        let commit_count = commit_count.map_err(|e| e.enrich_with(context))?;
        let issues_closed = issues_closed.map_err(|e| e.enrich_with(context))?;
        let releases = releases.map_err(|e| e.enrich_with(context))?;
        let downloads = downloads.map_err(|e| e.enrich_with(context))?;

        let contributors = registry.contributors.iter().map(|c| c.id.to_string()).collect();
        let stats = merge_module(&module.slug, registry, stars, commit_count, issues_closed, &releases, &downloads);

        Ok(ModuleFetch { stats, contributors })
    }
}

/// Combine the fetched figures of one module into its stats record.
#[must_use]
pub fn merge_module(
    slug: &str,
    registry: RegistryModule,
    stars: u64,
    commit_count: u64,
    issues_closed: u64,
    releases: &[Release],
    downloads: &DownloadStats,
) -> ModuleStats {
    let names: Vec<&str> = releases.iter().map(Release::display_name).collect();

    ModuleStats {
        slug: slug.to_string(),
        metrics: ModuleMetrics {
            created_at: registry.stats.created_at,
            published_at: registry.stats.published_at,
            version: names.first().map(ToString::to_string),
            versions: major_versions(&names),
            stars: if stars == 0 { registry.stats.stars } else { stars },
            commit_count,
            issues_closed,
            downloads: downloads.total_downloads90,
            total_downloads90: downloads.total_downloads90,
            total_downloads30: downloads.total_downloads30,
            average_downloads30: downloads.average_downloads30,
            average_downloads90: downloads.average_downloads90,
            percentage_change: downloads.percentage_change,
        },
    }
}
