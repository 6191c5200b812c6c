use serde::{Deserialize, Serialize};

/// Popularity metrics of one module, without its identity.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleMetrics {
    /// When the module was first listed on the module registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,

    /// When the module was last published, according to the module registry
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub published_at: Option<String>,

    /// Name of the most recent release
    #[serde(default)]
    pub version: Option<String>,

    /// One tag per major version, newest first
    #[serde(default)]
    pub versions: Vec<String>,

    pub stars: u64,
    pub commit_count: u64,
    pub issues_closed: u64,

    /// Downloads over the last 90 days
    pub downloads: u64,
    pub total_downloads90: u64,
    pub total_downloads30: u64,
    pub average_downloads30: f64,
    pub average_downloads90: f64,

    /// Change of the 90-day download total compared with the preceding 90 days, in percent
    pub percentage_change: f64,
}

/// Metrics of one module, keyed by its slug.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleStats {
    pub slug: String,

    #[serde(flatten)]
    pub metrics: ModuleMetrics,
}

/// The combined statistics served by `/api/stats.json`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsReport {
    /// Milliseconds since the Unix epoch
    pub fetched_at: i64,
    pub modules: Vec<ModuleStats>,
    pub unique_contributors: Vec<String>,
    pub total_commits: u64,
    pub total_issue_closed: u64,
}

impl StatsReport {
    /// Statistics of a single module.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&ModuleStats> {
        self.modules.iter().find(|m| m.slug == slug)
    }
}
