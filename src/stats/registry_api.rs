//! Module registry metadata
//!
//! The module registry is treated as best-effort: any failure or timeout yields
//! zero-valued metadata instead of an error.

use super::ApiClient;
use serde::Deserialize;

const LOG_TARGET: &str = "  registry";

/// Metadata of one module as published by the module registry.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryModule {
    #[serde(default)]
    pub stats: RegistryStats,

    #[serde(default)]
    pub contributors: Vec<Contributor>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistryStats {
    #[serde(default)]
    pub downloads: u64,

    #[serde(default)]
    pub stars: u64,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub published_at: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Contributor {
    pub id: ContributorId,
}

/// Contributor identifiers are numbers for some modules and strings for others.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum ContributorId {
    Number(u64),
    Text(String),
}

impl core::fmt::Display for ContributorId {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

/// Client for the module registry.
#[derive(Debug, Clone)]
pub struct ModuleRegistry {
    client: ApiClient,
    base: String,
}

impl ModuleRegistry {
    /// `client` should carry the registry's own short timeout and no retries.
    #[must_use]
    pub fn new(client: ApiClient, base: &str) -> Self {
        Self {
            client,
            base: base.trim_end_matches('/').to_string(),
        }
    }

    /// Metadata of the module registered as `name`, zero-valued when unavailable.
    pub async fn module(&self, name: &str) -> RegistryModule {
        let url = format!("{}/modules/{name}", self.base);
        match self.client.get_json::<RegistryModule>(&url).await {
            Ok(module) => module,
            Err(e) => {
                log::warn!(target: LOG_TARGET, "Could not fetch registry metadata for '{name}', using defaults: {e:#}");
                RegistryModule::default()
            }
        }
    }
}
