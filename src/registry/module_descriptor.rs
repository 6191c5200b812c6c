use crate::Result;
use ohno::bail;
use serde::{Deserialize, Serialize};

const DEFAULT_CONTENT_PREFIX: &str = "docs/content/";

/// Static description of one documented module.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ModuleDescriptor {
    /// Unique key, also the first path segment under `/docs`
    pub slug: String,

    /// Human readable name, e.g. `Robots`
    pub label: String,

    /// Icon name used by the menu
    pub icon: String,

    /// Source repository as `owner/name`
    pub repo: String,

    /// Package name on the package registry
    pub npm: String,

    #[serde(default)]
    pub description: String,

    /// Module requires a commercial license
    #[serde(default)]
    pub pro: bool,

    /// Module is announced but not released yet
    #[serde(default)]
    pub soon: bool,

    /// Name used by the module registry when it differs from the slug
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_slug: Option<String>,

    /// Directory holding the docs inside the repository, with a trailing slash
    #[serde(default = "default_content_prefix")]
    pub content_prefix: String,
}

fn default_content_prefix() -> String {
    DEFAULT_CONTENT_PREFIX.to_string()
}

impl ModuleDescriptor {
    #[must_use]
    pub fn new(slug: &str, label: &str, icon: &str, repo: &str, npm: &str) -> Self {
        Self {
            slug: slug.to_string(),
            label: label.to_string(),
            icon: icon.to_string(),
            repo: repo.to_string(),
            npm: npm.to_string(),
            description: String::new(),
            pro: false,
            soon: false,
            registry_slug: None,
            content_prefix: default_content_prefix(),
        }
    }

    /// Name of the module on the module registry.
    #[must_use]
    pub fn registry_slug(&self) -> &str {
        self.registry_slug.as_deref().unwrap_or(&self.slug)
    }

    /// Landing page of the module's documentation.
    #[must_use]
    pub fn to(&self) -> String {
        format!("/docs/{}/getting-started/introduction", self.slug)
    }

    /// Split `repo` into its owner and name.
    ///
    /// # Errors
    ///
    /// Returns an error if `repo` is not of the form `owner/name`
    pub fn repo_parts(&self) -> Result<(&str, &str)> {
        match self.repo.split_once('/') {
            Some((owner, name)) if !owner.is_empty() && !name.is_empty() && !name.contains('/') => Ok((owner, name)),
            _ => bail!("invalid repository '{}' for module '{}', expected 'owner/name'", self.repo, self.slug),
        }
    }

    /// Repository name without its owner.
    #[must_use]
    pub fn repo_name(&self) -> &str {
        self.repo.rsplit('/').next().unwrap_or(&self.repo)
    }

    pub(super) fn validate(&self) -> Result<()> {
        if self.slug.is_empty() || self.slug.contains('/') {
            bail!("invalid module slug '{}'", self.slug);
        }

        if self.npm.is_empty() {
            bail!("module '{}' has no package name", self.slug);
        }

        if !self.content_prefix.is_empty() && !self.content_prefix.ends_with('/') {
            bail!("content prefix of module '{}' must end with '/', got '{}'", self.slug, self.content_prefix);
        }

        let _ = self.repo_parts()?;
        Ok(())
    }
}
