//! The canonical list of documented modules
//!
//! Every module the site documents is described by a [`ModuleDescriptor`]. The built-in
//! list in [`builtin_modules`] is the single source of truth; a deployment that needs a
//! different set replaces it through the `[[modules]]` table of the configuration file
//! rather than through code.
//!
//! [`Registry`] validates the list once and offers slug lookups. [`ModuleView`] is the
//! typed merge of a descriptor with its latest statistics.

mod builtin;
mod module_descriptor;
mod module_view;

pub use builtin::builtin_modules;
pub use module_descriptor::ModuleDescriptor;
pub use module_view::ModuleView;

use crate::Result;
use ohno::bail;
use std::collections::HashSet;
use std::sync::Arc;

/// Validated, immutable set of module descriptors.
#[derive(Debug, Clone)]
pub struct Registry {
    modules: Arc<[ModuleDescriptor]>,
}

impl Registry {
    /// Create a registry from a list of descriptors.
    ///
    /// # Errors
    ///
    /// Returns an error if the list is empty, a slug is duplicated, or a descriptor is malformed
    pub fn new(modules: Vec<ModuleDescriptor>) -> Result<Self> {
        if modules.is_empty() {
            bail!("the module registry must contain at least one module");
        }

        let mut seen = HashSet::with_capacity(modules.len());
        for module in &modules {
            module.validate()?;
            if !seen.insert(module.slug.as_str()) {
                bail!("duplicate module slug '{}'", module.slug);
            }
        }

        Ok(Self { modules: modules.into() })
    }

    /// The registry built from [`builtin_modules`].
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            modules: builtin_modules().into(),
        }
    }

    /// All modules, in display order.
    #[must_use]
    pub fn all(&self) -> &[ModuleDescriptor] {
        &self.modules
    }

    /// Modules that are released, i.e. not flagged as coming soon.
    pub fn active(&self) -> impl Iterator<Item = &ModuleDescriptor> {
        self.modules.iter().filter(|m| !m.soon)
    }

    /// Look up a module by slug.
    #[must_use]
    pub fn find(&self, slug: &str) -> Option<&ModuleDescriptor> {
        self.modules.iter().find(|m| m.slug == slug)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn module(slug: &str) -> ModuleDescriptor {
        ModuleDescriptor::new(slug, slug, "i-carbon-document", &format!("acme/{slug}"), slug)
    }

    #[test]
    fn test_builtin_registry_is_valid() {
        let registry = Registry::new(builtin_modules()).unwrap();
        assert_eq!(registry.all().len(), Registry::builtin().all().len());
    }

    #[test]
    fn test_builtin_contains_umbrella_module() {
        let registry = Registry::builtin();
        let umbrella = registry.find("nuxt-seo").unwrap();
        assert_eq!(umbrella.registry_slug(), "seo");
        assert_eq!(umbrella.content_prefix, "docs/content/nuxtSeo/");
    }

    #[test]
    fn test_active_skips_soon_modules() {
        let mut upcoming = module("upcoming");
        upcoming.soon = true;
        let registry = Registry::new(vec![module("robots"), upcoming, module("sitemap")]).unwrap();

        let active: Vec<_> = registry.active().map(|m| m.slug.as_str()).collect();
        assert_eq!(active, vec!["robots", "sitemap"]);
    }

    #[test]
    fn test_duplicate_slug_is_rejected() {
        let result = Registry::new(vec![module("robots"), module("robots")]);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_registry_is_rejected() {
        assert!(Registry::new(Vec::new()).is_err());
    }

    #[test]
    fn test_find_unknown_slug() {
        let registry = Registry::builtin();
        assert!(registry.find("does-not-exist").is_none());
    }
}
