use super::ModuleDescriptor;
use crate::stats::{ModuleMetrics, ModuleStats};
use serde::Serialize;

/// A module descriptor merged with its latest statistics.
///
/// Descriptor fields always take precedence: the metrics carry no identity of their own,
/// so a stats record can never override the slug or any other descriptor field.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ModuleView {
    pub slug: String,
    pub label: String,
    pub icon: String,
    pub repo: String,
    pub npm: String,
    pub description: String,
    pub pro: bool,
    pub soon: bool,
    pub to: String,

    #[serde(flatten)]
    pub metrics: Option<ModuleMetrics>,
}

impl ModuleView {
    #[must_use]
    pub fn merge(descriptor: &ModuleDescriptor, stats: Option<&ModuleStats>) -> Self {
        Self {
            slug: descriptor.slug.clone(),
            label: descriptor.label.clone(),
            icon: descriptor.icon.clone(),
            repo: descriptor.repo.clone(),
            npm: descriptor.npm.clone(),
            description: descriptor.description.clone(),
            pro: descriptor.pro,
            soon: descriptor.soon,
            to: descriptor.to(),
            metrics: stats.filter(|s| s.slug == descriptor.slug).map(|s| s.metrics.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn robots() -> ModuleDescriptor {
        ModuleDescriptor::new("robots", "Robots", "i-carbon-bot", "nuxt-modules/robots", "@nuxtjs/robots")
    }

    #[test]
    fn test_merge_with_stats() {
        let stats = ModuleStats {
            slug: "robots".into(),
            metrics: ModuleMetrics {
                stars: 42,
                ..ModuleMetrics::default()
            },
        };

        let view = ModuleView::merge(&robots(), Some(&stats));
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["slug"], "robots");
        assert_eq!(json["label"], "Robots");
        assert_eq!(json["stars"], 42);
        assert_eq!(json["to"], "/docs/robots/getting-started/introduction");
    }

    #[test]
    fn test_merge_without_stats() {
        let view = ModuleView::merge(&robots(), None);
        let json = serde_json::to_value(&view).unwrap();

        assert_eq!(json["slug"], "robots");
        assert!(json.get("stars").is_none());
    }

    #[test]
    fn test_merge_ignores_stats_of_other_module() {
        let stats = ModuleStats {
            slug: "sitemap".into(),
            metrics: ModuleMetrics::default(),
        };

        let view = ModuleView::merge(&robots(), Some(&stats));
        assert!(view.metrics.is_none());
        assert_eq!(view.slug, "robots");
    }
}
