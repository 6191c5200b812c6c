use super::format_compact;
use crate::docs::ContentIndex;
use crate::registry::ModuleDescriptor;
use crate::stats::StatsReport;
use core::fmt::Write;
use serde::{Deserialize, Serialize};

/// Site-level settings of the `llms.txt` document.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct LlmsSettings {
    /// Origin prefixed to every page path
    pub domain: String,

    pub title: String,
    pub description: String,

    #[serde(default)]
    pub notes: Vec<String>,

    /// Link to the complete documentation, if published
    #[serde(default)]
    pub full: Option<FullDocument>,

    /// Framework the modules belong to, e.g. `Nuxt`
    pub framework: String,

    /// Person or team maintaining the modules
    pub maintainer: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FullDocument {
    pub title: String,
    pub description: String,

    /// Path of the complete document below the domain
    #[serde(default = "default_full_path")]
    pub path: String,
}

fn default_full_path() -> String {
    "/llms-full.txt".to_string()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub title: String,
    pub href: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Section {
    pub title: String,
    pub description: String,
    pub links: Vec<Link>,
}

/// The `llms.txt` document of the site.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LlmsDocument {
    pub title: String,
    pub description: String,
    pub notes: Vec<String>,
    pub sections: Vec<Section>,
}

/// Build the document from the released modules, their stats and their pages.
///
/// `indexes` pairs module slugs with their content; a module without an index gets
/// a section without links.
#[must_use]
pub fn build_document(
    settings: &LlmsSettings,
    modules: &[ModuleDescriptor],
    report: Option<&StatsReport>,
    indexes: &[(String, &ContentIndex)],
) -> LlmsDocument {
    let mut sections = Vec::new();

    if let Some(full) = &settings.full {
        sections.push(Section {
            title: "Documentation Sets".to_string(),
            description: String::new(),
            links: vec![Link {
                title: full.title.clone(),
                href: normalize_href(&format!("{}{}", settings.domain, full.path)),
                description: Some(full.description.clone()),
            }],
        });
    }

    for module in modules.iter().filter(|m| !m.soon) {
        let links = indexes
            .iter()
            .find(|(slug, _)| *slug == module.slug)
            .map(|(_, index)| {
                index
                    .pages()
                    .iter()
                    .map(|page| Link {
                        title: page.title.clone(),
                        href: normalize_href(&format!("{}{}", settings.domain, page.path)),
                        description: None,
                    })
                    .collect()
            })
            .unwrap_or_default();

        sections.push(Section {
            title: format!("{} Module Documentation", module.label),
            description: module_description(settings, module, report),
            links,
        });
    }

    LlmsDocument {
        title: settings.title.clone(),
        description: settings.description.clone(),
        notes: settings.notes.clone(),
        sections,
    }
}

/// One-sentence summary of a module, built from its stats when available.
#[must_use]
pub fn module_description(settings: &LlmsSettings, module: &ModuleDescriptor, report: Option<&StatsReport>) -> String {
    let Some(stats) = report.and_then(|r| r.find(&module.slug)) else {
        return module.description.clone();
    };

    let name = if module.label.starts_with(&settings.framework) {
        module.label.clone()
    } else {
        format!("{} {}", settings.framework, module.label)
    };

    let metrics = &stats.metrics;
    format!(
        "{name} is a {} module maintained by {}, the latest version is {} ({} downloads, {} stars, {} commits, {} issues closed)",
        settings.framework,
        settings.maintainer,
        metrics.version.as_deref().unwrap_or("unknown"),
        format_compact(metrics.downloads),
        metrics.stars,
        metrics.commit_count,
        metrics.issues_closed,
    )
}

/// Point a link at the markdown source of a page and drop doubled slashes.
#[must_use]
pub fn normalize_href(href: &str) -> String {
    let mut href = href.to_string();
    if !href.ends_with(".md") && !href.ends_with(".txt") {
        href.push_str(".md");
    }

    let (scheme, rest) = href.split_once("://").map_or(("", href.as_str()), |(s, r)| (s, r));

    let mut collapsed = String::with_capacity(rest.len());
    let mut previous_slash = false;
    for c in rest.chars() {
        if c == '/' && previous_slash {
            continue;
        }
        previous_slash = c == '/';
        collapsed.push(c);
    }

    if scheme.is_empty() {
        collapsed
    } else {
        format!("{scheme}://{collapsed}")
    }
}

impl LlmsDocument {
    /// Render as markdown.
    #[must_use]
    pub fn render(&self) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "# {}", self.title);
        let _ = writeln!(out);
        let _ = writeln!(out, "> {}", self.description);

        if !self.notes.is_empty() {
            let _ = writeln!(out);
            for note in &self.notes {
                let _ = writeln!(out, "- {note}");
            }
        }

        for section in &self.sections {
            let _ = writeln!(out);
            let _ = writeln!(out, "## {}", section.title);

            if !section.description.is_empty() {
                let _ = writeln!(out);
                let _ = writeln!(out, "{}", section.description);
            }

            if !section.links.is_empty() {
                let _ = writeln!(out);
                for link in &section.links {
                    match &link.description {
                        Some(description) => {
                            let _ = writeln!(out, "- [{}]({}): {description}", link.title, link.href);
                        }
                        None => {
                            let _ = writeln!(out, "- [{}]({})", link.title, link.href);
                        }
                    }
                }
            }
        }

        out
    }
}
