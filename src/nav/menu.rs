use crate::registry::ModuleDescriptor;
use serde::Serialize;

/// Presentation class of menu entries for unreleased modules.
const SOON_CLASS: &str = "opacity-30 cursor-not-allowed";

/// An entry of the site's top menu.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuItem {
    pub label: String,
    pub icon: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub to: Option<String>,

    #[serde(skip_serializing_if = "core::ops::Not::not")]
    pub disabled: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub children: Option<Vec<Self>>,
}

impl MenuItem {
    fn link(label: &str, icon: &str, to: &str) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            to: Some(to.to_string()),
            disabled: false,
            class: None,
            children: None,
        }
    }

    fn group(label: &str, icon: &str, children: Vec<Self>) -> Self {
        Self {
            label: label.to_string(),
            icon: icon.to_string(),
            to: None,
            disabled: false,
            class: None,
            children: Some(children),
        }
    }
}

const LEARN_GUIDES: &[(&str, &str, &str)] = &[
    ("Mastering Meta Management", "i-heroicons-h1-solid", "/learn/mastering-meta"),
    ("Controlling Web Crawlers", "i-ph-robot-duotone", "/learn/controlling-crawlers"),
    ("Launch & Listen", "i-tabler-slashes", "/learn/launch-and-listen"),
    ("Routes & Rendering", "i-carbon-recording", "/learn/routes-and-rendering"),
];

/// The site's top menu: module docs, learning guides and the pro page.
#[must_use]
pub fn menu(modules: &[ModuleDescriptor]) -> Vec<MenuItem> {
    let docs = modules
        .iter()
        .map(|m| MenuItem {
            disabled: m.soon,
            class: m.soon.then(|| SOON_CLASS.to_string()),
            ..MenuItem::link(&m.label, &m.icon, &m.to())
        })
        .collect();

    let learn = LEARN_GUIDES
        .iter()
        .map(|(label, icon, to)| MenuItem::link(label, icon, to))
        .collect();

    vec![
        MenuItem::group("Docs", "i-ph-book-open-duotone", docs),
        MenuItem::group("Learn SEO", "i-ph-books-duotone", learn),
        MenuItem::link("Pro", "i-ph-sparkle-duotone", "/pro"),
    ]
}
