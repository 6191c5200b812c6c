//! Mapping of markdown files to page paths and titles.

use regex::Regex;
use std::sync::LazyLock;

/// Numeric ordering prefix of a file or directory name, e.g. `0.` in `0.getting-started`.
static ORDER_PREFIX_REGEX: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^(\d+)\.").expect("invalid regex"));

/// Strip a leading `N.` ordering prefix.
#[must_use]
pub fn strip_order_prefix(segment: &str) -> &str {
    ORDER_PREFIX_REGEX
        .find(segment)
        .map_or(segment, |m| segment.get(m.end()..).unwrap_or(segment))
}

/// Page path of a markdown file relative to a module's content directory.
///
/// `0.getting-started/1.introduction.md` becomes `/docs/{slug}/getting-started/introduction`,
/// and a trailing `index` page maps to its directory.
#[must_use]
pub fn page_path(slug: &str, file: &str) -> String {
    let file = file.strip_suffix(".md").unwrap_or(file);

    let mut segments: Vec<&str> = file
        .split('/')
        .filter(|s| !s.is_empty())
        .map(strip_order_prefix)
        .collect();

    if segments.last() == Some(&"index") {
        let _ = segments.pop();
    }

    let mut path = format!("/docs/{slug}");
    for segment in segments {
        path.push('/');
        path.push_str(segment);
    }
    path
}

/// Sort key that orders files by their numeric prefixes, segment by segment.
///
/// Unprefixed names sort after prefixed ones.
#[must_use]
pub fn order_key(file: &str) -> Vec<(u64, String)> {
    file.split('/')
        .map(|segment| {
            let order = ORDER_PREFIX_REGEX
                .captures(segment)
                .and_then(|c| c.get(1))
                .and_then(|m| m.as_str().parse().ok())
                .unwrap_or(u64::MAX);
            (order, strip_order_prefix(segment).to_string())
        })
        .collect()
}

/// `getting-started` becomes `Getting Started`.
#[must_use]
pub fn title_case(name: &str) -> String {
    name.split(['-', '_', ' '])
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            chars.next().map_or_else(String::new, |first| first.to_uppercase().chain(chars).collect())
        })
        .collect::<Vec<_>>()
        .join(" ")
}
