//! Reshaping of a raw navigation tree for menu rendering.
//!
//! Top-level sections are retitled from a fixed table, their single-child wrappers
//! are collapsed, API pages get file-name and inline-code titles, and siblings are
//! ordered with functions first and hooks last. The transform is pure and total.

use super::{CodeKind, CodeTitle, NavigationNode};

/// Icon shared by the framework config and schema pages.
const FRAMEWORK_ICON: &str = "i-logos-nuxt-icon";

/// Presentation class of dimmed icons.
const DIMMED_ICON_CLASS: &str = "opacity-50";

struct SectionRule {
    pattern: &'static str,
    title: &'static str,
    icon: Option<&'static str>,
}

/// Top-level retitling, first match wins.
const SECTION_RULES: &[SectionRule] = &[
    SectionRule {
        pattern: "/api",
        title: "Nuxt API",
        icon: Some(FRAMEWORK_ICON),
    },
    SectionRule {
        pattern: "/nitro-api",
        title: "Nitro API",
        icon: Some("i-unjs-nitro"),
    },
    SectionRule {
        pattern: "/releases",
        title: "Releases",
        icon: Some("i-carbon-version"),
    },
    SectionRule {
        pattern: "/migration-guide",
        title: "Migration Guides",
        icon: Some("i-carbon-direction-fork"),
    },
    SectionRule {
        pattern: "/guides",
        title: "Core Concepts",
        icon: None,
    },
];

/// Transform a raw navigation tree.
#[must_use]
pub fn transform(tree: Vec<NavigationNode>) -> Vec<NavigationNode> {
    tree.into_iter().map(transform_section).collect()
}

fn transform_section(mut section: NavigationNode) -> NavigationNode {
    if let Some(rule) = SECTION_RULES.iter().find(|r| section.path.contains(r.pattern)) {
        section.title = rule.title.to_string();
        if let Some(icon) = rule.icon {
            section.icon = Some(icon.to_string());
        }
    }

    if let Some(children) = section.children.take() {
        let mut children: Vec<NavigationNode> = children
            .into_iter()
            .map(collapse)
            .map(relabel)
            .map(collapse)
            .collect();
        children.sort_by_key(sort_rank);
        section.children = Some(children);
    }

    section
}

/// Replace a node that wraps exactly one child with that child.
fn collapse(node: NavigationNode) -> NavigationNode {
    match node.children {
        Some(mut children) if children.len() == 1 => children.remove(0),
        children => NavigationNode { children, ..node },
    }
}

fn relabel(mut node: NavigationNode) -> NavigationNode {
    if node.path.contains("/api/") && node.path.ends_with("config") {
        node.title = "nuxt.config.ts".to_string();
        node.icon = Some(FRAMEWORK_ICON.to_string());
    }

    if node.path.ends_with("hooks") {
        node.icon_class = Some(DIMMED_ICON_CLASS.to_string());
    }

    if node.path.contains("/api/schema") {
        node.title = "schema.d.ts".to_string();
        node.icon = Some(FRAMEWORK_ICON.to_string());
    }

    if let Some(name) = node.title.strip_suffix("()") {
        let code = CodeTitle::new(name, CodeKind::Function);
        node.title = code.text.clone();
        node.code = Some(code);
    }

    if node.code.is_none()
        && let Some(name) = node.title.strip_prefix('<').and_then(|t| t.strip_suffix('>'))
    {
        let code = CodeTitle::new(name, CodeKind::Tag);
        node.title = code.text.clone();
        node.code = Some(code);
    }

    node
}

/// Functions first, hooks last, everything else in between in input order.
fn sort_rank(node: &NavigationNode) -> u8 {
    if node.path.ends_with("hooks") {
        2
    } else if node.is_function() {
        0
    } else {
        1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn leaf(path: &str, title: &str) -> NavigationNode {
        NavigationNode::new(path, title)
    }

    fn section(path: &str, title: &str, children: Vec<NavigationNode>) -> NavigationNode {
        NavigationNode::new(path, title).with_children(children)
    }

    fn titles(nodes: &[NavigationNode]) -> Vec<&str> {
        nodes.iter().map(|n| n.title.as_str()).collect()
    }

    #[test]
    fn test_sections_are_retitled() {
        let tree = vec![
            section("/docs/x/api", "Api", vec![]),
            section("/docs/x/nitro-api", "Nitro Api", vec![]),
            section("/docs/x/releases", "Releases", vec![]),
            section("/docs/x/migration-guide", "Migration Guide", vec![]),
            section("/docs/x/guides", "Guides", vec![]).with_icon("i-ph-book"),
            section("/docs/x/getting-started", "Getting Started", vec![]),
        ];

        let out = transform(tree);
        assert_eq!(
            titles(&out),
            vec!["Nuxt API", "Nitro API", "Releases", "Migration Guides", "Core Concepts", "Getting Started"]
        );
        assert_eq!(out[0].icon.as_deref(), Some(FRAMEWORK_ICON));
        assert_eq!(out[4].icon.as_deref(), Some("i-ph-book"));
        assert!(out[5].icon.is_none());
    }

    #[test]
    fn test_hooks_last_functions_first() {
        let tree = vec![section(
            "/docs/x/api",
            "API",
            vec![
                leaf("/docs/x/api/hooks", "Hooks"),
                leaf("/docs/x/api/overview", "Overview"),
                leaf("/docs/x/api/foo()", "foo()"),
            ],
        )];

        let out = transform(tree);
        let children = out[0].children();
        assert_eq!(titles(children), vec!["foo", "Overview", "Hooks"]);
        assert_eq!(children[0].code.as_ref().unwrap().kind, CodeKind::Function);
        assert_eq!(children[2].icon_class.as_deref(), Some(DIMMED_ICON_CLASS));
    }

    #[test]
    fn test_sort_is_stable() {
        let tree = vec![section(
            "/docs/x/api",
            "API",
            vec![
                leaf("/docs/x/api/b", "B"),
                leaf("/docs/x/api/use-a", "useA()"),
                leaf("/docs/x/api/a", "A"),
                leaf("/docs/x/api/use-b", "useB()"),
            ],
        )];

        let out = transform(tree);
        assert_eq!(titles(out[0].children()), vec!["useA", "useB", "B", "A"]);
    }

    #[test]
    fn test_config_and_schema_files() {
        let tree = vec![section(
            "/docs/x/api",
            "API",
            vec![leaf("/docs/x/api/config", "Config"), leaf("/docs/x/api/schema", "Schema")],
        )];

        let out = transform(tree);
        let children = out[0].children();
        assert_eq!(titles(children), vec!["nuxt.config.ts", "schema.d.ts"]);
        assert_eq!(children[0].icon.as_deref(), Some(FRAMEWORK_ICON));
        assert_eq!(children[1].icon.as_deref(), Some(FRAMEWORK_ICON));
    }

    #[test]
    fn test_config_outside_api_is_untouched() {
        let tree = vec![section("/docs/x/guides", "Guides", vec![leaf("/docs/x/guides/config", "Config")])];
        let out = transform(tree);
        assert_eq!(titles(out[0].children()), vec!["Config"]);
    }

    #[test]
    fn test_tag_titles() {
        let tree = vec![section(
            "/docs/x/components",
            "Components",
            vec![leaf("/docs/x/components/og-image", "<OgImage>")],
        )];

        let out = transform(tree);
        let child = &out[0].children()[0];
        assert_eq!(child.title, "OgImage");
        assert_eq!(child.code.as_ref().unwrap().kind, CodeKind::Tag);
    }

    #[test]
    fn test_single_child_wrappers_collapse() {
        let tree = vec![section(
            "/docs/x/guides",
            "Guides",
            vec![section("/docs/x/guides/wrapper", "Wrapper", vec![leaf("/docs/x/guides/wrapper/page", "Page")])],
        )];

        let out = transform(tree);
        let children = out[0].children();
        assert_eq!(children.len(), 1);
        assert_eq!(children[0].path, "/docs/x/guides/wrapper/page");
        assert!(children[0].children.is_none());
    }

    #[test]
    fn test_collapse_runs_exactly_twice() {
        let tree = vec![section(
            "/docs/x/guides",
            "Guides",
            vec![section(
                "/docs/x/guides/a",
                "A",
                vec![section(
                    "/docs/x/guides/a/b",
                    "B",
                    vec![section("/docs/x/guides/a/b/c", "C", vec![leaf("/docs/x/guides/a/b/c/d", "D")])],
                )],
            )],
        )];

        let out = transform(tree);
        let child = &out[0].children()[0];
        assert_eq!(child.path, "/docs/x/guides/a/b/c");
        assert_eq!(child.children().len(), 1);
        assert_eq!(child.children()[0].path, "/docs/x/guides/a/b/c/d");
    }

    #[test]
    fn test_relabel_after_collapse_is_collapsed_again() {
        let tree = vec![section(
            "/docs/x/api",
            "API",
            vec![section(
                "/docs/x/api/composables",
                "Composables",
                vec![section(
                    "/docs/x/api/composables/use-robots",
                    "useRobots()",
                    vec![leaf("/docs/x/api/composables/use-robots/usage", "Usage")],
                )],
            )],
        )];

        let out = transform(tree);
        let child = &out[0].children()[0];
        assert_eq!(child.path, "/docs/x/api/composables/use-robots/usage");
    }

    #[test]
    fn test_unmatched_nodes_pass_through() {
        let tree = vec![section(
            "/docs/x/getting-started",
            "Getting Started",
            vec![leaf("/docs/x/getting-started/introduction", "Introduction")],
        )];

        assert_eq!(transform(tree.clone()), tree);
    }

    #[test]
    fn test_relabel_is_idempotent() {
        let tree = vec![section(
            "/docs/x/api",
            "API",
            vec![leaf("/docs/x/api/foo", "foo()"), leaf("/docs/x/api/og", "<OgImage>"), leaf("/docs/x/api/hooks", "Hooks")],
        )];

        let once = transform(tree);
        let twice = transform(once.clone());
        assert_eq!(once, twice);
    }
}
