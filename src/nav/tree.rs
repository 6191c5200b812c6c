use super::NavigationNode;
use crate::docs::{ContentPage, title_case};

/// Build the raw navigation tree of a module from its pages.
///
/// Every directory becomes a section titled after its name and every page a leaf,
/// both in page order. A directory's index page lends its title to the section.
#[must_use]
pub fn build_tree(slug: &str, pages: &[ContentPage]) -> Vec<NavigationNode> {
    let base = format!("/docs/{slug}");
    let mut roots = Vec::new();

    for page in pages {
        let relative = page.path.strip_prefix(&base).unwrap_or(&page.path);
        let segments: Vec<&str> = relative.split('/').filter(|s| !s.is_empty()).collect();
        insert(&mut roots, &base, &segments, page);
    }

    roots
}

fn insert(nodes: &mut Vec<NavigationNode>, parent_path: &str, segments: &[&str], page: &ContentPage) {
    let Some((first, rest)) = segments.split_first() else {
        return;
    };

    let path = format!("{parent_path}/{first}");
    let index = if let Some(index) = nodes.iter().position(|n| n.path == path) {
        index
    } else {
        nodes.push(NavigationNode::new(path.clone(), title_case(first)));
        nodes.len() - 1
    };

    let Some(node) = nodes.get_mut(index) else {
        return;
    };

    if rest.is_empty() {
        node.title.clone_from(&page.title);
    } else {
        insert(node.children.get_or_insert_with(Vec::new), &path, rest, page);
    }
}
