use super::page_path::{order_key, page_path, strip_order_prefix, title_case};
use serde::{Deserialize, Serialize};

/// One documentation page of a module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPage {
    /// Public path, e.g. `/docs/robots/getting-started/introduction`
    pub path: String,

    /// Markdown file relative to the module's content directory
    pub file: String,

    pub title: String,
}

/// The pages of one module, in navigation order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ContentIndex {
    pages: Vec<ContentPage>,
}

impl ContentIndex {
    /// Build an index from markdown files and their titles, if known.
    ///
    /// Pages without a title are titled after their file name.
    #[must_use]
    pub fn from_files(slug: &str, files: Vec<(String, Option<String>)>) -> Self {
        let mut pages: Vec<ContentPage> = files
            .into_iter()
            .filter(|(file, _)| file.ends_with(".md"))
            .map(|(file, title)| {
                let title = title.unwrap_or_else(|| fallback_title(&file));
                ContentPage {
                    path: page_path(slug, &file),
                    file,
                    title,
                }
            })
            .collect();

        pages.sort_by_cached_key(|p| order_key(&p.file));
        Self { pages }
    }

    #[must_use]
    pub fn pages(&self) -> &[ContentPage] {
        &self.pages
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }

    /// Find the page served at `path`. A `.md` extension or trailing slash is ignored.
    #[must_use]
    pub fn find(&self, path: &str) -> Option<&ContentPage> {
        let path = path.strip_suffix(".md").unwrap_or(path);
        let path = path.strip_suffix('/').unwrap_or(path);
        self.pages.iter().find(|p| p.path == path)
    }
}

fn fallback_title(file: &str) -> String {
    let stem = file.rsplit('/').next().unwrap_or(file);
    let stem = stem.strip_suffix(".md").unwrap_or(stem);
    title_case(strip_order_prefix(stem))
}

#[derive(Debug, Deserialize)]
struct FrontMatter {
    title: Option<String>,
}

/// Split a leading `---` delimited YAML block off a markdown document.
fn split_front_matter(markdown: &str) -> (Option<&str>, &str) {
    let Some(rest) = markdown.strip_prefix("---") else {
        return (None, markdown);
    };

    let Some(rest) = rest.strip_prefix("\r\n").or_else(|| rest.strip_prefix('\n')) else {
        return (None, markdown);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            let (yaml, tail) = rest.split_at(offset);
            let (_, body) = tail.split_at(line.len());
            return (Some(yaml), body);
        }
        offset += line.len();
    }

    (None, markdown)
}

/// Title of a markdown document.
///
/// The front-matter `title` wins over the first level-one heading. Front matter that is
/// not valid YAML is ignored.
#[must_use]
pub fn extract_title(markdown: &str) -> Option<String> {
    let (front_matter, body) = split_front_matter(markdown);

    let title = front_matter
        .and_then(|yaml| serde_yaml::from_str::<FrontMatter>(yaml).ok())
        .and_then(|fm| fm.title)
        .map(|title| title.trim().to_string())
        .filter(|title| !title.is_empty());

    if title.is_some() {
        return title;
    }

    body.lines()
        .find_map(|line| line.strip_prefix("# "))
        .map(|heading| heading.trim().to_string())
        .filter(|heading| !heading.is_empty())
}
