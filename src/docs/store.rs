use super::{ContentIndex, DocsSource, extract_title};
use crate::Result;
use crate::registry::Registry;
use crate::stats::{Clock, GitHubApi, SwrCache};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use walkdir::WalkDir;

const LOG_TARGET: &str = "      docs";

#[derive(Debug, Clone)]
struct ModuleDocs {
    slug: String,
    source: DocsSource,
    index: SwrCache<ContentIndex>,
}

/// Content indexes and raw markdown of every registered module.
#[derive(Debug, Clone)]
pub struct DocsStore {
    github: GitHubApi,
    modules: Arc<HashMap<String, ModuleDocs>>,
}

impl DocsStore {
    /// Resolve the docs source of every module in `registry`.
    #[must_use]
    pub fn new(registry: &Registry, github: GitHubApi, search_roots: &[PathBuf], branch: &str, ttl: Duration, clock: &Arc<dyn Clock>) -> Self {
        let modules = registry
            .all()
            .iter()
            .map(|module| {
                let source = DocsSource::resolve(module, search_roots, branch);
                log::info!(target: LOG_TARGET, "Docs source '{}' using {source}", module.slug);

                let docs = ModuleDocs {
                    slug: module.slug.clone(),
                    source,
                    index: SwrCache::new(format!("docs:{}", module.slug), ttl, Arc::clone(clock)),
                };
                (module.slug.clone(), docs)
            })
            .collect();

        Self {
            github,
            modules: Arc::new(modules),
        }
    }

    /// Where the docs of `slug` come from.
    #[must_use]
    pub fn source(&self, slug: &str) -> Option<&DocsSource> {
        self.modules.get(slug).map(|m| &m.source)
    }

    /// The content index of a module.
    pub async fn index(&self, slug: &str) -> Result<Arc<ContentIndex>> {
        let docs = self.module(slug)?;
        let github = self.github.clone();
        let slug = docs.slug.clone();
        let source = docs.source.clone();

        docs.index
            .get_with(move || async move { load_index(&github, &slug, &source).await })
            .await
    }

    /// Raw markdown of the page served at `path`.
    ///
    /// Returns `Ok(None)` when the module has no such page.
    pub async fn markdown(&self, slug: &str, path: &str) -> Result<Option<String>> {
        let docs = self.module(slug)?;
        let index = self.index(slug).await?;

        let Some(page) = index.find(path) else {
            return Ok(None);
        };

        log::debug!(target: LOG_TARGET, "Loading '{}' for {path}", page.file);

        let text = match &docs.source {
            DocsSource::Local { dir } => {
                let file = dir.join(&page.file);
                tokio::fs::read_to_string(&file)
                    .await
                    .into_app_err_with(|| format!("reading '{}'", file.display()))?
            }
            DocsSource::GitHub { repo, branch, prefix } => {
                self.github
                    .raw_file(repo, branch, &format!("{prefix}{}", page.file))
                    .await?
            }
        };

        Ok(Some(text))
    }

    fn module(&self, slug: &str) -> Result<&ModuleDocs> {
        self.modules.get(slug).ok_or_else(|| app_err!("unknown module '{slug}'"))
    }
}

async fn load_index(github: &GitHubApi, slug: &str, source: &DocsSource) -> Result<ContentIndex> {
    let files = match source {
        DocsSource::Local { dir } => {
            let dir = dir.clone();
            tokio::task::spawn_blocking(move || scan_local(&dir))
                .await
                .into_app_err("scanning local docs")??
        }
        DocsSource::GitHub { repo, branch, prefix } => github
            .markdown_files(repo, branch, prefix)
            .await?
            .into_iter()
            .map(|file| (file, None))
            .collect(),
    };

    let index = ContentIndex::from_files(slug, files);
    log::info!(target: LOG_TARGET, "Indexed {} pages for '{slug}'", index.len());
    Ok(index)
}

/// Markdown files below `dir` with the titles found in them.
fn scan_local(dir: &Path) -> Result<Vec<(String, Option<String>)>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir).follow_links(true) {
        let entry = entry.into_app_err_with(|| format!("walking '{}'", dir.display()))?;
        if !entry.file_type().is_file() || entry.path().extension().is_none_or(|ext| ext != "md") {
            continue;
        }

        let Ok(relative) = entry.path().strip_prefix(dir) else {
            continue;
        };

        let relative: Vec<String> = relative.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
        let bytes = std::fs::read(entry.path()).into_app_err_with(|| format!("reading '{}'", entry.path().display()))?;
        let text = String::from_utf8_lossy(&bytes);

        files.push((relative.join("/"), extract_title(&text)));
    }

    Ok(files)
}
