use crate::registry::ModuleDescriptor;
use core::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};

/// Where the markdown of a module comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocsSource {
    /// A local checkout, pointing at the content directory
    Local { dir: PathBuf },

    /// The module's GitHub repository
    GitHub { repo: String, branch: String, prefix: String },
}

impl DocsSource {
    /// Pick the source of a module's docs.
    ///
    /// The first existing `{root}/{npm}/{content_prefix}` or `{root}/{repo name}/{content_prefix}`
    /// directory among `search_roots` wins, otherwise the docs come from GitHub at `branch`.
    #[must_use]
    pub fn resolve(module: &ModuleDescriptor, search_roots: &[PathBuf], branch: &str) -> Self {
        let candidates = search_roots.iter().flat_map(|root| {
            [module.npm.as_str(), module.repo_name()]
                .into_iter()
                .map(move |name| root.join(name).join(&module.content_prefix))
        });

        for dir in candidates {
            if dir.is_dir() {
                return Self::Local { dir };
            }
        }

        Self::GitHub {
            repo: module.repo.clone(),
            branch: branch.to_string(),
            prefix: module.content_prefix.clone(),
        }
    }

    #[must_use]
    pub fn local_dir(&self) -> Option<&Path> {
        match self {
            Self::Local { dir } => Some(dir),
            Self::GitHub { .. } => None,
        }
    }
}

impl Display for DocsSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Local { dir } => write!(f, "local fs: {}", dir.display()),
            Self::GitHub { repo, branch, .. } => write!(f, "GitHub: {repo}@{branch}"),
        }
    }
}
