//! GitHub REST API queries
//!
//! Star, commit, closed-issue and release counts for the stats report, plus the
//! repository tree and raw file access used by the documentation source.

use super::ApiClient;
use crate::Result;
use ohno::{IntoAppError, bail};
use serde::Deserialize;
use serde::de::IgnoredAny;
use url::Url;

const LOG_TARGET: &str = "    github";

#[derive(Debug, Deserialize)]
struct Repository {
    #[serde(default)]
    stargazers_count: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct SearchResult {
    total_count: u64,
}

/// A published release
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Release {
    #[serde(default)]
    pub name: Option<String>,
    pub tag_name: String,
}

impl Release {
    /// The release name, or its tag when the release is unnamed.
    #[must_use]
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => &self.tag_name,
        }
    }
}

#[derive(Debug, Deserialize)]
struct Tree {
    tree: Vec<TreeEntry>,
    #[serde(default)]
    truncated: bool,
}

#[derive(Debug, Deserialize)]
struct TreeEntry {
    path: String,
    #[serde(rename = "type")]
    kind: String,
}

/// Client for the GitHub REST API and raw file host.
#[derive(Debug, Clone)]
pub struct GitHubApi {
    client: ApiClient,
    api_base: String,
    raw_base: String,
}

impl GitHubApi {
    #[must_use]
    pub fn new(client: ApiClient, api_base: &str, raw_base: &str) -> Self {
        Self {
            client,
            api_base: api_base.trim_end_matches('/').to_string(),
            raw_base: raw_base.trim_end_matches('/').to_string(),
        }
    }

    /// Stargazer count of `owner/name`.
    pub async fn stars(&self, repo: &str) -> Result<u64> {
        let url = format!("{}/repos/{repo}", self.api_base);
        let repository: Repository = self.client.get_json(&url).await?;
        Ok(repository.stargazers_count.unwrap_or(0))
    }

    /// Number of commits on the default branch.
    ///
    /// Asks for one commit per page and reads the number of the last page from the `Link` header.
    pub async fn commit_count(&self, repo: &str) -> Result<u64> {
        let url = format!("{}/repos/{repo}/commits?per_page=1", self.api_base);
        let resp = self.client.get(&url).await?;

        let last_page = resp
            .headers()
            .get(reqwest::header::LINK)
            .and_then(|h| h.to_str().ok())
            .and_then(last_page_from_link);

        if let Some(count) = last_page {
            return Ok(count);
        }

        let commits: Vec<IgnoredAny> = resp
            .json()
            .await
            .into_app_err_with(|| format!("decoding commits of '{repo}'"))?;
        Ok(commits.len() as u64)
    }

    /// Number of closed issues, pull requests excluded.
    pub async fn closed_issues(&self, repo: &str) -> Result<u64> {
        let url = format!("{}/search/issues?q=repo:{repo}+is:issue+is:closed&per_page=1", self.api_base);
        let result: SearchResult = self.client.get_json(&url).await?;
        Ok(result.total_count)
    }

    /// The most recent releases, newest first.
    pub async fn releases(&self, repo: &str) -> Result<Vec<Release>> {
        let url = format!("{}/repos/{repo}/releases?per_page=100", self.api_base);
        self.client.get_json(&url).await
    }

    /// Paths of the markdown files below `prefix` at `branch`, relative to `prefix`.
    pub async fn markdown_files(&self, repo: &str, branch: &str, prefix: &str) -> Result<Vec<String>> {
        let url = format!("{}/repos/{repo}/git/trees/{branch}?recursive=1", self.api_base);
        let tree: Tree = self.client.get_json(&url).await?;

        if tree.truncated {
            log::warn!(target: LOG_TARGET, "Tree of '{repo}' at '{branch}' is truncated, some pages may be missing");
        }

        let mut files: Vec<String> = tree
            .tree
            .into_iter()
            .filter(|entry| entry.kind == "blob")
            .filter_map(|entry| {
                entry
                    .path
                    .strip_prefix(prefix)
                    .filter(|rest| rest.ends_with(".md"))
                    .map(ToString::to_string)
            })
            .collect();
        files.sort();
        Ok(files)
    }

    /// Raw content of `path` at `branch`.
    pub async fn raw_file(&self, repo: &str, branch: &str, path: &str) -> Result<String> {
        if path.split('/').any(|segment| segment == "..") {
            bail!("invalid file path '{path}'");
        }

        let url = format!("{}/{repo}/{branch}/{path}", self.raw_base);
        self.client.get_text(&url).await
    }
}

/// Page number of the `rel="last"` entry of a `Link` header.
#[must_use]
pub fn last_page_from_link(link: &str) -> Option<u64> {
    link.split(',').find_map(|part| {
        let (target, params) = part.split_once(';')?;
        if !params.split(';').any(|p| p.trim() == r#"rel="last""#) {
            return None;
        }

        let target = target.trim().strip_prefix('<')?.strip_suffix('>')?;
        let url = Url::parse(target).ok()?;
        url.query_pairs()
            .find(|(key, _)| key == "page")
            .and_then(|(_, value)| value.parse().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::HttpPolicy;
    use core::time::Duration;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn api(server: &MockServer) -> GitHubApi {
        let client = ApiClient::new(None, HttpPolicy::single_attempt(Duration::from_secs(5))).unwrap();
        GitHubApi::new(client, &server.uri(), &format!("{}/raw/", server.uri()))
    }

    #[test]
    fn test_last_page_from_link() {
        let link = r#"<https://api.github.com/repositories/1/commits?per_page=1&page=2>; rel="next", <https://api.github.com/repositories/1/commits?per_page=1&page=1234>; rel="last""#;
        assert_eq!(last_page_from_link(link), Some(1234));
    }

    #[test]
    fn test_last_page_from_link_without_last() {
        let link = r#"<https://api.github.com/repositories/1/commits?per_page=1&page=1>; rel="prev""#;
        assert_eq!(last_page_from_link(link), None);
        assert_eq!(last_page_from_link(""), None);
    }

    #[test]
    fn test_release_display_name() {
        let named = Release {
            name: Some("v1.2.0".into()),
            tag_name: "1.2.0".into(),
        };
        assert_eq!(named.display_name(), "v1.2.0");

        let unnamed = Release {
            name: Some(String::new()),
            tag_name: "1.1.0".into(),
        };
        assert_eq!(unnamed.display_name(), "1.1.0");
    }

    #[tokio::test]
    async fn test_commit_count_from_link_header() {
        let server = MockServer::start().await;
        let link = format!(r#"<{}/repos/acme/widget/commits?per_page=1&page=321>; rel="last""#, server.uri());
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget/commits"))
            .and(query_param("per_page", "1"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("link", link.as_str())
                    .set_body_json(serde_json::json!([{ "sha": "abc" }])),
            )
            .mount(&server)
            .await;

        assert_eq!(api(&server).commit_count("acme/widget").await.unwrap(), 321);
    }

    #[tokio::test]
    async fn test_commit_count_without_link_header() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/tiny/commits"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([{ "sha": "abc" }])))
            .mount(&server)
            .await;

        assert_eq!(api(&server).commit_count("acme/tiny").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_closed_issues() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/search/issues"))
            .and(query_param("q", "repo:acme/widget is:issue is:closed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "total_count": 77, "items": [] })))
            .mount(&server)
            .await;

        assert_eq!(api(&server).closed_issues("acme/widget").await.unwrap(), 77);
    }

    #[tokio::test]
    async fn test_markdown_files() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/repos/acme/widget/git/trees/main"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "tree": [
                    { "path": "docs/content/1.guides/0.setup.md", "type": "blob" },
                    { "path": "docs/content/0.getting-started/1.introduction.md", "type": "blob" },
                    { "path": "docs/content/0.getting-started", "type": "tree" },
                    { "path": "docs/content/logo.png", "type": "blob" },
                    { "path": "README.md", "type": "blob" }
                ],
                "truncated": false
            })))
            .mount(&server)
            .await;

        let files = api(&server).markdown_files("acme/widget", "main", "docs/content/").await.unwrap();
        assert_eq!(files, vec!["0.getting-started/1.introduction.md", "1.guides/0.setup.md"]);
    }

    #[tokio::test]
    async fn test_raw_file_rejects_parent_segments() {
        let server = MockServer::start().await;
        let result = api(&server).raw_file("acme/widget", "main", "docs/../secrets.md").await;
        assert!(result.is_err());
    }
}
