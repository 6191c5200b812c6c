//! Integration tests for the stats report, with every external API mocked by wiremock

use core::time::Duration;
use seo_docs::commands::{Config, Endpoints, build_state};
use seo_docs::registry::ModuleDescriptor;
use seo_docs::server::AppState;
use serde_json::json;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn descriptor(slug: &str, soon: bool) -> ModuleDescriptor {
    ModuleDescriptor {
        soon,
        ..ModuleDescriptor::new(slug, slug, "i-carbon-bot", &format!("acme/{slug}"), &format!("nuxt-{slug}"))
    }
}

fn state_for(server: &MockServer, modules: Vec<ModuleDescriptor>) -> AppState {
    let config = Config {
        max_retries: 0,
        registry_timeout: Duration::from_millis(500),
        request_timeout: Duration::from_secs(5),
        docs_search_roots: Vec::new(),
        endpoints: Endpoints {
            module_registry: server.uri(),
            github_api: server.uri(),
            github_raw: format!("{}/raw", server.uri()),
            npm_api: server.uri(),
        },
        modules: Some(modules),
        ..Config::default()
    };

    build_state(&config, None, None).unwrap()
}

/// Mount the GitHub and npm responses of one module.
async fn mount_sources(server: &MockServer, slug: &str, stars: u64, commits: u64, closed: u64) {
    Mock::given(method("GET"))
        .and(path(format!("/repos/acme/{slug}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "stargazers_count": stars })))
        .mount(server)
        .await;

    let last = format!(r#"<{}/repos/acme/{slug}/commits?per_page=1&page={commits}>; rel="last""#, server.uri());
    Mock::given(method("GET"))
        .and(path(format!("/repos/acme/{slug}/commits")))
        .respond_with(ResponseTemplate::new(200).insert_header("link", last.as_str()).set_body_json(json!([{}])))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/search/issues"))
        .and(query_param("q", format!("repo:acme/{slug} is:issue is:closed")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "total_count": closed })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path(format!("/repos/acme/{slug}/releases")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "name": "v3.1.0", "tag_name": "v3.1.0" },
            { "name": "v3.0.0", "tag_name": "v3.0.0" },
            { "name": null, "tag_name": "v2.4.1" }
        ])))
        .mount(server)
        .await;

    let days: Vec<_> = (0..180).map(|_| json!({ "downloads": 10 })).collect();
    Mock::given(method("GET"))
        .and(path_regex(format!(r"^/downloads/range/[0-9-]+:[0-9-]+/nuxt-{slug}$")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "downloads": days })))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_report_combines_all_sources() {
    let server = MockServer::start().await;
    mount_sources(&server, "alpha", 120, 321, 40).await;
    mount_sources(&server, "beta", 0, 10, 2).await;

    Mock::given(method("GET"))
        .and(path("/modules/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stats": { "stars": 99, "createdAt": "2020-09-13T12:26:40Z", "publishedAt": "2023-11-14T22:13:20Z" },
            "contributors": [{ "id": 7 }, { "id": "bob" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/modules/beta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "stats": { "stars": 55 },
            "contributors": [{ "id": "bob" }, { "id": 3 }]
        })))
        .mount(&server)
        .await;

    let state = state_for(&server, vec![descriptor("alpha", false), descriptor("beta", false)]);
    let report = state.stats.report().await.unwrap();

    assert_eq!(report.modules.len(), 2);
    assert_eq!(report.total_commits, 331);
    assert_eq!(report.total_issue_closed, 42);
    assert_eq!(report.unique_contributors, vec!["3", "7", "bob"]);

    let alpha = report.find("alpha").unwrap();
    assert_eq!(alpha.metrics.stars, 120);
    assert_eq!(alpha.metrics.version.as_deref(), Some("v3.1.0"));
    assert_eq!(alpha.metrics.versions, vec!["v3.1.0", "v2.4.1"]);
    assert_eq!(alpha.metrics.total_downloads30, 300);
    assert_eq!(alpha.metrics.total_downloads90, 900);
    assert!((alpha.metrics.percentage_change - 0.0).abs() < f64::EPSILON);

    // GitHub reports no stars, so the registry figure is used
    let beta = report.find("beta").unwrap();
    assert_eq!(beta.metrics.stars, 55);
}

#[tokio::test]
async fn test_registry_failure_yields_zero_metadata() {
    let server = MockServer::start().await;
    mount_sources(&server, "alpha", 5, 1, 0).await;

    Mock::given(method("GET"))
        .and(path("/modules/alpha"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let state = state_for(&server, vec![descriptor("alpha", false)]);
    let report = state.stats.report().await.unwrap();

    let alpha = report.find("alpha").unwrap();
    assert_eq!(alpha.metrics.stars, 5);
    assert!(alpha.metrics.created_at.is_none());
    assert!(report.unique_contributors.is_empty());
}

#[tokio::test]
async fn test_registry_timeout_yields_zero_metadata() {
    let server = MockServer::start().await;
    mount_sources(&server, "alpha", 0, 1, 0).await;

    Mock::given(method("GET"))
        .and(path("/modules/alpha"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(Duration::from_secs(3))
                .set_body_json(json!({ "stats": { "stars": 1000 } })),
        )
        .mount(&server)
        .await;

    let state = state_for(&server, vec![descriptor("alpha", false)]);
    let report = state.stats.report().await.unwrap();

    assert_eq!(report.find("alpha").unwrap().metrics.stars, 0);
}

#[tokio::test]
async fn test_github_failure_fails_report() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path_regex(r"^/repos/acme/alpha.*$"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    let state = state_for(&server, vec![descriptor("alpha", false)]);
    assert!(state.stats.report().await.is_err());
    assert!(state.stats.cached().is_none());
}

#[tokio::test]
async fn test_soon_modules_are_excluded() {
    let server = MockServer::start().await;
    mount_sources(&server, "alpha", 1, 1, 1).await;

    Mock::given(method("GET"))
        .and(path("/modules/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/modules/later"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(0)
        .mount(&server)
        .await;

    let state = state_for(&server, vec![descriptor("alpha", false), descriptor("later", true)]);
    let report = state.stats.report().await.unwrap();

    assert_eq!(report.modules.len(), 1);
    assert!(report.find("later").is_none());
}

#[tokio::test]
async fn test_report_is_cached() {
    let server = MockServer::start().await;
    mount_sources(&server, "alpha", 1, 1, 1).await;

    Mock::given(method("GET"))
        .and(path("/modules/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
        .expect(1)
        .mount(&server)
        .await;

    let state = state_for(&server, vec![descriptor("alpha", false)]);
    let first = state.stats.report().await.unwrap();
    let second = state.stats.report().await.unwrap();

    assert_eq!(first.fetched_at, second.fetched_at);
}

#[tokio::test]
async fn test_contributors_independent_of_module_order() {
    let server = MockServer::start().await;
    mount_sources(&server, "alpha", 1, 1, 1).await;
    mount_sources(&server, "beta", 1, 1, 1).await;

    Mock::given(method("GET"))
        .and(path("/modules/alpha"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contributors": [{ "id": "zed" }, { "id": 20 }, { "id": "amy" }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/modules/beta"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "contributors": [{ "id": "amy" }, { "id": 3 }]
        })))
        .mount(&server)
        .await;

    let forward = state_for(&server, vec![descriptor("alpha", false), descriptor("beta", false)]);
    let backward = state_for(&server, vec![descriptor("beta", false), descriptor("alpha", false)]);

    let forward = forward.stats.report().await.unwrap();
    let backward = backward.stats.report().await.unwrap();

    assert_eq!(forward.unique_contributors, backward.unique_contributors);
    assert_eq!(forward.unique_contributors, vec!["20", "3", "amy", "zed"]);
}
