//! Common setup shared by the commands that talk to the outside world.

use super::config::Config;
use crate::Result;
use crate::docs::DocsStore;
use crate::server::AppState;
use crate::stats::{Aggregator, ApiClient, Clock, GitHubApi, HttpPolicy, ModuleRegistry, NpmApi, Snapshot, Sources, StatsService, SystemClock};
use camino::Utf8PathBuf;
use clap::{Args, ValueEnum};
use directories::BaseDirs;
use ohno::IntoAppError;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const LOG_TARGET: &str = "    common";

/// File the last computed stats report is kept in, inside the cache directory
const SNAPSHOT_FILE: &str = "stats.json";

/// Log level for diagnostic output
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// No logging output
    None,

    /// Only error messages
    Error,

    /// Warning and error messages
    Warn,

    /// Info, warning, and error messages
    Info,

    /// Debug, info, warning, and error messages
    Debug,

    /// Trace, debug, info, warning, and error messages
    Trace,
}

/// Common arguments shared between the serve, stats, llms and nav commands
#[derive(Args, Debug, Clone)]
pub struct CommonArgs {
    /// GitHub personal access token
    #[arg(long, value_name = "TOKEN", env = "GITHUB_TOKEN")]
    pub github_token: Option<String>,

    /// Path to configuration file (default is `seo-docs.toml`)
    #[arg(long, short = 'c', value_name = "PATH")]
    pub config: Option<Utf8PathBuf>,

    /// Directory where the stats snapshot is kept
    #[arg(long, value_name = "PATH")]
    pub cache_dir: Option<Utf8PathBuf>,

    /// Don't read or write the stats snapshot
    #[arg(long)]
    pub no_snapshot: bool,

    /// Set the logging level for diagnostic output
    #[arg(long, value_name = "LEVEL", default_value = "none", global = true)]
    pub log_level: LogLevel,
}

/// Configuration and service state built from [`CommonArgs`].
#[derive(Debug)]
pub struct Common {
    pub config: Config,
    pub state: AppState,
}

impl Common {
    /// Initialize logging, load the configuration and wire up the services
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration cannot be loaded or the HTTP clients cannot be built
    pub fn new(args: &CommonArgs) -> Result<Self> {
        init_logging(args.log_level);

        let config = Config::load(args.config.as_deref())?;

        let cache_dir = if args.no_snapshot {
            None
        } else if let Some(cache_path) = &args.cache_dir {
            Some(cache_path.as_std_path().to_path_buf())
        } else {
            Some(
                BaseDirs::new()
                    .into_app_err("could not determine cache directory")?
                    .cache_dir()
                    .join("seo-docs"),
            )
        };

        let state = build_state(&config, args.github_token.as_deref(), cache_dir.as_deref())?;
        Ok(Self { config, state })
    }
}

/// Build the services described by `config`.
///
/// GitHub requests carry `github_token` when given. The stats report is persisted in
/// `cache_dir` when one is given.
///
/// # Errors
///
/// Returns an error if the configured module list is invalid or the HTTP clients cannot be built
pub fn build_state(config: &Config, github_token: Option<&str>, cache_dir: Option<&Path>) -> Result<AppState> {
    let clock: Arc<dyn Clock> = Arc::new(SystemClock);
    let registry = config.registry()?;

    let policy = HttpPolicy {
        timeout: config.request_timeout,
        max_retries: config.max_retries,
        ..HttpPolicy::default()
    };

    let github_client = ApiClient::new(github_token, policy)?;
    let public_client = ApiClient::new(None, policy)?;

    let github = GitHubApi::new(github_client, &config.endpoints.github_api, &config.endpoints.github_raw);
    let sources = Sources {
        registry: ModuleRegistry::new(
            public_client.with_policy(HttpPolicy::single_attempt(config.registry_timeout)),
            &config.endpoints.module_registry,
        ),
        github: github.clone(),
        npm: NpmApi::new(public_client, &config.endpoints.npm_api),
    };

    let snapshot = cache_dir.map(|dir| Snapshot::new(dir, SNAPSHOT_FILE));
    if let Some(snapshot) = &snapshot {
        log::debug!(target: LOG_TARGET, "Stats snapshot at '{}'", snapshot.path().display());
    }

    let stats = StatsService::new(
        Aggregator::new(sources, Arc::clone(&clock)),
        registry.clone(),
        config.stats_ttl,
        Arc::clone(&clock),
        snapshot,
    );

    let search_roots: Vec<PathBuf> = config.docs_search_roots.iter().map(|root| root.as_std_path().to_path_buf()).collect();
    let docs = DocsStore::new(&registry, github, &search_roots, &config.docs_branch, config.docs_index_ttl, &clock);

    Ok(AppState {
        registry,
        stats,
        docs,
        llms: config.llms.clone(),
    })
}

pub(super) fn init_logging(log_level: LogLevel) {
    let level = match log_level {
        LogLevel::None => return,
        LogLevel::Error => "error",
        LogLevel::Warn => "warn",
        LogLevel::Info => "info",
        LogLevel::Debug => "debug",
        LogLevel::Trace => "trace",
    };

    let env = env_logger::Env::default().filter_or("RUST_LOG", level);

    env_logger::Builder::from_env(env)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(matches!(log_level, LogLevel::Debug | LogLevel::Trace))
        .init();
}
