use crate::Result;
use crate::llms::{FullDocument, LlmsSettings};
use crate::registry::{ModuleDescriptor, Registry};
use camino::{Utf8Path, Utf8PathBuf};
use core::time::Duration;
use ohno::{IntoAppError, app_err};
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use url::Url;

/// The default configuration TOML content, embedded from `default_config.toml`
pub const DEFAULT_CONFIG_TOML: &str = include_str!("../../default_config.toml");

/// Name of the configuration file looked up in the working directory
pub const CONFIG_FILE_NAME: &str = "seo-docs.toml";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Address the HTTP server listens on
    #[serde(default = "default_bind")]
    pub bind: String,

    /// How long the stats report is served before it is refreshed
    #[serde(default = "default_stats_ttl", with = "humantime_serde")]
    pub stats_ttl: Duration,

    /// How long a module's page index is served before it is refreshed
    #[serde(default = "default_docs_index_ttl", with = "humantime_serde")]
    pub docs_index_ttl: Duration,

    /// Timeout of the module registry request
    #[serde(default = "default_registry_timeout", with = "humantime_serde")]
    pub registry_timeout: Duration,

    /// Timeout of every other outbound request attempt
    #[serde(default = "default_request_timeout", with = "humantime_serde")]
    pub request_timeout: Duration,

    /// Retries of a failed outbound request
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Branch the docs are read from on GitHub
    #[serde(default = "default_docs_branch")]
    pub docs_branch: String,

    /// Directories searched for local checkouts of the module repositories
    #[serde(default = "default_docs_search_roots")]
    pub docs_search_roots: Vec<Utf8PathBuf>,

    #[serde(default)]
    pub endpoints: Endpoints,

    #[serde(default = "default_llms")]
    pub llms: LlmsSettings,

    /// Replaces the built-in module list when present
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modules: Option<Vec<ModuleDescriptor>>,
}

/// Base URLs of the external APIs.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields, default)]
pub struct Endpoints {
    pub module_registry: String,
    pub github_api: String,
    pub github_raw: String,
    pub npm_api: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            module_registry: "https://api.nuxt.com".to_string(),
            github_api: "https://api.github.com".to_string(),
            github_raw: "https://raw.githubusercontent.com".to_string(),
            npm_api: "https://api.npmjs.org".to_string(),
        }
    }
}

fn default_bind() -> String {
    "127.0.0.1:3000".to_string()
}

const fn default_stats_ttl() -> Duration {
    Duration::from_hours(24)
}

const fn default_docs_index_ttl() -> Duration {
    Duration::from_hours(1)
}

const fn default_registry_timeout() -> Duration {
    Duration::from_secs(3)
}

const fn default_request_timeout() -> Duration {
    Duration::from_secs(30)
}

const fn default_max_retries() -> u32 {
    3
}

fn default_docs_branch() -> String {
    "main".to_string()
}

fn default_docs_search_roots() -> Vec<Utf8PathBuf> {
    vec![Utf8PathBuf::from("..")]
}

fn default_llms() -> LlmsSettings {
    LlmsSettings {
        domain: "https://nuxtseo.com/".to_string(),
        title: "Nuxt SEO".to_string(),
        description: "Nuxt SEO is a collection of hand-crafted Nuxt Modules to help you rank higher in search engines.".to_string(),
        notes: vec![
            "The documentation only supports Nuxt v3 and Nuxt v4".to_string(),
            "The content is automatically generated from the same source as the official documentation.".to_string(),
        ],
        full: Some(FullDocument {
            title: "Complete Documentation".to_string(),
            description: "The complete documentation including all content".to_string(),
            path: "/llms-full.txt".to_string(),
        }),
        framework: "Nuxt".to_string(),
        maintainer: "Harlan Wilton".to_string(),
    }
}

impl Config {
    /// Load configuration from a file or use defaults
    ///
    /// Without an explicit path, `seo-docs.toml` in the working directory is used when present.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or holds invalid values
    pub fn load(config_path: Option<&Utf8Path>) -> Result<Self> {
        let (final_path, text) = if let Some(path) = config_path {
            let text = fs::read_to_string(path).into_app_err_with(|| format!("reading seo-docs configuration file '{path}'"))?;
            (path.to_path_buf(), text)
        } else {
            let path = Utf8PathBuf::from(CONFIG_FILE_NAME);
            match fs::read_to_string(&path) {
                Ok(text) => (path, text),
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    // No config file found, use defaults
                    return Ok(Self::default());
                }
                Err(e) => return Err(e).into_app_err_with(|| format!("reading seo-docs configuration file '{path}'")),
            }
        };

        let config: Self = toml::from_str(&text).into_app_err_with(|| format!("parsing configuration file '{final_path}'"))?;
        config.validate()?;

        Ok(config)
    }

    /// Save the default configuration to a TOML file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written
    pub fn save_default(output_path: &Utf8Path) -> Result<()> {
        fs::write(output_path, DEFAULT_CONFIG_TOML).into_app_err_with(|| format!("writing default configuration to {output_path}"))?;
        Ok(())
    }

    /// The module registry described by this configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configured module list is invalid
    pub fn registry(&self) -> Result<Registry> {
        self.modules
            .as_ref()
            .map_or_else(|| Ok(Registry::builtin()), |modules| Registry::new(modules.clone()))
    }

    /// Validate configuration values
    ///
    /// # Errors
    ///
    /// Returns an error if a value is out of range or malformed
    fn validate(&self) -> Result<()> {
        if self.stats_ttl.is_zero() {
            return Err(app_err!("stats_ttl must be greater than zero"));
        }

        if self.docs_index_ttl.is_zero() {
            return Err(app_err!("docs_index_ttl must be greater than zero"));
        }

        if self.registry_timeout.is_zero() || self.request_timeout.is_zero() {
            return Err(app_err!("request timeouts must be greater than zero"));
        }

        if self.max_retries > 10 {
            return Err(app_err!("max_retries must be at most 10, got {}", self.max_retries));
        }

        if self.docs_branch.trim().is_empty() {
            return Err(app_err!("docs_branch must not be empty"));
        }

        let _ = self
            .bind
            .parse::<core::net::SocketAddr>()
            .into_app_err_with(|| format!("invalid bind address '{}'", self.bind))?;

        for (name, value) in [
            ("endpoints.module_registry", &self.endpoints.module_registry),
            ("endpoints.github_api", &self.endpoints.github_api),
            ("endpoints.github_raw", &self.endpoints.github_raw),
            ("endpoints.npm_api", &self.endpoints.npm_api),
            ("llms.domain", &self.llms.domain),
        ] {
            let _ = Url::parse(value).into_app_err_with(|| format!("{name} is not a valid URL: '{value}'"))?;
        }

        let _ = self.registry()?;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        toml::from_str(DEFAULT_CONFIG_TOML).expect("default_config.toml should be valid TOML that deserializes to Config")
    }
}
