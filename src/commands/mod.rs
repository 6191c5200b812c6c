//! Command-line interface and orchestration for seo-docs
//!
//! This module implements the CLI commands and wires the library modules together
//! into a running service. It handles argument parsing, configuration management
//! and the construction of the shared service state.
//!
//! # Commands
//!
//! - **serve**: Run the HTTP server
//! - **stats**: Compute the stats report once and print it as JSON
//! - **llms**: Generate `llms.txt`
//! - **nav**: Print the navigation tree of a module, transformed for menu rendering
//!   unless `--raw` is given
//! - **init**: Generate a default configuration file
//! - **validate**: Check a configuration file
//!
//! The `common` module loads the configuration, sets up logging and builds the
//! [`AppState`](crate::server::AppState) shared by the commands that fetch data.
//! Configuration is a TOML file (`seo-docs.toml` by default) whose defaults are
//! embedded from `default_config.toml`.

mod common;
mod config;
mod host;
mod init;
mod llms;
mod nav;
mod run;
mod serve;
mod stats;
mod validate;

pub use common::{Common, CommonArgs, LogLevel, build_state};
pub use config::{CONFIG_FILE_NAME, Config, DEFAULT_CONFIG_TOML, Endpoints};
pub use host::Host;
pub use init::{InitArgs, init_config};
pub use llms::{LlmsArgs, print_llms};
pub use nav::{NavArgs, print_navigation};
pub use run::run;
pub use serve::{ServeArgs, serve_docs};
pub use stats::{StatsArgs, print_stats};
pub use validate::{ValidateArgs, validate_config};
