//! seo-docs crate
//!
//! Backend for the documentation site of the SEO module family. It aggregates module
//! popularity statistics from external APIs, serves the raw markdown behind every
//! documentation page, shapes the navigation tree for menu rendering and generates an
//! `llms.txt` summary of the site.
//!
//! # Module Organization
//!
//! - [`registry`]: The canonical list of documented modules
//! - [`stats`]: Statistics aggregation and stale-while-revalidate caching
//! - [`docs`]: Documentation sources and the per-module content index
//! - [`nav`]: Navigation tree building and transformation
//! - [`llms`]: `llms.txt` generation
//! - [`server`]: HTTP endpoints
//! - [`commands`]: Command-line interface and orchestration

/// Result type alias using `ohno::AppError` as the default error type.
pub type Result<T, E = ohno::AppError> = core::result::Result<T, E>;

#[doc(hidden)]
pub mod commands;

#[doc(hidden)]
pub mod docs;

#[doc(hidden)]
pub mod llms;

#[doc(hidden)]
pub mod nav;

#[doc(hidden)]
pub mod registry;

#[doc(hidden)]
pub mod server;

#[doc(hidden)]
pub mod stats;

pub use crate::commands::{Host, run};
