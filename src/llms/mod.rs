//! `llms.txt` generation
//!
//! The document lists every released module with a summary synthesized from its
//! latest statistics and links to the markdown source of each of its pages.

mod compact;
mod document;
mod generator;

pub use compact::format_compact;
pub use document::{FullDocument, Link, LlmsDocument, LlmsSettings, Section, build_document, module_description, normalize_href};
pub use generator::generate;
