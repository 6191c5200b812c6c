//! Documentation sources and content indexes
//!
//! The docs of each module live in its own repository under a content directory.
//! When a checkout is found next to this project the files are read from disk,
//! otherwise they are listed through the GitHub tree API and fetched from the raw
//! file host. [`DocsStore`] keeps one [`ContentIndex`] per module behind a
//! stale-while-revalidate cache and serves the raw markdown of any indexed page.

mod content_index;
mod page_path;
mod source;
mod store;

pub use content_index::{ContentIndex, ContentPage, extract_title};
pub use page_path::{order_key, page_path, strip_order_prefix, title_case};
pub use source::DocsSource;
pub use store::DocsStore;
