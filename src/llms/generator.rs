use super::{LlmsSettings, build_document};
use crate::docs::{ContentIndex, DocsStore};
use crate::registry::Registry;
use crate::stats::StatsService;
use std::sync::Arc;

const LOG_TARGET: &str = "      llms";

/// Render `llms.txt` from the latest stats and content indexes.
///
/// Missing stats or an unavailable content index degrade the affected sections rather
/// than failing the document.
pub async fn generate(settings: &LlmsSettings, registry: &Registry, stats: &StatsService, docs: &DocsStore) -> String {
    let report = match stats.report().await {
        Ok(report) => Some(report),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Generating llms.txt without stats: {e:#}");
            stats.cached()
        }
    };

    let active: Vec<_> = registry.active().collect();
    let loaded = futures::future::join_all(active.iter().map(|m| docs.index(&m.slug))).await;

    let mut indexes: Vec<(String, Arc<ContentIndex>)> = Vec::with_capacity(active.len());
    for (module, index) in active.iter().zip(loaded) {
        match index {
            Ok(index) => indexes.push((module.slug.clone(), index)),
            Err(e) => log::warn!(target: LOG_TARGET, "No pages for '{}' in llms.txt: {e:#}", module.slug),
        }
    }

    let borrowed: Vec<(String, &ContentIndex)> = indexes.iter().map(|(slug, index)| (slug.clone(), index.as_ref())).collect();
    build_document(settings, registry.all(), report.as_deref(), &borrowed).render()
}
