use crate::docs::DocsStore;
use crate::llms::LlmsSettings;
use crate::registry::Registry;
use crate::stats::StatsService;

/// Everything a request handler needs, shared across workers through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    pub registry: Registry,
    pub stats: StatsService,
    pub docs: DocsStore,
    pub llms: LlmsSettings,
}
