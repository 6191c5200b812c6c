use super::{ApiError, AppState};
use crate::llms;
use crate::nav::{build_tree, menu, transform};
use crate::registry::{ModuleDescriptor, ModuleView};
use actix_web::http::header::{CACHE_CONTROL, CONTENT_TYPE, ContentType};
use actix_web::{HttpResponse, web};
use serde_json::json;

const LOG_TARGET: &str = "  handlers";

/// `Cache-Control` of the stats report.
pub const STATS_CACHE_CONTROL: &str = "public, max-age=86400, stale-while-revalidate";

/// Body of every failed markdown request.
pub const MARKDOWN_LOAD_FAILED: &str = "Failed to load markdown";

const MARKDOWN_CONTENT_TYPE: &str = "text/markdown; charset=utf-8";

/// GET /api/stats.json
pub async fn stats(state: web::Data<AppState>) -> Result<HttpResponse, ApiError> {
    let report = state.stats.report().await.map_err(|e| {
        log::error!(target: LOG_TARGET, "Could not compute stats: {e:#}");
        ApiError::Upstream("Failed to load stats".to_string())
    })?;

    Ok(HttpResponse::Ok()
        .insert_header((CACHE_CONTROL, STATS_CACHE_CONTROL))
        .json(report.as_ref()))
}

/// GET /api/modules/{slug}.json
///
/// The descriptor merged with the module's latest stats. Stats are left out when
/// none could be loaded.
pub async fn module(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let file = path.into_inner();
    let module = find_json_module(&state, &file)?;

    let report = match state.stats.report().await {
        Ok(report) => Some(report),
        Err(e) => {
            log::warn!(target: LOG_TARGET, "Serving module '{}' without fresh stats: {e:#}", module.slug);
            state.stats.cached()
        }
    };

    let view = ModuleView::merge(module, report.as_ref().and_then(|r| r.find(&module.slug)));
    Ok(HttpResponse::Ok().json(view))
}

/// GET /api/navigation/{slug}.json
pub async fn navigation(state: web::Data<AppState>, path: web::Path<String>) -> Result<HttpResponse, ApiError> {
    let file = path.into_inner();
    let module = find_json_module(&state, &file)?;

    let index = state.docs.index(&module.slug).await.map_err(|e| {
        log::error!(target: LOG_TARGET, "Could not index docs of '{}': {e:#}", module.slug);
        ApiError::Upstream("Failed to load navigation".to_string())
    })?;

    let tree = transform(build_tree(&module.slug, index.pages()));
    Ok(HttpResponse::Ok().json(tree))
}

/// GET /api/menu.json
pub async fn top_menu(state: web::Data<AppState>) -> HttpResponse {
    HttpResponse::Ok().json(menu(state.registry.all()))
}

/// GET /docs/{slug}/{tail}.md
///
/// The raw markdown behind a documentation page.
pub async fn markdown(state: web::Data<AppState>, path: web::Path<(String, String)>) -> Result<HttpResponse, ApiError> {
    let (slug, tail) = path.into_inner();

    if !tail.ends_with(".md") {
        return Err(ApiError::NotFound("Not found".to_string()));
    }

    if state.registry.find(&slug).is_none() {
        log::debug!(target: LOG_TARGET, "Markdown requested for unknown module '{slug}'");
        return Err(ApiError::NotFound(format!("Unknown module '{slug}'")));
    }

    let page_path = format!("/docs/{slug}/{tail}");
    match state.docs.markdown(&slug, &page_path).await {
        Ok(Some(text)) => Ok(HttpResponse::Ok()
            .insert_header((CONTENT_TYPE, MARKDOWN_CONTENT_TYPE))
            .insert_header((CACHE_CONTROL, "no-cache"))
            .body(text)),
        Ok(None) => {
            log::warn!(target: LOG_TARGET, "No page matches {page_path}");
            Err(ApiError::NotFound(MARKDOWN_LOAD_FAILED.to_string()))
        }
        Err(e) => {
            log::error!(target: LOG_TARGET, "Failed to load markdown for {page_path}: {e:#}");
            Err(ApiError::Upstream(MARKDOWN_LOAD_FAILED.to_string()))
        }
    }
}

/// GET /llms.txt
pub async fn llms_txt(state: web::Data<AppState>) -> HttpResponse {
    let text = llms::generate(&state.llms, &state.registry, &state.stats, &state.docs).await;
    HttpResponse::Ok().content_type(ContentType::plaintext()).body(text)
}

/// GET /health
pub async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({ "status": "ok" }))
}

fn find_json_module<'a>(state: &'a AppState, file: &str) -> Result<&'a ModuleDescriptor, ApiError> {
    file.strip_suffix(".json")
        .and_then(|slug| state.registry.find(slug))
        .ok_or_else(|| ApiError::NotFound(format!("Unknown module '{file}'")))
}

/// Register every endpoint on `cfg`.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let _ = cfg
        .route("/health", web::get().to(health))
        .route("/llms.txt", web::get().to(llms_txt))
        .service(
            web::scope("/api")
                .route("/stats.json", web::get().to(stats))
                .route("/menu.json", web::get().to(top_menu))
                .route("/modules/{file}", web::get().to(module))
                .route("/navigation/{file}", web::get().to(navigation)),
        )
        .route("/docs/{slug}/{tail:.*}", web::get().to(markdown));
}
