//! HTTP endpoints
//!
//! The actix-web application serving the statistics report, the raw markdown of
//! every documentation page, module views, navigation trees, the top menu and
//! `llms.txt`. Handlers only translate between HTTP and the library modules; all
//! caching happens below them.

mod error;
mod handlers;
mod state;

pub use error::ApiError;
pub use handlers::{MARKDOWN_LOAD_FAILED, STATS_CACHE_CONTROL, configure_routes};
pub use state::AppState;

use crate::Result;
use actix_web::{App, HttpServer, middleware, web};
use ohno::IntoAppError;

const LOG_TARGET: &str = "    server";

/// Run the HTTP server on `bind` until it is shut down.
///
/// # Errors
///
/// Returns an error if the address cannot be bound or the server fails
pub async fn serve(state: AppState, bind: &str) -> Result<()> {
    let data = web::Data::new(state);

    let server = HttpServer::new(move || {
        App::new()
            .app_data(data.clone())
            .wrap(middleware::Logger::default())
            .configure(configure_routes)
    })
    .bind(bind)
    .into_app_err_with(|| format!("binding HTTP server to '{bind}'"))?;

    log::info!(target: LOG_TARGET, "Listening on http://{bind}");

    server.run().await.into_app_err("running HTTP server")
}
