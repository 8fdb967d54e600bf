//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::transactions: Transaction list, search, pagination

pub mod error;
pub mod routes;

use axum::{
    routing::{get, post},
    Router,
};
use tokio::net::TcpListener;
use txboard_config::Config;
use txboard_core::SourceRef;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub source: SourceRef,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::transactions::{api_view, htmx_transactions_list, htmx_transactions_search, page_transactions};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/view", get(api_view))
        // HTMX page routes
        .route("/", get(page_transactions))
        .route("/transactions", get(page_transactions))
        // HTMX partial routes
        .route("/transactions/list", get(htmx_transactions_list))
        .route("/transactions/search", post(htmx_transactions_search))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - txboard</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, content
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &axum::http::HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &axum::http::HeaderMap, title: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!("<main class='max-w-5xl mx-auto p-4 md:p-6'>{}</main>", inner_content)
    } else {
        base_html(
            title,
            &format!(
                r#"<header class='bg-white border-b'><div class='max-w-5xl mx-auto px-4 py-3'><h1 class='text-xl font-bold text-indigo-600'>txboard</h1></div></header>
<main class='max-w-5xl mx-auto p-4 md:p-6'>{}</main>"#,
                inner_content
            ),
        )
    }
}

/// Start the HTTP server
///
/// Creates the router, binds to the configured address, and serves until
/// the process receives Ctrl-C.
pub async fn start_server(config: Config, source: SourceRef) -> std::io::Result<()> {
    let addr = config.listen_addr();
    let state = AppState { source, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!(target: "txboard::server", "Starting txboard on http://{}", addr);
    log::info!(target: "txboard::server", "  - /transactions (Transaction list)");
    log::info!(target: "txboard::server", "  - /api/view (JSON view)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    log::info!(target: "txboard::server", "Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!(target: "txboard::server", "Failed to listen for shutdown signal: {}", e);
    }
}

// ==================== Tests ====================
