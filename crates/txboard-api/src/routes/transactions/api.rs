//! Transactions API endpoints - JSON API and HTMX partial responses
//!
//! Endpoints:
//! - api_view: Dashboard snapshot for a page/query (JSON)
//! - htmx_transactions_list: Transaction list for a page (HTML fragment)
//! - htmx_transactions_search: Apply a settled query, back to page 1 (HTML fragment)

use crate::{AppState, ApiError};
use axum::extract::{Form, Query, State};
use axum::http::HeaderValue;
use axum::response::{Html, IntoResponse};
use axum::Json;
use std::collections::HashMap;
use txboard_core::{
    Dashboard, DashboardSettings, DashboardView, MemoryNavigation, NavigationContext, PAGE_PARAM,
    QUERY_PARAM,
};

/// Response header telling HTMX which URL to push into the address bar
pub const HX_PUSH_URL: &str = "HX-Push-Url";

/// Build a controller for one request, seeded with the request's `p`/`q`
fn dashboard_for(state: &AppState, params: &HashMap<String, String>) -> Dashboard<MemoryNavigation> {
    let navigation = MemoryNavigation::from_pairs(
        [PAGE_PARAM, QUERY_PARAM]
            .into_iter()
            .filter_map(|key| params.get(key).map(|value| (key, value.clone()))),
    );
    Dashboard::new(
        state.source.clone(),
        navigation,
        DashboardSettings::from_config(&state.config),
    )
}

/// Write the requested page back into the navigation context.
/// After a failed fetch this is still the page the user asked for.
fn sync_location(dashboard: &Dashboard<MemoryNavigation>, view: &DashboardView) -> String {
    let navigation = dashboard.navigation();
    navigation.set_query_param(PAGE_PARAM, &view.requested_page.to_string());
    navigation.set_query_param(QUERY_PARAM, view.query.as_str());
    let query = navigation.query_string();
    if query.is_empty() {
        "/transactions".to_string()
    } else {
        format!("/transactions?{}", query)
    }
}

fn fragment_response(
    dashboard: &Dashboard<MemoryNavigation>,
    state: &AppState,
) -> Result<impl IntoResponse, ApiError> {
    let view = dashboard.snapshot();
    let location = sync_location(dashboard, &view);
    let push_url = HeaderValue::from_str(&location).map_err(|e| ApiError::InternalError {
        message: format!("bad push url '{}': {}", location, e),
    })?;

    let html = super::page::render_transactions_fragment(&view, &state.config);
    Ok(([(HX_PUSH_URL, push_url)], Html(html)))
}

/// Get the dashboard snapshot for `?p=&q=` (JSON API)
pub async fn api_view(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Json<DashboardView> {
    let dashboard = dashboard_for(&state, &params);
    dashboard.restore().await;
    Json(dashboard.snapshot())
}

/// HTMX: Transactions list - Partial page update for one page
pub async fn htmx_transactions_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let dashboard = dashboard_for(&state, &params);
    dashboard.restore().await;
    fragment_response(&dashboard, &state)
}

/// HTMX: Search - the input's trigger delay already debounced the query
pub async fn htmx_transactions_search(
    State(state): State<AppState>,
    Form(form): Form<HashMap<String, String>>,
) -> Result<impl IntoResponse, ApiError> {
    let raw = form.get(QUERY_PARAM).ok_or_else(|| ApiError::BadRequest {
        message: format!("missing form field '{}'", QUERY_PARAM),
    })?;
    let dashboard = dashboard_for(&state, &HashMap::new());
    dashboard.submit_search(raw).await;
    fragment_response(&dashboard, &state)
}
