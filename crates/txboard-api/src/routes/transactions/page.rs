//! Transactions page rendering - Full page and list fragment
//!
//! Endpoints:
//! - page_transactions: Main transactions page with the search box
//!
//! Helper functions:
//! - render_transactions_fragment: Totals, table/cards and pagination bar
//! - list_url: Link to the list fragment for a page and query

use crate::AppState;
use axum::extract::{Query, State};
use std::collections::HashMap;
use txboard_config::Config;
use txboard_core::{parse_page_param, DashboardView, Direction, SearchQuery, TransactionRow, PAGE_PARAM, QUERY_PARAM};
use txboard_utils::{escape_html, format_amount};

const TARGET: &str = "#transactions-content";

/// Link to the list fragment for `page` and `query`
pub fn list_url(page: u32, query: &SearchQuery) -> String {
    if query.is_empty() {
        format!("/transactions/list?p={}", page)
    } else {
        format!("/transactions/list?p={}&q={}", page, urlencoding::encode(query.as_str()))
    }
}

/// Transactions page - Main page with search and the list container
pub async fn page_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
    headers: axum::http::HeaderMap,
) -> axum::response::Html<String> {
    let page = parse_page_param(params.get(PAGE_PARAM).map(String::as_str));
    let query = SearchQuery::new(params.get(QUERY_PARAM).map(String::as_str).unwrap_or_default());
    let debounce_ms = state.config.search.debounce_ms;

    let inner_content = format!(
        r#"<div class='flex items-center justify-between flex-wrap gap-4 mb-4'>
            <h2 class='text-2xl font-bold'>Transactions</h2>
            <input type='search' name='q' value='{}' placeholder='Search transactions...' autocomplete='off'
                hx-post='/transactions/search' hx-target='{}' hx-swap='innerHTML'
                hx-trigger='input changed delay:{}ms, search' hx-sync='{}:replace'
                hx-indicator='#list-indicator'
                class='px-4 py-2 border rounded-lg w-full md:w-72'>
        </div>
        <div id='list-indicator' class='htmx-indicator text-sm text-gray-500 mb-2'>Loading...</div>
        <div id='transactions-content' hx-get='{}' hx-trigger='load' class='bg-white rounded-xl shadow-sm p-4 md:p-6'>
            <p class='text-gray-500 text-center'>Loading...</p>
        </div>"#,
        escape_html(query.as_str()),
        TARGET,
        debounce_ms,
        TARGET,
        escape_html(&list_url(page, &query)),
    );

    axum::response::Html(crate::page_response(&headers, "Transactions", &inner_content))
}

/// Render the list fragment: error banner or totals, rows, pagination
pub fn render_transactions_fragment(view: &DashboardView, config: &Config) -> String {
    let mut html = String::new();

    if let Some(ref error) = view.error {
        html.push_str(&format!(
            r#"<div role='alert' class='flex items-center justify-between gap-4 p-4 rounded-lg bg-red-50 border border-red-200 text-red-700'>
                <span>{}</span>
                <button hx-get='{}' hx-target='{}' hx-swap='innerHTML' class='px-3 py-1 border border-red-300 rounded hover:bg-red-100'>Retry</button>
            </div>"#,
            escape_html(error),
            escape_html(&list_url(view.requested_page, &view.query)),
            TARGET,
        ));
        return html;
    }

    html.push_str(&render_totals(view, config));

    if view.transactions.is_empty() {
        let message = if view.query.is_empty() {
            "No transactions yet".to_string()
        } else {
            format!("No transactions match \"{}\"", escape_html(view.query.as_str()))
        };
        html.push_str(&format!(
            "<div class='text-center py-12 text-gray-500'><p>{}</p></div>",
            message
        ));
        return html;
    }

    html.push_str(&render_table(&view.transactions));
    html.push_str(&render_cards(&view.transactions));
    html.push_str(&render_pagination(view));
    html
}

fn render_totals(view: &DashboardView, config: &Config) -> String {
    if config.api.current_user.trim().is_empty() {
        return String::new();
    }
    format!(
        r#"<div class='grid grid-cols-2 gap-3 mb-4'>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100'><p class='text-xs text-green-600'>Incoming</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-red-50 p-3 rounded-lg border border-red-100'><p class='text-xs text-red-600'>Outgoing</p><p class='text-xl font-bold'>{}</p></div>
        </div>"#,
        format_amount(view.totals.incoming),
        format_amount(view.totals.outgoing),
    )
}

fn amount_color(direction: Direction) -> &'static str {
    match direction {
        Direction::Incoming => "text-green-600",
        Direction::Outgoing => "text-red-600",
        Direction::Unrelated => "text-gray-700",
    }
}

/// The other party as seen by the current user
fn counterparty(row: &TransactionRow) -> String {
    let tx = &row.transaction;
    match row.direction {
        Direction::Incoming => tx.sender.clone(),
        Direction::Outgoing => tx.recipient.clone(),
        Direction::Unrelated => format!("{} → {}", tx.sender, tx.recipient),
    }
}

fn amount_display(row: &TransactionRow) -> String {
    let tx = &row.transaction;
    let currency = tx
        .currency
        .as_deref()
        .map(|c| format!(" {}", escape_html(c)))
        .unwrap_or_default();
    format!("{}{}{}", row.direction.sign(), format_amount(tx.amount.abs()), currency)
}

fn render_table(rows: &[TransactionRow]) -> String {
    let mut html = String::from(
        r#"<table class='hidden md:table w-full text-sm'>
            <thead><tr class='text-left text-gray-500 border-b'>
                <th class='py-2'>Date</th><th class='py-2'>Description</th><th class='py-2'>Counterparty</th><th class='py-2'>Status</th><th class='py-2 text-right'>Amount</th>
            </tr></thead><tbody>"#,
    );
    for row in rows {
        let tx = &row.transaction;
        html.push_str(&format!(
            r#"<tr class='border-b hover:bg-gray-50' data-direction='{}'>
                <td class='py-2 whitespace-nowrap'>{}</td>
                <td class='py-2'>{}</td>
                <td class='py-2'>{}</td>
                <td class='py-2 text-gray-500'>{}</td>
                <td class='py-2 text-right font-medium {}'>{}</td>
            </tr>"#,
            row.direction,
            escape_html(&tx.display_date()),
            escape_html(&tx.description),
            escape_html(&counterparty(row)),
            escape_html(tx.status.as_deref().unwrap_or("")),
            amount_color(row.direction),
            amount_display(row),
        ));
    }
    html.push_str("</tbody></table>");
    html
}

fn render_cards(rows: &[TransactionRow]) -> String {
    let mut html = String::from("<div class='md:hidden space-y-2'>");
    for row in rows {
        let tx = &row.transaction;
        html.push_str(&format!(
            r#"<div class='border rounded-lg p-3' data-direction='{}'>
                <div class='flex items-center justify-between gap-2'>
                    <div class='min-w-0'>
                        <div class='text-sm text-gray-500'>{}</div>
                        <div class='font-medium truncate'>{}</div>
                        <div class='text-sm text-gray-500 truncate'>{}</div>
                    </div>
                    <span class='font-medium flex-shrink-0 {}'>{}</span>
                </div>
            </div>"#,
            row.direction,
            escape_html(&tx.display_date()),
            escape_html(&tx.description),
            escape_html(&counterparty(row)),
            amount_color(row.direction),
            amount_display(row),
        ));
    }
    html.push_str("</div>");
    html
}

fn page_button(label: &str, page: u32, query: &SearchQuery, enabled: bool, current: bool) -> String {
    let class = if current {
        "px-3 py-1 border rounded bg-indigo-600 text-white"
    } else {
        "px-3 py-1 border rounded hover:bg-gray-100"
    };
    if !enabled || current {
        return format!(
            "<button disabled class='{} disabled:opacity-50' aria-current='{}'>{}</button>",
            class,
            if current { "page" } else { "false" },
            label
        );
    }
    format!(
        "<button hx-get='{}' hx-target='{}' hx-swap='innerHTML' hx-sync='{}:drop' class='{}'>{}</button>",
        escape_html(&list_url(page, query)),
        TARGET,
        TARGET,
        class,
        label
    )
}

fn render_pagination(view: &DashboardView) -> String {
    let pagination = &view.pagination;
    if pagination.total_pages <= 1 {
        return format!(
            "<div class='mt-4 text-sm text-gray-500'>Showing {}-{} of {}</div>",
            pagination.first_item(),
            pagination.last_item(),
            pagination.total
        );
    }

    let mut buttons = String::new();
    buttons.push_str(&page_button(
        "Previous",
        pagination.page.saturating_sub(1),
        &view.query,
        pagination.has_previous(),
        false,
    ));
    for &page in &view.visible_pages {
        buttons.push_str(&page_button(
            &page.to_string(),
            page,
            &view.query,
            true,
            page == pagination.page,
        ));
    }
    buttons.push_str(&page_button(
        "Next",
        pagination.page.saturating_add(1),
        &view.query,
        pagination.has_next(),
        false,
    ));

    format!(
        r#"<div class='mt-6 flex items-center justify-between flex-wrap gap-4'>
            <span class='text-sm text-gray-500'>Showing {}-{} of {}</span>
            <nav class='flex items-center gap-1' aria-label='Pagination'>{}</nav>
        </div>"#,
        pagination.first_item(),
        pagination.last_item(),
        pagination.total,
        buttons
    )
}
