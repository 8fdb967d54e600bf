//! Transaction routes - Transaction list, search, pagination
//!
//! Features:
//! - List transactions page by page, page kept in the `p` query parameter
//! - Debounced search box (HTMX trigger delay)
//! - Table on wide screens, cards on narrow screens
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page and fragment rendering

pub mod api;
pub mod page;

pub use api::{
    api_view,
    htmx_transactions_list,
    htmx_transactions_search,
};

pub use page::page_transactions;
