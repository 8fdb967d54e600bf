//! Transactions dashboard core: pagination, debounced search and view state
//!
//! - `pagination`: page-number window and pagination metadata
//! - `search` / `debounce`: settled search queries
//! - `dashboard`: controller tying navigation, search and fetching together
//! - `classify`: incoming/outgoing classification for the current user

pub mod classify;
pub mod dashboard;
pub mod debounce;
pub mod error;
pub mod models;
pub mod navigation;
pub mod pagination;
pub mod search;
pub mod types;

pub use classify::{classify, FlowTotals};
pub use dashboard::{
    Dashboard, DashboardSettings, DashboardView, LiveSearch, PageChange, SourceRef,
    TransactionRow, TransactionSource,
};
pub use debounce::Debouncer;
pub use error::{CoreError, CoreResult, ErrorSeverity, FETCH_ERROR_MESSAGE};
pub use models::{PaginatedResponse, Transaction};
pub use navigation::{MemoryNavigation, NavigationContext};
pub use pagination::{page_window, parse_page_param, PaginationState, MAX_VISIBLE_PAGES, PAGE_PARAM};
pub use search::{SearchQuery, DEBOUNCE_DELAY, QUERY_PARAM};
pub use types::Direction;
