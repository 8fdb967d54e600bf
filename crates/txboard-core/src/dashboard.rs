//! Dashboard controller - pagination, search and fetch orchestration
//!
//! The controller owns the view state of one transactions list:
//! - which page is shown and how many pages exist
//! - the settled search query
//! - whether a fetch is in flight, and the last error
//!
//! Fetches are tagged with a sequence number. Only the response to the most
//! recently issued request is applied; anything older is dropped.

use async_trait::async_trait;
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard};
use std::time::Duration;
use tokio::task::JoinHandle;
use txboard_config::Config;

use crate::classify::{classify, FlowTotals};
use crate::debounce::Debouncer;
use crate::error::{CoreResult, DefaultErrorLogger, ErrorContext, ErrorLogger};
use crate::models::{PaginatedResponse, Transaction};
use crate::navigation::NavigationContext;
use crate::pagination::{page_window, parse_page_param, PaginationState, MAX_VISIBLE_PAGES, PAGE_PARAM};
use crate::search::{SearchQuery, DEBOUNCE_DELAY, QUERY_PARAM};
use crate::types::Direction;

/// Remote source of transaction pages
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Fetch one page of all transactions
    async fn list(&self, page: u32, limit: u32) -> CoreResult<PaginatedResponse>;
    /// Fetch one page of transactions matching `query`
    async fn search(&self, query: &SearchQuery, page: u32, limit: u32) -> CoreResult<PaginatedResponse>;
}

/// Source reference type
pub type SourceRef = Arc<dyn TransactionSource>;

/// Tunables for one dashboard
#[derive(Debug, Clone)]
pub struct DashboardSettings {
    /// Records per page
    pub limit: u32,
    /// Page links shown in the pagination bar
    pub max_visible_pages: u32,
    /// Account id used for incoming/outgoing classification
    pub current_user: String,
    /// Search debounce delay
    pub debounce: Duration,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            limit: 10,
            max_visible_pages: MAX_VISIBLE_PAGES,
            current_user: String::new(),
            debounce: DEBOUNCE_DELAY,
        }
    }
}

impl DashboardSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            limit: config.pagination.records_per_page,
            max_visible_pages: config.pagination.max_visible_pages,
            current_user: config.api.current_user.clone(),
            debounce: Duration::from_millis(config.search.debounce_ms),
        }
    }
}

/// Outcome of a page-change request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageChange {
    /// State updated and a fetch issued
    Accepted,
    /// Target outside `[1, total_pages]`; nothing changed
    OutOfRange,
    /// A fetch is already running; nothing changed
    InFlight,
}

/// One table row: the transaction plus its direction for the current user
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub direction: Direction,
}

/// Read-only snapshot of the dashboard for rendering
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub transactions: Vec<TransactionRow>,
    pub pagination: PaginationState,
    /// Page the URL should point at; survives a failed fetch
    pub requested_page: u32,
    pub visible_pages: Vec<u32>,
    pub query: SearchQuery,
    pub loading: bool,
    pub error: Option<String>,
    pub totals: FlowTotals,
}

#[derive(Debug)]
struct ViewState {
    transactions: Vec<Transaction>,
    pagination: PaginationState,
    query: SearchQuery,
    loading: bool,
    error: Option<String>,
    totals: FlowTotals,
    /// Page of the latest issued fetch, kept when pagination is reset
    requested_page: u32,
    /// Sequence number of the latest issued fetch
    issued: u64,
}

impl ViewState {
    fn new(limit: u32) -> Self {
        Self {
            transactions: Vec::new(),
            pagination: PaginationState::empty(limit),
            query: SearchQuery::empty(),
            loading: false,
            error: None,
            totals: FlowTotals::default(),
            requested_page: 1,
            issued: 0,
        }
    }

    /// Mark a fetch of `page` as started and return its sequence number
    fn begin_fetch(&mut self, page: u32) -> u64 {
        self.pagination.page = page;
        self.requested_page = page;
        self.issued += 1;
        self.loading = true;
        self.error = None;
        self.issued
    }
}

/// Pagination and search controller for one transactions view
pub struct Dashboard<N: NavigationContext> {
    source: SourceRef,
    navigation: N,
    settings: DashboardSettings,
    state: Mutex<ViewState>,
    logger: Box<dyn ErrorLogger>,
}

impl<N: NavigationContext> Dashboard<N> {
    pub fn new(source: SourceRef, navigation: N, settings: DashboardSettings) -> Self {
        let state = ViewState::new(settings.limit);
        Self {
            source,
            navigation,
            settings,
            state: Mutex::new(state),
            logger: Box::new(DefaultErrorLogger),
        }
    }

    /// Replace the logger used for fetch failures
    pub fn with_logger(mut self, logger: Box<dyn ErrorLogger>) -> Self {
        self.logger = logger;
        self
    }

    pub fn navigation(&self) -> &N {
        &self.navigation
    }

    pub fn settings(&self) -> &DashboardSettings {
        &self.settings
    }

    fn lock_state(&self) -> MutexGuard<'_, ViewState> {
        match self.state.lock() {
            Ok(state) => state,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Load the page and query recorded in the navigation context.
    ///
    /// A missing or malformed page parameter means page 1. If the recorded
    /// page is past the end of the result set, the last page is loaded instead.
    pub async fn restore(&self) {
        let page = parse_page_param(self.navigation.query_param(PAGE_PARAM).as_deref());
        let query = SearchQuery::new(&self.navigation.query_param(QUERY_PARAM).unwrap_or_default());

        let seq = {
            let mut state = self.lock_state();
            state.query = query.clone();
            state.begin_fetch(page)
        };
        self.fetch(seq, page, query).await;

        let last_page = self.lock_state().pagination.total_pages;
        if last_page > 0 && page > last_page {
            log::debug!(target: "txboard::fetch", "page {} past the end, moving to {}", page, last_page);
            self.go_to_page(last_page).await;
        }
    }

    /// Request a page change.
    ///
    /// Rejected without side effects when the target is out of range or a
    /// fetch is in flight. Otherwise the page is written to the navigation
    /// context and fetched with the current query.
    pub async fn go_to_page(&self, page: u32) -> PageChange {
        let (seq, query) = {
            let mut state = self.lock_state();
            if state.loading {
                return PageChange::InFlight;
            }
            if !state.pagination.contains_page(page) {
                return PageChange::OutOfRange;
            }
            (state.begin_fetch(page), state.query.clone())
        };

        self.navigation.set_query_param(PAGE_PARAM, &page.to_string());
        self.fetch(seq, page, query).await;
        PageChange::Accepted
    }

    pub async fn next_page(&self) -> PageChange {
        let target = self.lock_state().pagination.page.saturating_add(1);
        self.go_to_page(target).await
    }

    pub async fn previous_page(&self) -> PageChange {
        let target = self.lock_state().pagination.page.saturating_sub(1);
        self.go_to_page(target).await
    }

    /// Apply a settled search query: back to page 1, then fetch
    pub async fn submit_search(&self, raw: &str) {
        let query = SearchQuery::new(raw);
        let seq = {
            let mut state = self.lock_state();
            state.query = query.clone();
            state.begin_fetch(1)
        };

        self.navigation.set_query_param(PAGE_PARAM, "1");
        self.navigation.set_query_param(QUERY_PARAM, query.as_str());
        self.fetch(seq, 1, query).await;
    }

    /// Re-issue the last request with the same page and query
    pub async fn retry(&self) -> PageChange {
        let (seq, page, query) = {
            let mut state = self.lock_state();
            if state.loading {
                return PageChange::InFlight;
            }
            let page = state.requested_page;
            let query = state.query.clone();
            (state.begin_fetch(page), page, query)
        };

        self.fetch(seq, page, query).await;
        PageChange::Accepted
    }

    async fn fetch(&self, seq: u64, page: u32, query: SearchQuery) {
        let limit = self.settings.limit;
        log::debug!(
            target: "txboard::fetch",
            "request #{}: page={} limit={} query={:?}",
            seq, page, limit, query.as_str()
        );

        let result = if query.is_empty() {
            self.source.list(page, limit).await
        } else {
            self.source.search(&query, page, limit).await
        };

        let mut state = self.lock_state();
        if seq != state.issued {
            self.logger.log_debug(
                "discarding superseded response",
                &ErrorContext::new("fetch".to_string()).with_request_id(seq.to_string()),
            );
            return;
        }
        state.loading = false;

        match result {
            Ok(response) => {
                state.totals = FlowTotals::from_response(&response, &self.settings.current_user);
                state.pagination = response.pagination.normalized();
                state.requested_page = state.pagination.page;
                state.transactions = response.data;
                state.error = None;
            }
            Err(error) => {
                let context = ErrorContext::new("fetch".to_string())
                    .with_request_id(seq.to_string())
                    .with_data("page", serde_json::json!(page))
                    .with_data("query", serde_json::json!(query.as_str()));
                self.logger.log_error(&error, &context);

                state.transactions.clear();
                state.pagination = PaginationState::empty(limit);
                state.totals = FlowTotals::default();
                state.error = Some(error.user_message().to_string());
            }
        }
    }

    pub fn is_loading(&self) -> bool {
        self.lock_state().loading
    }

    /// The settled query currently applied
    pub fn current_query(&self) -> SearchQuery {
        self.lock_state().query.clone()
    }

    /// The last fetch failed and nothing has replaced its error yet
    pub fn has_error(&self) -> bool {
        self.lock_state().error.is_some()
    }

    /// Page links around the current page
    pub fn visible_pages(&self) -> Vec<u32> {
        let state = self.lock_state();
        page_window(state.pagination.page, state.pagination.total_pages, self.settings.max_visible_pages)
    }

    /// Snapshot for rendering
    pub fn snapshot(&self) -> DashboardView {
        let state = self.lock_state();
        let user = &self.settings.current_user;
        DashboardView {
            transactions: state
                .transactions
                .iter()
                .map(|tx| TransactionRow {
                    direction: classify(tx, user),
                    transaction: tx.clone(),
                })
                .collect(),
            pagination: state.pagination,
            requested_page: state.requested_page,
            visible_pages: page_window(
                state.pagination.page,
                state.pagination.total_pages,
                self.settings.max_visible_pages,
            ),
            query: state.query.clone(),
            loading: state.loading,
            error: state.error.clone(),
            totals: state.totals,
        }
    }
}

/// Feeds typed text through a debouncer into [`Dashboard::submit_search`].
///
/// This is the API for embedding a long-lived dashboard (a TUI, a desktop
/// shell). The HTTP server does not use it: browsers debounce the search
/// box themselves with the `hx-trigger` delay.
///
/// A settled query equal to the one already applied is skipped, unless the
/// last fetch failed.
pub struct LiveSearch {
    debouncer: Debouncer<String>,
    listener: JoinHandle<()>,
}

impl LiveSearch {
    /// Start listening for settled queries on behalf of `dashboard`
    pub fn attach<N>(dashboard: Arc<Dashboard<N>>) -> Self
    where
        N: NavigationContext + 'static,
    {
        let (debouncer, mut settled) = Debouncer::<String>::new(dashboard.settings().debounce);
        let listener = tokio::spawn(async move {
            while let Some(raw) = settled.recv().await {
                let query = SearchQuery::new(&raw);
                if query == dashboard.current_query() && !dashboard.has_error() {
                    continue;
                }
                dashboard.submit_search(query.as_str()).await;
            }
        });

        Self { debouncer, listener }
    }

    /// Record a keystroke's worth of input
    pub fn input(&mut self, raw: &str) {
        self.debouncer.push(raw.to_string());
    }
}

impl Drop for LiveSearch {
    fn drop(&mut self) {
        self.debouncer.cancel();
        self.listener.abort();
    }
}

// ==================== Tests ====================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CoreError;
    use crate::navigation::MemoryNavigation;
    use rust_decimal::Decimal;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tokio::sync::Notify;

    #[derive(Debug, Clone, PartialEq)]
    enum Call {
        List(u32),
        Search(String, u32),
    }

    struct FakeSource {
        total: u64,
        fail: AtomicBool,
        calls: Mutex<Vec<Call>>,
        gate: Mutex<Option<Arc<Notify>>>,
    }

    impl FakeSource {
        fn new(total: u64) -> Arc<Self> {
            Arc::new(Self {
                total,
                fail: AtomicBool::new(false),
                calls: Mutex::new(Vec::new()),
                gate: Mutex::new(None),
            })
        }

        fn calls(&self) -> Vec<Call> {
            self.calls.lock().unwrap().clone()
        }

        /// Make the next call wait until the returned handle is notified
        fn hold_next(&self) -> Arc<Notify> {
            let notify = Arc::new(Notify::new());
            *self.gate.lock().unwrap() = Some(notify.clone());
            notify
        }

        async fn respond(&self, call: Call, tag: &str, page: u32, limit: u32) -> CoreResult<PaginatedResponse> {
            self.calls.lock().unwrap().push(call);
            let gate = self.gate.lock().unwrap().take();
            if let Some(gate) = gate {
                gate.notified().await;
            }
            if self.fail.load(Ordering::SeqCst) {
                return Err(CoreError::FetchFailed { message: "503 Service Unavailable".to_string() });
            }

            let pagination = PaginationState::new(page, limit, self.total);
            let data = (0..limit)
                .map(|i| Transaction {
                    id: format!("{}-{}-{}", tag, page, i),
                    amount: Decimal::from(10),
                    currency: Some("EUR".to_string()),
                    description: String::new(),
                    sender: if i % 2 == 0 { "me".to_string() } else { "shop".to_string() },
                    recipient: if i % 2 == 0 { "shop".to_string() } else { "me".to_string() },
                    created_at: "2024-05-01".to_string(),
                    status: None,
                })
                .take(self.total.saturating_sub(u64::from((page - 1) * limit)) as usize)
                .collect();

            Ok(PaginatedResponse { data, pagination, incoming_sum: None, outgoing_sum: None })
        }
    }

    #[async_trait]
    impl TransactionSource for FakeSource {
        async fn list(&self, page: u32, limit: u32) -> CoreResult<PaginatedResponse> {
            self.respond(Call::List(page), "all", page, limit).await
        }

        async fn search(&self, query: &SearchQuery, page: u32, limit: u32) -> CoreResult<PaginatedResponse> {
            self.respond(Call::Search(query.to_string(), page), query.as_str(), page, limit).await
        }
    }

    fn dashboard(source: &Arc<FakeSource>, nav: MemoryNavigation) -> Dashboard<MemoryNavigation> {
        let settings = DashboardSettings {
            current_user: "me".to_string(),
            ..DashboardSettings::default()
        };
        Dashboard::new(source.clone(), nav, settings)
    }

    #[tokio::test]
    async fn test_restore_reads_page_from_url() {
        let source = FakeSource::new(120);
        let board = dashboard(&source, MemoryNavigation::from_pairs([("p", "3")]));

        board.restore().await;

        assert_eq!(source.calls(), vec![Call::List(3)]);
        let view = board.snapshot();
        assert_eq!(view.pagination.page, 3);
        assert_eq!(view.pagination.total_pages, 12);
        assert_eq!(view.transactions.len(), 10);
        assert_eq!(view.visible_pages, vec![1, 2, 3, 4, 5]);
        assert!(!view.loading);
        assert_eq!(board.navigation().write_count(), 0);
    }

    #[tokio::test]
    async fn test_restore_malformed_page_defaults_to_first() {
        let source = FakeSource::new(120);
        let board = dashboard(&source, MemoryNavigation::from_pairs([("p", "two")]));

        board.restore().await;

        assert_eq!(source.calls(), vec![Call::List(1)]);
    }

    #[tokio::test]
    async fn test_restore_past_last_page_moves_to_last() {
        let source = FakeSource::new(25);
        let board = dashboard(&source, MemoryNavigation::from_pairs([("p", "99")]));

        board.restore().await;

        assert_eq!(source.calls(), vec![Call::List(99), Call::List(3)]);
        assert_eq!(board.navigation().query_param("p"), Some("3".to_string()));
        assert_eq!(board.snapshot().transactions.len(), 5);
    }

    #[tokio::test]
    async fn test_restore_with_query_searches() {
        let source = FakeSource::new(30);
        let board = dashboard(&source, MemoryNavigation::from_pairs([("p", "2"), ("q", " rent ")]));

        board.restore().await;

        assert_eq!(source.calls(), vec![Call::Search("rent".to_string(), 2)]);
        assert_eq!(board.current_query().as_str(), "rent");
    }

    #[tokio::test]
    async fn test_page_change_updates_url_and_fetches() {
        let source = FakeSource::new(120);
        let board = dashboard(&source, MemoryNavigation::new());
        board.restore().await;

        assert_eq!(board.go_to_page(7).await, PageChange::Accepted);

        assert_eq!(source.calls(), vec![Call::List(1), Call::List(7)]);
        assert_eq!(board.navigation().query_param("p"), Some("7".to_string()));
        assert_eq!(board.visible_pages(), vec![5, 6, 7, 8, 9]);

        board.go_to_page(10).await;
        assert_eq!(board.visible_pages(), vec![8, 9, 10, 11, 12]);
    }

    #[tokio::test]
    async fn test_out_of_range_page_change_is_noop() {
        let source = FakeSource::new(120);
        let board = dashboard(&source, MemoryNavigation::new());
        board.restore().await;
        let before = board.snapshot();

        assert_eq!(board.go_to_page(0).await, PageChange::OutOfRange);
        assert_eq!(board.go_to_page(13).await, PageChange::OutOfRange);
        assert_eq!(board.previous_page().await, PageChange::OutOfRange);

        assert_eq!(board.snapshot(), before);
        assert_eq!(source.calls(), vec![Call::List(1)]);
        assert_eq!(board.navigation().write_count(), 0);
    }

    #[tokio::test]
    async fn test_page_change_rejected_while_loading() {
        let source = FakeSource::new(120);
        let board = Arc::new(dashboard(&source, MemoryNavigation::new()));
        board.restore().await;

        let gate = source.hold_next();
        let pending = tokio::spawn({
            let board = board.clone();
            async move { board.go_to_page(2).await }
        });
        while source.calls().len() < 2 {
            tokio::task::yield_now().await;
        }

        assert!(board.is_loading());
        assert_eq!(board.go_to_page(3).await, PageChange::InFlight);
        assert_eq!(board.retry().await, PageChange::InFlight);

        gate.notify_one();
        assert_eq!(pending.await.unwrap(), PageChange::Accepted);
        assert_eq!(board.snapshot().pagination.page, 2);
        assert_eq!(source.calls(), vec![Call::List(1), Call::List(2)]);
    }

    #[tokio::test]
    async fn test_next_and_previous() {
        let source = FakeSource::new(30);
        let board = dashboard(&source, MemoryNavigation::new());
        board.restore().await;

        assert_eq!(board.next_page().await, PageChange::Accepted);
        assert_eq!(board.next_page().await, PageChange::Accepted);
        assert_eq!(board.next_page().await, PageChange::OutOfRange);
        assert_eq!(board.previous_page().await, PageChange::Accepted);
        assert_eq!(board.snapshot().pagination.page, 2);
    }

    #[tokio::test]
    async fn test_search_resets_to_first_page() {
        let source = FakeSource::new(120);
        let board = dashboard(&source, MemoryNavigation::from_pairs([("p", "5")]));
        board.restore().await;

        board.submit_search("  coffee ").await;

        assert_eq!(source.calls(), vec![Call::List(5), Call::Search("coffee".to_string(), 1)]);
        assert_eq!(board.navigation().query_param("p"), Some("1".to_string()));
        assert_eq!(board.navigation().query_param("q"), Some("coffee".to_string()));
        assert_eq!(board.snapshot().pagination.page, 1);

        board.submit_search("   ").await;
        assert_eq!(source.calls().last(), Some(&Call::List(1)));
        assert_eq!(board.navigation().query_param("q"), None);
    }

    #[tokio::test]
    async fn test_fetch_failure_resets_view() {
        let source = FakeSource::new(120);
        let board = dashboard(&source, MemoryNavigation::new());
        board.restore().await;
        assert_eq!(board.snapshot().transactions.len(), 10);

        source.fail.store(true, Ordering::SeqCst);
        board.go_to_page(2).await;

        let view = board.snapshot();
        assert!(view.transactions.is_empty());
        assert_eq!(view.pagination.total, 0);
        assert_eq!(view.pagination.total_pages, 0);
        assert!(view.visible_pages.is_empty());
        assert!(!view.error.clone().unwrap_or_default().is_empty());
        assert!(!view.loading);

        assert_eq!(view.requested_page, 2);

        source.fail.store(false, Ordering::SeqCst);
        assert_eq!(board.retry().await, PageChange::Accepted);
        assert_eq!(source.calls().last(), Some(&Call::List(2)));
        let view = board.snapshot();
        assert!(view.error.is_none());
        assert_eq!(view.pagination.total, 120);
        assert_eq!(view.pagination.page, 2);
    }

    #[tokio::test]
    async fn test_retry_refetches_the_failed_page_and_query() {
        let source = FakeSource::new(120);
        let board = dashboard(&source, MemoryNavigation::from_pairs([("q", "rent")]));
        board.restore().await;

        source.fail.store(true, Ordering::SeqCst);
        assert_eq!(board.go_to_page(7).await, PageChange::Accepted);
        assert_eq!(board.snapshot().pagination.page, 1);
        assert_eq!(board.navigation().query_param("p"), Some("7".to_string()));

        source.fail.store(false, Ordering::SeqCst);
        board.retry().await;

        assert_eq!(source.calls().last(), Some(&Call::Search("rent".to_string(), 7)));
        let view = board.snapshot();
        assert_eq!(view.pagination.page, 7);
        assert_eq!(view.requested_page, 7);
        assert_eq!(view.query.as_str(), "rent");
    }

    #[derive(Default)]
    struct RecordingLogger {
        errors: Arc<Mutex<Vec<String>>>,
    }

    impl ErrorLogger for RecordingLogger {
        fn log_error(&self, error: &CoreError, context: &ErrorContext) {
            self.errors
                .lock()
                .unwrap()
                .push(format!("{} {}", context.operation, error.code()));
        }

        fn log_debug(&self, _message: &str, _context: &ErrorContext) {}
    }

    #[tokio::test]
    async fn test_fetch_failure_is_logged() {
        let source = FakeSource::new(10);
        source.fail.store(true, Ordering::SeqCst);
        let logger = RecordingLogger::default();
        let errors = logger.errors.clone();
        let board = dashboard(&source, MemoryNavigation::new()).with_logger(Box::new(logger));

        board.restore().await;

        assert_eq!(*errors.lock().unwrap(), vec!["fetch FETCH_FAILED".to_string()]);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let source = FakeSource::new(50);
        let board = Arc::new(dashboard(&source, MemoryNavigation::new()));

        let gate = source.hold_next();
        let slow = tokio::spawn({
            let board = board.clone();
            async move { board.submit_search("slow").await }
        });
        while source.calls().is_empty() {
            tokio::task::yield_now().await;
        }

        board.submit_search("fast").await;
        gate.notify_one();
        slow.await.unwrap();

        let view = board.snapshot();
        assert_eq!(view.query.as_str(), "fast");
        assert!(view.transactions.iter().all(|row| row.transaction.id.starts_with("fast-")));
        assert!(!view.loading);
    }

    #[tokio::test]
    async fn test_rows_are_classified() {
        let source = FakeSource::new(4);
        let board = dashboard(&source, MemoryNavigation::new());
        board.restore().await;

        let view = board.snapshot();
        assert_eq!(view.transactions[0].direction, Direction::Outgoing);
        assert_eq!(view.transactions[1].direction, Direction::Incoming);
        assert_eq!(view.totals.incoming, Decimal::from(20));
        assert_eq!(view.totals.outgoing, Decimal::from(20));
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_search_debounces_typing() {
        let source = FakeSource::new(40);
        let board = Arc::new(dashboard(&source, MemoryNavigation::new()));
        let mut search = LiveSearch::attach(board.clone());

        search.input("a");
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.input("ab");
        tokio::time::sleep(Duration::from_millis(100)).await;
        search.input("abc");
        tokio::time::sleep(Duration::from_millis(299)).await;
        assert!(source.calls().is_empty());

        tokio::time::sleep(Duration::from_millis(100)).await;
        assert_eq!(source.calls(), vec![Call::Search("abc".to_string(), 1)]);
        assert_eq!(board.current_query().as_str(), "abc");
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_search_skips_unchanged_query() {
        let source = FakeSource::new(40);
        let board = Arc::new(dashboard(&source, MemoryNavigation::new()));
        let mut search = LiveSearch::attach(board.clone());

        search.input("x");
        search.input("  ");
        tokio::time::sleep(Duration::from_millis(500)).await;

        assert!(source.calls().is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_search_resubmits_same_query_after_failure() {
        let source = FakeSource::new(40);
        let board = Arc::new(dashboard(&source, MemoryNavigation::new()));
        let mut search = LiveSearch::attach(board.clone());

        source.fail.store(true, Ordering::SeqCst);
        search.input("rent");
        tokio::time::sleep(Duration::from_millis(400)).await;
        assert!(board.has_error());

        source.fail.store(false, Ordering::SeqCst);
        search.input("rent");
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(
            source.calls(),
            vec![Call::Search("rent".to_string(), 1), Call::Search("rent".to_string(), 1)]
        );
        assert!(!board.has_error());
    }

    #[tokio::test(start_paused = true)]
    async fn test_live_search_follows_query_changed_elsewhere() {
        let source = FakeSource::new(40);
        let board = Arc::new(dashboard(&source, MemoryNavigation::new()));
        let mut search = LiveSearch::attach(board.clone());

        board.submit_search("rent").await;
        search.input("");
        tokio::time::sleep(Duration::from_millis(400)).await;

        assert_eq!(
            source.calls(),
            vec![Call::Search("rent".to_string(), 1), Call::List(1)]
        );
        assert!(board.current_query().is_empty());
    }
}
