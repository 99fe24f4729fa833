use std::collections::BTreeSet;

use tracing::{debug, warn};

use crate::domain::{Article, FetchRequest, SourceKind};
use crate::errors::NewsResult;
use crate::services::aggregator::{ArticleProvider, PAGE_SIZE};

/// An issued fetch. Results are only accepted for the most recent ticket.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchTicket {
    pub seq: u64,
    pub request: FetchRequest,
}

/// What the front end should show for the current page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewStatus<'a> {
    Loading,
    Error(&'a str),
    /// Nothing to show on this page; informational, not an error
    Empty,
    Articles(&'a [Article]),
}

/// Feed state: search text, page, source filter and the article cache.
///
/// Every user action is a method that mutates the state synchronously, so the
/// whole feed can be driven without any network or rendering. The cache only
/// grows while the query and source filter stay the same; changing either
/// discards it.
#[derive(Debug, Clone)]
pub struct FeedState {
    query: String,
    page: u32,
    cache: Vec<Article>,
    selected_sources: BTreeSet<SourceKind>,
    page_size: usize,
    loading: bool,
    error: Option<String>,
    seq: u64,
}

impl FeedState {
    pub fn new() -> Self {
        Self::with_page_size(PAGE_SIZE as usize)
    }

    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            query: String::new(),
            page: 1,
            cache: Vec::new(),
            selected_sources: BTreeSet::new(),
            page_size: page_size.max(1),
            loading: false,
            error: None,
            seq: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn cache(&self) -> &[Article] {
        &self.cache
    }

    pub fn selected_sources(&self) -> &BTreeSet<SourceKind> {
        &self.selected_sources
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Submit the search box.
    ///
    /// Any non-blank query starts a new search from page 1, even when it
    /// matches the current one. A blank submission clears an active query.
    /// Returns whether the state was reset.
    pub fn submit_query(&mut self, raw: &str) -> bool {
        let query = raw.trim();
        if query.is_empty() && self.query.is_empty() {
            return false;
        }

        self.query = query.to_string();
        self.reset();
        true
    }

    /// Clear the search box; a no-op when no query is active
    pub fn clear_query(&mut self) -> bool {
        self.submit_query("")
    }

    /// Flip one source in the filter
    pub fn toggle_source(&mut self, kind: SourceKind) {
        if !self.selected_sources.remove(&kind) {
            self.selected_sources.insert(kind);
        }
        self.reset();
    }

    /// Replace the source filter; an empty set means every source
    pub fn set_sources(&mut self, sources: impl IntoIterator<Item = SourceKind>) {
        self.selected_sources = sources.into_iter().collect();
        self.reset();
    }

    /// No upper bound: the upstream APIs are treated as inexhaustible
    pub fn next_page(&mut self) -> bool {
        if self.loading {
            return false;
        }
        self.page = self.page.saturating_add(1);
        true
    }

    pub fn previous_page(&mut self) -> bool {
        if self.loading || self.page <= 1 {
            return false;
        }
        self.page -= 1;
        true
    }

    /// The cache is consulted before the network: a fetch is skipped when
    /// the first article of the current page is already cached.
    pub fn needs_fetch(&self) -> bool {
        let first_index = (self.page as usize - 1) * self.page_size;
        first_index >= self.cache.len()
    }

    /// Issue a fetch for the current page, if one is needed and none is running
    pub fn begin_fetch(&mut self) -> Option<FetchTicket> {
        if self.loading || !self.needs_fetch() {
            return None;
        }

        let request = FetchRequest {
            query: self.query.clone(),
            page: self.page,
            sources: self.selected_sources.clone(),
        };

        self.seq += 1;
        self.loading = true;
        self.error = None;

        debug!(seq = self.seq, query = %request.query, page = request.page, "fetch issued");

        Some(FetchTicket {
            seq: self.seq,
            request,
        })
    }

    /// Apply a finished fetch.
    ///
    /// Results for anything but the latest ticket are discarded without
    /// touching the state. Errors leave the cache as it was. Returns whether
    /// the result was applied.
    pub fn complete_fetch(
        &mut self,
        ticket: &FetchTicket,
        result: NewsResult<Vec<Article>>,
    ) -> bool {
        if ticket.seq != self.seq {
            debug!(seq = ticket.seq, latest = self.seq, "discarding stale fetch result");
            return false;
        }

        self.loading = false;

        match result {
            Ok(articles) => {
                debug!(count = articles.len(), cached = self.cache.len(), "appending to cache");
                self.cache.extend(articles);
            }
            Err(e) => {
                warn!(error = %e, "fetch failed");
                self.error = Some(e.to_string());
            }
        }

        true
    }

    /// Articles of the current page, clamped to what is cached
    pub fn visible_articles(&self) -> &[Article] {
        let start = ((self.page as usize - 1) * self.page_size).min(self.cache.len());
        let end = (start + self.page_size).min(self.cache.len());
        &self.cache[start..end]
    }

    pub fn status(&self) -> ViewStatus<'_> {
        if self.loading {
            return ViewStatus::Loading;
        }
        if let Some(error) = &self.error {
            return ViewStatus::Error(error);
        }

        let visible = self.visible_articles();
        if visible.is_empty() {
            ViewStatus::Empty
        } else {
            ViewStatus::Articles(visible)
        }
    }

    /// Start over on page 1 with an empty cache. Anything in flight becomes stale.
    fn reset(&mut self) {
        self.page = 1;
        self.cache.clear();
        self.loading = false;
        self.error = None;
        self.seq += 1;
    }
}

impl Default for FeedState {
    fn default() -> Self {
        Self::new()
    }
}

/// Drives a [`FeedState`] against an article provider.
pub struct FeedController<P> {
    state: FeedState,
    provider: P,
}

impl<P: ArticleProvider> FeedController<P> {
    pub fn new(provider: P) -> Self {
        Self {
            state: FeedState::new(),
            provider,
        }
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn submit_query(&mut self, raw: &str) -> bool {
        self.state.submit_query(raw)
    }

    pub fn clear_query(&mut self) -> bool {
        self.state.clear_query()
    }

    pub fn toggle_source(&mut self, kind: SourceKind) {
        self.state.toggle_source(kind)
    }

    pub fn set_sources(&mut self, sources: impl IntoIterator<Item = SourceKind>) {
        self.state.set_sources(sources)
    }

    pub fn next_page(&mut self) -> bool {
        self.state.next_page()
    }

    pub fn previous_page(&mut self) -> bool {
        self.state.previous_page()
    }

    /// Fetch the current page if the cache does not cover it yet.
    /// Returns whether a fetch result was applied.
    pub async fn refresh(&mut self) -> bool {
        let Some(ticket) = self.state.begin_fetch() else {
            return false;
        };

        let result = self.provider.fetch_page(&ticket.request).await;
        self.state.complete_fetch(&ticket, result)
    }

    pub fn status(&self) -> ViewStatus<'_> {
        self.state.status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::NewsError;
    use crate::services::aggregator::MockArticleProvider;

    fn articles(n: usize) -> Vec<Article> {
        (0..n)
            .map(|i| Article::new(SourceKind::Guardian, format!("Article {}", i)).unwrap())
            .collect()
    }

    /// Run one fetch to completion with the given articles
    fn fill(state: &mut FeedState, n: usize) {
        let ticket = state.begin_fetch().expect("fetch should be needed");
        assert!(state.complete_fetch(&ticket, Ok(articles(n))));
    }

    #[test]
    fn test_initial_state() {
        let state = FeedState::new();
        assert_eq!(state.query(), "");
        assert_eq!(state.page(), 1);
        assert!(state.cache().is_empty());
        assert!(state.selected_sources().is_empty());
        assert!(state.needs_fetch());
        assert_eq!(state.status(), ViewStatus::Empty);
    }

    #[test]
    fn test_fetch_skip_boundary() {
        let mut state = FeedState::new();
        fill(&mut state, 25);

        state.next_page();
        state.next_page();
        assert_eq!(state.page(), 3);
        // (3 - 1) * 10 = 20 < 25: page 3 starts inside the cache
        assert!(!state.needs_fetch());
        assert!(state.begin_fetch().is_none());
        assert_eq!(state.visible_articles().len(), 5);

        state.next_page();
        // 30 >= 25
        assert!(state.needs_fetch());
    }

    #[test]
    fn test_fetch_needed_when_cache_ends_at_page_start() {
        let mut state = FeedState::new();
        fill(&mut state, 20);

        state.next_page();
        state.next_page();
        // 20 < 20 is false
        assert!(state.needs_fetch());

        let ticket = state.begin_fetch().unwrap();
        assert_eq!(ticket.request.page, 3);
    }

    #[test]
    fn test_page_slice() {
        let mut state = FeedState::new();
        fill(&mut state, 25);

        let titles: Vec<&str> = state.visible_articles().iter().map(|a| a.title()).collect();
        assert_eq!(titles.len(), 10);
        assert_eq!(titles[0], "Article 0");
        assert_eq!(titles[9], "Article 9");

        state.next_page();
        assert_eq!(state.visible_articles()[0].title(), "Article 10");
    }

    #[test]
    fn test_custom_page_size() {
        let mut state = FeedState::with_page_size(3);
        fill(&mut state, 7);

        state.next_page();
        state.next_page();
        assert_eq!(state.visible_articles().len(), 1);
        assert!(!state.needs_fetch());

        state.next_page();
        assert!(state.needs_fetch());
    }

    #[test]
    fn test_page_slice_past_cache_is_empty() {
        let mut state = FeedState::new();
        fill(&mut state, 3);
        state.next_page();
        state.next_page();

        assert!(state.visible_articles().is_empty());
    }

    #[test]
    fn test_new_query_resets() {
        let mut state = FeedState::new();
        fill(&mut state, 12);
        state.next_page();

        assert!(state.submit_query("  space  "));
        assert_eq!(state.query(), "space");
        assert_eq!(state.page(), 1);
        assert!(state.cache().is_empty());
    }

    #[test]
    fn test_resubmitting_same_query_starts_over() {
        let mut state = FeedState::new();
        state.submit_query("space");
        fill(&mut state, 30);
        state.next_page();
        state.next_page();
        assert_eq!(state.page(), 3);
        assert!(!state.needs_fetch());

        assert!(state.submit_query(" space "));
        assert_eq!(state.query(), "space");
        assert_eq!(state.page(), 1);
        assert!(state.cache().is_empty());

        let ticket = state.begin_fetch().unwrap();
        assert_eq!(ticket.request.query, "space");
        assert_eq!(ticket.request.page, 1);
    }

    #[test]
    fn test_next_page_saturates() {
        let mut state = FeedState::new();
        state.page = u32::MAX;

        assert!(state.next_page());
        assert_eq!(state.page(), u32::MAX);
    }

    #[test]
    fn test_blank_submission_clears_active_query() {
        let mut state = FeedState::new();
        state.submit_query("space");
        fill(&mut state, 10);
        state.next_page();

        assert!(state.submit_query("   "));
        assert_eq!(state.query(), "");
        assert_eq!(state.page(), 1);
        assert!(state.cache().is_empty());

        let ticket = state.begin_fetch().unwrap();
        assert_eq!(ticket.request.query, "");
        assert_eq!(ticket.request.page, 1);
    }

    #[test]
    fn test_clear_without_active_query_is_noop() {
        let mut state = FeedState::new();
        fill(&mut state, 10);

        assert!(!state.clear_query());
        assert_eq!(state.cache().len(), 10);
    }

    #[test]
    fn test_toggle_source_mid_pagination_resets() {
        let mut state = FeedState::new();
        fill(&mut state, 30);
        state.next_page();
        state.next_page();
        assert_eq!(state.page(), 3);

        state.toggle_source(SourceKind::Guardian);

        assert_eq!(state.page(), 1);
        assert!(state.cache().is_empty());
        assert!(state.selected_sources().contains(&SourceKind::Guardian));

        state.toggle_source(SourceKind::Guardian);
        assert!(state.selected_sources().is_empty());
    }

    #[test]
    fn test_ticket_carries_source_filter() {
        let mut state = FeedState::new();
        state.set_sources([SourceKind::NyTimes, SourceKind::NewsApi]);

        let ticket = state.begin_fetch().unwrap();
        assert_eq!(
            ticket.request.sources.iter().copied().collect::<Vec<_>>(),
            vec![SourceKind::NewsApi, SourceKind::NyTimes]
        );
    }

    #[test]
    fn test_previous_stops_at_first_page() {
        let mut state = FeedState::new();
        assert!(!state.previous_page());
        assert_eq!(state.page(), 1);

        state.next_page();
        assert!(state.previous_page());
        assert_eq!(state.page(), 1);
    }

    #[test]
    fn test_navigation_blocked_while_loading() {
        let mut state = FeedState::new();
        let ticket = state.begin_fetch().unwrap();

        assert_eq!(state.status(), ViewStatus::Loading);
        assert!(!state.next_page());
        assert!(state.begin_fetch().is_none());
        assert_eq!(state.page(), 1);

        state.complete_fetch(&ticket, Ok(articles(10)));
        assert!(state.next_page());
        assert!(state.previous_page());
    }

    #[test]
    fn test_error_keeps_cache() {
        let mut state = FeedState::new();
        fill(&mut state, 10);
        state.next_page();

        let ticket = state.begin_fetch().unwrap();
        let applied = state.complete_fetch(
            &ticket,
            Err(NewsError::NoSourcesAvailable("NYTimes".to_string())),
        );

        assert!(applied);
        assert_eq!(state.cache().len(), 10);
        assert_eq!(
            state.status(),
            ViewStatus::Error("No news sources available for: NYTimes")
        );

        // Retrying clears the error
        let retry = state.begin_fetch().unwrap();
        assert_eq!(state.error(), None);
        state.complete_fetch(&retry, Ok(articles(10)));
        assert_eq!(state.cache().len(), 20);
    }

    #[test]
    fn test_stale_result_discarded_after_query_change() {
        let mut state = FeedState::new();
        state.submit_query("space");
        let old = state.begin_fetch().unwrap();

        state.submit_query("climate");
        let current = state.begin_fetch().unwrap();

        assert!(!state.complete_fetch(&old, Ok(articles(10))));
        assert!(state.cache().is_empty());
        assert!(state.is_loading());

        assert!(state.complete_fetch(&current, Ok(articles(4))));
        assert_eq!(state.cache().len(), 4);
        assert!(!state.is_loading());
    }

    #[test]
    fn test_stale_result_discarded_before_new_fetch_issued() {
        let mut state = FeedState::new();
        let old = state.begin_fetch().unwrap();

        state.toggle_source(SourceKind::NewsApi);

        assert!(!state.complete_fetch(&old, Ok(articles(10))));
        assert!(state.cache().is_empty());
        assert!(state.needs_fetch());
    }

    #[test]
    fn test_status_empty_after_empty_fetch() {
        let mut state = FeedState::new();
        fill(&mut state, 0);
        assert_eq!(state.status(), ViewStatus::Empty);
    }

    #[tokio::test]
    async fn test_controller_fetches_then_uses_cache() {
        let mut provider = MockArticleProvider::new();
        provider
            .expect_fetch_page()
            .withf(|request| request.query == "climate" && request.page == 1)
            .times(1)
            .returning(|_| Ok(articles(25)));

        let mut controller = FeedController::new(provider);
        controller.submit_query("climate");

        assert!(controller.refresh().await);
        controller.next_page();
        assert!(!controller.refresh().await);
        controller.next_page();
        assert!(!controller.refresh().await);

        match controller.status() {
            ViewStatus::Articles(page) => assert_eq!(page.len(), 5),
            other => panic!("expected articles, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_controller_refetches_after_empty_search() {
        let mut provider = MockArticleProvider::new();
        provider
            .expect_fetch_page()
            .withf(|request| request.query == "space")
            .times(1)
            .returning(|_| Ok(articles(10)));
        provider
            .expect_fetch_page()
            .withf(|request| request.query.is_empty() && request.page == 1)
            .times(1)
            .returning(|_| Ok(articles(7)));

        let mut controller = FeedController::new(provider);
        controller.submit_query("space");
        controller.refresh().await;

        controller.submit_query("");
        assert!(controller.refresh().await);
        assert_eq!(controller.state().cache().len(), 7);
    }

    #[tokio::test]
    async fn test_controller_appends_next_page() {
        let mut provider = MockArticleProvider::new();
        provider
            .expect_fetch_page()
            .times(2)
            .returning(|request| Ok(articles(10 + request.page as usize)));

        let mut controller = FeedController::new(provider);
        controller.refresh().await;
        controller.next_page();
        controller.refresh().await;

        assert_eq!(controller.state().cache().len(), 11 + 12);
        assert_eq!(controller.state().visible_articles().len(), 10);
    }

    #[tokio::test]
    async fn test_controller_surfaces_provider_error() {
        let mut provider = MockArticleProvider::new();
        provider
            .expect_fetch_page()
            .returning(|_| Err(NewsError::NoSourcesAvailable("Guardian".to_string())));

        let mut controller = FeedController::new(provider);
        controller.set_sources([SourceKind::Guardian]);
        controller.refresh().await;

        assert!(matches!(controller.status(), ViewStatus::Error(_)));
        assert!(controller.state().cache().is_empty());
    }
}
