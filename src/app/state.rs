// CustView - app/state.rs
//
// View coordinator. Holds the loaded set, the active search result and the
// sort, and derives the displayed row order from them. Owned by the
// eframe::App implementation, which feeds it display events and calls
// `tick` once per frame.
//
// Only the UI thread mutates this state. Background search threads talk to
// it exclusively through `SearchManager`'s channel, and messages from a
// superseded generation are discarded here.

use crate::app::debounce::Debouncer;
use crate::app::loader::PageLoader;
use crate::app::search::SearchManager;
use crate::core::model::{EngineConfig, Generation, Record, SearchProgress, SortKey, SortSpec};
use crate::core::sort;
use crate::core::source::RecordSource;
use crate::util::format::thousands;
use std::sync::Arc;
use std::time::Instant;

/// Which sequence the view is derived from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ViewSource {
    /// Loaded set; identified by its length because it only ever grows.
    Loaded(usize),
    /// Search result of the given generation.
    Search(Generation),
}

/// Inputs the memoised display order was computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ViewKey {
    source: ViewSource,
    sort: SortSpec,
}

/// Top-level view state.
pub struct ViewState {
    config: EngineConfig,
    source: Arc<dyn RecordSource>,
    loader: PageLoader,
    search: SearchManager,
    debouncer: Debouncer<String>,

    /// Raw search box text (bound to the text field).
    pub query: String,

    /// Query text of the search most recently started (or cleared).
    applied_query: String,

    /// `None` = no active search, display the loaded set.
    search_results: Option<Vec<Record>>,
    results_generation: Generation,
    is_searching: bool,
    search_progress: u8,

    sort: SortSpec,

    /// Indices into the current view source, in display order.
    display_indices: Vec<usize>,
    view_key: Option<ViewKey>,
}

impl ViewState {
    /// Create the view and request the first page (produced on the first tick).
    pub fn new(config: EngineConfig, source: Arc<dyn RecordSource>) -> Self {
        let mut loader = PageLoader::new(&config);
        loader.request_next_page();
        let search = SearchManager::new(Arc::clone(&source), &config);
        let debouncer = Debouncer::new(config.debounce_delay());

        tracing::info!(
            total = config.total_records,
            page_size = config.page_size,
            scan_chunk = config.scan_chunk,
            "View state created"
        );

        Self {
            config,
            source,
            loader,
            search,
            debouncer,
            query: String::new(),
            applied_query: String::new(),
            search_results: None,
            results_generation: 0,
            is_searching: false,
            search_progress: 0,
            sort: SortSpec::default(),
            display_indices: Vec::new(),
            view_key: None,
        }
    }

    // -------------------------------------------------------------------------
    // Scheduler turn
    // -------------------------------------------------------------------------

    /// Run one scheduler turn: finish a pending page load, apply search
    /// progress, and start a search if the query has settled.
    ///
    /// Returns true if anything observable changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        let mut changed = false;

        if self.loader.is_loading() {
            self.loader.poll(self.source.as_ref());
            changed = true;
        }

        for msg in self.search.poll_progress() {
            changed |= self.apply_search_message(msg);
        }
        // Run ended without a result (thread failed to spawn or died).
        if self.is_searching && !self.search.is_active() {
            tracing::warn!(
                generation = self.search.current_generation(),
                "Search ended without a result"
            );
            self.is_searching = false;
            changed = true;
        }

        if let Some(text) = self.debouncer.poll(now) {
            if text != self.applied_query {
                self.begin_search(&text);
                changed = true;
            }
        }

        if changed {
            self.refresh_view();
        }
        changed
    }

    fn apply_search_message(&mut self, msg: SearchProgress) -> bool {
        let current = self.search.current_generation();
        if msg.generation() != current {
            tracing::trace!(
                stale = msg.generation(),
                current,
                "Discarding superseded search message"
            );
            return false;
        }
        match msg {
            SearchProgress::Progress { percent, .. } => {
                self.search_progress = percent;
            }
            SearchProgress::Completed {
                generation,
                matches,
                duration,
            } => {
                tracing::debug!(
                    generation,
                    matches = matches.len(),
                    elapsed_ms = duration.as_millis() as u64,
                    "Search result published"
                );
                self.search_results = Some(matches);
                self.results_generation = generation;
                self.is_searching = false;
                self.search_progress = 100;
            }
            // SearchManager drops the receiver when it cancels, so a
            // current-generation Cancelled is not expected here.
            SearchProgress::Cancelled { .. } => {
                self.is_searching = false;
            }
        }
        true
    }

    // -------------------------------------------------------------------------
    // Display events
    // -------------------------------------------------------------------------

    /// Search box edited. The search starts once the text has settled.
    pub fn on_query_change(&mut self, text: &str, now: Instant) {
        self.query = text.to_string();
        self.debouncer.update(text.to_string(), now);
    }

    /// Apply `text` as the query immediately, bypassing the settle delay.
    pub fn set_query_immediate(&mut self, text: &str) {
        self.query = text.to_string();
        self.debouncer.clear();
        self.begin_search(text);
        self.refresh_view();
    }

    fn begin_search(&mut self, text: &str) {
        self.applied_query = text.to_string();
        self.search.start_search(text);
        self.search_progress = 0;
        if text.is_empty() {
            self.search_results = None;
            self.is_searching = false;
        } else {
            // The previous result stays visible until the new one completes.
            self.is_searching = self.search.is_active();
        }
    }

    /// Scroll position changed; `remaining` is the unseen distance below the
    /// viewport. Returns true if a page load was requested.
    pub fn on_scroll(&mut self, remaining: f32) -> bool {
        if self.should_load_more(remaining) {
            self.loader.request_next_page()
        } else {
            false
        }
    }

    /// Page-load trigger policy.
    pub fn should_load_more(&self, remaining: f32) -> bool {
        remaining < self.config.scroll_threshold
            && !self.is_searching
            && self.search_results.is_none()
            && !self.loader.is_loading()
            && self.loader.has_more()
    }

    /// Column header clicked.
    pub fn toggle_sort(&mut self, key: SortKey) {
        self.sort.toggle(key);
        tracing::debug!(key = key.label(), direction = ?self.sort.direction, "Sort changed");
        self.refresh_view();
    }

    // -------------------------------------------------------------------------
    // Derived view
    // -------------------------------------------------------------------------

    fn view_rows(&self) -> &[Record] {
        match &self.search_results {
            Some(results) => results,
            None => self.loader.rows(),
        }
    }

    fn current_view_key(&self) -> ViewKey {
        let source = match self.search_results {
            Some(_) => ViewSource::Search(self.results_generation),
            None => ViewSource::Loaded(self.loader.rows().len()),
        };
        ViewKey {
            source,
            sort: self.sort,
        }
    }

    /// Recompute the display order if any of its inputs changed.
    fn refresh_view(&mut self) {
        let key = self.current_view_key();
        if self.view_key == Some(key) {
            return;
        }
        self.display_indices = sort::sorted_indices(self.view_rows(), &self.sort);
        self.view_key = Some(key);
    }

    /// Rows in display order: the search result if one is active, otherwise
    /// the loaded set, sorted per the current sort.
    pub fn displayed_rows(&self) -> impl Iterator<Item = &Record> + '_ {
        let rows = self.view_rows();
        self.display_indices.iter().filter_map(move |&i| rows.get(i))
    }

    pub fn displayed_row(&self, position: usize) -> Option<&Record> {
        self.display_indices
            .get(position)
            .and_then(|&i| self.view_rows().get(i))
    }

    pub fn displayed_len(&self) -> usize {
        self.display_indices.len()
    }

    /// Count line for the toolbar.
    pub fn status_text(&self) -> String {
        match &self.search_results {
            Some(results) => format!("{} matches", thousands(results.len())),
            None => format!(
                "{} total (loaded {})",
                thousands(self.config.total_records),
                thousands(self.loader.rows().len())
            ),
        }
    }

    // -------------------------------------------------------------------------
    // Status indicators
    // -------------------------------------------------------------------------

    pub fn is_loading_page(&self) -> bool {
        self.loader.is_loading()
    }

    pub fn is_searching(&self) -> bool {
        self.is_searching
    }

    pub fn search_progress(&self) -> u8 {
        self.search_progress
    }

    /// True while a search result (rather than the loaded set) is displayed.
    pub fn has_search_results(&self) -> bool {
        self.search_results.is_some()
    }

    /// Time until a debounced query settles, if one is pending.
    pub fn debounce_remaining(&self, now: Instant) -> Option<std::time::Duration> {
        self.debouncer.remaining(now)
    }

    pub fn loaded_rows(&self) -> &[Record] {
        self.loader.rows()
    }

    pub fn loaded_len(&self) -> usize {
        self.loader.rows().len()
    }

    pub fn loaded_pages(&self) -> usize {
        self.loader.loaded_pages()
    }

    pub fn sort_spec(&self) -> SortSpec {
        self.sort
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }
}
