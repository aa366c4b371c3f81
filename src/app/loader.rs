// CustView - app/loader.rs
//
// Incremental page loading into the loaded set.
//
// A request never produces rows synchronously: it only marks the next page
// as pending, and the batch is generated on the following `poll` (the next
// UI frame). Requests made while a page is pending are ignored, so at most
// one load is ever in flight and pages arrive strictly in order.

use crate::core::model::{EngineConfig, Record};
use crate::core::source::RecordSource;

/// Owns the loaded set and its page cursor.
#[derive(Debug)]
pub struct PageLoader {
    page_size: usize,
    total: usize,
    /// Index of the next page to load.
    cursor: usize,
    /// Page requested but not yet produced.
    pending: Option<usize>,
    rows: Vec<Record>,
}

impl PageLoader {
    pub fn new(config: &EngineConfig) -> Self {
        Self {
            page_size: config.page_size,
            total: config.total_records,
            cursor: 0,
            pending: None,
            rows: Vec::new(),
        }
    }

    /// Ask for the next page. Returns false (and does nothing) if a page is
    /// already in flight.
    ///
    /// Does not check `has_more`; the caller decides when to stop asking.
    pub fn request_next_page(&mut self) -> bool {
        if self.pending.is_some() {
            tracing::trace!(cursor = self.cursor, "Page load already in flight; ignored");
            return false;
        }
        self.pending = Some(self.cursor);
        tracing::debug!(page = self.cursor, "Page load requested");
        true
    }

    /// Complete the pending load, if any. Returns the number of rows appended.
    pub fn poll(&mut self, source: &dyn RecordSource) -> usize {
        let Some(page) = self.pending.take() else {
            return 0;
        };
        let batch = source.page_at(page, self.page_size);
        let appended = batch.len();
        self.rows.extend(batch);
        self.cursor = page + 1;
        tracing::debug!(page, appended, loaded = self.rows.len(), "Page loaded");
        appended
    }

    pub fn is_loading(&self) -> bool {
        self.pending.is_some()
    }

    /// True while pages remain beyond the cursor.
    pub fn has_more(&self) -> bool {
        self.cursor.saturating_mul(self.page_size) < self.total
    }

    /// Number of pages appended so far.
    pub fn loaded_pages(&self) -> usize {
        self.cursor
    }

    pub fn rows(&self) -> &[Record] {
        &self.rows
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::SyntheticSource;

    fn config(total: usize) -> EngineConfig {
        EngineConfig {
            total_records: total,
            ..Default::default()
        }
    }

    #[test]
    fn test_request_does_not_load_synchronously() {
        let source = SyntheticSource::new(1_000);
        let mut loader = PageLoader::new(&config(1_000));
        assert!(loader.request_next_page());
        assert!(loader.is_loading());
        assert!(loader.rows().is_empty());

        assert_eq!(loader.poll(&source), 30);
        assert!(!loader.is_loading());
        assert_eq!(loader.rows().len(), 30);
        assert_eq!(loader.loaded_pages(), 1);
    }

    #[test]
    fn test_reentrant_request_is_noop() {
        let source = SyntheticSource::new(1_000);
        let mut loader = PageLoader::new(&config(1_000));
        assert!(loader.request_next_page());
        assert!(!loader.request_next_page());
        assert!(loader.rows().is_empty());
        assert_eq!(loader.loaded_pages(), 0);

        loader.poll(&source);
        // Only one page despite two requests.
        assert_eq!(loader.rows().len(), 30);
        assert_eq!(loader.poll(&source), 0);
    }

    #[test]
    fn test_pages_append_in_order() {
        let source = SyntheticSource::new(1_000);
        let mut loader = PageLoader::new(&config(1_000));
        for _ in 0..3 {
            loader.request_next_page();
            loader.poll(&source);
        }
        let ids: Vec<u64> = loader.rows().iter().map(|r| r.id).collect();
        assert_eq!(ids, (1..=90).collect::<Vec<_>>());
        assert_eq!(loader.rows().len(), loader.loaded_pages() * 30);
    }

    #[test]
    fn test_short_final_page_and_exhaustion() {
        let source = SyntheticSource::new(70);
        let mut loader = PageLoader::new(&config(70));
        for _ in 0..3 {
            assert!(loader.has_more());
            loader.request_next_page();
            loader.poll(&source);
        }
        assert_eq!(loader.rows().len(), 70);
        assert!(!loader.has_more());
    }
}
