// CustView - app/search.rs
//
// Full-dataset search lifecycle. Scans every record through the record
// source (not just the loaded pages) on a background thread, sending
// progress messages to the UI thread via an mpsc channel.
//
// Architecture:
//   - `SearchManager` lives on the UI thread; `run_search` runs on a background thread.
//   - The dataset is scanned in fixed-size chunks in ascending index order.
//     After each chunk the thread reports progress and yields.
//   - Each search is tagged with a generation. Starting a new search sets the
//     previous run's `Arc<AtomicBool>` cancel flag and replaces the channel,
//     so a superseded run can never deliver a result.
//   - Cancel is checked before every chunk; a cancelled run publishes nothing.

use crate::core::matcher::Query;
use crate::core::model::{EngineConfig, Generation, Record, SearchProgress};
use crate::core::source::RecordSource;
use crate::util::constants::{MAX_SEARCH_MESSAGES_PER_FRAME, SEARCH_THREAD_NAME};
use std::ops::Range;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, TryRecvError};
use std::sync::Arc;
use std::time::Instant;

// =============================================================================
// SearchManager
// =============================================================================

/// Manages search scans on background threads.
pub struct SearchManager {
    source: Arc<dyn RecordSource>,
    scan_chunk: usize,

    /// Generation of the most recent `start_search` call.
    generation: Generation,

    /// Channel receiver for the live run.
    progress_rx: Option<mpsc::Receiver<SearchProgress>>,

    /// Cancel flag shared with the live run's thread.
    cancel_flag: Option<Arc<AtomicBool>>,
}

impl SearchManager {
    pub fn new(source: Arc<dyn RecordSource>, config: &EngineConfig) -> Self {
        Self {
            source,
            scan_chunk: config.scan_chunk,
            generation: 0,
            progress_rx: None,
            cancel_flag: None,
        }
    }

    /// Start searching for `raw_query`, superseding any running search.
    ///
    /// Returns the new generation. An empty query only cancels: no thread is
    /// spawned and no messages will follow.
    pub fn start_search(&mut self, raw_query: &str) -> Generation {
        self.cancel_search();
        self.generation += 1;
        let generation = self.generation;

        let Some(query) = Query::new(raw_query) else {
            tracing::debug!(generation, "Empty query; search cleared");
            return generation;
        };

        let (tx, rx) = mpsc::channel();
        let cancel = Arc::new(AtomicBool::new(false));
        let thread_cancel = Arc::clone(&cancel);
        let source = Arc::clone(&self.source);
        let chunk = self.scan_chunk;
        let query_len = query.as_str().chars().count();

        let spawned = std::thread::Builder::new()
            .name(SEARCH_THREAD_NAME.to_string())
            .spawn(move || {
                run_search(source.as_ref(), &query, chunk, generation, &tx, &thread_cancel);
            });

        match spawned {
            Ok(_) => {
                self.progress_rx = Some(rx);
                self.cancel_flag = Some(cancel);
                tracing::info!(generation, query_len, "Search started");
            }
            Err(e) => {
                tracing::error!(generation, error = %e, "Failed to spawn search thread");
            }
        }
        generation
    }

    /// Request cancellation of the running search (if any).
    /// The background thread stops at its next chunk boundary.
    pub fn cancel_search(&mut self) {
        if let Some(flag) = self.cancel_flag.take() {
            flag.store(true, Ordering::SeqCst);
            tracing::debug!(generation = self.generation, "Search cancelled");
        }
        // Dropping the receiver also stops a run that is mid-chunk: its next
        // send fails and it exits.
        self.progress_rx = None;
    }

    /// Generation of the most recently started search.
    pub fn current_generation(&self) -> Generation {
        self.generation
    }

    /// True while a run's channel is still connected.
    pub fn is_active(&self) -> bool {
        self.progress_rx.is_some()
    }

    /// Drain pending messages without blocking, up to the per-frame budget.
    /// Only messages of the live run can appear here.
    pub fn poll_progress(&mut self) -> Vec<SearchProgress> {
        let mut messages = Vec::new();
        let Some(rx) = &self.progress_rx else {
            return messages;
        };
        while messages.len() < MAX_SEARCH_MESSAGES_PER_FRAME {
            match rx.try_recv() {
                Ok(msg) => messages.push(msg),
                Err(TryRecvError::Empty) => break,
                Err(TryRecvError::Disconnected) => {
                    // Thread finished and everything it sent has been read.
                    self.progress_rx = None;
                    self.cancel_flag = None;
                    break;
                }
            }
        }
        messages
    }
}

impl Drop for SearchManager {
    fn drop(&mut self) {
        self.cancel_search();
    }
}

// =============================================================================
// Background scan
// =============================================================================

/// Percentage of `total` covered by `processed`, rounded half up.
pub fn progress_percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (processed as u128 * 200 + total as u128) / (total as u128 * 2);
    pct.min(100) as u8
}

/// Test every record in `range` against `query`, appending matches in
/// index order.
pub fn scan_chunk(
    source: &dyn RecordSource,
    range: Range<usize>,
    query: &Query,
    matches: &mut Vec<Record>,
) {
    for index in range {
        let record = source.record_at(index);
        if query.matches(&record) {
            matches.push(record);
        }
    }
}

/// Full scan of `0..source.total()` in chunks of `chunk` records.
///
/// Sends a `Progress` message after every chunk and yields the thread.
/// Checks `cancel` before every chunk; on cancellation sends `Cancelled`
/// and returns without publishing matches. Exits quietly if the receiver
/// has been dropped.
pub fn run_search(
    source: &dyn RecordSource,
    query: &Query,
    chunk: usize,
    generation: Generation,
    tx: &mpsc::Sender<SearchProgress>,
    cancel: &AtomicBool,
) {
    macro_rules! send {
        ($msg:expr) => {
            if tx.send($msg).is_err() {
                tracing::trace!(generation, "Search receiver dropped; exiting");
                return;
            }
        };
    }

    let started = Instant::now();
    let total = source.total();
    let chunk = chunk.max(1);
    let mut matches: Vec<Record> = Vec::new();
    let mut start = 0;

    while start < total {
        if cancel.load(Ordering::SeqCst) {
            tracing::debug!(generation, processed = start, "Search stopped at chunk boundary");
            send!(SearchProgress::Cancelled { generation });
            return;
        }

        let end = (start + chunk).min(total);
        scan_chunk(source, start..end, query, &mut matches);

        send!(SearchProgress::Progress {
            generation,
            percent: progress_percent(end, total),
        });
        std::thread::yield_now();
        start = end;
    }

    let duration = started.elapsed();
    tracing::info!(
        generation,
        matches = matches.len(),
        elapsed_ms = duration.as_millis() as u64,
        "Search complete"
    );
    send!(SearchProgress::Completed {
        generation,
        matches,
        duration,
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::SyntheticSource;
    use std::sync::atomic::AtomicUsize;
    use std::time::Duration;

    /// Wraps the synthetic source and counts `record_at` calls, so tests can
    /// see whether a background scan is still running.
    struct CountingSource {
        inner: SyntheticSource,
        calls: Arc<AtomicUsize>,
    }

    impl RecordSource for CountingSource {
        fn total(&self) -> usize {
            self.inner.total()
        }

        fn record_at(&self, index: usize) -> Record {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.inner.record_at(index)
        }
    }

    /// Start a scan far too large to finish during the test and wait until
    /// it has covered at least one chunk.
    fn start_long_scan() -> (SearchManager, Arc<AtomicUsize>, usize) {
        let total = 50_000_000;
        let calls = Arc::new(AtomicUsize::new(0));
        let source: Arc<dyn RecordSource> = Arc::new(CountingSource {
            inner: SyntheticSource::new(total),
            calls: Arc::clone(&calls),
        });
        let config = EngineConfig {
            total_records: total,
            scan_chunk: 10_000,
            ..Default::default()
        };
        let mut manager = SearchManager::new(source, &config);
        manager.start_search("Sara");

        let deadline = Instant::now() + Duration::from_secs(30);
        while calls.load(Ordering::SeqCst) < 10_000 {
            assert!(Instant::now() < deadline, "scan never got going");
            std::thread::sleep(Duration::from_millis(1));
        }
        (manager, calls, total)
    }

    /// After cancellation the count may grow only while the in-flight chunk
    /// finishes; once that has had time to happen it must stay flat.
    fn assert_scan_stopped(calls: &AtomicUsize, total: usize) {
        std::thread::sleep(Duration::from_millis(300));
        let settled = calls.load(Ordering::SeqCst);
        std::thread::sleep(Duration::from_millis(300));
        let later = calls.load(Ordering::SeqCst);
        assert_eq!(settled, later, "scan kept running after cancellation");
        assert!(later < total, "scan ran to completion");
        assert_eq!(later % 10_000, 0, "scan stopped mid-chunk");
    }

    fn collect_run(total: usize, chunk: usize, query: &str) -> Vec<SearchProgress> {
        let source = SyntheticSource::new(total);
        let (tx, rx) = mpsc::channel();
        let cancel = AtomicBool::new(false);
        run_search(&source, &Query::new(query).unwrap(), chunk, 7, &tx, &cancel);
        drop(tx);
        rx.iter().collect()
    }

    #[test]
    fn test_progress_percent_rounding() {
        assert_eq!(progress_percent(0, 1_000_000), 0);
        assert_eq!(progress_percent(10_000, 1_000_000), 1);
        assert_eq!(progress_percent(5, 1_000), 1); // 0.5% rounds up
        assert_eq!(progress_percent(4, 1_000), 0);
        assert_eq!(progress_percent(1_000_000, 1_000_000), 100);
        assert_eq!(progress_percent(0, 0), 100);
    }

    #[test]
    fn test_scan_chunk_matches_in_index_order() {
        let source = SyntheticSource::new(200);
        let mut matches = Vec::new();
        let query = Query::new("aarav").unwrap();
        scan_chunk(&source, 0..100, &query, &mut matches);
        scan_chunk(&source, 100..200, &query, &mut matches);
        let ids: Vec<u64> = matches.iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![1, 21, 41, 61, 81, 101, 121, 141, 161, 181]);
    }

    #[test]
    fn test_run_reports_every_chunk_then_completes() {
        let messages = collect_run(1_000, 100, "Aarav");
        assert_eq!(messages.len(), 11);

        let percents: Vec<u8> = messages
            .iter()
            .filter_map(|m| match m {
                SearchProgress::Progress { percent, .. } => Some(*percent),
                _ => None,
            })
            .collect();
        assert_eq!(percents, (1..=10).map(|p| p * 10).collect::<Vec<u8>>());

        match messages.last() {
            Some(SearchProgress::Completed {
                generation,
                matches,
                ..
            }) => {
                assert_eq!(*generation, 7);
                assert_eq!(matches.len(), 50);
                assert!(matches.iter().all(|r| r.index() % 20 == 0));
            }
            other => panic!("expected Completed, got {other:?}"),
        }
    }

    #[test]
    fn test_cancelled_run_publishes_nothing() {
        let source = SyntheticSource::new(1_000);
        let (tx, rx) = mpsc::channel();
        let cancel = AtomicBool::new(true);
        run_search(&source, &Query::new("a").unwrap(), 100, 1, &tx, &cancel);
        drop(tx);
        let messages: Vec<_> = rx.iter().collect();
        assert_eq!(messages.len(), 1);
        assert!(matches!(
            messages[0],
            SearchProgress::Cancelled { generation: 1 }
        ));
    }

    #[test]
    fn test_cancel_stops_running_scan_at_chunk_boundary() {
        let (mut manager, calls, total) = start_long_scan();
        manager.cancel_search();
        assert!(!manager.is_active());
        assert_scan_stopped(&calls, total);
        assert!(manager.poll_progress().is_empty());
    }

    #[test]
    fn test_dropping_manager_stops_running_scan() {
        let (manager, calls, total) = start_long_scan();
        drop(manager);
        assert_scan_stopped(&calls, total);
    }

    #[test]
    fn test_manager_empty_query_spawns_nothing() {
        let source: Arc<dyn RecordSource> = Arc::new(SyntheticSource::new(100));
        let mut manager = SearchManager::new(source, &EngineConfig::default());
        assert_eq!(manager.start_search(""), 1);
        assert!(!manager.is_active());
        assert!(manager.poll_progress().is_empty());
    }

    #[test]
    fn test_manager_supersedes_previous_run() {
        let source: Arc<dyn RecordSource> = Arc::new(SyntheticSource::new(20_000));
        let config = EngineConfig {
            total_records: 20_000,
            scan_chunk: 100,
            ..Default::default()
        };
        let mut manager = SearchManager::new(source, &config);
        let first = manager.start_search("Aarav");
        let second = manager.start_search("Vivaan");
        assert_eq!(second, first + 1);
        assert_eq!(manager.current_generation(), second);

        let deadline = Instant::now() + Duration::from_secs(30);
        let mut completed = None;
        while completed.is_none() && Instant::now() < deadline {
            for msg in manager.poll_progress() {
                assert_eq!(msg.generation(), second, "stale message leaked");
                if let SearchProgress::Completed { matches, .. } = msg {
                    completed = Some(matches);
                }
            }
            std::thread::sleep(Duration::from_millis(1));
        }
        let matches = completed.expect("second search should complete");
        assert_eq!(matches.len(), 1_000);
        assert!(matches.iter().all(|r| r.name.starts_with("Vivaan")));
    }
}
