// CustView - util/constants.rs
//
// Single source of truth for all named constants, limits, and defaults.
// Engine components never read these directly; they are folded into
// `EngineConfig` at startup so tests can run against small datasets.

// =============================================================================
// Application metadata
// =============================================================================

/// Application display name.
pub const APP_NAME: &str = "CustView";

/// Application identifier used for config/data directories.
pub const APP_ID: &str = "CustView";

/// Current application version.
pub const APP_VERSION: &str = env!("CARGO_PKG_VERSION");

// =============================================================================
// Dataset and paging
// =============================================================================

/// Number of records in the synthetic customer dataset.
pub const TOTAL_RECORDS: usize = 1_000_000;

/// Hard upper bound on the configurable dataset size.
///
/// Record ids are generated on demand, so this only bounds how long a full
/// search scan may take (roughly linear in the dataset size).
pub const MAX_TOTAL_RECORDS: usize = 100_000_000;

/// Rows appended to the loaded set per page load.
pub const PAGE_SIZE: usize = 30;

/// Hard upper bound on the configurable page size.
pub const MAX_PAGE_SIZE: usize = 10_000;

// =============================================================================
// Search
// =============================================================================

/// Records tested per scan chunk before the search thread reports progress
/// and yields. 100 chunks for the default dataset; one chunk must stay well
/// under a frame of work.
pub const SCAN_CHUNK: usize = 10_000;

/// Hard upper bound on the configurable scan chunk.
pub const MAX_SCAN_CHUNK: usize = 1_000_000;

/// Settle delay applied to raw query text before a search is started (ms).
pub const DEBOUNCE_DELAY_MS: u64 = 250;

/// Maximum user-configurable debounce delay (ms).
pub const MAX_DEBOUNCE_DELAY_MS: u64 = 5_000;

/// Name given to background search threads (visible in debug logs).
pub const SEARCH_THREAD_NAME: &str = "custview-search";

// =============================================================================
// Scrolling
// =============================================================================

/// Remaining unseen scroll distance (points) below which the next page is
/// requested.
pub const SCROLL_THRESHOLD: f32 = 200.0;

/// Maximum user-configurable scroll threshold (points).
pub const MAX_SCROLL_THRESHOLD: f32 = 5_000.0;

// =============================================================================
// Per-frame UI message budgets
// =============================================================================

/// Maximum number of search-progress messages processed per UI frame.
/// Remaining messages stay queued for the next frame.
pub const MAX_SEARCH_MESSAGES_PER_FRAME: usize = 256;

// =============================================================================
// UI defaults
// =============================================================================

/// Default UI body font size in points.
pub const DEFAULT_FONT_SIZE: f32 = 14.5;

/// Minimum user-configurable UI font size (points).
pub const MIN_FONT_SIZE: f32 = 10.0;

/// Maximum user-configurable UI font size (points).
pub const MAX_FONT_SIZE: f32 = 24.0;

/// Date format used for the "Last message sent at" column.
pub const LAST_MESSAGE_DATE_FORMAT: &str = "%Y-%m-%d";

// =============================================================================
// Logging
// =============================================================================

/// Default log level.
pub const DEFAULT_LOG_LEVEL: &str = "info";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration file name.
pub const CONFIG_FILE_NAME: &str = "config.toml";
