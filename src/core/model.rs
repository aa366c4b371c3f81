// CustView - core/model.rs
//
// Core data model types. Pure data definitions with no I/O, no UI,
// no threads.
//
// These types are the shared vocabulary across all layers.

use crate::util::constants;
use crate::util::error::ConfigError;
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::time::Duration;

// =============================================================================
// Record
// =============================================================================

/// One customer row. Generated on demand from its dataset index and never
/// mutated afterwards; `id` is always `index + 1`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    pub id: u64,
    pub name: String,
    pub email: String,
    /// Ten decimal digits.
    pub phone: String,
    /// 0..=100.
    pub score: u8,
    pub last_message_at: DateTime<Utc>,
    pub added_by: AddedBy,
    pub avatar: AvatarRef,
}

impl Record {
    /// Zero-based dataset index this record was generated from.
    pub fn index(&self) -> usize {
        (self.id - 1) as usize
    }
}

/// Who created the customer entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AddedBy {
    Admin,
    System,
    Sales1,
    Sales2,
}

impl AddedBy {
    /// All variants in generation order.
    pub const ALL: [AddedBy; 4] = [
        AddedBy::Admin,
        AddedBy::System,
        AddedBy::Sales1,
        AddedBy::Sales2,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            AddedBy::Admin => "admin",
            AddedBy::System => "system",
            AddedBy::Sales1 => "sales1",
            AddedBy::Sales2 => "sales2",
        }
    }
}

impl std::fmt::Display for AddedBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Opaque handle to an avatar image. The display sink resolves it; the
/// engine only carries it along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct AvatarRef(&'static str);

impl AvatarRef {
    /// Shared placeholder avatar used for every generated customer.
    pub const DEFAULT: AvatarRef = AvatarRef("test-user");

    pub fn key(&self) -> &'static str {
        self.0
    }
}

// =============================================================================
// Sorting
// =============================================================================

/// Columns the table can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    Id,
    Name,
    Score,
    Email,
}

impl SortKey {
    pub fn label(&self) -> &'static str {
        match self {
            SortKey::Id => "ID",
            SortKey::Name => "Name",
            SortKey::Score => "Score",
            SortKey::Email => "Email",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Ascending => SortDirection::Descending,
            SortDirection::Descending => SortDirection::Ascending,
        }
    }

    /// Header indicator glyph.
    pub fn arrow(&self) -> &'static str {
        match self {
            SortDirection::Ascending => "\u{25b2}",
            SortDirection::Descending => "\u{25bc}",
        }
    }
}

/// Active sort. `key == None` means rows are shown in source order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct SortSpec {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortSpec {
    /// Column-header click: same column flips direction, a new column
    /// starts ascending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Ascending;
        }
    }

    /// Indicator for a header cell, empty when the column is not sorted.
    pub fn indicator(&self, key: SortKey) -> &'static str {
        if self.key == Some(key) {
            self.direction.arrow()
        } else {
            ""
        }
    }
}

// =============================================================================
// Engine configuration
// =============================================================================

/// Sizes and timings the engine honours. Passed into every component at
/// construction; `Default` gives the production values.
#[derive(Debug, Clone, PartialEq)]
pub struct EngineConfig {
    /// Logical dataset size (records addressable as `0..total_records`).
    pub total_records: usize,
    /// Records appended per page load.
    pub page_size: usize,
    /// Records tested per scan chunk between yields.
    pub scan_chunk: usize,
    /// Query settle delay in milliseconds.
    pub debounce_ms: u64,
    /// Remaining scroll distance that triggers the next page load.
    pub scroll_threshold: f32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            total_records: constants::TOTAL_RECORDS,
            page_size: constants::PAGE_SIZE,
            scan_chunk: constants::SCAN_CHUNK,
            debounce_ms: constants::DEBOUNCE_DELAY_MS,
            scroll_threshold: constants::SCROLL_THRESHOLD,
        }
    }
}

impl EngineConfig {
    /// Number of pages needed to cover the dataset (last one may be short).
    pub fn page_count(&self) -> usize {
        self.total_records.div_ceil(self.page_size)
    }

    pub fn debounce_delay(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Check every value against its named bound.
    pub fn validate(&self) -> Result<(), ConfigError> {
        check_range(
            "dataset.total_records",
            self.total_records,
            1,
            constants::MAX_TOTAL_RECORDS,
        )?;
        check_range("dataset.page_size", self.page_size, 1, constants::MAX_PAGE_SIZE)?;
        check_range("dataset.scan_chunk", self.scan_chunk, 1, constants::MAX_SCAN_CHUNK)?;
        if self.debounce_ms > constants::MAX_DEBOUNCE_DELAY_MS {
            return Err(ConfigError::ValueOutOfRange {
                field: "ui.debounce_ms".to_string(),
                value: self.debounce_ms.to_string(),
                expected: format!("0-{}", constants::MAX_DEBOUNCE_DELAY_MS),
            });
        }
        if !(0.0..=constants::MAX_SCROLL_THRESHOLD).contains(&self.scroll_threshold) {
            return Err(ConfigError::ValueOutOfRange {
                field: "ui.scroll_threshold".to_string(),
                value: self.scroll_threshold.to_string(),
                expected: format!("0-{}", constants::MAX_SCROLL_THRESHOLD),
            });
        }
        Ok(())
    }
}

fn check_range(field: &str, value: usize, min: usize, max: usize) -> Result<(), ConfigError> {
    if (min..=max).contains(&value) {
        Ok(())
    } else {
        Err(ConfigError::ValueOutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            expected: format!("{min}-{max}"),
        })
    }
}

// =============================================================================
// Search progress (for UI updates)
// =============================================================================

/// Identifies one search invocation. Strictly increasing per `SearchManager`.
pub type Generation = u64;

/// Messages sent from the search thread to the UI thread.
#[derive(Debug, Clone)]
pub enum SearchProgress {
    /// A chunk finished; `percent` is of the whole dataset, 0..=100.
    Progress { generation: Generation, percent: u8 },

    /// The scan covered the whole dataset. `matches` are in ascending
    /// index order.
    Completed {
        generation: Generation,
        matches: Vec<Record>,
        duration: Duration,
    },

    /// The scan observed its cancel flag and stopped without publishing.
    /// Only seen by callers that keep the receiver after cancelling, i.e.
    /// direct `run_search` callers; `SearchManager` drops its receiver when
    /// it cancels, so this never reaches the view.
    Cancelled { generation: Generation },
}

impl SearchProgress {
    pub fn generation(&self) -> Generation {
        match self {
            SearchProgress::Progress { generation, .. }
            | SearchProgress::Completed { generation, .. }
            | SearchProgress::Cancelled { generation } => *generation,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_same_column_flips_then_restores() {
        let mut spec = SortSpec::default();
        spec.toggle(SortKey::Score);
        assert_eq!(spec.key, Some(SortKey::Score));
        assert_eq!(spec.direction, SortDirection::Ascending);
        spec.toggle(SortKey::Score);
        assert_eq!(spec.direction, SortDirection::Descending);
        spec.toggle(SortKey::Score);
        assert_eq!(spec.direction, SortDirection::Ascending);
    }

    #[test]
    fn test_toggle_new_column_resets_to_ascending() {
        let mut spec = SortSpec {
            key: Some(SortKey::Name),
            direction: SortDirection::Descending,
        };
        spec.toggle(SortKey::Email);
        assert_eq!(spec.key, Some(SortKey::Email));
        assert_eq!(spec.direction, SortDirection::Ascending);
        assert_eq!(spec.indicator(SortKey::Email), "\u{25b2}");
        assert_eq!(spec.indicator(SortKey::Name), "");
    }

    #[test]
    fn test_default_config_matches_constants() {
        let config = EngineConfig::default();
        assert_eq!(config.total_records, 1_000_000);
        assert_eq!(config.page_size, 30);
        assert_eq!(config.scan_chunk, 10_000);
        assert_eq!(config.debounce_ms, 250);
        assert_eq!(config.scroll_threshold, 200.0);
        assert_eq!(config.page_count(), 33_334);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_zero_page_size_rejected() {
        let config = EngineConfig {
            page_size: 0,
            ..Default::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("dataset.page_size"));
    }

    #[test]
    fn test_zero_chunk_rejected() {
        let config = EngineConfig {
            scan_chunk: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
