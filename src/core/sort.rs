// CustView - core/sort.rs
//
// Stable view sort. Produces an ordering of indices into a record slice
// rather than moving records, so the loaded set and search results are
// never mutated and the table can virtual-scroll over the index list.

use crate::core::model::{Record, SortDirection, SortKey, SortSpec};

/// Comparable projection of one column value.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum SortValue {
    Number(u64),
    Text(String),
}

fn sort_value(record: &Record, key: SortKey) -> SortValue {
    match key {
        SortKey::Id => SortValue::Number(record.id),
        SortKey::Score => SortValue::Number(u64::from(record.score)),
        SortKey::Name => SortValue::Text(record.name.to_lowercase()),
        SortKey::Email => SortValue::Text(record.email.to_lowercase()),
    }
}

/// Return the display order for `records` under `spec`.
///
/// With no sort key this is the identity order. Otherwise indices are
/// sorted by the chosen column (text compared case-insensitively); equal
/// keys keep their original relative order in both directions.
pub fn sorted_indices(records: &[Record], spec: &SortSpec) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..records.len()).collect();
    let Some(key) = spec.key else {
        return indices;
    };

    // Project once so text keys are lower-cased n times, not n log n.
    let values: Vec<SortValue> = records.iter().map(|r| sort_value(r, key)).collect();

    indices.sort_by(|&a, &b| {
        let ord = values[a].cmp(&values[b]);
        match spec.direction {
            SortDirection::Ascending => ord,
            SortDirection::Descending => ord.reverse(),
        }
    });
    indices
}
