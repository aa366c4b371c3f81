// CustView - core/source.rs
//
// Record source: maps a dataset index to a customer record.
// The built-in synthetic source is a pure function of the index, so the
// dataset is never materialised; pages and scans regenerate on demand.

use crate::core::model::{AddedBy, AvatarRef, Record};
use chrono::{DateTime, Duration, NaiveDate, Utc};

/// Produces records by index. Implementations must be pure and total over
/// `0..total()`; the search thread shares one instance with the UI thread.
pub trait RecordSource: Send + Sync {
    /// Number of addressable records.
    fn total(&self) -> usize;

    /// Record at `index`. Panics if `index >= total()`.
    fn record_at(&self, index: usize) -> Record;

    /// Contiguous batch `page_index * page_size ..` clamped to the dataset
    /// end, so the final page may be short and a page past the end is empty.
    fn page_at(&self, page_index: usize, page_size: usize) -> Vec<Record> {
        let start = page_index.saturating_mul(page_size).min(self.total());
        let end = start.saturating_add(page_size).min(self.total());
        (start..end).map(|i| self.record_at(i)).collect()
    }
}

const FIRST_NAMES: [&str; 20] = [
    "Aarav", "Vivaan", "Aditya", "Vihaan", "Arjun", "Karan", "Rohan", "Ananya", "Saanvi", "Ishaan",
    "Priya", "Sneha", "Arjun", "Maya", "Ravi", "Kavya", "Dev", "Nisha", "Rehan", "Sara",
];

const LAST_NAMES: [&str; 20] = [
    "Shah", "Verma", "Singh", "Kumar", "Gupta", "Agarwal", "Patel", "Jain", "Mehta", "Nair",
    "Reddy", "Bose", "Das", "Chopra", "Malhotra", "Saxena", "Trivedi", "Khan", "Ali", "Roy",
];

/// Base of the 10-digit phone numbers.
const PHONE_BASE: u64 = 9_000_000_000;

/// Phone suffixes wrap after this many customers.
const PHONE_SPAN: u64 = 1_000_000_000;

/// Deterministic synthetic customer dataset.
#[derive(Debug, Clone)]
pub struct SyntheticSource {
    total: usize,
    epoch: DateTime<Utc>,
}

impl SyntheticSource {
    pub fn new(total: usize) -> Self {
        Self {
            total,
            epoch: NaiveDate::from_ymd_opt(2024, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .expect("2024-01-01T00:00:00 is a valid timestamp")
                .and_utc(),
        }
    }
}

impl RecordSource for SyntheticSource {
    fn total(&self) -> usize {
        self.total
    }

    fn record_at(&self, index: usize) -> Record {
        assert!(
            index < self.total,
            "record index {index} out of range (dataset has {} records)",
            self.total
        );

        let first = FIRST_NAMES[index % FIRST_NAMES.len()];
        let last = LAST_NAMES[(index / FIRST_NAMES.len()) % LAST_NAMES.len()];
        let i = index as u64;

        let mut phone = (PHONE_BASE + i % PHONE_SPAN).to_string();
        phone.truncate(10);

        Record {
            id: i + 1,
            name: format!("{first} {last}"),
            email: format!(
                "{}.{}{}@example.com",
                first.to_lowercase(),
                last.to_lowercase(),
                index % 1000
            ),
            phone,
            score: ((i * 37) % 101) as u8,
            last_message_at: self.epoch + Duration::days((index % 365) as i64),
            added_by: AddedBy::ALL[index % AddedBy::ALL.len()],
            avatar: AvatarRef::DEFAULT,
        }
    }
}
