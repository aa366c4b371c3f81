// CustView - core/export.rs
//
// CSV and JSON export of the displayed rows (after search and sort).
// Core layer: writes to any Write implementation.

use crate::core::model::Record;
use crate::util::error::ExportError;
use std::io::Write;
use std::path::Path;

/// Export records to CSV.
///
/// Columns: id, name, email, phone, score, last_message_at, added_by
pub fn export_csv<'a, W, I>(records: I, writer: W, export_path: &Path) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let csv_err = |e| ExportError::Csv {
        path: export_path.to_path_buf(),
        source: e,
    };
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "id",
            "name",
            "email",
            "phone",
            "score",
            "last_message_at",
            "added_by",
        ])
        .map_err(csv_err)?;

    let mut count = 0;
    for record in records {
        csv_writer
            .write_record([
                record.id.to_string().as_str(),
                record.name.as_str(),
                record.email.as_str(),
                record.phone.as_str(),
                record.score.to_string().as_str(),
                record.last_message_at.to_rfc3339().as_str(),
                record.added_by.label(),
            ])
            .map_err(csv_err)?;
        count += 1;
    }

    csv_writer.flush().map_err(|e| ExportError::Io {
        path: export_path.to_path_buf(),
        source: e,
    })?;

    tracing::info!(rows = count, path = %export_path.display(), "CSV export complete");
    Ok(count)
}

/// Export records to JSON (pretty-printed array of objects).
pub fn export_json<'a, W, I>(records: I, writer: W, export_path: &Path) -> Result<usize, ExportError>
where
    W: Write,
    I: IntoIterator<Item = &'a Record>,
{
    let rows: Vec<&Record> = records.into_iter().collect();
    serde_json::to_writer_pretty(writer, &rows).map_err(|e| ExportError::Json {
        path: export_path.to_path_buf(),
        source: e,
    })?;
    tracing::info!(rows = rows.len(), path = %export_path.display(), "JSON export complete");
    Ok(rows.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::source::{RecordSource, SyntheticSource};

    #[test]
    fn test_csv_export() {
        let records = SyntheticSource::new(10).page_at(0, 2);
        let mut buf = Vec::new();
        let count = export_csv(&records, &mut buf, Path::new("out.csv")).unwrap();
        assert_eq!(count, 2);

        let output = String::from_utf8(buf).unwrap();
        let mut lines = output.lines();
        assert_eq!(
            lines.next(),
            Some("id,name,email,phone,score,last_message_at,added_by")
        );
        assert_eq!(
            lines.next(),
            Some("1,Aarav Shah,aarav.shah0@example.com,9000000000,0,2024-01-01T00:00:00+00:00,admin")
        );
        assert!(lines.next().unwrap().starts_with("2,Vivaan Shah,"));
    }

    #[test]
    fn test_json_export() {
        let records = SyntheticSource::new(10).page_at(0, 1);
        let mut buf = Vec::new();
        let count = export_json(&records, &mut buf, Path::new("out.json")).unwrap();
        assert_eq!(count, 1);

        let value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        assert_eq!(value[0]["name"], "Aarav Shah");
        assert_eq!(value[0]["added_by"], "admin");
        assert_eq!(value[0]["avatar"], "test-user");
    }
}
