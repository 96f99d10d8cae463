//! JSON data exchange
//!
//! The export document is `{ "subjects": [...], "exams": [...], "exportDate": ... }`.
//! [`RecordStore::export_document`](crate::core::store::RecordStore::export_document)
//! and [`RecordStore::import_document`](crate::core::store::RecordStore::import_document)
//! produce and consume it; this module owns the format and the file helpers.

pub mod document;

pub use document::{check_consistency, ExportDocument};

use crate::domain::{AsoError, Result};
use std::fs;
use std::path::Path;

/// Writes `document` as pretty JSON to `path`
///
/// # Errors
///
/// Returns an I/O error if the file cannot be written.
pub fn write_document(document: &ExportDocument, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let json = document.to_json()?;
    fs::write(path, json)
        .map_err(|e| AsoError::Io(format!("Failed to write {}: {}", path.display(), e)))?;
    tracing::info!(path = %path.display(), "Export document written");
    Ok(())
}

/// Reads and parses a document from `path`
///
/// # Errors
///
/// Returns an I/O error if the file cannot be read, or a serialization
/// error if it is not a valid document.
pub fn read_document(path: impl AsRef<Path>) -> Result<ExportDocument> {
    let path = path.as_ref();
    let json = fs::read_to_string(path)
        .map_err(|e| AsoError::Io(format!("Failed to read {}: {}", path.display(), e)))?;
    ExportDocument::from_json(&json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    #[test]
    fn test_export_date_is_camel_case() {
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let json = ExportDocument::new(vec![], vec![], at).to_json().unwrap();
        assert!(json.contains("\"exportDate\""));
        assert!(json.contains("\"subjects\": []"));
    }

    #[test]
    fn test_partial_document_keeps_absent_lists_absent() {
        let doc = ExportDocument::from_json(r#"{"exams": []}"#).unwrap();
        assert!(doc.subjects.is_none());
        assert_eq!(doc.exams, Some(vec![]));
        assert!(doc.export_date.is_none());
    }

    #[test]
    fn test_malformed_document_is_serialization_error() {
        let err = ExportDocument::from_json("{ not json").unwrap_err();
        assert!(matches!(err, AsoError::Serialization(_)));

        let err = ExportDocument::from_json(r#"{"subjects": 3}"#).unwrap_err();
        assert!(matches!(err, AsoError::Serialization(_)));
    }

    #[test]
    fn test_file_helpers() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("backup.json");
        let at = Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap();
        let doc = ExportDocument::new(vec![], vec![], at);

        write_document(&doc, &path).unwrap();
        assert_eq!(read_document(&path).unwrap(), doc);
        assert!(matches!(
            read_document(dir.path().join("missing.json")),
            Err(AsoError::Io(_))
        ));
    }
}
