/// Snapshot loading for the catalog servers.
///
/// Each server consumes a JSON snapshot of records that the network
/// retrieval layer materialized on disk; how the file got there is not this
/// workspace's concern. Loading is strict on JSON syntax (a broken file is a
/// startup error) but lenient on missing record fields: serde defaults give
/// empty searchable fields, which simply never match a non-empty query.
use std::path::Path;

use serde::de::DeserializeOwned;

use crate::error::CommonError;

/// Parse a snapshot from raw JSON: an array of domain records.
pub fn parse_snapshot<T: DeserializeOwned>(raw: &str) -> Result<Vec<T>, CommonError> {
    serde_json::from_str(raw).map_err(|e| CommonError::Parse {
        line: e.line(),
        message: e.to_string(),
    })
}

/// Read and parse a snapshot file.
pub fn load_snapshot<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>, CommonError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| CommonError::Snapshot(format!("failed to read {}: {e}", path.display())))?;
    parse_snapshot(&raw)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Row {
        id: String,
        #[serde(default)]
        title: String,
        #[serde(default)]
        tags: Vec<String>,
    }

    #[test]
    fn parses_records_from_a_json_array() {
        let raw = r#"[{"id": "1", "title": "First", "tags": ["a", "b"]}]"#;
        let rows: Vec<Row> = parse_snapshot(raw).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, "1");
        assert_eq!(rows[0].tags, vec!["a", "b"]);
    }

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let raw = r#"[{"id": "1"}]"#;
        let rows: Vec<Row> = parse_snapshot(raw).unwrap();
        assert_eq!(rows[0].title, "");
        assert!(rows[0].tags.is_empty());
    }

    #[test]
    fn malformed_json_reports_the_line() {
        let raw = "[\n{\"id\": \"1\"},\n{broken\n]";
        let err = parse_snapshot::<Row>(raw).unwrap_err();
        match err {
            CommonError::Parse { line, .. } => assert_eq!(line, 3),
            other => panic!("expected parse error, got {other}"),
        }
    }

    #[test]
    fn missing_file_is_a_snapshot_error() {
        let err = load_snapshot::<Row>(Path::new("/nonexistent/snapshot.json")).unwrap_err();
        assert!(matches!(err, CommonError::Snapshot(_)));
    }
}
