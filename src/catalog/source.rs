use std::fs;
use std::path::{Path, PathBuf};

use super::record::DeskRecord;
use super::{CatalogError, CatalogResult};

/// Anything that can hand the catalog an ordered list of desks.
pub trait DeskSource {
    fn fetch_desks(&self) -> CatalogResult<Vec<DeskRecord>>;
}

/// Reads the desks endpoint payload from a JSON file on disk.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    path: PathBuf,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl DeskSource for JsonFileSource {
    fn fetch_desks(&self) -> CatalogResult<Vec<DeskRecord>> {
        let contents = fs::read_to_string(&self.path).map_err(|source| CatalogError::Read {
            path: self.path.clone(),
            source,
        })?;
        parse_desks(&contents)
    }
}

/// Parses a desks payload and normalizes every record.
pub fn parse_desks(contents: &str) -> CatalogResult<Vec<DeskRecord>> {
    let records: Vec<DeskRecord> = serde_json::from_str(contents)?;
    Ok(records.into_iter().map(DeskRecord::normalized).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_file_source_reads_and_normalizes() {
        let path = std::env::temp_dir().join("desk-showcase-source-test.json");
        std::fs::write(
            &path,
            r#"[{"id": 1, "name": "Ada Lovelace", "photos": ["/a.jpg"]}, {"id": 2, "name": "Alan Turing"}]"#,
        )
        .unwrap();

        let desks = JsonFileSource::new(&path)
            .fetch_desks()
            .expect("fixture should load");
        std::fs::remove_file(&path).unwrap();

        assert_eq!(desks.len(), 2);
        assert_eq!(desks[0].slug, "ada-lovelace");
        assert_eq!(desks[0].first_photo(), Some("/a.jpg"));
        assert_eq!(desks[1].slug, "alan-turing");
    }

    #[test]
    fn missing_file_reports_read_error() {
        let source = JsonFileSource::new("/nonexistent/desk-showcase/desks.json");
        let err = source.fetch_desks().expect_err("missing file should fail");
        assert!(matches!(err, CatalogError::Read { .. }));
    }

    #[test]
    fn malformed_payload_reports_parse_error() {
        let err = parse_desks("{not json").expect_err("garbage should fail");
        assert!(matches!(err, CatalogError::Parse(_)));
    }
}
