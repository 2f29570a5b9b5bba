//! Headers file output
//!
//! Each record becomes two lines: the web path, then the policy indented by
//! two spaces.
//!
//! ```text
//! /about/
//!   script-src 'sha256-...' ;
//! ```

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{EngineError, PageRecord};

/// Default headers file name inside the build directory
pub const HEADERS_FILE: &str = "_headers";

/// How to treat an existing headers file
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WriteMode {
    /// Replace any existing content, so repeated runs produce the same file
    #[default]
    Truncate,
    /// Add after existing content
    Append,
}

/// Render records in the headers file format
pub fn render_headers(records: &[PageRecord]) -> String {
    records
        .iter()
        .map(|r| format!("{}\n  {}\n", r.web_path, r.policy))
        .collect()
}

/// Write all records with a single write call
pub fn write_headers(path: &Path, records: &[PageRecord], mode: WriteMode) -> Result<(), EngineError> {
    tracing::info!("Writing headers file.");

    let contents = render_headers(records);
    let write_error = |source: std::io::Error| EngineError::WriteHeaders {
        path: path.to_path_buf(),
        source,
    };

    match mode {
        WriteMode::Truncate => fs::write(path, contents).map_err(write_error),
        WriteMode::Append => OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .and_then(|mut file| file.write_all(contents.as_bytes()))
            .map_err(write_error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn records() -> Vec<PageRecord> {
        vec![
            PageRecord {
                web_path: "/".into(),
                policy: "script-src 'sha256-a' ;".into(),
            },
            PageRecord {
                web_path: "/about/".into(),
                policy: "default-src 'self'; script-src 'sha256-b' ;".into(),
            },
        ]
    }

    #[test]
    fn test_render_format() {
        assert_eq!(
            render_headers(&records()),
            "/\n  script-src 'sha256-a' ;\n/about/\n  default-src 'self'; script-src 'sha256-b' ;\n"
        );
        assert_eq!(render_headers(&[]), "");
    }

    #[test]
    fn test_truncate_replaces_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(HEADERS_FILE);
        fs::write(&path, "stale\n").unwrap();

        write_headers(&path, &records(), WriteMode::Truncate).unwrap();
        write_headers(&path, &records(), WriteMode::Truncate).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), render_headers(&records()));
    }

    #[test]
    fn test_append_keeps_existing() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(HEADERS_FILE);
        fs::write(&path, "/*\n  X-Frame-Options: DENY\n").unwrap();

        write_headers(&path, &records(), WriteMode::Append).unwrap();

        let expected = format!("/*\n  X-Frame-Options: DENY\n{}", render_headers(&records()));
        assert_eq!(fs::read_to_string(&path).unwrap(), expected);
    }

    #[test]
    fn test_append_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(HEADERS_FILE);

        write_headers(&path, &records(), WriteMode::Append).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap().lines().count(), 4);
    }

    #[test]
    fn test_write_into_missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join(HEADERS_FILE);

        let err = write_headers(&path, &records(), WriteMode::Truncate).unwrap_err();
        assert!(matches!(err, EngineError::WriteHeaders { .. }));
    }
}
