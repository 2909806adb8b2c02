//! Enumerate and decode input documents

use crate::error::{ItemError, RefinerError};
use docket_domain::InputDocument;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// List input files in a directory, sorted by file name
///
/// Only regular files whose extension matches (case-insensitively) are
/// returned. Subdirectories are not descended into.
///
/// # Errors
///
/// `RefinerError::InputDirectory` if the directory itself cannot be read.
/// Unreadable individual entries are logged and skipped.
pub fn list_documents(dir: &Path, extension: &str) -> Result<Vec<PathBuf>, RefinerError> {
    let entries = fs::read_dir(dir).map_err(|e| RefinerError::InputDirectory {
        path: dir.display().to_string(),
        message: e.to_string(),
    })?;

    let mut paths = Vec::new();
    for entry in entries {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry in '{}': {}", dir.display(), e);
                continue;
            }
        };

        let path = entry.path();
        if !path.is_file() {
            continue;
        }

        let matches = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case(extension));
        if matches {
            paths.push(path);
        } else {
            debug!("Ignoring '{}' (extension mismatch)", path.display());
        }
    }

    paths.sort_by(|a, b| a.file_name().cmp(&b.file_name()));
    Ok(paths)
}

/// Identifier for a document path in logs and errors
pub fn item_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Read and decode one document
///
/// # Errors
///
/// `ItemError::Read` on I/O failure, `ItemError::Decode` if the bytes are not
/// valid JSON.
pub fn read_document(path: &Path) -> Result<InputDocument, ItemError> {
    let item = item_name(path);

    let bytes = fs::read(path).map_err(|e| ItemError::Read {
        item: item.clone(),
        message: e.to_string(),
    })?;

    InputDocument::from_slice(item.clone(), &bytes).map_err(|e| ItemError::Decode {
        item,
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_lists_matching_files_sorted() {
        let dir = tempdir().unwrap();
        for name in ["b.json", "a.JSON", "c.txt", "d.json"] {
            fs::write(dir.path().join(name), "{}").unwrap();
        }
        fs::create_dir(dir.path().join("nested.json")).unwrap();

        let paths = list_documents(dir.path(), "json").unwrap();
        let names: Vec<String> = paths.iter().map(|p| item_name(p)).collect();
        assert_eq!(names, vec!["a.JSON", "b.json", "d.json"]);
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");
        let result = list_documents(&missing, "json");
        assert!(matches!(result, Err(RefinerError::InputDirectory { .. })));
    }

    #[test]
    fn test_read_document_decode_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{ not json").unwrap();

        match read_document(&path) {
            Err(ItemError::Decode { item, .. }) => assert_eq!(item, "broken.json"),
            other => panic!("Expected Decode error, got {:?}", other),
        }
    }

    #[test]
    fn test_read_document_missing_file() {
        let dir = tempdir().unwrap();
        let result = read_document(&dir.path().join("gone.json"));
        assert!(matches!(result, Err(ItemError::Read { .. })));
    }

    #[test]
    fn test_read_document_ok() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("ok.json");
        fs::write(&path, r#"{"dataSet": {}}"#).unwrap();

        let doc = read_document(&path).unwrap();
        assert_eq!(doc.source, "ok.json");
    }
}
