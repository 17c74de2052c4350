//! Scoped JSON document I/O shared by the config, alias and cache stores.
//!
//! Two rules apply to every persisted document:
//! - loads never hard-fail: a missing file is the default value, a corrupt
//!   file is the default value plus a warning (bookkeeping must not block
//!   the rest of the tool);
//! - saves are a single atomic replace (write to a temp path, rename), so
//!   a crash mid-write never leaves a half-written file.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Result;

/// Load a JSON document, treating absence and corruption as the default.
pub fn load_or_default<T>(path: &Path) -> T
where
    T: DeserializeOwned + Default,
{
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return T::default(),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read document; treating as empty");
            return T::default();
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt document; treating as empty");
            T::default()
        }
    }
}

/// Load a JSON document, treating absence and corruption as a miss.
pub fn load_optional<T>(path: &Path) -> Option<T>
where
    T: DeserializeOwned,
{
    let contents = match fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => return None,
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "failed to read document; treating as miss");
            return None;
        }
    };

    match serde_json::from_str(&contents) {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "corrupt document; treating as miss");
            None
        }
    }
}

/// Save a JSON document with atomic replace.
///
/// Parent directories are created as needed. Uses write-to-temp + rename.
///
/// # Errors
///
/// Returns `Io` if the file cannot be written, or `Json` on
/// serialization failure.
pub fn save<T>(path: &Path, value: &T) -> Result<()>
where
    T: Serialize,
{
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(value)?;

    let tmp_path = path.with_extension("json.tmp");
    let mut file = fs::File::create(&tmp_path)?;
    file.write_all(json.as_bytes())?;
    file.write_all(b"\n")?;
    file.flush()?;
    drop(file);

    fs::rename(&tmp_path, path)?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    type Doc = BTreeMap<String, String>;

    #[test]
    fn test_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");

        let mut doc = Doc::new();
        doc.insert("default_team".to_string(), "abc".to_string());
        save(&path, &doc).unwrap();

        let loaded: Doc = load_or_default(&path);
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_missing_file_is_default() {
        let loaded: Doc = load_or_default(Path::new("/nonexistent/doc.json"));
        assert!(loaded.is_empty());
        let opt: Option<Doc> = load_optional(Path::new("/nonexistent/doc.json"));
        assert!(opt.is_none());
    }

    #[test]
    fn test_corrupt_file_is_default() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, "{not valid json").unwrap();

        let loaded: Doc = load_or_default(&path);
        assert!(loaded.is_empty());
        let opt: Option<Doc> = load_optional(&path);
        assert!(opt.is_none());
    }

    #[test]
    fn test_save_creates_parent_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("deep").join("doc.json");

        let mut doc = Doc::new();
        doc.insert("k".to_string(), "v".to_string());
        save(&path, &doc).unwrap();

        let loaded: Doc = load_or_default(&path);
        assert_eq!(loaded.get("k").map(String::as_str), Some("v"));
    }

    #[test]
    fn test_save_replaces_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        fs::write(&path, "garbage").unwrap();

        let mut doc = Doc::new();
        doc.insert("k".to_string(), "v".to_string());
        save(&path, &doc).unwrap();

        let loaded: Doc = load_or_default(&path);
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_no_tmp_file_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("doc.json");
        save(&path, &Doc::new()).unwrap();

        let entries: Vec<_> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(entries, vec![std::ffi::OsString::from("doc.json")]);
    }
}
