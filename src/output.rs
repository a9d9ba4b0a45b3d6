/// Result persistence.
///
/// Documents are written pretty-printed (4-space indent) to a temporary file
/// in the destination directory and then renamed over the target, so readers
/// never observe a half-written file and a failed run leaves any previous
/// output untouched.

use std::fs;
use std::io::Write;
use std::path::Path;

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use tempfile::NamedTempFile;

use crate::model::OutputError;

/// Serialize `value` as indented JSON, with a trailing newline.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, OutputError> {
    let mut buf = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buf, PrettyFormatter::with_indent(b"    "));
    value.serialize(&mut serializer)?;
    buf.push(b'\n');
    Ok(buf)
}

/// Atomically replace `path` with `value` as pretty JSON, creating the parent
/// directory if needed.
pub fn write_json_atomic<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), OutputError> {
    let bytes = to_pretty_json(value)?;
    let io_err = |source: std::io::Error| OutputError::Io { path: path.to_path_buf(), source };

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    fs::create_dir_all(dir).map_err(io_err)?;

    let mut tmp = NamedTempFile::new_in(dir).map_err(io_err)?;
    tmp.write_all(&bytes).map_err(io_err)?;
    tmp.as_file().sync_all().map_err(io_err)?;
    tmp.persist(path).map_err(|e| io_err(e.error))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pretty_json_uses_four_space_indent() {
        let bytes = to_pretty_json(&json!({"a": 1})).unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "{\n    \"a\": 1\n}\n");
    }

    #[test]
    fn test_write_creates_missing_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("api_data").join("nested").join("out.json");

        write_json_atomic(&path, &json!({"temperature_C": 21.0})).unwrap();

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written["temperature_C"], 21.0);
    }

    #[test]
    fn test_write_replaces_existing_file_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out.json");
        fs::write(&path, "old contents").unwrap();

        write_json_atomic(&path, &json!([1, 2, 3])).unwrap();

        let written: serde_json::Value = serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(written, json!([1, 2, 3]));
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 1, "temp file must be renamed away");
    }

    #[test]
    fn test_write_into_a_file_path_parent_fails_cleanly() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not_a_dir");
        fs::write(&blocker, "x").unwrap();

        let err = write_json_atomic(&blocker.join("out.json"), &json!({})).unwrap_err();
        assert!(matches!(err, OutputError::Io { .. }));
    }
}
