/// File handling utilities
///
/// This module provides functions for reading log files and collecting file
/// metadata. Reading never fails on bad encoding: invalid UTF-8 is replaced.

use std::collections::BTreeMap;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use memmap2::Mmap;

/// Files larger than this are memory-mapped instead of read into a buffer
#[cfg(not(test))]
const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024;
#[cfg(test)]
const MMAP_THRESHOLD: u64 = 64;

/// Errors raised while locating or reading a log file
#[derive(Debug, thiserror::Error)]
pub enum LogFileError {
    /// The path does not exist
    #[error("log file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// The path exists but is not a regular file
    #[error("not a file: {}", path.display())]
    NotAFile { path: PathBuf },

    /// Reading failed
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl LogFileError {
    fn io(path: &Path, source: io::Error) -> Self {
        LogFileError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}

/// Read the full text of a log file.
///
/// # Arguments
///
/// * `file_path` - Path to the log file
///
/// # Returns
///
/// The decoded file content, with invalid UTF-8 sequences replaced by U+FFFD
pub fn read_log_text(file_path: &Path) -> Result<String, LogFileError> {
    if !file_path.exists() {
        return Err(LogFileError::NotFound {
            path: file_path.to_path_buf(),
        });
    }

    let metadata = fs::metadata(file_path).map_err(|e| LogFileError::io(file_path, e))?;
    if !metadata.is_file() {
        return Err(LogFileError::NotAFile {
            path: file_path.to_path_buf(),
        });
    }

    let text = if metadata.len() > MMAP_THRESHOLD {
        info!(
            "Using memory-mapped read for large file ({} bytes)",
            metadata.len()
        );
        let file = File::open(file_path).map_err(|e| LogFileError::io(file_path, e))?;
        // SAFETY: the map is read-only and dropped before this function returns
        let mmap = unsafe { Mmap::map(&file) }.map_err(|e| LogFileError::io(file_path, e))?;
        decode_lossy(file_path, &mmap)
    } else {
        let bytes = fs::read(file_path).map_err(|e| LogFileError::io(file_path, e))?;
        decode_lossy(file_path, &bytes)
    };

    debug!("Read {} bytes from {}", text.len(), file_path.display());
    Ok(text)
}

/// Decode bytes as UTF-8, warning when replacement was needed
fn decode_lossy(file_path: &Path, bytes: &[u8]) -> String {
    match std::str::from_utf8(bytes) {
        Ok(text) => text.to_string(),
        Err(_) => {
            warn!(
                "{} contains invalid UTF-8, replacing undecodable bytes",
                file_path.display()
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}

/// Get file metadata for a given path.
///
/// # Arguments
///
/// * `file_path` - Path to the file
///
/// # Returns
///
/// A map of metadata names to values
pub fn get_file_metadata(file_path: &Path) -> Result<BTreeMap<String, String>, LogFileError> {
    let mut metadata_map = BTreeMap::new();

    metadata_map.insert(
        "file_name".to_string(),
        file_path
            .file_name()
            .map(|name| name.to_string_lossy().to_string())
            .unwrap_or_else(|| "unknown".to_string()),
    );

    let metadata = fs::metadata(file_path).map_err(|e| LogFileError::io(file_path, e))?;
    metadata_map.insert("file_size".to_string(), metadata.len().to_string());

    if let Ok(modified) = metadata.modified() {
        let modified: chrono::DateTime<chrono::Local> = modified.into();
        metadata_map.insert(
            "modified".to_string(),
            modified.format("%Y-%m-%d %H:%M:%S").to_string(),
        );
    }

    Ok(metadata_map)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file() {
        let err = read_log_text(Path::new("definitely/not/here.log")).unwrap_err();
        assert!(matches!(err, LogFileError::NotFound { .. }));
        assert!(err.to_string().contains("definitely/not/here.log"));
    }

    #[test]
    fn test_directory_is_not_a_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = read_log_text(dir.path()).unwrap_err();
        assert!(matches!(err, LogFileError::NotAFile { .. }));
    }

    #[test]
    fn test_invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.log");
        fs::write(&path, b"PASS \xc3\x28 FAIL_x").unwrap();

        let text = read_log_text(&path).unwrap();
        assert!(text.starts_with("PASS "));
        assert!(text.contains('\u{FFFD}'));
        assert!(text.ends_with(" FAIL_x"));
    }

    #[test]
    fn test_large_file_is_memory_mapped_and_decoded_lossily() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("large.log");

        let mut bytes = b"PASS,FAIL_err1\n".repeat(8);
        bytes.extend_from_slice(b"\xffFAIL_err9 weird\n");
        assert!(bytes.len() as u64 > MMAP_THRESHOLD);
        fs::write(&path, &bytes).unwrap();

        let text = read_log_text(&path).unwrap();
        assert_eq!(text, decode_lossy(&path, &fs::read(&path).unwrap()));
        assert!(text.contains("\u{FFFD}FAIL_err9"));

        let tokens = crate::core::tokenizer::tokenize(&text);
        assert_eq!(tokens.len(), 18);
        assert_eq!(tokens[16], "\u{FFFD}FAIL_err9");
        assert_eq!(tokens[17], "weird");
    }

    #[test]
    fn test_metadata() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("run.log");
        fs::write(&path, "PASS").unwrap();

        let metadata = get_file_metadata(&path).unwrap();
        assert_eq!(metadata["file_name"], "run.log");
        assert_eq!(metadata["file_size"], "4");
        assert!(metadata.contains_key("modified"));
    }
}
