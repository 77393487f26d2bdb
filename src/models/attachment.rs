// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Attachment metadata and size policy for the upload control (UI-agnostic).

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Largest accepted upload: 2048 KiB.
pub const MAX_FILE_BYTES: u64 = 2048 * 1024;

/// Message shown when a picked file exceeds [`MAX_FILE_BYTES`].
pub const OVERSIZE_MESSAGE: &str = "File is too big! Maximum size is 2MB.";

/// Placeholder shown in the file info line while nothing is attached.
pub const EMPTY_INFO: &str = "No file chosen (Max size: 2MB)";

/// Default caption of the file picker label.
pub const EMPTY_LABEL: &str = "Choose a file";

/// Name and size of a file attached to an upload control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FileMeta {
    pub name: String,
    pub size: u64,
    /// Source path when the file came from the local filesystem.
    pub path: Option<PathBuf>,
}

impl FileMeta {
    pub fn new(name: impl Into<String>, size: u64) -> Self {
        Self {
            name: name.into(),
            size,
            path: None,
        }
    }

    /// Read name and size from a file on disk.
    ///
    /// # Errors
    ///
    /// Returns an error when the file metadata cannot be read.
    pub fn from_path(path: &Path) -> Result<Self> {
        let size = path
            .metadata()
            .with_context(|| format!("Failed to read file metadata: {:?}", path))?
            .len();
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| "attachment".to_string());
        Ok(Self {
            name,
            size,
            path: Some(path.to_path_buf()),
        })
    }

    /// Whether the file fits under the upload ceiling.
    pub fn within_limit(&self) -> bool {
        self.size <= MAX_FILE_BYTES
    }

    /// Info line shown under the picker, e.g. `cv.pdf (1.25 MB)`.
    pub fn describe(&self) -> String {
        format!("{} ({:.2} MB)", self.name, self.size as f64 / (1024.0 * 1024.0))
    }
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::*;

    #[test]
    fn limit_is_inclusive_at_2048_kib() {
        assert!(FileMeta::new("a.pdf", 2048 * 1024).within_limit());
        assert!(FileMeta::new("a.pdf", 1024).within_limit());
        assert!(!FileMeta::new("a.pdf", 2049 * 1024).within_limit());
        assert!(!FileMeta::new("a.pdf", 2048 * 1024 + 1).within_limit());
    }

    #[test]
    fn describe_uses_megabytes_with_two_decimals() {
        let file = FileMeta::new("cv.pdf", 1024 * 1024 + 256 * 1024);
        assert_eq!(file.describe(), "cv.pdf (1.25 MB)");
    }

    #[test]
    fn from_path_reads_name_and_size() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("resume.txt");
        fs::write(&path, b"0123456789").unwrap();

        let meta = FileMeta::from_path(&path).unwrap();

        assert_eq!(meta.name, "resume.txt");
        assert_eq!(meta.size, 10);
        assert_eq!(meta.path.as_deref(), Some(path.as_path()));
    }

    #[test]
    fn from_path_reports_missing_file() {
        let tmp = TempDir::new().unwrap();
        let err = FileMeta::from_path(&tmp.path().join("gone.bin")).unwrap_err();
        assert!(err.to_string().contains("Failed to read file metadata"));
    }
}
