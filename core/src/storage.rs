/*
 * SPDX-FileCopyrightText: 2025 WellAtlas Contributors
 *
 * SPDX-License-Identifier: AGPL-3.0-only
 */

use chrono::Utc;
use std::fs;
use std::path::{Path, PathBuf};

use super::consts::UPLOAD_DIR_NAME;
use super::input::{allowed_upload, sanitize_file_name};

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("file type not allowed: {0}")]
    NotAllowed(String),
    #[error("invalid storage name: {0}")]
    InvalidName(String),
    #[error("file not found: {0}")]
    NotFound(String),
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Directory-backed store for uploaded attachments, addressed purely by
/// generated storage name. Names are timestamp-prefixed so two uploads
/// of the same file never collide.
#[derive(Debug)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new(data_dir: &str) -> std::io::Result<Self> {
        let root = Path::new(data_dir).join(UPLOAD_DIR_NAME);
        fs::create_dir_all(&root)?;

        Ok(FileStore { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn generate_storage_name(original_name: &str) -> String {
        format!(
            "{}_{}",
            Utc::now().format("%Y%m%d%H%M%S%6f"),
            sanitize_file_name(original_name)
        )
    }

    /// Writes uploaded bytes and returns the generated storage name,
    /// the only key under which the bytes can be fetched back.
    pub fn save(&self, original_name: &str, bytes: &[u8]) -> Result<String, StorageError> {
        if !allowed_upload(original_name) {
            return Err(StorageError::NotAllowed(original_name.to_string()));
        }

        let name = Self::generate_storage_name(original_name);
        fs::write(self.root.join(&name), bytes)?;

        Ok(name)
    }

    pub fn read(&self, name: &str) -> Result<Vec<u8>, StorageError> {
        let path = self.path(name)?;

        if !path.is_file() {
            return Err(StorageError::NotFound(name.to_string()));
        }

        Ok(fs::read(path)?)
    }

    pub fn path(&self, name: &str) -> Result<PathBuf, StorageError> {
        if name.is_empty() || name.contains('/') || name.contains('\\') || name.contains("..") {
            return Err(StorageError::InvalidName(name.to_string()));
        }

        Ok(self.root.join(name))
    }

    /// Every file currently on disk, whether or not a database row still
    /// references it. The backup archiver keeps orphans on purpose.
    pub fn list(&self) -> std::io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for dir_entry in fs::read_dir(&self.root)? {
            let path = dir_entry?.path();
            if path.is_file() {
                files.push(path);
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn store() -> (TempDir, FileStore) {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().to_str().unwrap()).unwrap();
        (dir, store)
    }

    #[test]
    fn save_and_read_roundtrip() {
        let (_dir, store) = store();

        let name = store.save("pump curve.pdf", b"%PDF-1.4").unwrap();
        assert!(name.ends_with("_pump_curve.pdf"));
        assert_eq!(store.read(&name).unwrap(), b"%PDF-1.4");
    }

    #[test]
    fn rejects_disallowed_extension() {
        let (_dir, store) = store();

        assert!(matches!(
            store.save("setup.exe", b"MZ"),
            Err(StorageError::NotAllowed(_))
        ));
    }

    #[test]
    fn rejects_traversal_names() {
        let (_dir, store) = store();

        assert!(store.path("../wellatlas.db").is_err());
        assert!(store.path("a/b.png").is_err());
        assert!(store.path("").is_err());
        assert!(store.path("20240105_photo.png").is_ok());
    }

    #[test]
    fn missing_file_is_not_found() {
        let (_dir, store) = store();

        assert!(matches!(
            store.read("20240105093000000000_gone.png"),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn lists_everything_on_disk() {
        let (_dir, store) = store();

        assert!(store.list().unwrap().is_empty());

        let a = store.save("a.png", b"a").unwrap();
        let b = store.save("b.png", b"b").unwrap();

        let listed = store.list().unwrap();
        assert_eq!(listed.len(), 2);
        let names: Vec<String> = listed
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().to_string())
            .collect();
        assert!(names.contains(&a));
        assert!(names.contains(&b));
    }
}
