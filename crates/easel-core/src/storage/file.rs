//! Board files on disk.

use super::{file_to_store, store_to_file, BoardFile, StorageError, StorageResult};
use crate::fonts::FontRegistry;
use crate::store::ObjectStore;
use std::fs;
use std::path::PathBuf;

/// File extension for saved boards.
pub const BOARD_EXTENSION: &str = "pcso";
/// Directory boards are kept in when none is configured.
pub const DEFAULT_BOARD_DIR: &str = "./boards";

/// Stores boards as JSON files in a base directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    base_path: PathBuf,
}

impl Default for FileStorage {
    fn default() -> Self {
        Self {
            base_path: PathBuf::from(DEFAULT_BOARD_DIR),
        }
    }
}

impl FileStorage {
    /// Create storage rooted at the given directory. The directory is
    /// created lazily on the first save.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// Path for a board name, sanitized for the filesystem.
    fn board_path(&self, name: &str) -> PathBuf {
        let safe_name: String = name
            .chars()
            .map(|c| {
                if c.is_alphanumeric() || c == '-' || c == '_' {
                    c
                } else {
                    '_'
                }
            })
            .collect();
        self.base_path
            .join(format!("{safe_name}.{BOARD_EXTENSION}"))
    }

    /// Save a store under a board name.
    pub fn save(&self, name: &str, store: &ObjectStore) -> StorageResult<()> {
        fs::create_dir_all(&self.base_path)?;
        let path = self.board_path(name);
        let json = serde_json::to_string(&store_to_file(store))?;
        fs::write(&path, json)?;
        log::info!("saved board {name:?} to {}", path.display());
        Ok(())
    }

    /// Load a board by name. A missing board is `NotFound` and leaves
    /// no partial state behind.
    pub fn load(&self, name: &str, fonts: &FontRegistry) -> StorageResult<ObjectStore> {
        let path = self.board_path(name);
        if !path.exists() {
            return Err(StorageError::NotFound(name.to_string()));
        }
        let json = fs::read_to_string(&path)?;
        let file: BoardFile = serde_json::from_str(&json)?;
        Ok(file_to_store(&file, fonts))
    }

    pub fn exists(&self, name: &str) -> bool {
        self.board_path(name).exists()
    }

    /// Delete a board if present.
    pub fn delete(&self, name: &str) -> StorageResult<()> {
        let path = self.board_path(name);
        if path.exists() {
            fs::remove_file(path)?;
        }
        Ok(())
    }

    /// Names of all saved boards.
    pub fn list(&self) -> StorageResult<Vec<String>> {
        if !self.base_path.exists() {
            return Ok(Vec::new());
        }
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.base_path)?.flatten() {
            let path = entry.path();
            if path.extension().is_some_and(|e| e == BOARD_EXTENSION) {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    names.push(stem.to_string());
                }
            }
        }
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shapes::{Line, Shape};
    use kurbo::Point;
    use tempfile::tempdir;

    fn sample_store() -> ObjectStore {
        let mut store = ObjectStore::new();
        store.insert(Shape::Line(Line::new(
            Point::new(0.0, 0.0),
            Point::new(10.0, 10.0),
        )));
        store
    }

    #[test]
    fn test_save_load_round_trip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.save("test-board", &sample_store()).unwrap();

        let loaded = storage
            .load("test-board", &FontRegistry::with_fallback())
            .unwrap();
        assert_eq!(loaded.len(), 1);
    }

    #[test]
    fn test_empty_board_round_trip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.save("blank", &ObjectStore::new()).unwrap();
        let loaded = storage
            .load("blank", &FontRegistry::with_fallback())
            .unwrap();
        assert!(loaded.is_empty());
    }

    #[test]
    fn test_missing_board_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        let result = storage.load("nope", &FontRegistry::with_fallback());
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn test_list_and_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.save("one", &sample_store()).unwrap();
        storage.save("two", &sample_store()).unwrap();

        let mut names = storage.list().unwrap();
        names.sort();
        assert_eq!(names, vec!["one", "two"]);

        storage.delete("one").unwrap();
        assert!(!storage.exists("one"));
        assert!(storage.exists("two"));
    }

    #[test]
    fn test_name_sanitized() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path());
        storage.save("my board/v2", &sample_store()).unwrap();
        assert!(storage.exists("my board/v2"));
    }
}
