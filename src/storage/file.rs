use std::path::{Path, PathBuf};
use crate::error::VocabError;
use super::KeyValueStore;

/// One JSON file per key inside a data directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(dir: P) -> Self {
        FileStore { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// `@quiz_stats` -> `<dir>/quiz_stats.json`
    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .trim_start_matches('@')
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.json", name))
    }
}

impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, VocabError> {
        let path = self.path_for(key);
        match tokio::fs::read_to_string(&path).await {
            Ok(content) => Ok(Some(content)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(VocabError::storage(format!("Failed to read {}: {}", key, e))
                .with_context(format!("path: {:?}", path))
                .with_source("std::io")),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), VocabError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|e| VocabError::storage(format!("Failed to create directory: {}", e))
                .with_context(format!("path: {:?}", self.dir)))?;

        let path = self.path_for(key);
        tokio::fs::write(&path, value)
            .await
            .map_err(|e| VocabError::storage(format!("Failed to write {}: {}", key, e))
                .with_context(format!("path: {:?}", path)))
    }

    async fn remove(&self, key: &str) -> Result<(), VocabError> {
        let path = self.path_for(key);
        match tokio::fs::remove_file(&path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(VocabError::storage(format!("Failed to remove {}: {}", key, e))
                .with_context(format!("path: {:?}", path))),
        }
    }
}
