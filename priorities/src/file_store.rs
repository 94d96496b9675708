//! Device-local storage: one JSON file per key under a data directory.

use priorities_core::storage::{KeyValueStore, StorageError, StorageFuture};
use std::io::ErrorKind;
use std::path::PathBuf;

/// File-backed [`KeyValueStore`]
///
/// `set` writes to a uniquely named temporary file and renames it over the
/// target, so readers only ever see a complete previous or complete new value.
/// The data directory is created on first write. If its path is taken by a
/// file, every call fails with [`StorageError::Unavailable`].
///
/// # Example
///
/// ```no_run
/// use priorities::file_store::FileKeyValueStore;
/// use priorities_core::storage::KeyValueStore;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let store = FileKeyValueStore::new(".priorities");
/// store.set("priorities_todos", "[]".to_string()).await?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    root: PathBuf,
}

impl FileKeyValueStore {
    /// Creates a store rooted at `root`
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File holding `key`
    ///
    /// Keys are restricted to ASCII letters, digits, `_` and `-` so they can
    /// never escape the data directory.
    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .bytes()
                .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(format!("{key}.json")))
    }

    /// The data directory path must be a directory or not exist yet
    async fn check_root(&self) -> Result<(), StorageError> {
        match tokio::fs::metadata(&self.root).await {
            Ok(meta) if !meta.is_dir() => Err(StorageError::Unavailable(format!(
                "{} is not a directory",
                self.root.display()
            ))),
            _ => Ok(()),
        }
    }
}

fn io_error(key: &str, error: &std::io::Error) -> StorageError {
    StorageError::Io {
        key: key.to_string(),
        message: error.to_string(),
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get<'a>(&'a self, key: &'a str) -> StorageFuture<'a, Option<String>> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            self.check_root().await?;
            match tokio::fs::read_to_string(&path).await {
                Ok(raw) => Ok(Some(raw)),
                Err(error) if error.kind() == ErrorKind::NotFound => Ok(None),
                Err(error) => Err(io_error(key, &error)),
            }
        })
    }

    fn set<'a>(&'a self, key: &'a str, value: String) -> StorageFuture<'a, ()> {
        Box::pin(async move {
            let path = self.path_for(key)?;
            self.check_root().await?;
            tokio::fs::create_dir_all(&self.root)
                .await
                .map_err(|e| io_error(key, &e))?;

            // Unique per write so overlapping writes never share a temp file
            let tmp = self
                .root
                .join(format!("{key}.{}.tmp", uuid::Uuid::new_v4().simple()));

            if let Err(error) = tokio::fs::write(&tmp, value.as_bytes()).await {
                let _ = tokio::fs::remove_file(&tmp).await;
                return Err(io_error(key, &error));
            }
            if let Err(error) = tokio::fs::rename(&tmp, &path).await {
                let _ = tokio::fs::remove_file(&tmp).await;
                return Err(io_error(key, &error));
            }

            tracing::trace!(path = %path.display(), bytes = value.len(), "Wrote storage file");
            Ok(())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());
        assert_eq!(store.get("priorities_todos").await.unwrap(), None);
    }

    #[tokio::test]
    async fn set_creates_directory_and_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path().join("nested"));

        store.set("priorities_todos", "[1]".to_string()).await.unwrap();
        store.set("priorities_todos", "[]".to_string()).await.unwrap();

        assert_eq!(
            store.get("priorities_todos").await.unwrap().as_deref(),
            Some("[]")
        );
        let on_disk = std::fs::read_to_string(dir.path().join("nested/priorities_todos.json")).unwrap();
        assert_eq!(on_disk, "[]");
    }

    #[tokio::test]
    async fn no_temp_files_left_behind() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        store.set("k", "v".to_string()).await.unwrap();

        let names: Vec<String> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, ["k.json"]);
    }

    #[tokio::test]
    async fn rejects_keys_that_could_escape_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileKeyValueStore::new(dir.path());

        for key in ["", "../outside", "a/b", "a.b"] {
            assert_eq!(
                store.get(key).await,
                Err(StorageError::InvalidKey(key.to_string())),
                "key {key:?}"
            );
        }
    }

    #[tokio::test]
    async fn root_that_is_a_file_is_unavailable() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let store = FileKeyValueStore::new(file.path());

        assert!(matches!(
            store.get("priorities_todos").await,
            Err(StorageError::Unavailable(_))
        ));
        assert!(matches!(
            store.set("priorities_todos", "[]".to_string()).await,
            Err(StorageError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn unreadable_path_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        // The key's file is a directory, so reading it fails with something other than NotFound
        std::fs::create_dir(dir.path().join("k.json")).unwrap();
        let store = FileKeyValueStore::new(dir.path());

        assert!(matches!(store.get("k").await, Err(StorageError::Io { .. })));
    }
}
