//! Real file system implementation.

use std::io;
use std::path::{Path, PathBuf};

use ctxvar_application::ports::{FileSystem, FileSystemError};
use tokio::fs;
use tracing::debug;
use walkdir::{DirEntry, WalkDir};

/// Real file system implementation using `tokio::fs`.
#[derive(Debug, Clone, Default)]
pub struct TokioFileSystem;

impl TokioFileSystem {
    /// Creates a new `TokioFileSystem`.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

fn map_io_error(error: io::Error, path: &Path) -> FileSystemError {
    match error.kind() {
        io::ErrorKind::NotFound => FileSystemError::NotFound(path.to_path_buf()),
        io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied(path.to_path_buf()),
        _ => FileSystemError::Io(error),
    }
}

fn is_hidden(entry: &DirEntry) -> bool {
    entry.file_name().to_str().is_some_and(|name| name.starts_with('.'))
}

/// Walks `root` synchronously, collecting regular files in name order.
fn walk_files(root: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
    if !root.is_dir() {
        return Err(FileSystemError::NotFound(root.to_path_buf()));
    }

    let mut files = Vec::new();
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| entry.depth() == 0 || !is_hidden(entry));
    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(error) => {
                debug!(%error, "skipping unreadable entry");
                continue;
            }
        };
        if entry.file_type().is_file() {
            files.push(entry.into_path());
        }
    }
    Ok(files)
}

impl FileSystem for TokioFileSystem {
    async fn read_file_string(&self, path: &Path) -> Result<String, FileSystemError> {
        if fs::metadata(path).await.is_ok_and(|m| m.is_dir()) {
            return Err(FileSystemError::NotAFile(path.to_path_buf()));
        }
        fs::read_to_string(path)
            .await
            .map_err(|e| map_io_error(e, path))
    }

    async fn is_file(&self, path: &Path) -> bool {
        fs::metadata(path).await.is_ok_and(|m| m.is_file())
    }

    async fn list_files(&self, root: &Path) -> Result<Vec<PathBuf>, FileSystemError> {
        let root = root.to_path_buf();
        tokio::task::spawn_blocking(move || walk_files(&root))
            .await
            .map_err(|e| FileSystemError::Io(io::Error::other(e)))?
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn workspace() -> TempDir {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("src")).unwrap();
        std::fs::create_dir_all(dir.path().join(".git")).unwrap();
        std::fs::write(dir.path().join("src/lib.rs"), "pub fn x() {}").unwrap();
        std::fs::write(dir.path().join("Cargo.toml"), "[package]").unwrap();
        std::fs::write(dir.path().join(".git/HEAD"), "ref").unwrap();
        std::fs::write(dir.path().join(".env"), "SECRET=1").unwrap();
        dir
    }

    #[tokio::test]
    async fn reads_file_contents() {
        let dir = workspace();
        let fs = TokioFileSystem::new();

        let contents = fs
            .read_file_string(&dir.path().join("src/lib.rs"))
            .await
            .unwrap();
        assert_eq!(contents, "pub fn x() {}");
    }

    #[tokio::test]
    async fn reading_missing_file_reports_not_found() {
        let dir = workspace();
        let path = dir.path().join("missing.txt");

        let error = TokioFileSystem::new()
            .read_file_string(&path)
            .await
            .unwrap_err();
        assert!(matches!(error, FileSystemError::NotFound(p) if p == path));
    }

    #[tokio::test]
    async fn reading_directory_reports_not_a_file() {
        let dir = workspace();

        let error = TokioFileSystem::new()
            .read_file_string(&dir.path().join("src"))
            .await
            .unwrap_err();
        assert!(matches!(error, FileSystemError::NotAFile(_)));
    }

    #[tokio::test]
    async fn is_file_distinguishes_files_and_directories() {
        let dir = workspace();
        let fs = TokioFileSystem::new();

        assert!(fs.is_file(&dir.path().join("Cargo.toml")).await);
        assert!(!fs.is_file(&dir.path().join("src")).await);
        assert!(!fs.is_file(&dir.path().join("nope")).await);
    }

    #[tokio::test]
    async fn list_files_skips_hidden_entries() {
        let dir = workspace();

        let files = TokioFileSystem::new().list_files(dir.path()).await.unwrap();
        let relative: Vec<_> = files
            .iter()
            .map(|f| f.strip_prefix(dir.path()).unwrap().to_path_buf())
            .collect();

        assert_eq!(
            relative,
            vec![PathBuf::from("Cargo.toml"), PathBuf::from("src/lib.rs")]
        );
    }

    #[tokio::test]
    async fn list_files_of_missing_root_fails() {
        let dir = workspace();
        let result = TokioFileSystem::new()
            .list_files(&dir.path().join("absent"))
            .await;
        assert!(matches!(result, Err(FileSystemError::NotFound(_))));
    }
}
