//! File access for the `/files/` routes.

use std::io;
use std::path::{Component, Path, PathBuf};

/// Reads and writes files relative to the served directory.
///
/// Without a configured directory every operation fails, so file routes
/// answer 404. Names that would leave the directory (`..`, absolute paths)
/// are refused the same way.
#[derive(Debug, Clone, Default)]
pub struct FileStore {
    root: Option<PathBuf>,
}

impl FileStore {
    pub fn new(root: Option<PathBuf>) -> Self {
        Self { root }
    }

    pub fn root(&self) -> Option<&Path> {
        self.root.as_deref()
    }

    /// Maps a captured name onto a path inside the served directory.
    pub fn resolve(&self, name: &str) -> io::Result<PathBuf> {
        let root = self
            .root
            .as_ref()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "no directory configured"))?;

        let escapes = Path::new(name).components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            return Err(io::Error::new(
                io::ErrorKind::InvalidInput,
                "file name escapes the served directory",
            ));
        }

        Ok(root.join(name))
    }

    pub async fn read(&self, name: &str) -> io::Result<Vec<u8>> {
        let path = self.resolve(name)?;
        tokio::fs::read(&path).await
    }

    /// Creates or truncates `name` and writes `contents` to it.
    pub async fn write(&self, name: &str, contents: &[u8]) -> io::Result<()> {
        let path = self.resolve(name)?;
        tokio::fs::write(&path, contents).await
    }
}
