//! Resource resolution.
//!
//! The parser and response builder never touch the filesystem directly; they
//! go through a [`ResourceResolver`]. [`FsResolver`] serves files from a
//! document root, [`MemoryResolver`] keeps resources in a map and is what the
//! tests use.

use std::collections::HashMap;
use std::future::Future;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;

/// Answers whether a resource exists and hands out its contents.
///
/// Paths are relative identifiers as produced by the request parser
/// (`"index.html"`, `"css/site.css"`), never starting with `/`.
pub trait ResourceResolver: Send + Sync {
    /// Existence check only; the resource is not opened.
    fn exists(&self, path: &str) -> impl Future<Output = bool> + Send;

    /// Reads the complete resource.
    fn open(&self, path: &str) -> impl Future<Output = io::Result<Vec<u8>>> + Send;
}

/// Serves regular files below a document root.
#[derive(Debug, Clone)]
pub struct FsResolver {
    root: PathBuf,
}

impl FsResolver {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a request path onto the document root.
    ///
    /// Returns `None` for anything that could escape the root: `..`
    /// segments, absolute paths and drive prefixes.
    pub fn resolve(&self, path: &str) -> Option<PathBuf> {
        let rel = Path::new(path);
        let escapes = rel.components().any(|c| {
            matches!(
                c,
                Component::ParentDir | Component::RootDir | Component::Prefix(_)
            )
        });
        if escapes {
            tracing::warn!(path, "rejected path outside document root");
            return None;
        }
        Some(self.root.join(rel))
    }
}

impl ResourceResolver for FsResolver {
    async fn exists(&self, path: &str) -> bool {
        let Some(full) = self.resolve(path) else {
            return false;
        };
        tokio::fs::metadata(&full)
            .await
            .map(|meta| meta.is_file())
            .unwrap_or(false)
    }

    async fn open(&self, path: &str) -> io::Result<Vec<u8>> {
        let full = self.resolve(path).ok_or_else(|| {
            io::Error::new(io::ErrorKind::PermissionDenied, "path outside document root")
        })?;
        tokio::fs::read(full).await
    }
}

/// In-memory resources keyed by request path.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    files: Arc<HashMap<String, Vec<u8>>>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file(mut self, path: impl Into<String>, contents: impl Into<Vec<u8>>) -> Self {
        Arc::make_mut(&mut self.files).insert(path.into(), contents.into());
        self
    }
}

impl ResourceResolver for MemoryResolver {
    async fn exists(&self, path: &str) -> bool {
        self.files.contains_key(path)
    }

    async fn open(&self, path: &str) -> io::Result<Vec<u8>> {
        self.files
            .get(path)
            .cloned()
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, path.to_string()))
    }
}
