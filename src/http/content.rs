//! Content lookup for `Response::forward`.
//!
//! A [`ContentLoader`] resolves a logical request path below one of the two
//! content roots. Absence is the only failure it reports; the response
//! builder turns it into a 404.

use std::collections::HashMap;
use std::io;
use std::path::{Component, Path, PathBuf};

use bytes::Bytes;

use crate::http::mime::ContentRoot;

pub trait ContentLoader: Send + Sync {
    /// Loads the payload for `path` (e.g. `/css/styles.css`) from `root`.
    fn load(&self, root: ContentRoot, path: &str) -> Option<Bytes>;
}

/// Serves files from two directories on disk.
#[derive(Debug, Clone)]
pub struct FileSystemLoader {
    static_root: PathBuf,
    template_root: PathBuf,
}

impl FileSystemLoader {
    pub fn new(static_root: impl Into<PathBuf>, template_root: impl Into<PathBuf>) -> Self {
        Self {
            static_root: static_root.into(),
            template_root: template_root.into(),
        }
    }

    fn root(&self, root: ContentRoot) -> &Path {
        match root {
            ContentRoot::Static => &self.static_root,
            ContentRoot::Templates => &self.template_root,
        }
    }

    /// Joins `path` below `root`, refusing anything that could escape it.
    fn resolve(&self, root: ContentRoot, path: &str) -> Option<PathBuf> {
        let relative = Path::new(path.trim_start_matches('/'));

        if !relative.components().all(|c| matches!(c, Component::Normal(_) | Component::CurDir)) {
            tracing::warn!(path, "refusing path outside content root");
            return None;
        }

        Some(self.root(root).join(relative))
    }
}

impl ContentLoader for FileSystemLoader {
    fn load(&self, root: ContentRoot, path: &str) -> Option<Bytes> {
        let full = self.resolve(root, path)?;

        match std::fs::read(&full) {
            Ok(data) => Some(Bytes::from(data)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => None,
            Err(e) => {
                tracing::warn!(path = %full.display(), error = %e, "failed to read content");
                None
            }
        }
    }
}

/// Serves content from memory. Handy for embedded assets and tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryLoader {
    files: HashMap<(ContentRoot, String), Bytes>,
}

impl MemoryLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, root: ContentRoot, path: impl Into<String>, data: impl Into<Bytes>) {
        self.files.insert((root, path.into()), data.into());
    }

    pub fn with(mut self, root: ContentRoot, path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.insert(root, path, data);
        self
    }
}

impl ContentLoader for MemoryLoader {
    fn load(&self, root: ContentRoot, path: &str) -> Option<Bytes> {
        self.files.get(&(root, path.to_string())).cloned()
    }
}
