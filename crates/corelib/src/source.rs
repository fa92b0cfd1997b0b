//! Text-loading collaborator. Loaders take a `&impl TextSource` instead of
//! reaching for the filesystem themselves.

use std::{
    collections::HashMap,
    fs,
    path::{Path, PathBuf},
};

use crate::error::{SourceError, SourceResult};

/// Something that can hand back the full text of a named resource.
pub trait TextSource {
    fn load_text(&self, name: &str) -> SourceResult<String>;
}

/// Resolves resource names relative to a root directory.
#[derive(Clone, Debug)]
pub struct FileSource {
    root: PathBuf,
}

impl FileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    #[inline]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl Default for FileSource {
    fn default() -> Self {
        Self::new(".")
    }
}

impl TextSource for FileSource {
    fn load_text(&self, name: &str) -> SourceResult<String> {
        let path = self.root.join(name);
        log::debug!("Loading text resource {}", path.display());
        fs::read_to_string(&path).map_err(|e| SourceError::from_io(name, e))
    }
}

/// In-memory resources keyed by name.
#[derive(Clone, Debug, Default)]
pub struct MemorySource {
    entries: HashMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.entries.insert(name.into(), text.into());
    }

    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }
}

impl TextSource for MemorySource {
    fn load_text(&self, name: &str) -> SourceResult<String> {
        self.entries
            .get(name)
            .cloned()
            .ok_or_else(|| SourceError::ResourceNotFound {
                name: name.to_owned(),
            })
    }
}
