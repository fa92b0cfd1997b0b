//! Errors raised by text sources (renderer-agnostic).

use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("Resource not found: {name}")]
    ResourceNotFound { name: String },
    #[error("Failed to read resource {name}: {source}")]
    Io {
        name: String,
        #[source]
        source: io::Error,
    },
}

impl SourceError {
    /// Map an I/O error for `name`, folding `NotFound` into [`SourceError::ResourceNotFound`].
    pub fn from_io(name: impl Into<String>, err: io::Error) -> Self {
        let name = name.into();
        if err.kind() == io::ErrorKind::NotFound {
            Self::ResourceNotFound { name }
        } else {
            Self::Io { name, source: err }
        }
    }

    #[inline]
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::ResourceNotFound { .. })
    }
}

pub type SourceResult<T> = Result<T, SourceError>;
