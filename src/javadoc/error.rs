//! Error types for the javadoc module

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::xml::XmlError;
use crate::zip::ZipError;

/// A class document that is well-formed XML but does not describe a class
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct InvalidClassInfo(pub String);

/// Main error type for library archive operations
#[derive(Error, Debug)]
pub enum LibraryError {
    /// The archive path could not be resolved
    #[error("IO error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The archive could not be opened or an entry could not be read
    #[error("Failed to read archive {path:?}: {source}")]
    Zip {
        path: PathBuf,
        #[source]
        source: ZipError,
    },

    /// An entry is not well-formed XML
    #[error("Failed to parse '{entry}': {source}")]
    Xml {
        entry: String,
        #[source]
        source: XmlError,
    },

    /// A class entry parsed as XML but was rejected by the class parser
    #[error("Invalid class documentation in '{entry}': {source}")]
    InvalidClassInfo {
        entry: String,
        #[source]
        source: InvalidClassInfo,
    },
}

impl LibraryError {
    /// True for errors caused by the content of an entry rather than by
    /// reading the archive
    pub fn is_format_error(&self) -> bool {
        matches!(
            self,
            LibraryError::Xml { .. } | LibraryError::InvalidClassInfo { .. }
        )
    }
}

/// Result type alias for library archive operations
pub type LibraryResult<T> = Result<T, LibraryError>;

/// Helper trait for attaching the archive path to ZIP errors
pub trait ZipContext<T> {
    fn with_archive(self, path: &Path) -> LibraryResult<T>;
}

impl<T> ZipContext<T> for Result<T, ZipError> {
    fn with_archive(self, path: &Path) -> LibraryResult<T> {
        self.map_err(|source| LibraryError::Zip {
            path: path.to_path_buf(),
            source,
        })
    }
}

/// Helper trait for attaching the entry name to XML errors
pub trait XmlContext<T> {
    fn with_entry(self, entry: &str) -> LibraryResult<T>;
}

impl<T> XmlContext<T> for Result<T, XmlError> {
    fn with_entry(self, entry: &str) -> LibraryResult<T> {
        self.map_err(|source| LibraryError::Xml {
            entry: entry.to_string(),
            source,
        })
    }
}
