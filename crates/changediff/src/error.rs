//! Error types for changelog differencing.

use std::path::PathBuf;

use changediff_dom::ParseError;

/// Errors that can occur while generating a migration changelog.
#[derive(Debug, thiserror::Error)]
pub enum DiffError {
    /// An input changelog could not be read from disk.
    #[error("Failed to read changelog '{path}': {source}")]
    Read {
        /// Path of the changelog file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// An input changelog is not well-formed XML.
    #[error("Failed to parse changelog '{path}': {source}")]
    Parse {
        /// Path of the changelog file.
        path: PathBuf,
        /// Underlying reader error.
        #[source]
        source: ParseError,
    },

    /// A schema element lacks the attribute that names it, so it has no
    /// identity to diff by.
    #[error("<{element}> element is missing required attribute '{attribute}'")]
    MissingAttribute {
        /// Tag of the offending element.
        element: String,
        /// Name of the absent attribute.
        attribute: String,
    },

    /// The changeset counter file could not be read or written.
    #[error("Changeset counter file '{path}': {source}")]
    Counter {
        /// Path of the counter file.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl DiffError {
    /// True for failures of the counter store. These abort a run outright,
    /// while other errors inside the column stage are logged and skipped.
    #[must_use]
    pub const fn is_persistence(&self) -> bool {
        matches!(self, Self::Counter { .. })
    }
}

/// Convenience result type for changelog differencing.
pub type Result<T> = std::result::Result<T, DiffError>;
