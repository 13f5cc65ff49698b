//! Error types for the `invasion-world` crate.
//!
//! All fallible operations in this crate return [`WorldError`] through the
//! standard [`Result`] type.

use std::path::PathBuf;

/// Errors that can occur during graph operations and map loading.
#[derive(Debug, thiserror::Error)]
pub enum WorldError {
    /// A random choice was requested from an empty candidate set.
    ///
    /// Callers that check `has_neighbors` / a non-empty graph first never
    /// see this.
    #[error("empty selection: {context}")]
    EmptySelection {
        /// What was being selected.
        context: String,
    },

    /// A map file line could not be parsed.
    #[error("map line {line}: {reason}")]
    MalformedLine {
        /// 1-based line number.
        line: usize,
        /// Why the line was rejected.
        reason: String,
    },

    /// The map file could not be read.
    #[error("failed to read map file {}: {source}", path.display())]
    Io {
        /// The path that failed.
        path: PathBuf,
        /// The underlying I/O error.
        source: std::io::Error,
    },
}
