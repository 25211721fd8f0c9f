// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Typed failures surfaced through `anyhow::Error` for callers that need to match on them.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FsError {
    /// A directory operation was given something that is not a directory.
    #[error("'{}' is not a directory!", .0.display())]
    NotADirectory(PathBuf),

    /// The output archive could not be created.
    #[error("Unable to create ZIP file '{}'!", .path.display())]
    ArchiveCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An entry that is neither a regular file nor a directory.
    #[error("Unknown FSO type for '{}'!", .0.display())]
    UnknownEntryType(PathBuf),

    /// A best-effort bulk operation finished with some entries failing.
    #[error("{operation} finished with {failed} failed entries")]
    Partial { operation: &'static str, failed: usize },

    /// The traversal went deeper than the configured limit.
    #[error("Directory depth limit of {limit} exceeded at '{}'", .path.display())]
    DepthLimit { path: PathBuf, limit: usize },
}
