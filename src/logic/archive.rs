// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Packaging files and directory trees into ZIP archives.
//!
//! Responsibilities:
//! - Create a new archive, or append to one the caller already owns.
//! - Map filesystem paths to forward-slash entry names below a top prefix.
//! - Walk directories (skipping version-control metadata) and add every
//!   subdirectory and file, carrying on past individual failures.

use std::fmt;
use std::fs::{self, File};
use std::io;
use std::path::{Component, Path, PathBuf};

use anyhow::{Context, Result};
use time::OffsetDateTime;
use zip::{CompressionMethod, ZipWriter, write::FileOptions};

use crate::error::FsError;
use crate::logic::tree::{WalkOptions, tree};
use crate::models::constants::Severity;
use crate::models::tree::{PathMode, TreeEntry};
use crate::report::Reporter;

/// Directory names never packed by [`zip_dir`].
pub const VCS_DIRS: [&str; 3] = [".git", ".svn", ".hg"];

const OP_FILE: &str = "zip_file";
const OP_DIR: &str = "zip_dir";

/// An open ZIP archive being written.
///
/// Entries are Deflate-compressed. Nothing is readable until [`Archive::finish`]
/// writes the central directory.
pub struct Archive {
    writer: ZipWriter<File>,
    path: PathBuf,
    /// Resolved location of the archive file, never packed into itself.
    canonical: PathBuf,
    options: FileOptions<'static, ()>,
    failed: usize,
}

impl fmt::Debug for Archive {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Archive")
            .field("path", &self.path)
            .field("failed", &self.failed)
            .finish_non_exhaustive()
    }
}

impl Archive {
    /// Create (or truncate) the archive file at `path`, creating missing
    /// parent directories.
    pub fn create(path: impl Into<PathBuf>) -> Result<Self, FsError> {
        let path = path.into();
        let file = open_output(&path).map_err(|source| FsError::ArchiveCreate {
            path: path.clone(),
            source,
        })?;
        let canonical = resolve(&path);
        tracing::debug!(path = %canonical.display(), "created archive");

        Ok(Self {
            writer: ZipWriter::new(file),
            path,
            canonical,
            options: FileOptions::default().compression_method(CompressionMethod::Deflated),
            failed: 0,
        })
    }

    /// Location of the archive on disk.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Entries that could not be added so far.
    pub fn failed_entries(&self) -> usize {
        self.failed
    }

    /// Write the central directory and close the file.
    pub fn finish(self) -> Result<PathBuf> {
        self.writer
            .finish()
            .with_context(|| format!("Failed to finalize archive {:?}", self.path))?;
        Ok(self.path)
    }

    /// Abandon a freshly created archive and delete its file.
    fn discard(self) {
        let Self { writer, path, .. } = self;
        drop(writer);
        if let Err(err) = fs::remove_file(&path) {
            tracing::warn!(path = %path.display(), error = %err, "failed to remove abandoned archive");
        }
    }

    /// Whether the already resolved `path` is this archive's own file.
    fn is_own_file(&self, path: &Path) -> bool {
        path == self.canonical
    }

    /// Copy `source` into the archive as `name`.
    fn add_file(&mut self, source: &Path, name: &str) -> Result<()> {
        let mut reader =
            File::open(source).with_context(|| format!("Failed to read file {:?}", source))?;
        self.writer
            .start_file(name, self.options)
            .with_context(|| format!("Failed to add file {} to archive", name))?;
        io::copy(&mut reader, &mut self.writer)
            .with_context(|| format!("Failed to write {} into archive", name))?;
        tracing::trace!(entry = name, "added file");
        Ok(())
    }

    /// Add an empty directory entry; `name` gets a trailing slash if missing.
    fn add_directory(&mut self, name: &str) -> Result<()> {
        let name = if name.ends_with('/') {
            name.to_string()
        } else {
            format!("{name}/")
        };
        self.writer
            .add_directory(name.as_str(), self.options)
            .with_context(|| format!("Failed to create directory {} in archive", name))?;
        tracing::trace!(entry = %name, "added directory");
        Ok(())
    }
}

fn open_output(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        fs::create_dir_all(parent)?;
    }
    File::create(path)
}

/// Which archive an operation writes to.
#[derive(Debug)]
pub enum ArchiveTarget<'a> {
    /// Create a fresh archive at the given path, or at
    /// [`default_archive_name`] in the working directory when `None`.
    CreateNew(Option<PathBuf>),
    /// Add to an archive owned by the caller. It is never finished here.
    AppendTo(&'a mut Archive),
}

/// What an operation did with its [`ArchiveTarget`].
#[derive(Debug)]
pub enum ArchiveOutcome {
    /// A new archive the caller now owns and must [`Archive::finish`].
    Created(Archive),
    /// Entries were added to the borrowed archive.
    Appended,
}

impl ArchiveOutcome {
    pub fn into_created(self) -> Option<Archive> {
        match self {
            Self::Created(archive) => Some(archive),
            Self::Appended => None,
        }
    }
}

/// Timestamp-derived archive filename, e.g. `1718000000.1234.zip`.
pub fn default_archive_name() -> String {
    let now = OffsetDateTime::now_utc();
    format!("{}.{:04}.zip", now.unix_timestamp(), now.nanosecond() / 100_000)
}

/// Entry name of `path` inside an archive whose root is `top`.
///
/// The `top` prefix is removed when `path` lies below it; the remaining
/// components are joined with `/` and never start with a slash.
pub fn archive_path(path: &Path, top: &Path) -> String {
    let relative = path.strip_prefix(top).unwrap_or(path);
    relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Add one file to an archive.
///
/// The entry name is `location` verbatim when given, otherwise the file's
/// path with `top` stripped. Failing to create the archive or to add the
/// file is reported and returned as an error, and a new archive is deleted
/// again rather than left behind empty.
pub fn zip_file(
    file: &Path,
    top: &Path,
    location: Option<&str>,
    target: ArchiveTarget<'_>,
    reporter: &dyn Reporter,
) -> Result<ArchiveOutcome> {
    let source = resolve(file);
    let name = match location {
        Some(location) => location.to_string(),
        None => archive_path(&source, &resolve(top)),
    };

    let add = |archive: &mut Archive| -> Result<()> {
        if archive.is_own_file(&source) {
            tracing::debug!(path = %source.display(), "skipping the archive itself");
            return Ok(());
        }
        add_file_reported(archive, file, &name, OP_FILE, reporter)
    };

    match target {
        ArchiveTarget::CreateNew(output) => {
            let mut archive = create_reported(output, OP_FILE, reporter)?;
            match add(&mut archive) {
                Ok(()) => Ok(ArchiveOutcome::Created(archive)),
                Err(err) => {
                    archive.discard();
                    Err(err)
                }
            }
        }
        ArchiveTarget::AppendTo(archive) => {
            add(archive)?;
            Ok(ArchiveOutcome::Appended)
        }
    }
}

/// Add a directory's contents, recursively, to an archive.
///
/// Every subdirectory becomes an empty directory entry and every file a file
/// entry, named relative to `top`. Version-control directories ([`VCS_DIRS`])
/// are skipped. Entries that fail are reported and counted in
/// [`Archive::failed_entries`] without stopping the rest.
///
/// The archive's own file is never added, even when it is written inside
/// `dir`. Errors when `dir` is not a directory, the archive cannot be
/// created, or the directory cannot be listed; a new archive is deleted
/// again in the last case.
pub fn zip_dir(
    dir: &Path,
    top: &Path,
    target: ArchiveTarget<'_>,
    reporter: &dyn Reporter,
) -> Result<ArchiveOutcome> {
    if !dir.is_dir() {
        let err = FsError::NotADirectory(dir.to_path_buf());
        reporter.report(&err.to_string(), OP_DIR, Severity::RecoverableError);
        return Err(err.into());
    }

    match target {
        ArchiveTarget::CreateNew(output) => {
            let mut archive = create_reported(output, OP_DIR, reporter)?;
            match add_tree(&mut archive, dir, top, reporter) {
                Ok(()) => Ok(ArchiveOutcome::Created(archive)),
                Err(err) => {
                    archive.discard();
                    Err(err)
                }
            }
        }
        ArchiveTarget::AppendTo(archive) => {
            add_tree(archive, dir, top, reporter)?;
            Ok(ArchiveOutcome::Appended)
        }
    }
}

fn add_tree(archive: &mut Archive, dir: &Path, top: &Path, reporter: &dyn Reporter) -> Result<()> {
    let top = resolve(top);
    let options = WalkOptions::new(PathMode::Absolute).exclude(VCS_DIRS);
    let listing = tree(dir, &options, reporter)?;

    let mut stack = vec![listing.primary().entries().iter()];
    while let Some(entries) = stack.last_mut() {
        let Some(entry) = entries.next() else {
            stack.pop();
            continue;
        };

        match entry {
            TreeEntry::File(path) => {
                if archive.is_own_file(Path::new(path)) {
                    tracing::debug!(path = %path, "skipping the archive itself");
                    continue;
                }
                let name = archive_path(Path::new(path), &top);
                if add_file_reported(archive, Path::new(path), &name, OP_DIR, reporter).is_err() {
                    archive.failed += 1;
                }
            }
            TreeEntry::Dir { key, node } => {
                let name = archive_path(Path::new(key), &top);
                if archive.add_directory(&name).is_err() {
                    archive.failed += 1;
                    reporter.report(
                        &format!("Directory add for '{key}' failed!"),
                        OP_DIR,
                        Severity::RecoverableError,
                    );
                }
                stack.push(node.entries().iter());
            }
        }
    }

    tracing::debug!(
        dir = %dir.display(),
        failed = archive.failed,
        "added directory tree to archive"
    );
    Ok(())
}

fn create_reported(
    output: Option<PathBuf>,
    operation: &str,
    reporter: &dyn Reporter,
) -> Result<Archive> {
    let output = output.unwrap_or_else(|| PathBuf::from(default_archive_name()));
    Archive::create(output).map_err(|err| {
        reporter.report(&err.to_string(), operation, Severity::RecoverableError);
        err.into()
    })
}

fn add_file_reported(
    archive: &mut Archive,
    file: &Path,
    name: &str,
    operation: &str,
    reporter: &dyn Reporter,
) -> Result<()> {
    archive.add_file(file, name).inspect_err(|err| {
        reporter.report(&format!("{err:#}"), operation, Severity::RecoverableError);
    })
}

/// Canonical form of `path`, or `path` itself when it cannot be resolved.
fn resolve(path: &Path) -> PathBuf {
    fs::canonicalize(path).unwrap_or_else(|_| path.to_path_buf())
}
