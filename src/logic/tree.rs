// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Recursive directory listing into a [`Tree`].
//!
//! `walkdir` yields a flat, depth-first stream of entries. The walk keeps a
//! stack of directories that are still open and closes them into their
//! parent whenever the stream climbs back up, using each entry's depth.

use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use crate::error::FsError;
use crate::models::constants::Severity;
use crate::models::tree::{PathMode, Tree, TreeNode};
use crate::report::Reporter;

/// Default limit on how many directory levels below the root are walked.
pub const DEFAULT_MAX_DEPTH: usize = 128;

const OPERATION: &str = "tree";

/// Options controlling [`tree`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct WalkOptions {
    pub mode: PathMode,
    /// Basenames skipped at every depth.
    pub exclude: BTreeSet<String>,
    /// Deepest directory level (root = 0) that may be entered.
    pub max_depth: usize,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            mode: PathMode::Absolute,
            exclude: BTreeSet::new(),
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

impl WalkOptions {
    pub fn new(mode: PathMode) -> Self {
        Self {
            mode,
            ..Self::default()
        }
    }

    pub fn exclude<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.exclude.extend(names.into_iter().map(Into::into));
        self
    }

    pub fn max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// List `dir` recursively.
///
/// Entries that are neither directories nor regular files (device nodes,
/// broken symlinks) and subdirectories that cannot be read are reported and
/// left out; the walk carries on. Failing to list `dir` itself, or exceeding
/// the depth limit, is an error.
///
/// In [`PathMode::Both`] the absolute and relative trees are built by two
/// independent walks.
pub fn tree(dir: &Path, options: &WalkOptions, reporter: &dyn Reporter) -> Result<Tree> {
    match options.mode {
        PathMode::Absolute => Ok(Tree::Single(walk(dir, false, options, reporter)?)),
        PathMode::Relative => Ok(Tree::Single(walk(dir, true, options, reporter)?)),
        PathMode::Both => {
            let absolute = walk(dir, false, options, reporter)?;
            let relative = walk(dir, true, options, reporter)?;
            Ok(Tree::Both { absolute, relative })
        }
    }
}

fn walk(
    root: &Path,
    relative: bool,
    options: &WalkOptions,
    reporter: &dyn Reporter,
) -> Result<TreeNode> {
    tracing::debug!(root = %root.display(), relative, "walking directory tree");

    let exclude = &options.exclude;
    // One level past the limit, so a directory that is too deep shows up
    // and can be rejected instead of silently cut off.
    let walker = WalkDir::new(root)
        .follow_links(true)
        .max_depth(options.max_depth.saturating_add(1))
        .into_iter()
        .filter_entry(|entry| {
            entry.depth() == 0 || !exclude.contains(entry.file_name().to_string_lossy().as_ref())
        });

    // Index `i` holds the open directory at depth `i`.
    let mut open: Vec<(String, TreeNode)> = vec![(String::new(), TreeNode::new())];

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) if err.depth() == 0 => {
                let err = anyhow::Error::new(err)
                    .context(format!("Failed to read directory {:?}", root));
                reporter.report(&format!("{err:#}"), OPERATION, Severity::RecoverableError);
                return Err(err);
            }
            Err(err) => {
                report_walk_error(&err, reporter);
                continue;
            }
        };

        let depth = entry.depth();
        let file_type = entry.file_type();
        if depth == 0 {
            if !file_type.is_dir() {
                let err = FsError::NotADirectory(root.to_path_buf());
                reporter.report(&err.to_string(), OPERATION, Severity::RecoverableError);
                return Err(err.into());
            }
            continue;
        }

        close_to(&mut open, depth);

        if file_type.is_dir() {
            if depth > options.max_depth {
                let err = FsError::DepthLimit {
                    path: entry.into_path(),
                    limit: options.max_depth,
                };
                reporter.report(&err.to_string(), OPERATION, Severity::RecoverableError);
                return Err(err.into());
            }
            let path = fs::canonicalize(entry.path()).unwrap_or_else(|_| entry.path().to_path_buf());
            open.push((path_form(&path, relative), TreeNode::new()));
        } else if file_type.is_file() {
            match fs::canonicalize(entry.path()) {
                Ok(path) => {
                    if let Some((_, node)) = open.last_mut() {
                        node.push_file(path_form(&path, relative));
                    }
                }
                Err(_) => report_unknown(entry.path(), reporter),
            }
        } else {
            report_unknown(entry.path(), reporter);
        }
    }

    close_to(&mut open, 1);
    Ok(open.pop().map(|(_, node)| node).unwrap_or_default())
}

/// Fold open directories into their parents until `depth` remain.
fn close_to(open: &mut Vec<(String, TreeNode)>, depth: usize) {
    while open.len() > depth.max(1) {
        let Some((key, node)) = open.pop() else {
            break;
        };
        if let Some((_, parent)) = open.last_mut() {
            parent.push_dir(key, node);
        }
    }
}

fn report_walk_error(err: &walkdir::Error, reporter: &dyn Reporter) {
    // A followed symlink whose target is gone surfaces as a metadata error.
    if let Some(path) = err.path()
        && fs::symlink_metadata(path).is_ok_and(|meta| meta.file_type().is_symlink())
        && fs::metadata(path).is_err()
    {
        report_unknown(path, reporter);
        return;
    }

    let message = match err.path() {
        Some(path) => format!("Failed to read directory {:?}: {err}", path),
        None => format!("Failed to walk directory: {err}"),
    };
    reporter.report(&message, OPERATION, Severity::RecoverableError);
}

fn report_unknown(path: &Path, reporter: &dyn Reporter) {
    let err = FsError::UnknownEntryType(path.to_path_buf());
    reporter.report(&err.to_string(), OPERATION, Severity::RecoverableError);
}

fn path_form(path: &Path, relative: bool) -> String {
    if relative {
        path.file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.to_string_lossy().into_owned())
    } else {
        path.to_string_lossy().into_owned()
    }
}
