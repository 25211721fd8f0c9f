// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025 Alexander Minges

//! Best-effort recursive directory removal.

use std::fs;
use std::path::Path;

use anyhow::Result;
use walkdir::WalkDir;

use crate::error::FsError;
use crate::models::constants::Severity;
use crate::report::Reporter;

const OPERATION: &str = "rmdir";

/// Delete everything below `dir`, and `dir` itself unless `preserve` is set.
///
/// A missing path, or one that is not a directory, is a successful no-op.
/// A symlink to a directory counts as "not a directory": neither the link
/// nor its target is touched. Every reachable entry is attempted even after
/// earlier failures; each failure is reported, and the call returns
/// [`FsError::Partial`] with the number of entries that could not be removed.
///
/// Symlinks below `dir` are unlinked, never followed. Entries that are
/// neither files, directories nor symlinks count as failures.
pub fn remove_dir(dir: &Path, preserve: bool, reporter: &dyn Reporter) -> Result<()> {
    if !fs::symlink_metadata(dir).is_ok_and(|meta| meta.is_dir()) {
        tracing::debug!(path = %dir.display(), "nothing to remove");
        return Ok(());
    }

    let mut failed = 0usize;
    let walker = WalkDir::new(dir).follow_links(false).contents_first(true);

    for item in walker {
        let entry = match item {
            Ok(entry) => entry,
            Err(err) => {
                failed += 1;
                let message = match err.path() {
                    Some(path) => format!("Failed to read directory {:?}: {err}", path),
                    None => format!("Failed to walk directory: {err}"),
                };
                reporter.report(&message, OPERATION, Severity::RecoverableError);
                continue;
            }
        };

        let path = entry.path();
        let file_type = entry.file_type();
        if file_type.is_dir() {
            if entry.depth() == 0 && preserve {
                continue;
            }
            if let Err(err) = fs::remove_dir(path) {
                failed += 1;
                report_io(reporter, "remove directory", path, &err);
            }
        } else if file_type.is_file() || file_type.is_symlink() {
            tracing::trace!(path = %path.display(), "removing file");
            if let Err(err) = fs::remove_file(path) {
                failed += 1;
                report_io(reporter, "remove file", path, &err);
            }
        } else {
            failed += 1;
            let err = FsError::UnknownEntryType(entry.into_path());
            reporter.report(&err.to_string(), OPERATION, Severity::RecoverableError);
        }
    }

    if failed > 0 {
        return Err(FsError::Partial {
            operation: OPERATION,
            failed,
        }
        .into());
    }
    Ok(())
}

fn report_io(reporter: &dyn Reporter, action: &str, path: &Path, err: &std::io::Error) {
    reporter.report(
        &format!("Failed to {action} {:?}: {err}", path),
        OPERATION,
        Severity::RecoverableError,
    );
}

#[cfg(test)]
mod tests {
    use std::fs;

    use tempfile::TempDir;

    use super::remove_dir;
    use crate::error::FsError;
    use crate::report::{ConsoleReporter, ReporterConfig};

    fn reporter() -> ConsoleReporter<Vec<u8>> {
        ConsoleReporter::new(Vec::new(), ReporterConfig::default())
    }

    fn populate(root: &std::path::Path) {
        fs::create_dir_all(root.join("a/b/c")).unwrap();
        fs::create_dir_all(root.join("empty")).unwrap();
        fs::write(root.join("top.txt"), b"top").unwrap();
        fs::write(root.join("a/one.txt"), b"1").unwrap();
        fs::write(root.join("a/b/c/deep.txt"), b"deep").unwrap();
    }

    #[test]
    fn removes_tree_and_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("victim");
        populate(&root);

        remove_dir(&root, false, &reporter()).unwrap();
        assert!(!root.exists());
    }

    // Preserve keeps the root but leaves it empty.
    #[test]
    fn preserve_keeps_empty_root() {
        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("victim");
        populate(&root);

        remove_dir(&root, true, &reporter()).unwrap();
        assert!(root.is_dir());
        assert_eq!(fs::read_dir(&root).unwrap().count(), 0);
    }

    #[test]
    fn missing_or_non_directory_path_is_noop_success() {
        let tmp = TempDir::new().unwrap();
        let file = tmp.path().join("file.txt");
        fs::write(&file, b"keep").unwrap();

        remove_dir(&tmp.path().join("missing"), false, &reporter()).unwrap();
        remove_dir(&file, false, &reporter()).unwrap();
        assert!(file.exists());
    }

    // Symlinked directories are unlinked without touching their target.
    #[cfg(unix)]
    #[test]
    fn symlinks_are_not_followed() {
        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("precious.txt"), b"keep").unwrap();

        let root = tmp.path().join("victim");
        fs::create_dir(&root).unwrap();
        std::os::unix::fs::symlink(&outside, root.join("link")).unwrap();

        remove_dir(&root, false, &reporter()).unwrap();
        assert!(!root.exists());
        assert!(outside.join("precious.txt").exists());
    }

    // A locked subdirectory fails, but its siblings are still removed.
    #[cfg(unix)]
    #[test]
    fn failure_does_not_stop_siblings() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("victim");
        populate(&root);
        let locked = root.join("locked");
        fs::create_dir(&locked).unwrap();
        fs::write(locked.join("stuck.txt"), b"stuck").unwrap();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o555)).unwrap();

        // Permission bits do not bind a privileged user.
        if fs::remove_file(locked.join("stuck.txt")).is_ok() {
            return;
        }

        let reporter = reporter();
        let err = remove_dir(&root, false, &reporter).unwrap_err();
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(
            err.downcast_ref::<FsError>(),
            Some(FsError::Partial { failed, .. }) if *failed >= 1
        ));
        assert!(locked.join("stuck.txt").exists());
        assert!(!root.join("top.txt").exists());
        assert!(!root.join("a").exists());
        assert!(!root.join("empty").exists());

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("Failed to remove file"));
    }

    // A symlinked root is left alone, and so is the directory it points at.
    #[cfg(unix)]
    #[test]
    fn symlink_root_is_not_followed() {
        let tmp = TempDir::new().unwrap();
        let outside = tmp.path().join("outside");
        fs::create_dir(&outside).unwrap();
        fs::write(outside.join("precious.txt"), b"keep").unwrap();
        let link = tmp.path().join("link");
        std::os::unix::fs::symlink(&outside, &link).unwrap();

        remove_dir(&link, false, &reporter()).unwrap();
        assert!(outside.join("precious.txt").exists());
        assert!(fs::symlink_metadata(&link).unwrap().file_type().is_symlink());
    }

    // Sockets are neither files nor directories: reported, counted, siblings still go.
    #[cfg(unix)]
    #[test]
    fn socket_counts_as_unknown_entry() {
        use std::os::unix::net::UnixListener;

        let tmp = TempDir::new().unwrap();
        let root = tmp.path().join("victim");
        populate(&root);
        let socket = root.join("app.sock");
        let _listener = UnixListener::bind(&socket).unwrap();

        let reporter = reporter();
        let err = remove_dir(&root, false, &reporter).unwrap_err();

        // The socket is one failure and keeps `victim` non-empty, which is another.
        assert!(matches!(
            err.downcast_ref::<FsError>(),
            Some(FsError::Partial { failed: 2, .. })
        ));
        assert!(socket.exists());
        assert!(!root.join("top.txt").exists());
        assert!(!root.join("a").exists());
        assert!(!root.join("empty").exists());

        let out = String::from_utf8(reporter.into_inner()).unwrap();
        assert!(out.contains("Unknown FSO type for"));
        assert!(out.contains("app.sock"));
    }
}
