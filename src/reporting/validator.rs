use std::path::{Path, PathBuf};

use crate::errors::ReportError;
use crate::models::AlertNode;
use tracing::debug;

/// Pre-flight checks run before anything is rendered.
///
/// Checks run in order and stop at the first failure: the parent directory of a new
/// target must be writable, an existing target must itself be writable, and the filtered
/// tree must hold at least one child unless `allow_empty` is set.
pub fn validate_report_target(
    target: &Path,
    filtered_root: &AlertNode,
    allow_empty: bool,
) -> Result<(), ReportError> {
    if !target.exists() {
        let parent = parent_dir(target);
        if !dir_is_writable(&parent) {
            return Err(ReportError::DirectoryNotWritable(absolute(&parent)));
        }
    } else if !file_is_writable(target) {
        return Err(ReportError::FileNotWritable(absolute(target)));
    }

    if filtered_root.children.is_empty() && !allow_empty {
        return Err(ReportError::NoAlertsMatched);
    }

    Ok(())
}

fn parent_dir(target: &Path) -> PathBuf {
    match target.parent() {
        Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

fn dir_is_writable(dir: &Path) -> bool {
    match std::fs::metadata(dir) {
        Ok(m) if m.is_dir() && !m.permissions().readonly() => has_write_access(dir),
        _ => false,
    }
}

fn file_is_writable(file: &Path) -> bool {
    match std::fs::metadata(file) {
        Ok(m) if !m.is_dir() && !m.permissions().readonly() => has_write_access(file),
        _ => false,
    }
}

/// Asks the OS without creating or opening anything. Catches ACLs and read-only mounts
/// that permission bits miss.
#[cfg(unix)]
fn has_write_access(path: &Path) -> bool {
    match nix::unistd::access(path, nix::unistd::AccessFlags::W_OK) {
        Ok(()) => true,
        Err(errno) => {
            debug!(path = %path.display(), error = %errno, "Write access denied");
            false
        }
    }
}

#[cfg(not(unix))]
fn has_write_access(_path: &Path) -> bool {
    true
}
