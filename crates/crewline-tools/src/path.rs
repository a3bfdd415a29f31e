//! Filesystem path validation
//!
//! Paths chosen by the model go through [`validate_path`] before any
//! filesystem access, the same way URLs go through
//! [`validate_url`](crate::fetch::validate_url).

use crate::error::{Error, Result};
use std::path::{Component, Path, PathBuf};
use tracing::warn;

/// System directories no tool may read
const BLOCKED_DIRECTORIES: &[&str] = &[
    "/etc",
    "/root",
    "/var/log",
    "/boot",
    "/dev",
    "/proc",
    "/sys",
    "/usr/bin",
    "/usr/sbin",
    "/bin",
    "/sbin",
    "/var/run",
    "/run",
];

fn blocked_prefix(path: &Path) -> Option<&'static str> {
    BLOCKED_DIRECTORIES
        .iter()
        .copied()
        .find(|blocked| path.starts_with(blocked))
}

/// Validate a path and resolve symlinks
///
/// Rejects `..` components and anything under a blocked system directory,
/// both as written and after canonicalization.
pub fn validate_path(path: &str) -> Result<PathBuf> {
    let path_buf = PathBuf::from(path);

    if path_buf
        .components()
        .any(|c| matches!(c, Component::ParentDir))
    {
        warn!(path = %path, "Path traversal attempt detected");
        return Err(Error::PermissionDenied(
            "Path traversal (..) is not allowed".to_string(),
        ));
    }

    if let Some(blocked) = blocked_prefix(&path_buf) {
        warn!(path = %path, blocked = %blocked, "Access to blocked directory");
        return Err(Error::PermissionDenied(format!(
            "Access to '{blocked}' is restricted"
        )));
    }

    if !path_buf.exists() {
        return Ok(path_buf);
    }

    let canonical = path_buf.canonicalize().map_err(|e| {
        warn!(path = %path, error = %e, "Failed to canonicalize path");
        Error::PermissionDenied(format!("Cannot resolve path '{path}': {e}"))
    })?;

    if let Some(blocked) = blocked_prefix(&canonical) {
        warn!(
            original_path = %path,
            resolved_path = %canonical.display(),
            blocked = %blocked,
            "Path resolves to restricted directory"
        );
        return Err(Error::PermissionDenied(format!(
            "Access denied: path resolves to restricted area '{blocked}'"
        )));
    }

    Ok(canonical)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blocked_directories() {
        for path in ["/etc", "/etc/passwd", "/root/.ssh", "/proc/self", "/sys"] {
            assert!(
                matches!(validate_path(path), Err(Error::PermissionDenied(_))),
                "{path}"
            );
        }
    }

    #[test]
    fn test_prefix_is_component_wise() {
        assert!(validate_path("/etcetera/notes").is_ok());
    }

    #[test]
    fn test_parent_components_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let sneaky = format!("{}/../..", tmp.path().display());
        assert!(matches!(
            validate_path(&sneaky),
            Err(Error::PermissionDenied(_))
        ));
        assert!(validate_path("docs/../secrets").is_err());
    }

    #[test]
    fn test_existing_path_is_canonical() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::create_dir(tmp.path().join("docs")).unwrap();
        let dotted = format!("{}/./docs", tmp.path().display());

        let resolved = validate_path(&dotted).unwrap();
        assert_eq!(resolved, tmp.path().join("docs").canonicalize().unwrap());
    }

    #[cfg(unix)]
    #[test]
    fn test_symlink_into_blocked_directory() {
        let tmp = tempfile::tempdir().unwrap();
        let link = tmp.path().join("config");
        std::os::unix::fs::symlink("/etc", &link).unwrap();

        assert!(matches!(
            validate_path(&link.to_string_lossy()),
            Err(Error::PermissionDenied(_))
        ));
    }
}
