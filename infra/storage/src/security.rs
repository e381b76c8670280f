//! Path confinement and sharding.

use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Normalizes a caller-supplied relative path, rejecting anything that could leave the sandbox.
fn normalize_relative(path: &Path) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for component in path.components() {
        match component {
            Component::CurDir => {},
            Component::Normal(segment) => out.push(segment),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(traversal(path, "Path attempted to escape sandbox via '..'"));
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(traversal(path, "Absolute paths are not allowed in sandbox"));
            },
        }
    }

    Ok(out)
}

/// Builds the relative on-disk location `<ns>/<dirs>/<f0f1>/<f2f3>/<file>`.
///
/// File names shorter than four characters are stored without shard directories.
pub(crate) fn shard(namespace: Option<&str>, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let normalized = normalize_relative(path.as_ref())?;
    let file_name = normalized
        .file_name()
        .and_then(|name| name.to_str())
        .ok_or_else(|| StorageError::FileNotFound {
            message: path.as_ref().display().to_string().into(),
            context: Some("Target must be a file".into()),
        })?
        .to_owned();

    let mut sharded = PathBuf::new();
    if let Some(ns) = namespace {
        sharded.push(ns);
    }
    if let Some(parent) = normalized.parent().filter(|p| !p.as_os_str().is_empty()) {
        sharded.push(parent);
    }

    let prefix: Vec<char> = file_name.chars().take(4).collect();
    if prefix.len() == 4 {
        sharded.push(prefix[..2].iter().collect::<String>());
        sharded.push(prefix[2..].iter().collect::<String>());
    }
    sharded.push(file_name);

    Ok(sharded)
}

/// Joins `relative` onto the canonical `root` and proves the result stays inside it,
/// following symlinks of whatever part of the path already exists.
pub(crate) fn confine(root: &Path, relative: &Path) -> Result<PathBuf, StorageError> {
    let joined = root.join(normalize_relative(relative)?);

    let mut probe = Some(joined.as_path());
    while let Some(candidate) = probe {
        if candidate == root {
            return Ok(joined);
        }
        if candidate.exists() {
            let canonical = candidate.canonicalize().map_err(|source| StorageError::Io {
                source,
                context: Some(format!("Failed to verify {}", candidate.display()).into()),
            })?;
            return if canonical.starts_with(root) {
                Ok(joined)
            } else {
                Err(traversal(&canonical, "Existing path resolves outside the sandbox"))
            };
        }
        probe = candidate.parent();
    }

    Err(traversal(&joined, "No valid parent directory found within sandbox"))
}

fn traversal(path: &Path, reason: &'static str) -> StorageError {
    StorageError::PathTraversalAttempt {
        message: path.display().to_string().into(),
        context: Some(reason.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shards_by_the_first_four_characters() {
        let path = shard(Some("sliders"), "abcdef.png").unwrap();
        assert_eq!(path, PathBuf::from("sliders/ab/cd/abcdef.png"));
    }

    #[test]
    fn keeps_subdirectories_before_the_shards() {
        let path = shard(None, "icons/./favicon.ico").unwrap();
        assert_eq!(path, PathBuf::from("icons/fa/vi/favicon.ico"));
    }

    #[test]
    fn short_names_are_not_sharded() {
        assert_eq!(shard(Some("ns"), "a.b").unwrap(), PathBuf::from("ns/a.b"));
    }

    #[test]
    fn escaping_paths_are_rejected() {
        assert!(matches!(
            shard(None, "../etc/passwd"),
            Err(StorageError::PathTraversalAttempt { .. })
        ));
        assert!(matches!(shard(None, "/etc/passwd"), Err(StorageError::PathTraversalAttempt { .. })));
    }

    #[test]
    fn directories_are_not_files() {
        assert!(matches!(shard(None, ""), Err(StorageError::FileNotFound { .. })));
    }
}
