use crate::error::StorageError;
use std::path::{Component, Path, PathBuf};

/// Collapses `.` and `..` lexically; `..` may never climb above the sandbox root.
fn normalize_relative(path: &Path) -> Result<PathBuf, StorageError> {
    let mut out = PathBuf::new();

    for c in path.components() {
        match c {
            Component::CurDir => {},
            Component::Normal(seg) => out.push(seg),
            Component::ParentDir => {
                if !out.pop() {
                    return Err(StorageError::PathTraversalAttempt {
                        message: path.display().to_string().into(),
                        context: Some("Path attempted to escape sandbox via '..'".into()),
                    });
                }
            },
            Component::RootDir | Component::Prefix(_) => {
                return Err(StorageError::PathTraversalAttempt {
                    message: path.display().to_string().into(),
                    context: Some("Absolute paths are not allowed in sandbox".into()),
                });
            },
        }
    }

    if out.as_os_str().is_empty() {
        return Err(StorageError::PathTraversalAttempt {
            message: path.display().to_string().into(),
            context: Some("Path resolves to the sandbox root itself".into()),
        });
    }

    Ok(out)
}

/// Joins `path` onto `root` and checks the result stays inside it, symlinks included.
pub(crate) fn resolve_path(root: &Path, path: impl AsRef<Path>) -> Result<PathBuf, StorageError> {
    let path = path.as_ref();

    if path.is_absolute() {
        return Err(StorageError::PathTraversalAttempt {
            message: format!("Absolute paths are not allowed in sandbox {}", path.display()).into(),
            context: None,
        });
    }

    let joined = root.join(normalize_relative(path)?);

    match joined.canonicalize() {
        Ok(canonical) if canonical.starts_with(root) => Ok(canonical),
        Ok(canonical) => Err(StorageError::PathTraversalAttempt {
            message: canonical.display().to_string().into(),
            context: Some("Path resolves outside the sandbox".into()),
        }),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => validate_ancestors(root, &joined),
        Err(e) => Err(StorageError::Io { source: e, context: None }),
    }
}

/// A not-yet-existing path is accepted when its nearest existing ancestor lives inside `root`.
fn validate_ancestors(root: &Path, joined: &Path) -> Result<PathBuf, StorageError> {
    let mut current = joined.parent();

    while let Some(path) = current {
        if path == root {
            return Ok(joined.to_path_buf());
        }

        if path.exists() {
            return match path.canonicalize() {
                Ok(canonical) if canonical.starts_with(root) => Ok(joined.to_path_buf()),
                Ok(canonical) => Err(StorageError::PathTraversalAttempt {
                    message: canonical.display().to_string().into(),
                    context: Some("Existing parent directory is a symlink outside sandbox".into()),
                }),
                Err(e) => Err(StorageError::Io {
                    source: e,
                    context: Some("Failed to verify parent directory".into()),
                }),
            };
        }

        current = path.parent();
    }

    Err(StorageError::PathTraversalAttempt {
        message: joined.display().to_string().into(),
        context: Some("No valid parent directory found within sandbox".into()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parent_segments_inside_root_are_collapsed() {
        let out = normalize_relative(Path::new("a/./b/../events.json")).unwrap();
        assert_eq!(out, PathBuf::from("a/events.json"));
    }

    #[test]
    fn climbing_above_root_is_rejected() {
        let err = normalize_relative(Path::new("../secrets.json")).unwrap_err();
        assert!(matches!(err, StorageError::PathTraversalAttempt { .. }));
    }

    #[test]
    fn root_itself_is_not_a_file() {
        let err = normalize_relative(Path::new("a/..")).unwrap_err();
        assert!(matches!(err, StorageError::PathTraversalAttempt { .. }));
    }

    #[test]
    fn absolute_paths_are_rejected() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        let err = resolve_path(&root, "/etc/passwd").unwrap_err();
        assert!(matches!(err, StorageError::PathTraversalAttempt { .. }));
    }

    #[test]
    fn missing_nested_file_resolves_under_root() {
        let tmp = tempfile::tempdir().unwrap();
        let root = tmp.path().canonicalize().unwrap();
        let resolved = resolve_path(&root, "nested/dir/registrations.json").unwrap();
        assert!(resolved.starts_with(&root));
        assert!(resolved.ends_with("nested/dir/registrations.json"));
    }
}
