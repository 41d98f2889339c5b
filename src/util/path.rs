//! Lexical path handling for declared requirement paths.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` components without filesystem access.
///
/// Leading `..` of a relative path are kept; `..` at the filesystem root is dropped.
pub fn normalize(path: &Path) -> PathBuf {
    let mut components: Vec<Component> = Vec::new();
    for component in path.components() {
        match component {
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => components.push(component),
            },
            Component::CurDir => {}
            other => components.push(other),
        }
    }
    components.iter().collect()
}

/// Resolve a declared path against `root`.
///
/// Relative paths are joined onto the root, absolute paths are taken as is.
/// Returns `None` when the result leaves the root.
pub fn resolve_under(root: &Path, declared: &Path) -> Option<PathBuf> {
    let root = normalize(root);
    // `..` past an absolute root is dropped by normalize, so check the raw depth first.
    if escapes(declared) {
        return None;
    }
    let joined = normalize(&root.join(declared));
    if joined.starts_with(&root) {
        Some(joined)
    } else {
        None
    }
}

fn escapes(declared: &Path) -> bool {
    if declared.is_absolute() {
        return false;
    }
    let mut depth: isize = 0;
    for component in declared.components() {
        match component {
            Component::ParentDir => depth -= 1,
            Component::Normal(_) => depth += 1,
            _ => {}
        }
        if depth < 0 {
            return true;
        }
    }
    false
}
