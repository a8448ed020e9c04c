//! Path helpers for containment checks and logical paths.

use std::path::{Component, Path, PathBuf};

/// Normalize a path by resolving `.` and `..` without hitting the filesystem.
pub fn normalize(path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    let mut components = Vec::new();

    for component in path.components() {
        match component {
            Component::Prefix(p) => components.push(Component::Prefix(p)),
            Component::RootDir => {
                components.clear();
                components.push(Component::RootDir);
            }
            Component::CurDir => {}
            Component::ParentDir => match components.last() {
                Some(Component::Normal(_)) => {
                    components.pop();
                }
                Some(Component::ParentDir) | None => components.push(Component::ParentDir),
                _ => {} // Don't pop prefix or root dir
            },
            Component::Normal(c) => components.push(Component::Normal(c)),
        }
    }

    if components.is_empty() {
        PathBuf::from(".")
    } else {
        components.iter().collect()
    }
}

/// Whether `path` is `root` or lies below it.
///
/// Compares whole components, so `/cat` does not contain `/catalog2`.
pub fn is_within(path: impl AsRef<Path>, root: impl AsRef<Path>) -> bool {
    normalize(path).starts_with(normalize(root))
}

/// Split a logical path (`"Icons/AppIcon"`) into its names, skipping empty
/// segments.
pub fn logical_segments(logical_path: &str) -> Vec<&str> {
    logical_path
        .split('/')
        .filter(|segment| !segment.is_empty())
        .collect()
}

/// Join names into a logical path.
pub fn join_logical(parent: &str, name: &str) -> String {
    if parent.is_empty() {
        name.to_string()
    } else {
        format!("{parent}/{name}")
    }
}

/// Lowercase extension of a file name, if any.
pub fn extension_lowercase(file_name: &str) -> Option<String> {
    Path::new(file_name)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("a/b/../c"), PathBuf::from("a/c"));
        assert_eq!(normalize("a/./b"), PathBuf::from("a/b"));
        assert_eq!(normalize("../a/b"), PathBuf::from("../a/b"));
        assert_eq!(normalize("/a/../b"), PathBuf::from("/b"));
        assert_eq!(normalize(""), PathBuf::from("."));
    }

    #[test]
    fn test_is_within_segment_semantics() {
        assert!(is_within("/cat", "/cat"));
        assert!(is_within("/cat/Icons/A.imageset", "/cat"));
        assert!(!is_within("/catalog2", "/cat"));
        assert!(!is_within("/catalog2/Icons", "/cat"));
        assert!(!is_within("/cat/../etc", "/cat"));
    }

    #[test]
    fn test_logical_segments() {
        assert_eq!(logical_segments("Icons/AppIcon"), vec!["Icons", "AppIcon"]);
        assert_eq!(logical_segments("/Icons//AppIcon/"), vec!["Icons", "AppIcon"]);
        assert!(logical_segments("").is_empty());
    }

    #[test]
    fn test_join_logical() {
        assert_eq!(join_logical("", "Icons"), "Icons");
        assert_eq!(join_logical("Icons", "AppIcon"), "Icons/AppIcon");
    }

    #[test]
    fn test_extension_lowercase() {
        assert_eq!(extension_lowercase("anim.LOTTIE"), Some("lottie".to_string()));
        assert_eq!(extension_lowercase("data.json"), Some("json".to_string()));
        assert_eq!(extension_lowercase("README"), None);
    }
}
