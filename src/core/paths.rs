use std::path::{Component, Path, PathBuf};

use crate::config::VENDOR_DIR;

/// Lexically cleans a path: drops `.` segments and folds `..` into its
/// parent without touching the filesystem. Leading `..` of a relative path
/// are kept, `..` above the root is dropped, and an empty result becomes `.`.
pub fn clean_path(path: &Path) -> PathBuf {
    let mut parts: Vec<Component> = Vec::new();

    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => match parts.last() {
                Some(Component::Normal(_)) => {
                    parts.pop();
                }
                Some(Component::RootDir) | Some(Component::Prefix(_)) => {}
                _ => parts.push(component),
            },
            other => parts.push(other),
        }
    }

    if parts.is_empty() {
        return PathBuf::from(".");
    }
    parts.iter().collect()
}

/// True when the final segment is the vendor directory, ignoring case.
pub fn is_vendor_dir(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .map(|name| name.eq_ignore_ascii_case(VENDOR_DIR))
        .unwrap_or(false)
}

/// True when any segment of a slash-separated import path is the vendor
/// directory, ignoring case.
pub fn has_vendor_segment(specifier: &str) -> bool {
    specifier
        .split('/')
        .any(|segment| segment.eq_ignore_ascii_case(VENDOR_DIR))
}

/// True for the two paths a malformed join can collapse to.
pub fn is_dot_path(path: &Path) -> bool {
    path == Path::new(".") || path == Path::new("..")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_path_folds_dots() {
        assert_eq!(clean_path(Path::new("/a/./b/../c")), PathBuf::from("/a/c"));
        assert_eq!(clean_path(Path::new("a/b/..")), PathBuf::from("a"));
        assert_eq!(clean_path(Path::new("/..")), PathBuf::from("/"));
        assert_eq!(clean_path(Path::new("../x/../..")), PathBuf::from("../.."));
    }

    #[test]
    fn clean_path_empty_is_dot() {
        assert_eq!(clean_path(Path::new("")), PathBuf::from("."));
        assert_eq!(clean_path(Path::new("./")), PathBuf::from("."));
        assert_eq!(clean_path(Path::new("a/..")), PathBuf::from("."));
    }

    #[test]
    fn vendor_match_ignores_case() {
        assert!(is_vendor_dir(Path::new("/src/app/vendor")));
        assert!(is_vendor_dir(Path::new("Vendor")));
        assert!(!is_vendor_dir(Path::new("/src/vendored")));
        assert!(!is_vendor_dir(Path::new("/vendor/app")));
    }

    #[test]
    fn vendor_segment_anywhere_in_specifier() {
        assert!(has_vendor_segment("github.com/a/b/vendor/c"));
        assert!(has_vendor_segment("VENDOR/x"));
        assert!(!has_vendor_segment("github.com/vendored/x"));
    }

    #[test]
    fn dot_paths() {
        assert!(is_dot_path(Path::new(".")));
        assert!(is_dot_path(Path::new("..")));
        assert!(!is_dot_path(Path::new("../a")));
    }
}
