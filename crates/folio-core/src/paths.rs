/*
 * paths.rs
 * Copyright (c) 2025 Posit, PBC
 *
 * Lexical path resolution.
 */

//! Lexical path helpers.
//!
//! Output paths are computed purely by path algebra against an explicit base
//! directory. Nothing here touches the filesystem or the process working
//! directory.

use std::path::{Component, Path, PathBuf};

/// Remove `.` components and fold `..` into their parent, without touching disk.
///
/// `..` at the root of an absolute path is dropped; leading `..` of a
/// relative path is kept.
pub fn normalize_path(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                let ends_with_normal =
                    matches!(out.components().next_back(), Some(Component::Normal(_)));
                if ends_with_normal {
                    out.pop();
                } else if !out.has_root() {
                    out.push("..");
                }
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}

/// Resolve `path` against `base` (unless already absolute) and normalize.
pub fn resolve_path(base: &Path, path: impl AsRef<Path>) -> PathBuf {
    let path = path.as_ref();
    if path.is_absolute() {
        normalize_path(path)
    } else {
        normalize_path(&base.join(path))
    }
}

/// Insert `_<n>` between the file stem and extension: `dir/name.ext` -> `dir/name_n.ext`.
pub fn with_numeric_suffix(path: &Path, n: usize) -> PathBuf {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match path.extension() {
        Some(ext) => format!("{stem}_{n}.{}", ext.to_string_lossy()),
        None => format!("{stem}_{n}"),
    };
    path.with_file_name(file_name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path() {
        assert_eq!(
            normalize_path(Path::new("/a/b/../c/./d.pdf")),
            PathBuf::from("/a/c/d.pdf")
        );
        assert_eq!(normalize_path(Path::new("/../x")), PathBuf::from("/x"));
        assert_eq!(normalize_path(Path::new("../x/./y")), PathBuf::from("../x/y"));
        assert_eq!(normalize_path(Path::new("a/../../b")), PathBuf::from("../b"));
    }

    #[test]
    fn test_resolve_path_relative_and_absolute() {
        let base = Path::new("/project/docs");
        assert_eq!(
            resolve_path(base, "out/paper.pdf"),
            PathBuf::from("/project/docs/out/paper.pdf")
        );
        // Paths may leave the project; this is allowed
        assert_eq!(
            resolve_path(base, "../../elsewhere/paper.pdf"),
            PathBuf::from("/elsewhere/paper.pdf")
        );
        assert_eq!(
            resolve_path(base, "/abs/paper.pdf"),
            PathBuf::from("/abs/paper.pdf")
        );
    }

    #[test]
    fn test_with_numeric_suffix() {
        assert_eq!(
            with_numeric_suffix(Path::new("/out/paper.pdf"), 2),
            PathBuf::from("/out/paper_2.pdf")
        );
        assert_eq!(
            with_numeric_suffix(Path::new("/out/paper.v1.docx"), 1),
            PathBuf::from("/out/paper.v1_1.docx")
        );
    }
}
