//! Path validation and resolution
//!
//! Context commands accept four shapes of path argument: a plain file, an
//! interval path (`src/lib.rs:1-40`), a directory, or a glob pattern. The
//! helpers here validate and normalize those arguments and walk directories
//! with include/exclude pattern filtering.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Component, Path, PathBuf};

use crate::error::{ScribeError, ScribeResult};

use super::interval::{parse_intervals, Interval};

/// Check if a file is text encoded
pub fn is_text_file(path: &Path) -> bool {
    std::fs::read_to_string(path).is_ok()
}

/// Check whether a path string contains glob metacharacters
pub fn has_glob_chars(path: &str) -> bool {
    path.chars().any(|c| matches!(c, '*' | '?' | '[' | ']'))
}

/// Make a path absolute relative to `cwd` and lexically normalize it
///
/// `..` and `.` components are removed without touching the filesystem, so
/// the result is usable for paths that do not exist yet (globs, intervals).
pub fn normalize(path: &Path, cwd: &Path) -> PathBuf {
    let joined = if path.is_absolute() {
        path.to_path_buf()
    } else {
        cwd.join(path)
    };

    let mut normalized = PathBuf::new();
    for component in joined.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                normalized.pop();
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Split an interval path like `src/lib.rs:1-5,7-10`
///
/// Returns the file part and the parsed intervals, or `None` if the path has
/// no interval suffix or the suffix does not parse.
pub fn split_interval_path(path: &Path) -> Option<(PathBuf, Vec<Interval>)> {
    let raw = path.to_str()?;
    let (file_part, interval_part) = raw.rsplit_once(':')?;
    let intervals = parse_intervals(interval_part);
    if intervals.is_empty() {
        return None;
    }
    Some((PathBuf::from(file_part), intervals))
}

/// Validate a path argument and return it as an absolute path
///
/// Accepts a file, an interval path, a directory, or a glob pattern. Files
/// (including the file part of an interval path) must exist and, when
/// `check_for_text` is set, be readable as text.
pub fn validate_and_format_path(
    path: &Path,
    cwd: &Path,
    check_for_text: bool,
) -> ScribeResult<PathBuf> {
    let abs_path = normalize(path, cwd);

    if abs_path.is_file() {
        if check_for_text && !is_text_file(&abs_path) {
            return Err(ScribeError::path(format!(
                "unable to read file {}",
                abs_path.display()
            )));
        }
    } else if let Some((file_part, _intervals)) = split_interval_path(&abs_path) {
        if !file_part.is_file() {
            return Err(ScribeError::path(format!(
                "file {} does not exist",
                file_part.display()
            )));
        }
        if check_for_text && !is_text_file(&file_part) {
            return Err(ScribeError::path(format!(
                "unable to read file {}",
                file_part.display()
            )));
        }
    } else if abs_path.is_dir() || has_glob_chars(&path.to_string_lossy()) {
        // Directories and glob patterns are resolved later, nothing to check.
    } else {
        return Err(ScribeError::path(format!(
            "unable to validate path {}",
            path.display()
        )));
    }

    Ok(abs_path)
}

/// Check if an absolute path matches any of the given glob patterns
///
/// Relative patterns that do not already start with `**` get an implicit
/// `**/` prefix, and a pattern also matches when it matches any single
/// component of the path.
pub fn match_path_with_patterns(path: &Path, patterns: &BTreeSet<String>) -> bool {
    let path_str = path.to_string_lossy();

    for pattern in patterns {
        let compiled = match glob::Pattern::new(pattern) {
            Ok(p) => p,
            Err(_) => continue,
        };

        if compiled.matches(&path_str) {
            return true;
        }

        if !Path::new(pattern).is_absolute() && !pattern.starts_with("**") {
            if let Ok(prefixed) = glob::Pattern::new(&format!("**/{pattern}")) {
                if prefixed.matches(&path_str) {
                    return true;
                }
            }
        }

        if path
            .components()
            .filter_map(|c| c.as_os_str().to_str())
            .any(|part| compiled.matches(part))
        {
            return true;
        }
    }

    false
}

/// Get all file paths in a directory
///
/// Walks `path` (recursively unless `recursive` is false), skipping hidden
/// entries, keeping files that match `include_patterns` (all files when
/// empty) and dropping anything matching `exclude_patterns`.
pub fn paths_for_directory(
    path: &Path,
    include_patterns: &BTreeSet<String>,
    exclude_patterns: &BTreeSet<String>,
    recursive: bool,
) -> ScribeResult<BTreeSet<PathBuf>> {
    if !path.exists() {
        return Err(ScribeError::path(format!(
            "path {} does not exist",
            path.display()
        )));
    }
    if !path.is_dir() {
        return Err(ScribeError::path(format!(
            "path {} is not a directory",
            path.display()
        )));
    }
    if !path.is_absolute() {
        return Err(ScribeError::path(format!(
            "path {} is not absolute",
            path.display()
        )));
    }

    let mut paths = BTreeSet::new();
    collect_paths(
        path,
        include_patterns,
        exclude_patterns,
        recursive,
        &mut paths,
    )?;
    Ok(paths)
}

fn collect_paths(
    dir: &Path,
    include_patterns: &BTreeSet<String>,
    exclude_patterns: &BTreeSet<String>,
    recursive: bool,
    paths: &mut BTreeSet<PathBuf>,
) -> ScribeResult<()> {
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        let entry_path = entry.path();

        let hidden = entry
            .file_name()
            .to_str()
            .is_some_and(|name| name.starts_with('.'));
        if hidden {
            continue;
        }

        if entry_path.is_dir() {
            if !recursive {
                continue;
            }
            if !exclude_patterns.is_empty()
                && match_path_with_patterns(&entry_path, exclude_patterns)
            {
                continue;
            }
            collect_paths(
                &entry_path,
                include_patterns,
                exclude_patterns,
                recursive,
                paths,
            )?;
        } else {
            if !include_patterns.is_empty()
                && !match_path_with_patterns(&entry_path, include_patterns)
            {
                continue;
            }
            if !exclude_patterns.is_empty()
                && match_path_with_patterns(&entry_path, exclude_patterns)
            {
                continue;
            }
            paths.insert(entry_path);
        }
    }
    Ok(())
}

/// A nested tree of path components
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathTree(pub BTreeMap<String, PathTree>);

/// Build a tree of paths relative to `cwd`
pub fn build_path_tree(files: &[PathBuf], cwd: &Path) -> PathTree {
    let mut tree = PathTree::default();
    for file in files {
        let relative = file.strip_prefix(cwd).unwrap_or(file);
        let mut current = &mut tree;
        for part in relative
            .components()
            .filter_map(|c| c.as_os_str().to_str())
        {
            current = current.0.entry(part.to_string()).or_default();
        }
    }
    tree
}

/// Render a path tree with box-drawing connectors
pub fn format_path_tree(tree: &PathTree) -> String {
    let mut out = String::new();
    format_subtree(tree, "", &mut out);
    out
}

fn format_subtree(tree: &PathTree, prefix: &str, out: &mut String) {
    let count = tree.0.len();
    for (i, (name, subtree)) in tree.0.iter().enumerate() {
        let last = i == count - 1;
        let connector = if last { "└── " } else { "├── " };
        out.push_str(prefix);
        out.push_str(connector);
        out.push_str(name);
        out.push('\n');

        let child_prefix = if last {
            format!("{prefix}    ")
        } else {
            format!("{prefix}│   ")
        };
        format_subtree(subtree, &child_prefix, out);
    }
}
