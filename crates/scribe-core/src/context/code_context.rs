//! Included-file tracking
//!
//! `CodeContext` holds the set of files the user has explicitly pulled into
//! the working context. Include and exclude accept the same four path
//! argument shapes as the validation helpers: file, interval path,
//! directory, and glob pattern.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{ScribeError, ScribeResult};

use super::interval::Interval;
use super::paths::{
    build_path_tree, format_path_tree, has_glob_chars, match_path_with_patterns,
    paths_for_directory, split_interval_path, validate_and_format_path,
};

/// One included unit of code: a file, optionally narrowed to line intervals
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CodeFeature {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Included line intervals; empty means the whole file
    pub intervals: Vec<Interval>,
}

impl CodeFeature {
    /// Create a whole-file feature
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            intervals: Vec::new(),
        }
    }

    /// Create a feature narrowed to line intervals
    pub fn with_intervals(path: impl Into<PathBuf>, intervals: Vec<Interval>) -> Self {
        Self {
            path: path.into(),
            intervals,
        }
    }

    /// Reference string for display, e.g. `src/lib.rs:1-5,7-10`
    pub fn reference(&self) -> String {
        if self.intervals.is_empty() {
            self.path.display().to_string()
        } else {
            let spec = self
                .intervals
                .iter()
                .map(Interval::to_string)
                .collect::<Vec<_>>()
                .join(",");
            format!("{}:{}", self.path.display(), spec)
        }
    }
}

/// The set of files the user has pulled into the working context
#[derive(Debug, Clone, Default)]
pub struct CodeContext {
    /// Included features keyed by absolute file path
    include_files: BTreeMap<PathBuf, CodeFeature>,
    /// Glob patterns always excluded from directory walks
    ignore_patterns: BTreeSet<String>,
}

impl CodeContext {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a context with ignore patterns
    pub fn with_ignore_patterns(patterns: impl IntoIterator<Item = String>) -> Self {
        Self {
            include_files: BTreeMap::new(),
            ignore_patterns: patterns.into_iter().collect(),
        }
    }

    /// Add code to the context
    ///
    /// `path` can be a relative or absolute file path, interval path,
    /// directory, or glob pattern. `.` is shorthand for `*` (everything
    /// under `cwd`).
    ///
    /// Returns the set of paths newly added to the context.
    pub fn include(&mut self, path: &Path, cwd: &Path) -> ScribeResult<BTreeSet<PathBuf>> {
        let path = if path == Path::new(".") {
            Path::new("*")
        } else {
            path
        };

        let features = self.features_for_path(path, cwd)?;

        let mut included = BTreeSet::new();
        for feature in features {
            included.insert(feature.path.clone());
            self.include_files.insert(feature.path.clone(), feature);
        }
        Ok(included)
    }

    /// Remove code from the context
    ///
    /// Accepts the same path shapes as [`CodeContext::include`]. Returns the
    /// set of paths removed from the context.
    pub fn exclude(&mut self, path: &Path, cwd: &Path) -> ScribeResult<BTreeSet<PathBuf>> {
        let validated = validate_and_format_path(path, cwd, false)?;

        let mut excluded = BTreeSet::new();

        if validated.is_file() || validated.is_dir() {
            if self.include_files.remove(&validated).is_none() {
                return Err(ScribeError::path(format!(
                    "path {} not in context",
                    validated.display()
                )));
            }
            excluded.insert(validated);
        } else if let Some((file_part, _)) = split_interval_path(&validated) {
            if self.include_files.remove(&file_part).is_none() {
                return Err(ScribeError::path(format!(
                    "path interval {} not in context",
                    validated.display()
                )));
            }
            excluded.insert(file_part);
        } else {
            // Glob: drop every included path the pattern matches.
            let pattern = BTreeSet::from([validated.to_string_lossy().into_owned()]);
            let matching: Vec<PathBuf> = self
                .include_files
                .keys()
                .filter(|included| match_path_with_patterns(included, &pattern))
                .cloned()
                .collect();
            for path in matching {
                self.include_files.remove(&path);
                excluded.insert(path);
            }
        }

        Ok(excluded)
    }

    /// Included features sorted by path
    pub fn features(&self) -> Vec<&CodeFeature> {
        self.include_files.values().collect()
    }

    /// Whether a file is currently included
    pub fn contains(&self, path: &Path) -> bool {
        self.include_files.contains_key(path)
    }

    /// Number of included files
    pub fn len(&self) -> usize {
        self.include_files.len()
    }

    /// Check if no files are included
    pub fn is_empty(&self) -> bool {
        self.include_files.is_empty()
    }

    /// Render the included files as a path tree relative to `cwd`
    pub fn display_tree(&self, cwd: &Path) -> String {
        let files: Vec<PathBuf> = self.include_files.keys().cloned().collect();
        format_path_tree(&build_path_tree(&files, cwd))
    }

    fn features_for_path(&self, path: &Path, cwd: &Path) -> ScribeResult<Vec<CodeFeature>> {
        let validated = validate_and_format_path(path, cwd, true)?;

        if validated.is_dir() {
            let paths =
                paths_for_directory(&validated, &BTreeSet::new(), &self.ignore_patterns, true)?;
            return Ok(paths.into_iter().map(CodeFeature::new).collect());
        }

        if validated.is_file() {
            return Ok(vec![CodeFeature::new(validated)]);
        }

        if let Some((file_part, intervals)) = split_interval_path(&validated) {
            return Ok(vec![CodeFeature::with_intervals(file_part, intervals)]);
        }

        // Glob pattern: walk from the deepest literal ancestor, using the
        // rest as an include pattern.
        let mut root = PathBuf::new();
        let mut pattern_parts: Vec<String> = Vec::new();
        for component in validated.components() {
            let part = component.as_os_str().to_string_lossy();
            if !pattern_parts.is_empty() || has_glob_chars(&part) {
                pattern_parts.push(part.into_owned());
            } else {
                root.push(component);
            }
        }
        if pattern_parts.is_empty() {
            return Err(ScribeError::path(format!(
                "unable to parse glob pattern {}",
                validated.display()
            )));
        }

        let pattern = pattern_parts.join("/");
        let include = if pattern == "*" {
            BTreeSet::new()
        } else {
            BTreeSet::from([pattern])
        };
        let paths = paths_for_directory(&root, &include, &self.ignore_patterns, true)?;
        Ok(paths.into_iter().map(CodeFeature::new).collect())
    }
}
