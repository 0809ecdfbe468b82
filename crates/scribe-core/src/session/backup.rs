//! Pre-modification file backups
//!
//! Mirrors the included files into a backup directory before they are
//! rewritten. The layout under the backup root mirrors the workspace layout,
//! with a `.backup` suffix on every file. An existing backup is never
//! overwritten, so the mirror keeps the contents each file had when it first
//! entered the session.

use std::path::{Path, PathBuf};

use crate::context::CodeContext;
use crate::error::ScribeResult;

/// Default backup directory name, relative to the session working directory
pub const DEFAULT_BACKUP_DIR: &str = ".scribe_backups";

/// Copies included files into a backup mirror
pub struct BackupManager {
    backup_dir: PathBuf,
}

impl BackupManager {
    /// Create a manager writing into the given directory
    pub fn new(backup_dir: impl Into<PathBuf>) -> Self {
        Self {
            backup_dir: backup_dir.into(),
        }
    }

    /// Create a manager writing into `.scribe_backups` under `cwd`
    pub fn for_workspace(cwd: &Path) -> Self {
        Self::new(cwd.join(DEFAULT_BACKUP_DIR))
    }

    /// The backup root directory
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// Back up every file in the code context
    ///
    /// Returns the backup paths created by this call. Files that already
    /// have a backup are skipped; a file that fails to copy is logged and
    /// skipped rather than aborting the rest.
    pub fn backup_files(&self, context: &CodeContext, cwd: &Path) -> ScribeResult<Vec<PathBuf>> {
        std::fs::create_dir_all(&self.backup_dir)?;

        let mut created = Vec::new();
        for feature in context.features() {
            let backup_path = self.backup_path(&feature.path, cwd);
            if backup_path.exists() {
                continue;
            }
            if let Some(parent) = backup_path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            match std::fs::copy(&feature.path, &backup_path) {
                Ok(_) => created.push(backup_path),
                Err(error) => {
                    tracing::warn!(path = %feature.path.display(), %error, "backup failed");
                }
            }
        }
        Ok(created)
    }

    /// Where a file's backup lives under the backup root
    ///
    /// The workspace-relative path is mirrored; a file outside the workspace
    /// keeps only its name.
    fn backup_path(&self, path: &Path, cwd: &Path) -> PathBuf {
        let relative = match path.strip_prefix(cwd) {
            Ok(relative) => relative,
            Err(_) => path.file_name().map_or(path, Path::new),
        };
        let mut mirrored = self.backup_dir.join(relative);
        let mut name = mirrored.file_name().unwrap_or_default().to_os_string();
        name.push(".backup");
        mirrored.set_file_name(name);
        mirrored
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn workspace_with_files(files: &[&str]) -> (TempDir, CodeContext) {
        let dir = TempDir::new().unwrap();
        let mut context = CodeContext::new();
        for file in files {
            let path = dir.path().join(file);
            if let Some(parent) = path.parent() {
                fs::create_dir_all(parent).unwrap();
            }
            fs::write(&path, format!("contents of {file}\n")).unwrap();
            context.include(Path::new(file), dir.path()).unwrap();
        }
        (dir, context)
    }

    #[test]
    fn test_backup_mirrors_workspace_layout() {
        let (dir, context) = workspace_with_files(&["a.rs", "src/lib.rs"]);
        let manager = BackupManager::for_workspace(dir.path());

        let created = manager.backup_files(&context, dir.path()).unwrap();
        assert_eq!(created.len(), 2);

        let root = dir.path().join(DEFAULT_BACKUP_DIR);
        assert_eq!(
            fs::read_to_string(root.join("a.rs.backup")).unwrap(),
            "contents of a.rs\n"
        );
        assert_eq!(
            fs::read_to_string(root.join("src/lib.rs.backup")).unwrap(),
            "contents of src/lib.rs\n"
        );
    }

    #[test]
    fn test_existing_backup_is_not_overwritten() {
        let (dir, context) = workspace_with_files(&["a.rs"]);
        let manager = BackupManager::for_workspace(dir.path());

        let first = manager.backup_files(&context, dir.path()).unwrap();
        assert_eq!(first.len(), 1);

        fs::write(dir.path().join("a.rs"), "rewritten\n").unwrap();
        let second = manager.backup_files(&context, dir.path()).unwrap();
        assert!(second.is_empty());

        // The mirror keeps the original contents.
        assert_eq!(
            fs::read_to_string(&first[0]).unwrap(),
            "contents of a.rs\n"
        );
    }

    #[test]
    fn test_backup_empty_context() {
        let dir = TempDir::new().unwrap();
        let manager = BackupManager::for_workspace(dir.path());

        let created = manager.backup_files(&CodeContext::new(), dir.path()).unwrap();
        assert!(created.is_empty());
        assert!(manager.backup_dir().is_dir());
    }
}
