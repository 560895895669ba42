//! # Filesystem Primitives
//!
//! The copy, removal and path-resolution primitives used when materializing
//! repository content. They sit behind the [`FileOperations`] trait so the
//! projector and extractor can be tested with a recording fake.

use std::fs;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{Error, Result};

/// Trait for filesystem operations - allows mocking in tests
pub trait FileOperations: Send + Sync {
    /// Resolve `path` against the current working directory.
    fn absolute(&self, path: &Path) -> Result<PathBuf>;

    /// Copy a regular file to `dst`, overwriting it and creating parents.
    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Recursively copy the directory `src` to `dst`.
    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<()>;

    /// Remove `path` and everything beneath it.
    fn remove_dir(&self, path: &Path) -> Result<()>;
}

/// Filesystem operations against the host filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultFileOperations;

impl FileOperations for DefaultFileOperations {
    fn absolute(&self, path: &Path) -> Result<PathBuf> {
        Ok(std::path::absolute(path)?)
    }

    fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
        if let Some(parent) = dst.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| copy_error(src, dst, e))?;
        }
        fs::copy(src, dst).map_err(|e| copy_error(src, dst, e))?;
        Ok(())
    }

    fn copy_dir(&self, src: &Path, dst: &Path) -> Result<()> {
        for entry in WalkDir::new(src).follow_links(true) {
            let entry = entry.map_err(|e| Error::Copy {
                src: src.to_path_buf(),
                dst: dst.to_path_buf(),
                message: e.to_string(),
            })?;

            let relative = entry.path().strip_prefix(src).map_err(|e| Error::Copy {
                src: entry.path().to_path_buf(),
                dst: dst.to_path_buf(),
                message: e.to_string(),
            })?;
            let target = dst.join(relative);

            let file_type = entry.file_type();
            if file_type.is_dir() {
                fs::create_dir_all(&target).map_err(|e| copy_error(entry.path(), &target, e))?;
            } else if file_type.is_file() {
                fs::copy(entry.path(), &target).map_err(|e| copy_error(entry.path(), &target, e))?;
            } else {
                log::warn!("Skipping unsupported path {}", entry.path().display());
            }
        }
        Ok(())
    }

    fn remove_dir(&self, path: &Path) -> Result<()> {
        fs::remove_dir_all(path).map_err(|e| Error::Copy {
            src: path.to_path_buf(),
            dst: path.to_path_buf(),
            message: format!("failed to remove directory: {}", e),
        })
    }
}

fn copy_error(src: &Path, dst: &Path, error: std::io::Error) -> Error {
    Error::Copy {
        src: src.to_path_buf(),
        dst: dst.to_path_buf(),
        message: error.to_string(),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording `FileOperations` fake shared by the unit tests.

    use super::*;
    use std::sync::{Arc, Mutex};

    /// One recorded filesystem call.
    #[derive(Debug, Clone, PartialEq, Eq)]
    pub enum FsCall {
        Absolute(PathBuf),
        CopyFile(PathBuf, PathBuf),
        CopyDir(PathBuf, PathBuf),
        RemoveDir(PathBuf),
    }

    /// Records every call and delegates to the real implementation, unless
    /// `fail_on` names a destination whose copy should fail.
    #[derive(Clone, Default)]
    pub struct RecordingFileOperations {
        pub calls: Arc<Mutex<Vec<FsCall>>>,
        pub fail_on: Option<PathBuf>,
        pub absolute_error: bool,
    }

    impl RecordingFileOperations {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<FsCall> {
            self.calls.lock().unwrap().clone()
        }

        fn check_failure(&self, src: &Path, dst: &Path) -> Result<()> {
            if self.fail_on.as_deref() == Some(dst) {
                return Err(Error::Copy {
                    src: src.to_path_buf(),
                    dst: dst.to_path_buf(),
                    message: "injected failure".to_string(),
                });
            }
            Ok(())
        }
    }

    impl FileOperations for RecordingFileOperations {
        fn absolute(&self, path: &Path) -> Result<PathBuf> {
            self.calls
                .lock()
                .unwrap()
                .push(FsCall::Absolute(path.to_path_buf()));
            if self.absolute_error {
                return Err(Error::Io(std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    "current directory is unavailable",
                )));
            }
            DefaultFileOperations.absolute(path)
        }

        fn copy_file(&self, src: &Path, dst: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(FsCall::CopyFile(src.to_path_buf(), dst.to_path_buf()));
            self.check_failure(src, dst)?;
            DefaultFileOperations.copy_file(src, dst)
        }

        fn copy_dir(&self, src: &Path, dst: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(FsCall::CopyDir(src.to_path_buf(), dst.to_path_buf()));
            self.check_failure(src, dst)?;
            DefaultFileOperations.copy_dir(src, dst)
        }

        fn remove_dir(&self, path: &Path) -> Result<()> {
            self.calls
                .lock()
                .unwrap()
                .push(FsCall::RemoveDir(path.to_path_buf()));
            DefaultFileOperations.remove_dir(path)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_absolute_relative_path() {
        let ops = DefaultFileOperations;
        let resolved = ops.absolute(Path::new("vendor/repo")).unwrap();
        assert!(resolved.is_absolute());
        assert!(resolved.ends_with("vendor/repo"));
    }

    #[test]
    fn test_absolute_keeps_absolute_path() {
        let ops = DefaultFileOperations;
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(ops.absolute(temp_dir.path()).unwrap(), temp_dir.path());
    }

    #[test]
    fn test_copy_file_creates_parents_and_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src.txt");
        let dst = temp_dir.path().join("a").join("b").join("dst.txt");
        fs::write(&src, "new").unwrap();

        let ops = DefaultFileOperations;
        ops.copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "new");

        fs::write(&src, "newer").unwrap();
        ops.copy_file(&src, &dst).unwrap();
        assert_eq!(fs::read_to_string(&dst).unwrap(), "newer");
    }

    #[test]
    fn test_copy_file_missing_source() {
        let temp_dir = TempDir::new().unwrap();
        let err = DefaultFileOperations
            .copy_file(&temp_dir.path().join("missing"), &temp_dir.path().join("dst"))
            .unwrap_err();
        assert!(matches!(err, Error::Copy { .. }));
    }

    #[test]
    fn test_copy_dir_recursive() {
        let temp_dir = TempDir::new().unwrap();
        let src = temp_dir.path().join("src");
        fs::create_dir_all(src.join("nested").join("deep")).unwrap();
        fs::write(src.join("top.txt"), "top").unwrap();
        fs::write(src.join("nested").join("deep").join("leaf.txt"), "leaf").unwrap();

        let dst = temp_dir.path().join("out").join("copy");
        DefaultFileOperations.copy_dir(&src, &dst).unwrap();

        assert_eq!(fs::read_to_string(dst.join("top.txt")).unwrap(), "top");
        assert_eq!(
            fs::read_to_string(dst.join("nested").join("deep").join("leaf.txt")).unwrap(),
            "leaf"
        );
    }

    #[test]
    fn test_remove_dir() {
        let temp_dir = TempDir::new().unwrap();
        let dir = temp_dir.path().join("doomed");
        fs::create_dir_all(dir.join("inner")).unwrap();
        fs::write(dir.join("inner").join("file"), "x").unwrap();

        DefaultFileOperations.remove_dir(&dir).unwrap();
        assert!(!dir.exists());
    }

    #[test]
    fn test_remove_missing_dir_fails() {
        let temp_dir = TempDir::new().unwrap();
        let err = DefaultFileOperations
            .remove_dir(&temp_dir.path().join("missing"))
            .unwrap_err();
        assert!(matches!(err, Error::Copy { .. }));
    }
}
