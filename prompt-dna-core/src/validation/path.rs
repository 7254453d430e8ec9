use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PathRequirements {
    pub must_exist: bool,
    pub must_be_file: bool,
    pub must_be_dir: bool,
}

impl Default for PathRequirements {
    fn default() -> Self {
        Self {
            must_exist: true,
            must_be_file: true,
            must_be_dir: false,
        }
    }
}

impl PathRequirements {
    pub fn any() -> Self {
        Self {
            must_exist: false,
            must_be_file: false,
            must_be_dir: false,
        }
    }

    pub fn existing_dir() -> Self {
        Self {
            must_exist: true,
            must_be_file: false,
            must_be_dir: true,
        }
    }
}

/// Type checks only apply to paths that exist. The path is returned as
/// given, without resolution.
pub fn validate_file_path(
    path: impl AsRef<Path>,
    requirements: PathRequirements,
) -> Result<PathBuf> {
    let path = path.as_ref();
    let exists = path.exists();

    if requirements.must_exist && !exists {
        return Err(Error::Validation(format!(
            "file not found: {}",
            path.display()
        )));
    }

    if requirements.must_be_file && exists && !path.is_file() {
        return Err(Error::Validation(format!(
            "path is not a file: {}",
            path.display()
        )));
    }

    if requirements.must_be_dir && exists && !path.is_dir() {
        return Err(Error::Validation(format!(
            "path is not a directory: {}",
            path.display()
        )));
    }

    Ok(path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::{validate_file_path, PathRequirements};

    #[test]
    fn accepts_existing_file_with_defaults() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let validated =
            validate_file_path(file.path(), PathRequirements::default()).expect("file exists");
        assert_eq!(validated, file.path());
    }

    #[test]
    fn rejects_missing_path_with_defaults() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("nope.txt");
        let error = validate_file_path(&missing, PathRequirements::default())
            .expect_err("path does not exist");
        assert!(error.to_string().contains("file not found"));
    }

    #[test]
    fn rejects_directory_when_file_required() {
        let dir = tempfile::tempdir().expect("tempdir");
        let error = validate_file_path(dir.path(), PathRequirements::default())
            .expect_err("directory is not a file");
        assert!(error.to_string().contains("path is not a file"));
    }

    #[test]
    fn rejects_file_when_directory_required() {
        let file = tempfile::NamedTempFile::new().expect("temp file");
        let error = validate_file_path(file.path(), PathRequirements::existing_dir())
            .expect_err("file is not a directory");
        assert!(error.to_string().contains("path is not a directory"));
    }

    #[test]
    fn accepts_directory_when_directory_required() {
        let dir = tempfile::tempdir().expect("tempdir");
        assert!(validate_file_path(dir.path(), PathRequirements::existing_dir()).is_ok());
    }

    #[test]
    fn type_checks_skip_missing_paths() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("later.txt");
        let requirements = PathRequirements {
            must_exist: false,
            ..PathRequirements::default()
        };
        assert!(validate_file_path(&missing, requirements).is_ok());
    }

    #[test]
    fn relaxed_requirements_never_fail() {
        let dir = tempfile::tempdir().expect("tempdir");
        let file = tempfile::NamedTempFile::new().expect("temp file");
        for path in [dir.path().to_path_buf(), file.path().to_path_buf(), dir.path().join("x")] {
            assert!(validate_file_path(&path, PathRequirements::any()).is_ok());
        }
    }
}
