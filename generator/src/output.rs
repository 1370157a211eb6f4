// Licensed under the Apache-2.0 license

//! Generated files and how they reach the disk.
//!
//! Generators build [`Artifact`]s in memory. Writing always replaces the
//! previous file completely; nothing is merged with what was there before.

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{GenError, GenResult};

/// A generated file, addressed relative to the source root.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Artifact {
    pub path: PathBuf,
    pub contents: String,
}

impl Artifact {
    pub fn new(path: impl Into<PathBuf>, contents: String) -> Self {
        Self {
            path: path.into(),
            contents,
        }
    }

    /// Overwrite the file under `root`, creating its directory if needed.
    pub fn write(&self, root: &Path) -> GenResult<()> {
        let dest = root.join(&self.path);
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent).map_err(|source| GenError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        fs::write(&dest, &self.contents).map_err(|source| GenError::Io {
            path: self.path.clone(),
            source,
        })
    }

    /// True if the file under `root` already holds exactly these contents.
    pub fn is_current(&self, root: &Path) -> GenResult<bool> {
        match fs::read(root.join(&self.path)) {
            Ok(existing) => Ok(existing == self.contents.as_bytes()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(GenError::io(&self.path, e)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_write_overwrites_and_creates_dirs() {
        let dir = tempfile::tempdir().unwrap();
        let artifact = Artifact::new("hal/mk/REV5A.d", "HWMCU = STM32F405\n".to_string());
        assert!(!artifact.is_current(dir.path()).unwrap());

        fs::create_dir_all(dir.path().join("hal/mk")).unwrap();
        fs::write(dir.path().join("hal/mk/REV5A.d"), "stale\nstale\nstale\n").unwrap();
        assert!(!artifact.is_current(dir.path()).unwrap());

        artifact.write(dir.path()).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("hal/mk/REV5A.d")).unwrap(),
            "HWMCU = STM32F405\n"
        );
        assert!(artifact.is_current(dir.path()).unwrap());
    }
}
