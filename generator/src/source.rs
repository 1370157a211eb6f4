// Licensed under the Apache-2.0 license

//! Access to the firmware source tree.
//!
//! Generators never touch the file system directly; they list and read
//! through a [`FileSource`] so the same code runs against a real checkout or
//! an in-memory tree.

use log::debug;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::error::{GenError, GenResult};

pub trait FileSource {
    /// Files directly inside `dir` whose name ends in `.{ext}`, sorted by
    /// file name. Paths are relative to the source root.
    fn list(&self, dir: &Path, ext: &str) -> GenResult<Vec<PathBuf>>;

    fn read(&self, path: &Path) -> GenResult<String>;
}

/// Returns true if the file name of `path` ends with `.{ext}`.
pub(crate) fn has_ext(path: &Path, ext: &str) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(ext))
        .is_some_and(|stem| stem.ends_with('.'))
}

/// A [`FileSource`] rooted at a directory on disk.
#[derive(Clone, Debug)]
pub struct FsFileSource {
    root: PathBuf,
}

impl FsFileSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl FileSource for FsFileSource {
    fn list(&self, dir: &Path, ext: &str) -> GenResult<Vec<PathBuf>> {
        let full = self.root.join(dir);
        if !full.is_dir() {
            return Err(GenError::MissingInput {
                path: dir.to_path_buf(),
            });
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(&full)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = entry.map_err(|e| {
                let path = e.path().unwrap_or(&full).to_path_buf();
                GenError::io(path, e.into())
            })?;
            if entry.file_type().is_file() && has_ext(entry.path(), ext) {
                files.push(dir.join(entry.file_name()));
            }
        }
        debug!("{}: {} .{} files", dir.display(), files.len(), ext);
        Ok(files)
    }

    fn read(&self, path: &Path) -> GenResult<String> {
        fs::read_to_string(self.root.join(path)).map_err(|e| GenError::io(path, e))
    }
}
