// Licensed under the Apache-2.0 license

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while generating build artifacts
#[derive(Error, Debug)]
pub enum GenError {
    /// An input directory or file the layout requires does not exist
    #[error("missing input: {}", path.display())]
    MissingInput { path: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A line invokes a registration macro but its arguments do not fit the
    /// expected shape
    #[error("{}:{line}: malformed {macro_name} invocation: {text}", path.display())]
    Malformed {
        path: PathBuf,
        line: usize,
        macro_name: String,
        text: String,
    },

    #[error("invalid configuration {}: {source}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl GenError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        if source.kind() == std::io::ErrorKind::NotFound {
            GenError::MissingInput { path }
        } else {
            GenError::Io { path, source }
        }
    }
}

/// Result type for generator operations
pub type GenResult<T> = std::result::Result<T, GenError>;
