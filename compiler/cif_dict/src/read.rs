//! Reading CIF files from disk.

use std::io;
use std::path::{Path, PathBuf};

use crate::{parse_with_config, DictConfig, ParseOutput};

/// The input could not be read, so nothing was parsed.
#[derive(Debug, thiserror::Error)]
pub enum ReadError {
    #[error("cannot find file '{}'", .0.display())]
    NotFound(PathBuf),

    #[error("permission denied reading '{}'", .0.display())]
    PermissionDenied(PathBuf),

    #[error("'{}' contains invalid UTF-8 data", .0.display())]
    InvalidUtf8(PathBuf),

    #[error("error reading '{}': {source}", .path.display())]
    Io { path: PathBuf, source: io::Error },
}

impl ReadError {
    fn from_io(path: &Path, err: io::Error) -> Self {
        let path = path.to_path_buf();
        match err.kind() {
            io::ErrorKind::NotFound => ReadError::NotFound(path),
            io::ErrorKind::PermissionDenied => ReadError::PermissionDenied(path),
            io::ErrorKind::InvalidData => ReadError::InvalidUtf8(path),
            _ => ReadError::Io { path, source: err },
        }
    }

    /// The path that failed.
    pub fn path(&self) -> &Path {
        match self {
            ReadError::NotFound(path)
            | ReadError::PermissionDenied(path)
            | ReadError::InvalidUtf8(path)
            | ReadError::Io { path, .. } => path,
        }
    }
}

/// Read a file as UTF-8 text.
pub fn read_source(path: impl AsRef<Path>) -> Result<String, ReadError> {
    let path = path.as_ref();
    std::fs::read_to_string(path).map_err(|err| ReadError::from_io(path, err))
}

/// Read and parse a file with the default configuration.
pub fn parse_file(path: impl AsRef<Path>) -> Result<ParseOutput, ReadError> {
    parse_file_with_config(path, &DictConfig::default())
}

/// Read and parse a file.
pub fn parse_file_with_config(
    path: impl AsRef<Path>,
    config: &DictConfig,
) -> Result<ParseOutput, ReadError> {
    let source = read_source(path)?;
    Ok(parse_with_config(&source, config))
}
