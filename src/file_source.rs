use std::io::ErrorKind;
use std::path::Path;

use crate::error::{IpxactError, Result};

/// Where document bytes come from.
pub trait FileSource {
    fn read(&self, path: &Path) -> Result<Vec<u8>>;
}

/// Reads from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FsSource;

impl FileSource for FsSource {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        std::fs::read(path).map_err(|source| match source.kind() {
            ErrorKind::NotFound => IpxactError::FileNotFound {
                path: path.to_path_buf(),
            },
            _ => IpxactError::Io {
                path: path.to_path_buf(),
                source,
            },
        })
    }
}

impl<S: FileSource + ?Sized> FileSource for &S {
    fn read(&self, path: &Path) -> Result<Vec<u8>> {
        (**self).read(path)
    }
}
