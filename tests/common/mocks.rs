use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use ipxact::{FileSource, IpxactError};

/// In-memory document store standing in for the filesystem
#[derive(Clone, Default)]
pub struct MockFileSource {
    files: Arc<Mutex<HashMap<PathBuf, Vec<u8>>>>,
    failures: Arc<Mutex<HashMap<PathBuf, std::io::ErrorKind>>>,
    read_log: Arc<Mutex<Vec<PathBuf>>>,
}

impl MockFileSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_file(&self, path: impl Into<PathBuf>, content: impl Into<Vec<u8>>) {
        self.files
            .lock()
            .unwrap()
            .insert(path.into(), content.into());
    }

    /// Make every read of `path` fail with an I/O error of `kind`.
    pub fn add_failure(&self, path: impl Into<PathBuf>, kind: std::io::ErrorKind) {
        self.failures.lock().unwrap().insert(path.into(), kind);
    }

    pub fn get_read_log(&self) -> Vec<PathBuf> {
        self.read_log.lock().unwrap().clone()
    }

    pub fn read_count(&self) -> usize {
        self.read_log.lock().unwrap().len()
    }
}

impl FileSource for MockFileSource {
    fn read(&self, path: &Path) -> ipxact::Result<Vec<u8>> {
        self.read_log.lock().unwrap().push(path.to_path_buf());

        if let Some(kind) = self.failures.lock().unwrap().get(path) {
            return Err(IpxactError::Io {
                path: path.to_path_buf(),
                source: std::io::Error::new(*kind, "mock failure"),
            });
        }

        self.files
            .lock()
            .unwrap()
            .get(path)
            .cloned()
            .ok_or_else(|| IpxactError::FileNotFound {
                path: path.to_path_buf(),
            })
    }
}

/// Builders for small documents used across tests
pub struct MockDataBuilder;

impl MockDataBuilder {
    pub const IPXACT_2014: &'static str = "http://www.accellera.org/XMLSchema/IPXACT/1685-2014";

    /// A minimal valid 2014 component with the given body after the header.
    pub fn component(name: &str, body: &str) -> String {
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?>
<ipxact:component xmlns:ipxact="{}">
	<ipxact:vendor>VHDL</ipxact:vendor>
	<ipxact:library>PoC</ipxact:library>
	<ipxact:name>{}</ipxact:name>
	<ipxact:version>1.0</ipxact:version>
{}
</ipxact:component>
"#,
            Self::IPXACT_2014,
            name,
            body
        )
    }

    pub fn malformed_component() -> String {
        r#"<?xml version="1.0" encoding="UTF-8"?>
<ipxact:component xmlns:ipxact="http://www.accellera.org/XMLSchema/IPXACT/1685-2014">
	<ipxact:vendor>VHDL
</ipxact:component>"#
            .to_string()
    }

    pub fn with_bom(xml: &str) -> Vec<u8> {
        let mut bytes = vec![0xEF, 0xBB, 0xBF];
        bytes.extend_from_slice(xml.as_bytes());
        bytes
    }
}
