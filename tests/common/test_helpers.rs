use std::path::{Path, PathBuf};

use tempfile::TempDir;

use ipxact::{Config, DocumentLoader, FileSource, UnimplementedContent};

/// Test fixture paths
pub struct TestFixtures {
    pub fixtures_dir: PathBuf,
    pub examples_dir: PathBuf,
}

impl TestFixtures {
    pub fn new() -> Self {
        let tests_dir = PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("tests");

        Self {
            fixtures_dir: tests_dir.join("fixtures"),
            examples_dir: tests_dir.join("Examples"),
        }
    }

    /// Root of the per-release schema directories
    pub fn schema_dir(&self) -> PathBuf {
        self.fixtures_dir.join("schema")
    }

    pub fn example(&self, name: &str) -> PathBuf {
        self.examples_dir.join(name)
    }

    pub fn catalog_xml(&self) -> PathBuf {
        self.example("Catalog.xml")
    }

    pub fn component_xml(&self) -> PathBuf {
        self.example("Component.xml")
    }

    pub fn component_2009_xml(&self) -> PathBuf {
        self.example("Component2009.xml")
    }

    pub fn design_xml(&self) -> PathBuf {
        self.example("Design.xml")
    }

    pub fn config(&self) -> Config {
        Config::with_schema_directory(self.schema_dir())
    }

    pub fn discarding_config(&self) -> Config {
        let mut config = self.config();
        config.parsing.unimplemented_content = UnimplementedContent::Discard;
        config
    }

    pub fn loader(&self) -> DocumentLoader {
        DocumentLoader::new(&self.config()).expect("fixture configuration is valid")
    }

    pub fn loader_with<S: FileSource>(&self, source: S) -> DocumentLoader<S> {
        DocumentLoader::with_source(&self.config(), source).expect("fixture configuration is valid")
    }

    pub fn read_example(&self, name: &str) -> String {
        std::fs::read_to_string(self.example(name)).expect("example exists")
    }
}

impl Default for TestFixtures {
    fn default() -> Self {
        Self::new()
    }
}

/// Copy an example into a fresh temporary directory.
pub fn copy_example(fixtures: &TestFixtures, name: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let target = temp_dir.path().join(name);
    std::fs::copy(fixtures.example(name), &target)?;
    Ok((temp_dir, target))
}

/// Write `content` to `name` inside a fresh temporary directory.
pub fn write_temp(name: &str, content: &str) -> std::io::Result<(TempDir, PathBuf)> {
    let temp_dir = TempDir::new()?;
    let target = temp_dir.path().join(name);
    std::fs::write(&target, content)?;
    Ok((temp_dir, target))
}

/// Positions of `needles` in `haystack`, asserting each is present.
pub fn positions(haystack: &str, needles: &[&str]) -> Vec<usize> {
    needles
        .iter()
        .map(|needle| {
            haystack
                .find(needle)
                .unwrap_or_else(|| panic!("'{}' not found in output", needle))
        })
        .collect()
}

pub fn assert_ordered(haystack: &str, needles: &[&str]) {
    let found = positions(haystack, needles);
    assert!(
        found.windows(2).all(|pair| pair[0] < pair[1]),
        "expected {:?} in order",
        needles
    );
}

pub fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
