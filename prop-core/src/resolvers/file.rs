use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::Resolver;
use crate::convert::converters::parse_properties;
use crate::error::ResolveError;

/// Resolver backed by a `.properties` file.
///
/// The file is read once at construction; resolution afterwards is a map
/// lookup and never touches the filesystem again.
#[derive(Debug)]
pub struct FileResolver {
    path: PathBuf,
    properties: HashMap<String, String>,
}

impl FileResolver {
    /// Load and parse the properties file at `path`.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, ResolveError> {
        let path = path.into();
        let text = fs::read_to_string(&path).map_err(|source| ResolveError::Io {
            source_name: path.display().to_string(),
            source,
        })?;

        Ok(Self {
            properties: parse_properties(&text),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Resolver for FileResolver {
    fn resolve(&self, name: &str) -> Result<Option<String>, ResolveError> {
        Ok(self.properties.get(name).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn temp_properties_file(contents: &str) -> PathBuf {
        let mut path = std::env::temp_dir();
        path.push(format!(
            "prop-core-file-test-{}.properties",
            std::process::id()
        ));
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        path
    }

    #[test]
    fn test_loads_and_resolves() {
        let path = temp_properties_file("app.name=from-file\n# comment\napp.port=8080\n");
        let resolver = FileResolver::load(&path).unwrap();
        assert_eq!(
            resolver.resolve("app.name").unwrap().as_deref(),
            Some("from-file")
        );
        assert_eq!(resolver.resolve("app.port").unwrap().as_deref(), Some("8080"));
        assert_eq!(resolver.resolve("missing").unwrap(), None);
        fs::remove_file(path).ok();
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let err = FileResolver::load("/definitely/not/here.properties").unwrap_err();
        assert!(matches!(err, ResolveError::Io { .. }));
    }
}
