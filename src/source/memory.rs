use super::{relative_name, TemplateSource};
use crate::error::{Error, Result};
use std::collections::BTreeMap;
use std::io;

/// Templates held in memory, keyed by their `/`-separated relative name.
///
/// Names are normalized the way a directory walk would report them, so
/// `"./a//b.yaml"` is stored as `"a/b.yaml"`. Names that can't be relative
/// paths (absolute, escaping with `..`, empty) are kept as given and make
/// [`TemplateSource::files`] fail.
///
/// Useful for templates embedded in a binary and in tests.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    files: BTreeMap<String, Vec<u8>>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a file, replacing any previous content with the same name.
    pub fn with_file(mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) -> Self {
        self.insert(name, content);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, content: impl Into<Vec<u8>>) {
        let name = name.into();
        let name = file_name(&name).unwrap_or(name);
        self.files.insert(name, content.into());
    }
}

/// Normalizes the name of a file, which unlike a directory can't be the root.
fn file_name(name: &str) -> Result<String> {
    let normalized = relative_name(name)?;
    if normalized.is_empty() {
        return Err(Error::filesystem(
            name,
            io::Error::new(io::ErrorKind::InvalidInput, "file name is empty"),
        ));
    }
    Ok(normalized)
}

impl<N: Into<String>, C: Into<Vec<u8>>> FromIterator<(N, C)> for MemorySource {
    fn from_iter<I: IntoIterator<Item = (N, C)>>(iter: I) -> Self {
        let mut source = Self::new();
        for (name, content) in iter {
            source.insert(name, content);
        }
        source
    }
}

impl TemplateSource for MemorySource {
    /// Names are ordered component by component, which is the order a
    /// directory walk sorted by file name produces.
    fn files(&self) -> Result<Vec<String>> {
        let mut names = self
            .files
            .keys()
            .map(|name| file_name(name))
            .collect::<Result<Vec<_>>>()?;
        names.sort_by(|a, b| a.split('/').cmp(b.split('/')));
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let name = file_name(name)?;
        self.files.get(&name).cloned().ok_or_else(|| {
            Error::filesystem(
                name,
                io::Error::new(io::ErrorKind::NotFound, "file does not exist"),
            )
        })
    }

    fn sub(&self, dir: &str) -> Result<Box<dyn TemplateSource>> {
        let dir = relative_name(dir)?;
        self.files()?;
        if dir.is_empty() {
            return Ok(Box::new(self.clone()));
        }
        let prefix = format!("{dir}/");
        let files: BTreeMap<String, Vec<u8>> = self
            .files
            .iter()
            .filter_map(|(name, content)| {
                name.strip_prefix(&prefix)
                    .map(|rest| (rest.to_string(), content.clone()))
            })
            .collect();
        if files.is_empty() {
            return Err(Error::filesystem(
                dir,
                io::Error::new(io::ErrorKind::NotFound, "directory does not exist"),
            ));
        }
        Ok(Box::new(MemorySource { files }))
    }
}
