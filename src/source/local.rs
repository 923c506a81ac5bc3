use super::{relative_name, TemplateSource};
use crate::error::{Error, Result};
use crate::ext::PathExt;
use log::trace;
use std::path::PathBuf;
use walkdir::WalkDir;

/// Templates stored in a directory of the local filesystem.
#[derive(Debug, Clone)]
pub struct LocalSource {
    root: PathBuf,
}

impl LocalSource {
    /// Creates a source rooted at `root`. The directory is not checked until
    /// files are listed.
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }
}

impl TemplateSource for LocalSource {
    /// Walks the directory in file name order, following symbolic links.
    /// Only regular files are returned.
    fn files(&self) -> Result<Vec<String>> {
        let mut names = Vec::new();
        let walker = WalkDir::new(&self.root)
            .follow_links(true)
            .sort_by_file_name();
        for dir_entry in walker {
            let dir_entry = dir_entry.map_err(|err| {
                let path = err.path().unwrap_or(self.root.as_path());
                Error::filesystem(path.display().to_string(), err.into())
            })?;
            if !dir_entry.file_type().is_file() {
                continue;
            }
            let relative = dir_entry
                .path()
                .strip_prefix(&self.root)
                .map_err(|err| Error::Other(err.into()))?;
            let name = relative.to_template_name()?;
            trace!("Found template file: {name}");
            names.push(name);
        }
        Ok(names)
    }

    fn read(&self, name: &str) -> Result<Vec<u8>> {
        let path = self.root.join(relative_name(name)?);
        std::fs::read(&path)
            .map_err(|err| Error::filesystem(path.display().to_string(), err))
    }

    fn sub(&self, dir: &str) -> Result<Box<dyn TemplateSource>> {
        let root = self.root.join(relative_name(dir)?);
        let metadata = std::fs::metadata(&root)
            .map_err(|err| Error::filesystem(root.display().to_string(), err))?;
        if !metadata.is_dir() {
            return Err(Error::filesystem(
                root.display().to_string(),
                std::io::Error::new(std::io::ErrorKind::InvalidInput, "not a directory"),
            ));
        }
        Ok(Box::new(LocalSource::new(root)))
    }
}
