use crate::error::Result;

/// A read-only tree of template files.
///
/// File names are relative to the root of the tree and always use `/` as
/// separator.
pub trait TemplateSource: Send + Sync {
    /// Lists every regular file of the tree, recursively.
    ///
    /// # Returns
    /// * `Result<Vec<String>>` - File names in a stable order; the same tree
    ///   always yields the same list
    fn files(&self) -> Result<Vec<String>>;

    /// Reads the content of a file.
    ///
    /// # Arguments
    /// * `name` - Name of the file, as returned by [`TemplateSource::files`]
    fn read(&self, name: &str) -> Result<Vec<u8>>;

    /// Returns the subtree rooted at `dir`.
    ///
    /// Fails if `dir` is not a relative path inside the tree or if there is
    /// no such directory.
    fn sub(&self, dir: &str) -> Result<Box<dyn TemplateSource>>;
}
