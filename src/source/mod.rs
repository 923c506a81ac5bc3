//! Sources of template files.
//!
//! - `interface`: the [`TemplateSource`] trait
//! - `local`: templates stored in a directory on disk
//! - `memory`: templates held in memory

use crate::error::{Error, Result};
use crate::ext::PathExt;
use std::path::Path;

pub mod interface;
pub mod local;
pub mod memory;

pub use interface::TemplateSource;
pub use local::LocalSource;
pub use memory::MemorySource;

/// Normalizes a relative path given by the caller into a template name,
/// rejecting absolute paths and paths escaping the root.
///
/// Returns an empty string for the root itself (`""` or `"."`).
pub(crate) fn relative_name(path: &str) -> Result<String> {
    Path::new(path).to_template_name().map_err(|err| {
        Error::filesystem(
            path,
            std::io::Error::new(std::io::ErrorKind::InvalidInput, err.to_string()),
        )
    })
}
