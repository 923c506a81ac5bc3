use std::path::{Component, Path};

use crate::error::{Error, Result};

/// Extension trait for Path to provide conversions to template names
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use ztp_template::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("test");
    /// assert_eq!(path.to_str_checked().unwrap(), "test");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Converts a relative path to a template name: its normal components
    /// joined with `/`, whatever the platform separator is.
    ///
    /// # Examples
    /// ```
    /// use ztp_template::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("cluster").join("install-config.yaml");
    /// assert_eq!(path.to_template_name().unwrap(), "cluster/install-config.yaml");
    /// ```
    fn to_template_name(&self) -> Result<String>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn to_template_name(&self) -> Result<String> {
        let mut parts = Vec::new();
        for component in self.components() {
            match component {
                Component::Normal(part) => parts.push(Path::new(part).to_str_checked()?),
                Component::CurDir => {}
                _ => {
                    return Err(Error::Other(anyhow::anyhow!(
                        "Path '{}' is not relative to the template root",
                        self.display()
                    )))
                }
            }
        }
        Ok(parts.join("/"))
    }
}
