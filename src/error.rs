use crate::renderer::functions::FunctionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A mandatory builder input was never supplied.
    #[error("Invalid configuration: {0}.")]
    Configuration(String),

    /// The template source could not be traversed or read.
    #[error("Cannot access '{path}'. Original error: {source}")]
    Filesystem {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse template '{name}'. Original error: {source}")]
    TemplateSyntax {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Template '{name}' does not exist.")]
    TemplateNotFound { name: String },

    /// Rendering failed. Errors raised by the template functions are carried
    /// as the source of the engine error, see [`Error::function_error`].
    #[error("Failed to execute template '{name}'. Original error: {source}")]
    Execution {
        name: String,
        #[source]
        source: minijinja::Error,
    },

    #[error("Failed to parse template pattern. Original error: {0}")]
    GlobSetParseError(#[from] globset::Error),

    #[error("Invalid input data: {0}.")]
    InvalidData(String),

    #[error("Cannot proceed: output directory '{output_dir}' already exists. Use --force to overwrite it.")]
    OutputDirectoryExistsError { output_dir: String },

    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl Error {
    pub(crate) fn filesystem(path: impl Into<String>, source: std::io::Error) -> Self {
        Error::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Returns the template function error that caused an execution failure,
    /// searching the whole chain of nested renders.
    pub fn function_error(&self) -> Option<&FunctionError> {
        let mut current: Option<&(dyn std::error::Error + 'static)> = match self {
            Error::Execution { source, .. } => Some(source as &(dyn std::error::Error + 'static)),
            _ => None,
        };
        while let Some(err) = current {
            if let Some(found) = err.downcast_ref::<FunctionError>() {
                return Some(found);
            }
            current = err.source();
        }
        None
    }

    /// True for a top level lookup miss and for a nested `execute` of a
    /// missing template.
    pub fn is_template_not_found(&self) -> bool {
        matches!(self, Error::TemplateNotFound { .. })
            || matches!(self.function_error(), Some(FunctionError::TemplateNotFound { .. }))
    }
}

impl From<serde_json::Error> for Error {
    fn from(err: serde_json::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(err: serde_yaml::Error) -> Self {
        Error::InvalidData(err.to_string())
    }
}

/// Convenience type alias for Results with the crate error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
