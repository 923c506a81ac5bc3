/// Handles argument parsing and the command line workflow.
pub mod cli;

/// Constants shared by the library and the binary.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// A set of helpers for working with input data and output files.
pub mod ioutils;

/// Logging sink used by templates.
pub mod logging;

/// Template discovery, compilation and execution.
pub mod renderer;

/// Trees of template files.
pub mod source;

pub use error::{Error, Result};
pub use logging::Logger;
pub use renderer::{FunctionError, Template, TemplateBuilder};
pub use source::{LocalSource, MemorySource, TemplateSource};
