//! Template rendering engine
//!
//! Templates are compiled with MiniJinja into one shared environment, so any
//! template can execute, include or import any other one.
//!
//! The module is structured as:
//! - `builder`: discovery and compilation of the template files
//! - `template`: execution of the compiled templates
//! - `functions`: the `base64`, `execute` and `json` template functions

pub mod builder;
pub mod functions;
pub mod template;

// Re-export the main types for convenience
pub use builder::TemplateBuilder;
pub use functions::FunctionError;
pub use template::Template;
