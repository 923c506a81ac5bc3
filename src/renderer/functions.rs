//! Functions available inside every template.
//!
//! | Name      | Use                                   | Result                          |
//! |-----------|---------------------------------------|---------------------------------|
//! | `base64`  | `{{ base64(value) }}`, `value\|base64` | standard Base64 of the value    |
//! | `execute` | `{{ execute("name.yaml", data) }}`    | rendered text of another unit   |
//! | `json`    | `{{ json(value) }}`, `value\|json`     | compact JSON text of the value  |
//!
//! `execute` combined with the other two embeds the output of one template as
//! an encoded field of another:
//!
//! ```text
//! "content": {{ execute("ignition.yaml", data) | base64 | json }}
//! ```

use crate::constants::functions::{BASE64, EXECUTE, JSON, MAX_EXECUTE_DEPTH};
use base64::{engine::general_purpose::STANDARD, Engine as _};
use minijinja::value::{Value, ValueKind};
use minijinja::{context, Environment, ErrorKind, State};
use std::cell::Cell;
use thiserror::Error;

thread_local! {
    /// Number of `execute` calls in progress on this thread.
    static EXECUTE_DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Failure of one of the template functions.
///
/// Travels as the source of the engine error so that callers can tell the
/// cause apart after the render failed.
#[derive(Error, Debug)]
pub enum FunctionError {
    /// `base64` was given something that is neither bytes, text nor an
    /// object with a text representation.
    #[error("don't know how to encode value of type {kind}")]
    UnsupportedType { kind: String },

    /// `execute` was given the name of a template that doesn't exist.
    #[error("template '{name}' does not exist")]
    TemplateNotFound { name: String },

    /// `execute` calls were nested deeper than [`MAX_EXECUTE_DEPTH`], which
    /// happens when templates execute each other in a cycle.
    #[error("cannot execute template '{name}': more than {limit} nested executions")]
    RecursionLimit { name: String, limit: usize },

    /// `json` was given a value that JSON can't represent.
    #[error("cannot encode value as JSON: {0}")]
    Serialization(#[source] serde_json::Error),
}

impl FunctionError {
    fn into_engine_error(self) -> minijinja::Error {
        let kind = match self {
            FunctionError::TemplateNotFound { .. } => ErrorKind::TemplateNotFound,
            _ => ErrorKind::InvalidOperation,
        };
        minijinja::Error::new(kind, self.to_string()).with_source(self)
    }
}

/// The kinds of values `base64` accepts, with the bytes each one encodes to.
#[derive(Debug, PartialEq)]
pub enum Encodable<'a> {
    Bytes(&'a [u8]),
    /// UTF-8 encoded.
    Text(&'a str),
    /// Objects are encoded through their text representation.
    Rendered(String),
}

impl Encodable<'_> {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Encodable::Bytes(bytes) => bytes,
            Encodable::Text(text) => text.as_bytes(),
            Encodable::Rendered(text) => text.as_bytes(),
        }
    }
}

impl<'a> TryFrom<&'a Value> for Encodable<'a> {
    type Error = FunctionError;

    fn try_from(value: &'a Value) -> Result<Self, Self::Error> {
        let encodable = match value.kind() {
            ValueKind::Bytes => value.as_bytes().map(Encodable::Bytes),
            ValueKind::String => value.as_str().map(Encodable::Text),
            ValueKind::Plain => Some(Encodable::Rendered(value.to_string())),
            _ => None,
        };
        encodable.ok_or_else(|| FunctionError::UnsupportedType {
            kind: value.kind().to_string(),
        })
    }
}

/// Encodes the value with standard Base64.
pub fn base64_encode(value: Value) -> Result<String, minijinja::Error> {
    let encodable = Encodable::try_from(&value)
        .map_err(FunctionError::into_engine_error)?;
    Ok(STANDARD.encode(encodable.as_bytes()))
}

/// Serializes the value as compact JSON. Strings come out quoted, so the
/// result can be placed as is in a JSON document.
pub fn to_json(value: Value) -> Result<String, minijinja::Error> {
    serde_json::to_string(&value)
        .map_err(|err| FunctionError::Serialization(err).into_engine_error())
}

/// Marks one `execute` call in progress on the current thread until dropped.
struct DepthGuard;

impl DepthGuard {
    fn enter(name: &str) -> Result<Self, FunctionError> {
        EXECUTE_DEPTH.with(|depth| {
            if depth.get() >= MAX_EXECUTE_DEPTH {
                return Err(FunctionError::RecursionLimit {
                    name: name.to_string(),
                    limit: MAX_EXECUTE_DEPTH,
                });
            }
            depth.set(depth.get() + 1);
            Ok(DepthGuard)
        })
    }
}

impl Drop for DepthGuard {
    fn drop(&mut self) {
        EXECUTE_DEPTH.with(|depth| depth.set(depth.get() - 1));
    }
}

/// Renders another template of the same set and returns its text instead of
/// writing it to the output.
fn execute(state: &State, name: &str, data: Value) -> Result<String, minijinja::Error> {
    let template = state.env().get_template(name).map_err(|err| match err.kind() {
        ErrorKind::TemplateNotFound => FunctionError::TemplateNotFound {
            name: name.to_string(),
        }
        .into_engine_error(),
        _ => err,
    })?;
    let _guard = DepthGuard::enter(name)
        .map_err(FunctionError::into_engine_error)?;
    template.render(scope(data))
}

/// Builds the variables a template sees for an execution input: the whole
/// input as `data`, plus the entries of the input when it is a map. `data`
/// hides an entry with the same name.
pub(crate) fn scope(data: Value) -> Value {
    if data.kind() == ValueKind::Map {
        context! { data => data.clone(), ..data }
    } else {
        context! { data => data }
    }
}

/// Adds the functions to the environment. `base64` and `json` are also
/// registered as filters so they can be piped into.
pub(crate) fn register(env: &mut Environment<'static>) {
    env.add_function(BASE64, base64_encode);
    env.add_filter(BASE64, base64_encode);
    env.add_function(JSON, to_json);
    env.add_filter(JSON, to_json);
    env.add_function(EXECUTE, execute);
}
