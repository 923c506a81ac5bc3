use super::functions::scope;
use crate::error::{Error, Result};
use crate::logging::Logger;
use indexmap::IndexSet;
use minijinja::{value::Value, Environment};
use serde::Serialize;
use std::io::Write;

/// A set of compiled templates sharing one namespace, created with
/// [`TemplateBuilder`](super::TemplateBuilder).
///
/// The set never changes once built, so it can be shared between threads and
/// executed concurrently.
#[derive(Debug)]
pub struct Template {
    logger: Logger,
    names: IndexSet<String>,
    env: Environment<'static>,
}

impl Template {
    pub(crate) fn new(logger: Logger, names: IndexSet<String>, env: Environment<'static>) -> Self {
        Self { logger, names, env }
    }

    /// Executes the template with the given name and writes the result to
    /// `writer`.
    ///
    /// The output is rendered completely before anything is written, so on
    /// error the writer receives nothing.
    ///
    /// # Arguments
    /// * `writer` - Destination of the rendered text
    /// * `name` - Name of the template, its path relative to the source root
    /// * `data` - Input value, visible in the template as `data`
    pub fn execute<W, S>(&self, writer: &mut W, name: &str, data: &S) -> Result<()>
    where
        W: Write + ?Sized,
        S: Serialize + ?Sized,
    {
        let text = self.render(name, data)?;
        writer.write_all(text.as_bytes())?;
        Ok(())
    }

    /// Executes the template with the given name and returns the result.
    pub fn render<S: Serialize + ?Sized>(&self, name: &str, data: &S) -> Result<String> {
        if !self.contains(name) {
            return Err(Error::TemplateNotFound {
                name: name.to_string(),
            });
        }
        let data = Value::from_serialize(data);
        let text = self
            .env
            .get_template(name)
            .and_then(|template| template.render(scope(data.clone())))
            .map_err(|source| Error::Execution {
                name: name.to_string(),
                source,
            })?;

        if self.logger.detail_enabled() {
            self.logger.detail(&format!(
                "Executed template name={name:?} data={data:?} text={text:?}"
            ));
        }
        Ok(text)
    }

    /// Whether a template with the given name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// Names of the templates, in discovery order.
    pub fn names(&self) -> Vec<String> {
        self.names.iter().cloned().collect()
    }
}
