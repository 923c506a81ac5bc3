use super::{functions, Template};
use crate::error::{Error, Result};
use crate::logging::Logger;
use crate::source::TemplateSource;
use globset::{Glob, GlobSet, GlobSetBuilder};
use indexmap::IndexSet;
use log::debug;
use minijinja::{AutoEscape, Environment, UndefinedBehavior};

/// Configuration used to create a [`Template`].
///
/// The logger and the source are mandatory; nothing is checked until
/// [`TemplateBuilder::build`] is called.
///
/// ```
/// use ztp_template::{Logger, MemorySource, TemplateBuilder};
///
/// let template = TemplateBuilder::new()
///     .logger(Logger::default())
///     .source(MemorySource::new().with_file("hello.txt", "Hello {{ name }}!"))
///     .build()
///     .unwrap();
/// let text = template.render("hello.txt", &serde_json::json!({"name": "SNO"})).unwrap();
/// assert_eq!(text, "Hello SNO!");
/// ```
#[derive(Default)]
pub struct TemplateBuilder {
    logger: Option<Logger>,
    source: Option<Box<dyn TemplateSource>>,
    dir: Option<String>,
    patterns: Vec<String>,
    strict: bool,
}

impl TemplateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the logger used to write detail messages. Mandatory.
    pub fn logger(mut self, logger: Logger) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets the tree the templates are read from. Mandatory.
    pub fn source<S: TemplateSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Loads the templates only from the given directory of the source.
    /// Template names are then relative to that directory.
    pub fn dir(mut self, dir: impl Into<String>) -> Self {
        self.dir = Some(dir.into());
        self
    }

    /// Loads only the files matching the glob pattern, relative to the root.
    /// Can be called several times; a file matching any pattern is loaded.
    pub fn pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    /// Makes the use of undefined variables an execution error.
    pub fn strict(mut self, strict: bool) -> Self {
        self.strict = strict;
        self
    }

    /// Finds and compiles the templates.
    ///
    /// Fails on the first file that can't be read or compiled; in that case no
    /// template is kept.
    pub fn build(&self) -> Result<Template> {
        let logger = self
            .logger
            .clone()
            .ok_or_else(|| Error::Configuration("logger is mandatory".into()))?;
        let source = self
            .source
            .as_deref()
            .ok_or_else(|| Error::Configuration("template source is mandatory".into()))?;
        let include = self.include_globset()?;

        let narrowed;
        let source = match self.dir.as_deref() {
            Some(dir) if !dir.is_empty() => {
                narrowed = source.sub(dir)?;
                narrowed.as_ref()
            }
            _ => source,
        };

        let mut env = Environment::new();
        env.set_keep_trailing_newline(true);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        if self.strict {
            env.set_undefined_behavior(UndefinedBehavior::Strict);
        }
        functions::register(&mut env);

        let names = find_files(source, include.as_ref())?;
        for name in &names {
            parse_file(&mut env, &logger, source, name)?;
        }
        debug!("Loaded {} templates", names.len());

        Ok(Template::new(logger, names, env))
    }

    fn include_globset(&self) -> Result<Option<GlobSet>> {
        if self.patterns.is_empty() {
            return Ok(None);
        }
        let mut builder = GlobSetBuilder::new();
        for pattern in &self.patterns {
            builder.add(Glob::new(pattern)?);
        }
        Ok(Some(builder.build()?))
    }
}

fn find_files(
    source: &dyn TemplateSource,
    include: Option<&GlobSet>,
) -> Result<IndexSet<String>> {
    Ok(source
        .files()?
        .into_iter()
        .filter(|name| include.is_none_or(|globset| globset.is_match(name)))
        .collect())
}

fn parse_file(
    env: &mut Environment<'static>,
    logger: &Logger,
    source: &dyn TemplateSource,
    name: &str,
) -> Result<()> {
    let data = source.read(name)?;
    let text = String::from_utf8(data).map_err(|err| {
        Error::filesystem(name, std::io::Error::new(std::io::ErrorKind::InvalidData, err))
    })?;
    if logger.detail_enabled() {
        logger.detail(&format!("Parsed template name={name:?} text={text:?}"));
    }
    env.add_template_owned(name.to_string(), text)
        .map_err(|source| Error::TemplateSyntax {
            name: name.to_string(),
            source,
        })
}
