use crate::{
    cli::{Cli, Commands, ListArgs, RenderArgs, SourceArgs},
    constants::DEFAULT_LOG_TARGET,
    error::Result,
    ioutils::{get_output_dir, load_data, write_file},
    logging::Logger,
    renderer::{Template, TemplateBuilder},
    source::LocalSource,
};
use log::info;
use std::io::Write;

/// Main CLI runner dispatching the parsed command
pub struct Runner {
    command: Commands,
}

impl Runner {
    pub fn new(command: Commands) -> Self {
        Self { command }
    }

    /// Executes the command, writing listings and rendered text to `out`
    pub fn run(self, out: &mut dyn Write) -> Result<()> {
        match &self.command {
            Commands::List(args) => self.list(args, out),
            Commands::Render(args) => self.render(args, out),
        }
    }

    fn list(&self, args: &ListArgs, out: &mut dyn Write) -> Result<()> {
        let template = self.build_template(&args.source, false)?;
        for name in template.names() {
            writeln!(out, "{name}")?;
        }
        Ok(())
    }

    /// Renders every requested template before writing anything, so a failing
    /// template leaves no output behind.
    fn render(&self, args: &RenderArgs, out: &mut dyn Write) -> Result<()> {
        let template = self.build_template(&args.source, args.strict)?;
        let data = load_data(args.data.as_deref(), args.data_file.as_deref())?;
        let names = if args.names.is_empty() { template.names() } else { args.names.clone() };

        let mut rendered = Vec::with_capacity(names.len());
        for name in &names {
            rendered.push((name, template.render(name, &data)?));
        }

        match &args.output_dir {
            Some(output_dir) => {
                let output_root = get_output_dir(output_dir, args.force)?;
                for (name, text) in rendered {
                    let target = output_root.join(name);
                    write_file(text.as_bytes(), &target)?;
                    info!("Rendered '{name}' to {}", target.display());
                }
            }
            None => {
                for (_, text) in rendered {
                    out.write_all(text.as_bytes())?;
                }
            }
        }
        Ok(())
    }

    fn build_template(&self, source: &SourceArgs, strict: bool) -> Result<Template> {
        let mut builder = TemplateBuilder::new()
            .logger(Logger::global(DEFAULT_LOG_TARGET))
            .source(LocalSource::new(source.templates.clone()))
            .strict(strict);
        if let Some(dir) = &source.dir {
            builder = builder.dir(dir.clone());
        }
        for pattern in &source.patterns {
            builder = builder.pattern(pattern.clone());
        }
        builder.build()
    }
}

/// Runs the parsed command line, writing to stdout.
pub fn run(cli: Cli) -> Result<()> {
    Runner::new(cli.command).run(&mut std::io::stdout().lock())
}
