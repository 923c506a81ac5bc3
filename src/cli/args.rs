use crate::constants::verbosity;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// Renders the manifest templates of a directory.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Print the names of the templates.
    List(ListArgs),
    /// Render templates against input data.
    Render(RenderArgs),
}

impl Commands {
    pub fn source(&self) -> &SourceArgs {
        match self {
            Commands::List(args) => &args.source,
            Commands::Render(args) => &args.source,
        }
    }

    pub fn verbose(&self) -> u8 {
        self.source().verbose
    }
}

/// Where the templates are loaded from.
#[derive(clap::Args, Debug, Clone)]
pub struct SourceArgs {
    /// Directory containing the templates.
    #[arg(value_name = "TEMPLATES")]
    pub templates: PathBuf,

    /// Load only the templates of this sub-directory.
    #[arg(short, long)]
    pub dir: Option<String>,

    /// Load only the files matching this glob (repeatable).
    #[arg(short, long = "pattern", value_name = "GLOB")]
    pub patterns: Vec<String>,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

#[derive(clap::Args, Debug, Clone)]
pub struct ListArgs {
    #[command(flatten)]
    pub source: SourceArgs,
}

#[derive(clap::Args, Debug, Clone)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Templates to render. All of them when omitted.
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Input data as a JSON string or `-` to read from stdin.
    #[arg(long, conflicts_with = "data_file")]
    pub data: Option<String>,

    /// Input data from a JSON or YAML file.
    #[arg(long = "data-file", value_name = "FILE")]
    pub data_file: Option<PathBuf>,

    /// Fail on undefined variables.
    #[arg(long)]
    pub strict: bool,

    /// Write each rendered template to this directory instead of stdout.
    #[arg(short, long = "output-dir", value_name = "OUTPUT_DIR")]
    pub output_dir: Option<PathBuf>,

    /// Write into an existing output directory.
    #[arg(short, long, requires = "output_dir")]
    pub force: bool,
}

/// Parse command line arguments.
pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}
