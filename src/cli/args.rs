use crate::constants::{verbosity, DEFAULT_MISSING_MARKER};
use crate::renderer::MissingKeyPolicy;
use clap::{Args, Parser, Subcommand, ValueEnum};
use log::LevelFilter;
use std::fmt::Display;
use std::path::PathBuf;

/// What to do with placeholders the context has no value for.
#[derive(Debug, Clone, ValueEnum, Copy, PartialEq, Default)]
#[value(rename_all = "lowercase")]
pub enum OnMissing {
    /// Abort and report the missing placeholder.
    #[default]
    Fail,
    /// Leave the placeholder in the output.
    Keep,
    /// Replace it with nothing.
    Empty,
    /// Replace it with the `--marker` text.
    Marker,
}

impl Display for OnMissing {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            OnMissing::Fail => "fail",
            OnMissing::Keep => "keep",
            OnMissing::Empty => "empty",
            OnMissing::Marker => "marker",
        };
        write!(f, "{s}")
    }
}

/// Rendering engine selection.
#[derive(Debug, Clone, ValueEnum, Copy, PartialEq, Default)]
#[value(rename_all = "lowercase")]
pub enum Engine {
    /// Plain `{{ name }}` substitution.
    #[default]
    Placeholder,
    /// MiniJinja, for templates using Jinja syntax.
    Minijinja,
}

impl Display for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Engine::Placeholder => "placeholder",
            Engine::Minijinja => "minijinja",
        };
        write!(f, "{s}")
    }
}

/// regnote - render regression notices from placeholder templates.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render a template with a context.
    Render(RenderArgs),

    /// List the placeholders a template references.
    Placeholders(TemplateArgs),

    /// List bundled templates.
    Builtins,
}

/// Where the template comes from.
#[derive(Args, Debug, Clone, Default)]
pub struct TemplateArgs {
    /// Template file to read.
    #[arg(value_name = "TEMPLATE")]
    pub template: Option<PathBuf>,

    /// Use a bundled template instead of a file.
    #[arg(short, long, value_name = "NAME")]
    pub builtin: Option<String>,
}

#[derive(Args, Debug, Clone, Default)]
pub struct RenderArgs {
    #[command(flatten)]
    pub source: TemplateArgs,

    /// Context file (.json, .yaml, .yml) or `-` for JSON on stdin. Repeatable; later files win.
    #[arg(short, long = "context", value_name = "FILE")]
    pub contexts: Vec<PathBuf>,

    /// Set a single value, overriding context files.
    #[arg(short, long = "set", value_name = "KEY=VALUE")]
    pub sets: Vec<String>,

    /// Behavior for placeholders without a value.
    #[arg(long, value_enum, default_value_t = OnMissing::Fail)]
    pub on_missing: OnMissing,

    /// Replacement text for `--on-missing marker`; `{}` becomes the placeholder name.
    #[arg(long, default_value = DEFAULT_MISSING_MARKER)]
    pub marker: String,

    /// Rendering engine.
    #[arg(long, value_enum, default_value_t = Engine::Placeholder)]
    pub engine: Engine,

    /// Write the result to a file instead of stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,
}

impl RenderArgs {
    pub fn missing_key_policy(&self) -> MissingKeyPolicy {
        match self.on_missing {
            OnMissing::Fail => MissingKeyPolicy::Fail,
            OnMissing::Keep => MissingKeyPolicy::Keep,
            OnMissing::Empty => MissingKeyPolicy::Empty,
            OnMissing::Marker => MissingKeyPolicy::Marker(self.marker.clone()),
        }
    }
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
