pub mod args;
pub mod runner;

pub use args::{
    get_log_level_from_verbose, parse_cli, Cli, Commands, Engine, OnMissing, RenderArgs,
    TemplateArgs,
};
pub use runner::{run, run_to};
