/// Handles argument parsing and command dispatch.
pub mod cli;

/// Defines custom error types.
pub mod error;

/// Constants shared across modules.
pub mod constants;

/// Parsed `{{ name }}` templates.
pub mod template;

/// Name-to-value bindings used during rendering.
pub mod context;

/// Template rendering engines.
pub mod renderer;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Templates bundled with the crate.
pub mod builtin;

pub use context::Context;
pub use error::{Error, Result};
pub use renderer::{MissingKeyPolicy, TemplateRenderer};
pub use template::Template;
