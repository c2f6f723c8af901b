//! Template rendering engines for regnote
//!
//! The module is structured as:
//! - `interface`: the `TemplateRenderer` trait and the missing-key policy
//! - `placeholder`: single-pass `{{ name }}` substitution, the default engine
//! - `minijinja`: MiniJinja-backed engine for templates written as Jinja text

pub mod interface;
pub mod minijinja;
pub mod placeholder;

pub use interface::{MissingKeyPolicy, TemplateRenderer};
pub use minijinja::MiniJinjaRenderer;
pub use placeholder::PlaceholderRenderer;

