//! Templates bundled with regnote.

use crate::error::{Error, Result};
use crate::template::Template;

const BUILTINS: &[(&str, &str)] = &[(
    "perf-regression",
    include_str!("../templates/perf-regression.txt"),
)];

/// Names of all bundled templates.
pub fn names() -> impl Iterator<Item = &'static str> {
    BUILTINS.iter().map(|(name, _)| *name)
}

/// Source text of the bundled template called `name`.
pub fn get(name: &str) -> Option<&'static str> {
    BUILTINS
        .iter()
        .find(|(builtin, _)| *builtin == name)
        .map(|(_, source)| *source)
}

/// Parses the bundled template called `name`.
pub fn load(name: &str) -> Result<Template> {
    get(name).map(Template::parse).ok_or_else(|| Error::UnknownBuiltin {
        name: name.to_string(),
        available: names().collect::<Vec<_>>().join(", "),
    })
}
