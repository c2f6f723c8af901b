//! Name-to-value bindings used to fill template placeholders.

use crate::constants::{
    CONTEXT_EXTENSIONS, LIST_SEPARATOR, NESTED_KEY_SEPARATOR, STDIN_INDICATOR,
};
use crate::error::{Error, Result};
use indexmap::IndexMap;
use log::debug;
use serde_json::{Map, Value};
use std::path::Path;

/// Ordered mapping from placeholder name to replacement text.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Context {
    values: IndexMap<String, String>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `key` to `value`, returning the previous value if there was one.
    pub fn insert(
        &mut self,
        key: impl Into<String>,
        value: impl Into<String>,
    ) -> Option<String> {
        self.values.insert(key.into(), value.into())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Merges `other` into `self`; keys in `other` win.
    pub fn merge(&mut self, other: Context) {
        self.values.extend(other.values);
    }

    /// Builds a context from a JSON object.
    pub fn from_json_str(content: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(content)?;
        Self::from_value(value)
    }

    /// Reads a JSON object from `reader`.
    pub fn from_json_reader(reader: impl std::io::Read) -> Result<Self> {
        let content = std::io::read_to_string(reader)?;
        Self::from_json_str(&content)
    }

    /// Builds a context from a YAML mapping.
    pub fn from_yaml_str(content: &str) -> Result<Self> {
        let value: Value = serde_yaml::from_str(content)?;
        Self::from_value(value)
    }

    /// Loads a context file, choosing the format from its extension.
    ///
    /// `-` reads a JSON object from stdin.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if path.as_os_str() == STDIN_INDICATOR {
            debug!("Reading JSON context from stdin");
            return Self::from_json_reader(std::io::stdin().lock());
        }

        let extension = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .filter(|ext| CONTEXT_EXTENSIONS.contains(&ext.as_str()))
            .ok_or_else(|| Error::UnsupportedContextFormat {
                path: path.display().to_string(),
            })?;

        debug!("Loading context from '{}'", path.display());
        let content = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Self::from_json_str(&content),
            _ => Self::from_yaml_str(&content),
        }
    }

    /// Parses a `KEY=VALUE` assignment. Only the first `=` separates.
    pub fn parse_assignment(assignment: &str) -> Result<(String, String)> {
        match assignment.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.to_string()))
            }
            _ => Err(Error::InvalidAssignment(assignment.to_string())),
        }
    }

    fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => {
                let mut context = Self::new();
                flatten_into(&mut context, None, map);
                Ok(context)
            }
            other => Err(Error::ContextFormat(format!(
                "expected an object of names to values, got {}",
                kind_of(&other)
            ))),
        }
    }
}

fn flatten_into(context: &mut Context, prefix: Option<&str>, map: Map<String, Value>) {
    for (key, value) in map {
        let key = match prefix {
            Some(prefix) => format!("{prefix}{NESTED_KEY_SEPARATOR}{key}"),
            None => key,
        };
        match value {
            Value::Object(nested) => flatten_into(context, Some(&key), nested),
            other => {
                context.insert(key, scalar_text(other));
            }
        }
    }
}

fn scalar_text(value: Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s,
        Value::Array(items) => items
            .into_iter()
            .map(scalar_text)
            .collect::<Vec<_>>()
            .join(LIST_SEPARATOR),
        other => other.to_string(),
    }
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Context {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut context = Self::new();
        context.extend(iter);
        context
    }
}

impl<K: Into<String>, V: Into<String>> Extend<(K, V)> for Context {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}
