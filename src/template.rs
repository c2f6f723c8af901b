//! Parsed placeholder templates.
//!
//! A template is plain text with `{{ name }}` markers. Parsing never fails:
//! anything that does not form a well-formed marker stays literal text.

use crate::context::Context;
use crate::error::Result;
use indexmap::IndexSet;
use log::debug;
use regex::Regex;
use std::ops::Range;
use std::path::Path;
use std::str::FromStr;
use std::sync::OnceLock;

fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\{\{\s*([A-Za-z_][A-Za-z0-9_.\-]*)\s*\}\}")
            .expect("placeholder pattern is a valid regex")
    })
}

/// A piece of a parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Text copied to the output as is.
    Literal(String),
    /// A `{{ name }}` marker; `span` is its byte range in the source.
    Placeholder { name: String, span: Range<usize> },
}

/// An immutable, parsed template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    source: String,
    segments: Vec<Segment>,
}

impl Template {
    /// Parses `source` into literal and placeholder segments.
    pub fn parse(source: impl Into<String>) -> Self {
        let source = source.into();
        let mut segments = Vec::new();
        let mut cursor = 0;

        for caps in placeholder_pattern().captures_iter(&source) {
            let (Some(whole), Some(name)) = (caps.get(0), caps.get(1)) else {
                continue;
            };
            if whole.start() > cursor {
                let literal = &source[cursor..whole.start()];
                segments.push(Segment::Literal(literal.to_string()));
            }
            segments.push(Segment::Placeholder {
                name: name.as_str().to_string(),
                span: whole.range(),
            });
            cursor = whole.end();
        }
        if cursor < source.len() {
            segments.push(Segment::Literal(source[cursor..].to_string()));
        }

        debug!(
            "Parsed template of {} bytes into {} segments",
            source.len(),
            segments.len()
        );
        Self { source, segments }
    }

    /// Reads and parses a template file.
    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading template from '{}'", path.display());
        let content = std::fs::read_to_string(path)?;
        Ok(Self::parse(content))
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn segments(&self) -> &[Segment] {
        &self.segments
    }

    /// Unique placeholder names in order of first appearance.
    pub fn placeholders(&self) -> Vec<&str> {
        self.segments
            .iter()
            .filter_map(|segment| match segment {
                Segment::Placeholder { name, .. } => Some(name.as_str()),
                Segment::Literal(_) => None,
            })
            .collect::<IndexSet<_>>()
            .into_iter()
            .collect()
    }

    /// Unique placeholder names that `context` has no value for.
    pub fn unresolved(&self, context: &Context) -> Vec<&str> {
        self.placeholders()
            .into_iter()
            .filter(|name| !context.contains_key(name))
            .collect()
    }

    /// Whether the template contains no placeholder at all.
    pub fn is_static(&self) -> bool {
        self.segments.iter().all(|s| matches!(s, Segment::Literal(_)))
    }
}

impl FromStr for Template {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::parse(s))
    }
}
