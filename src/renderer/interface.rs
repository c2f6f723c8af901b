use crate::constants::DEFAULT_MISSING_MARKER;
use crate::context::Context;
use crate::error::Result;
use crate::template::Template;

/// What a renderer does with a placeholder the context has no value for.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum MissingKeyPolicy {
    /// Abort with `Error::MissingKey`.
    #[default]
    Fail,
    /// Leave the placeholder marker in the output unchanged.
    Keep,
    /// Substitute the empty string.
    Empty,
    /// Substitute this text, with `{}` replaced by the placeholder name.
    Marker(String),
}

impl MissingKeyPolicy {
    /// The `Marker` policy with the default `<missing:{}>` text.
    pub fn default_marker() -> Self {
        Self::Marker(DEFAULT_MISSING_MARKER.to_string())
    }

    /// Text to emit for an unresolved placeholder, or `None` under `Fail`.
    ///
    /// `original` is the marker as written in the template.
    pub fn fill(&self, name: &str, original: &str) -> Option<String> {
        match self {
            Self::Fail => None,
            Self::Keep => Some(original.to_string()),
            Self::Empty => Some(String::new()),
            Self::Marker(text) => Some(text.replace("{}", name)),
        }
    }
}

/// Trait for template rendering engines.
pub trait TemplateRenderer: Send + Sync {
    /// Renders a parsed template with the given context.
    ///
    /// # Arguments
    /// * `template` - Template to render
    /// * `context` - Values for the template's placeholders
    ///
    /// # Returns
    /// * `Result<String>` - Rendered text, or `Error::MissingKey` when a
    ///   placeholder is unresolved and the renderer's policy is `Fail`
    fn render(&self, template: &Template, context: &Context) -> Result<String>;

    /// Parses `source` and renders it.
    fn render_str(&self, source: &str, context: &Context) -> Result<String> {
        self.render(&Template::parse(source), context)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fill_follows_policy() {
        assert_eq!(MissingKeyPolicy::Fail.fill("a", "{{ a }}"), None);
        assert_eq!(MissingKeyPolicy::Keep.fill("a", "{{a}}"), Some("{{a}}".into()));
        assert_eq!(MissingKeyPolicy::Empty.fill("a", "{{ a }}"), Some(String::new()));
        assert_eq!(
            MissingKeyPolicy::default_marker().fill("revision", "{{ revision }}"),
            Some("<missing:revision>".into())
        );
    }
}
