use crate::context::Context;
use crate::error::{Error, Result};
use crate::renderer::interface::{MissingKeyPolicy, TemplateRenderer};
use crate::template::{Segment, Template};
use log::{debug, warn};

/// Single-pass `{{ name }}` substitution.
///
/// Substituted values are copied verbatim and never scanned for placeholders.
#[derive(Debug, Clone, Default)]
pub struct PlaceholderRenderer {
    policy: MissingKeyPolicy,
}

impl PlaceholderRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_policy(policy: MissingKeyPolicy) -> Self {
        Self { policy }
    }
}

impl TemplateRenderer for PlaceholderRenderer {
    fn render(&self, template: &Template, context: &Context) -> Result<String> {
        let unresolved = template.unresolved(context);
        if !unresolved.is_empty() {
            warn!("Unresolved placeholders: {}", unresolved.join(", "));
            if self.policy == MissingKeyPolicy::Fail {
                return Err(Error::MissingKey(unresolved[0].to_string()));
            }
        }

        let mut output = String::with_capacity(template.source().len());
        for segment in template.segments() {
            match segment {
                Segment::Literal(text) => output.push_str(text),
                Segment::Placeholder { name, span } => match context.get(name) {
                    Some(value) => output.push_str(value),
                    None => {
                        let original = &template.source()[span.clone()];
                        if let Some(fill) = self.policy.fill(name, original) {
                            output.push_str(&fill);
                        }
                    }
                },
            }
        }

        debug!("Rendered {} bytes", output.len());
        Ok(output)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(pairs: &[(&str, &str)]) -> Context {
        pairs.iter().copied().collect()
    }

    #[test]
    fn substitutes_in_place() {
        let renderer = PlaceholderRenderer::new();
        assert_eq!(
            renderer.render_str("Hello {{ name }}", &ctx(&[("name", "World")])).unwrap(),
            "Hello World"
        );
        assert_eq!(
            renderer.render_str("{{ a }}{{ b }}", &ctx(&[("a", "x"), ("b", "y")])).unwrap(),
            "xy"
        );
    }

    #[test]
    fn missing_key_fails_with_first_unresolved_name() {
        let renderer = PlaceholderRenderer::new();
        let err = renderer.render_str("{{ missing }}", &Context::new()).unwrap_err();
        assert!(matches!(err, Error::MissingKey(ref key) if key == "missing"));

        let err = renderer
            .render_str("{{ a }} {{ b }} {{ c }}", &ctx(&[("a", "1")]))
            .unwrap_err();
        assert!(matches!(err, Error::MissingKey(ref key) if key == "b"));
    }

    #[test]
    fn keep_policy_preserves_original_marker() {
        let renderer = PlaceholderRenderer::with_policy(MissingKeyPolicy::Keep);
        assert_eq!(
            renderer.render_str("{{a}} and {{  b }}", &ctx(&[("a", "1")])).unwrap(),
            "1 and {{  b }}"
        );
    }

    #[test]
    fn empty_and_marker_policies() {
        let empty = PlaceholderRenderer::with_policy(MissingKeyPolicy::Empty);
        assert_eq!(empty.render_str("[{{ x }}]", &Context::new()).unwrap(), "[]");

        let marker = PlaceholderRenderer::with_policy(MissingKeyPolicy::default_marker());
        assert_eq!(
            marker.render_str("[{{ x }}]", &Context::new()).unwrap(),
            "[<missing:x>]"
        );
    }

    #[test]
    fn values_are_not_rescanned() {
        let renderer = PlaceholderRenderer::new();
        let context = ctx(&[("a", "{{ b }}"), ("b", "nope")]);
        assert_eq!(renderer.render_str("{{ a }}", &context).unwrap(), "{{ b }}");
    }

    #[test]
    fn unused_context_entries_are_ignored() {
        let renderer = PlaceholderRenderer::new();
        let context = ctx(&[("unused", "1")]);
        assert_eq!(renderer.render_str("plain text", &context).unwrap(), "plain text");
    }

    #[test]
    fn repeated_placeholder_is_substituted_everywhere() {
        let renderer = PlaceholderRenderer::new();
        assert_eq!(
            renderer.render_str("{{ r }}/{{ r }}", &ctx(&[("r", "abc")])).unwrap(),
            "abc/abc"
        );
    }

    #[test]
    fn unicode_around_placeholders_is_preserved() {
        let renderer = PlaceholderRenderer::new();
        assert_eq!(
            renderer.render_str("Δ {{ pct }} ↑", &ctx(&[("pct", "5%")])).unwrap(),
            "Δ 5% ↑"
        );
    }
}
