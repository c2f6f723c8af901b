use crate::constants::NESTED_KEY_SEPARATOR;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::renderer::interface::{MissingKeyPolicy, TemplateRenderer};
use crate::template::{Segment, Template};
use log::{debug, warn};
use minijinja::{AutoEscape, Environment, UndefinedBehavior};
use serde_json::{Map, Value};

/// Globals registered by minijinja's `builtins` feature; never context keys.
const BUILTIN_GLOBALS: &[&str] = &["range", "dict", "debug", "namespace"];

/// Context variable holding the substituted text of each `{{ name }}` marker.
const SLOTS_VAR: &str = "__regnote_slots";

/// MiniJinja-based template rendering engine.
///
/// Every `{{ name }}` marker is resolved exactly as
/// [`PlaceholderRenderer`](super::PlaceholderRenderer) resolves it and handed
/// to minijinja as a pre-rendered slot, so missing-key order, the `Keep`
/// policy and dashed names behave the same. The literal text around the
/// markers is Jinja source: statements, filters and expressions outside the
/// placeholder grammar are evaluated by minijinja, and variables they read
/// that the context lacks are reported by name in sorted order. Templates
/// without any marker are returned unchanged.
pub struct MiniJinjaRenderer {
    /// MiniJinja environment instance
    env: Environment<'static>,
    policy: MissingKeyPolicy,
}

impl MiniJinjaRenderer {
    /// Creates a new MiniJinjaRenderer with strict undefined handling and no autoescaping.
    pub fn new() -> Self {
        Self::with_policy(MissingKeyPolicy::Fail)
    }

    pub fn with_policy(policy: MissingKeyPolicy) -> Self {
        let mut env = Environment::new();
        env.set_undefined_behavior(UndefinedBehavior::Strict);
        env.set_auto_escape_callback(|_| AutoEscape::None);
        env.set_keep_trailing_newline(true);
        Self { env, policy }
    }

    /// Variables read by Jinja expressions in the literal text that `context` cannot supply.
    fn missing_names(
        &self,
        tmpl: &minijinja::Template<'_, '_>,
        context: &Context,
    ) -> Vec<String> {
        let mut missing: Vec<String> = tmpl
            .undeclared_variables(true)
            .into_iter()
            .filter(|name| !name.starts_with(SLOTS_VAR))
            .filter(|name| !BUILTIN_GLOBALS.contains(&name.as_str()))
            .filter(|name| !is_supplied(context, name))
            .collect();
        missing.sort();
        missing
    }
}

impl Default for MiniJinjaRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn render(&self, template: &Template, context: &Context) -> Result<String> {
        if template.is_static() {
            return Ok(template.source().to_string());
        }

        let unresolved = template.unresolved(context);
        if !unresolved.is_empty() {
            warn!("Unresolved placeholders: {}", unresolved.join(", "));
            if self.policy == MissingKeyPolicy::Fail {
                return Err(Error::MissingKey(unresolved[0].to_string()));
            }
        }

        let mut source = String::with_capacity(template.source().len());
        let mut slots = Vec::new();
        for segment in template.segments() {
            match segment {
                Segment::Literal(text) => source.push_str(text),
                Segment::Placeholder { name, span } => {
                    let value = match context.get(name) {
                        Some(value) => value.to_string(),
                        None => {
                            let original = &template.source()[span.clone()];
                            self.policy.fill(name, original).unwrap_or_default()
                        }
                    };
                    source.push_str(&format!("{{{{ {SLOTS_VAR}[{}] }}}}", slots.len()));
                    slots.push(Value::String(value));
                }
            }
        }

        let tmpl = self.env.template_from_str(&source)?;
        let mut context = context.clone();
        let missing = self.missing_names(&tmpl, &context);
        if !missing.is_empty() {
            warn!("Unresolved template variables: {}", missing.join(", "));
            for name in &missing {
                let original = format!("{{{{ {name} }}}}");
                match self.policy.fill(name, &original) {
                    Some(fill) => {
                        context.insert(name.as_str(), fill);
                    }
                    None => return Err(Error::MissingKey(name.clone())),
                }
            }
        }

        let mut values = nest(&context);
        if let Value::Object(root) = &mut values {
            root.insert(SLOTS_VAR.to_string(), Value::Array(slots));
        }
        let rendered = tmpl.render(values)?;
        debug!("Rendered {} bytes with minijinja", rendered.len());
        Ok(rendered)
    }
}

/// Whether `name` (possibly dotted) is a key of `context` or the parent of one.
fn is_supplied(context: &Context, name: &str) -> bool {
    if context.contains_key(name) {
        return true;
    }
    let prefix = format!("{name}{NESTED_KEY_SEPARATOR}");
    context.iter().any(|(key, _)| key.starts_with(&prefix))
}

/// Turns dotted context keys back into nested objects for attribute lookup.
///
/// A plain string value and a nested object with the same name conflict; the
/// first one seen is kept.
fn nest(context: &Context) -> Value {
    let mut root = Map::new();
    'keys: for (key, value) in context.iter() {
        let mut parts: Vec<&str> = key.split(NESTED_KEY_SEPARATOR).collect();
        let leaf = parts.pop().unwrap_or(key);

        let mut node = &mut root;
        for part in parts {
            let entry = node
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            match entry {
                Value::Object(child) => node = child,
                _ => {
                    debug!("Skipping context key '{key}': '{part}' already holds a value");
                    continue 'keys;
                }
            }
        }
        if node.contains_key(leaf) {
            debug!("Skipping context key '{key}': conflicts with an existing value");
            continue;
        }
        node.insert(leaf.to_string(), Value::String(value.to_string()));
    }
    Value::Object(root)
}
