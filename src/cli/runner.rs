use crate::{
    builtin,
    cli::{Cli, Commands, Engine, RenderArgs, TemplateArgs},
    context::Context,
    error::{Error, Result},
    ioutils::write_file,
    renderer::{MiniJinjaRenderer, PlaceholderRenderer, TemplateRenderer},
    template::Template,
};
use log::{debug, info};
use std::io::Write;

/// Dispatches a parsed command line, printing to stdout.
pub fn run(cli: Cli) -> Result<()> {
    run_to(cli, &mut std::io::stdout().lock())
}

/// Dispatches a parsed command line, writing command output to `out`.
pub fn run_to(cli: Cli, out: &mut dyn Write) -> Result<()> {
    match cli.command {
        Commands::Render(args) => {
            let rendered = render(&args)?;
            match &args.output {
                Some(path) => {
                    write_file(&rendered, path)?;
                    info!("Wrote rendered notice to {}", path.display());
                }
                None => out.write_all(rendered.as_bytes())?,
            }
        }
        Commands::Placeholders(args) => {
            let template = load_template(&args)?;
            for name in template.placeholders() {
                writeln!(out, "{name}")?;
            }
        }
        Commands::Builtins => {
            for name in builtin::names() {
                writeln!(out, "{name}")?;
            }
        }
    }
    out.flush()?;
    Ok(())
}

/// Loads the template, builds the context and renders.
pub fn render(args: &RenderArgs) -> Result<String> {
    let template = load_template(&args.source)?;
    let context = build_context(args)?;
    debug!(
        "Rendering {} placeholders with {} context values",
        template.placeholders().len(),
        context.len()
    );
    let renderer = get_renderer(args);
    renderer.render(&template, &context)
}

/// Exactly one of a template path or a builtin name must be given.
pub fn load_template(args: &TemplateArgs) -> Result<Template> {
    match (&args.template, &args.builtin) {
        (Some(path), None) => Template::from_path(path),
        (None, Some(name)) => builtin::load(name),
        _ => Err(Error::TemplateSource),
    }
}

/// Merges context files in order, then `--set` assignments on top.
pub fn build_context(args: &RenderArgs) -> Result<Context> {
    let mut context = Context::new();
    for path in &args.contexts {
        context.merge(Context::from_path(path)?);
    }
    for assignment in &args.sets {
        let (key, value) = Context::parse_assignment(assignment)?;
        context.insert(key, value);
    }
    Ok(context)
}

fn get_renderer(args: &RenderArgs) -> Box<dyn TemplateRenderer> {
    let policy = args.missing_key_policy();
    match args.engine {
        Engine::Placeholder => Box::new(PlaceholderRenderer::with_policy(policy)),
        Engine::Minijinja => Box::new(MiniJinjaRenderer::with_policy(policy)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::OnMissing;
    use std::path::PathBuf;

    fn run_captured(command: Commands) -> String {
        let mut out = Vec::new();
        run_to(Cli { verbose: 0, command }, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn placeholders_command_prints_names_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("notice.txt");
        std::fs::write(&template, "{{ revision }} {{ author }} {{ revision }}").unwrap();

        let out = run_captured(Commands::Placeholders(TemplateArgs {
            template: Some(template),
            builtin: None,
        }));
        assert_eq!(out, "revision\nauthor\n");
    }

    #[test]
    fn placeholders_command_reads_builtins() {
        let out = run_captured(Commands::Placeholders(TemplateArgs {
            template: None,
            builtin: Some("perf-regression".into()),
        }));
        assert_eq!(out.lines().next(), Some("revision"));
        assert_eq!(out.lines().count(), 7);
    }

    #[test]
    fn builtins_command_lists_bundled_templates() {
        assert_eq!(run_captured(Commands::Builtins), "perf-regression\n");
    }

    #[test]
    fn render_command_writes_to_out_without_output_file() {
        let out = run_captured(Commands::Render(RenderArgs {
            source: TemplateArgs {
                template: None,
                builtin: Some("perf-regression".into()),
            },
            on_missing: OnMissing::Empty,
            sets: vec!["revision=abc".into()],
            ..Default::default()
        }));
        assert!(out.starts_with(
            "Perfherder has detected a performance regression from push abc."
        ));
    }

    #[test]
    fn template_source_must_be_exactly_one() {
        let neither = TemplateArgs::default();
        assert!(matches!(load_template(&neither), Err(Error::TemplateSource)));

        let both = TemplateArgs {
            template: Some(PathBuf::from("a.txt")),
            builtin: Some("perf-regression".into()),
        };
        assert!(matches!(load_template(&both), Err(Error::TemplateSource)));
    }

    #[test]
    fn sets_override_context_files() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("ctx.json");
        std::fs::write(&file, r#"{"name": "file", "other": "kept"}"#).unwrap();

        let args = RenderArgs {
            contexts: vec![file],
            sets: vec!["name=cli".into()],
            ..Default::default()
        };
        let context = build_context(&args).unwrap();
        assert_eq!(context.get("name"), Some("cli"));
        assert_eq!(context.get("other"), Some("kept"));
    }

    #[test]
    fn renders_file_with_marker_policy() {
        let dir = tempfile::tempdir().unwrap();
        let template = dir.path().join("notice.txt");
        std::fs::write(&template, "{{ a }}/{{ b }}").unwrap();

        let args = RenderArgs {
            source: TemplateArgs { template: Some(template), builtin: None },
            sets: vec!["a=1".into()],
            on_missing: OnMissing::Marker,
            marker: "<{}>".into(),
            ..Default::default()
        };
        assert_eq!(render(&args).unwrap(), "1/<b>");
    }
}
