// ABOUTME: Command implementations for the routeview CLI
// ABOUTME: Handles execution of render, check, and serve commands

use anyhow::{Context as _, Result};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{debug, info};

use super::args::TemplateArgs;
use super::config::{Config, EngineKind, TemplatesConfig};
use crate::route::{PreviewRoute, TemplateRouter};
use crate::template::{
    Context, EngineTemplate, HandlebarsEngine, Template, TemplateEngine, TeraEngine,
};

/// Apply command line template options on top of the configured ones
pub fn resolve_templates(config: &Config, source: &TemplateArgs) -> TemplatesConfig {
    let mut templates = config.templates.clone();
    if let Some(ref dir) = source.templates {
        templates.directory = dir.clone();
    }
    if let Some(engine) = source.engine {
        templates.engine = engine;
    }
    if source.strict {
        templates.options.strict = true;
    }
    templates
}

/// Load an engine from the configured template directory
pub fn load_engine<E: TemplateEngine>(templates: &TemplatesConfig) -> Result<E> {
    let engine = E::from_directory(&templates.directory, templates.options).with_context(|| {
        format!(
            "Failed to load {} templates from {}",
            templates.engine,
            templates.directory.display()
        )
    })?;
    Ok(engine)
}

fn render_with<E: TemplateEngine>(
    templates: &TemplatesConfig,
    name: &str,
    context: &Context,
) -> Result<String> {
    let engine = Arc::new(load_engine::<E>(templates)?);
    let template = EngineTemplate::resolve(engine, name)?;
    Ok(template.render(context)?)
}

/// Render a single template with the configured and command line variables
pub async fn render_template(
    name: String,
    output: Option<PathBuf>,
    source: TemplateArgs,
    config: &Config,
) -> Result<()> {
    let templates = resolve_templates(config, &source);
    let context = Context::from(config.template_vars.clone());
    debug!("Rendering {} with {} variables", name, context.len());

    let rendered = match templates.engine {
        EngineKind::Handlebars => render_with::<HandlebarsEngine>(&templates, &name, &context)?,
        EngineKind::Tera => render_with::<TeraEngine>(&templates, &name, &context)?,
    };

    match output {
        Some(path) => {
            std::fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write output file '{}'", path.display()))?;
            info!("Rendered {} to {} ({} bytes)", name, path.display(), rendered.len());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn list_templates<E: TemplateEngine>(templates: &TemplatesConfig) -> Result<Vec<String>> {
    Ok(load_engine::<E>(templates)?.template_names())
}

/// Load every template, failing on the first compile error
pub async fn check_templates(source: TemplateArgs, config: &Config) -> Result<()> {
    let templates = resolve_templates(config, &source);

    let names = match templates.engine {
        EngineKind::Handlebars => list_templates::<HandlebarsEngine>(&templates)?,
        EngineKind::Tera => list_templates::<TeraEngine>(&templates)?,
    };

    println!(
        "{} {} templates OK in {}",
        names.len(),
        templates.engine,
        templates.directory.display()
    );
    for name in names {
        println!("  {}", name);
    }

    Ok(())
}

fn preview_router<E: TemplateEngine>(templates: &TemplatesConfig, config: &Config) -> Result<TemplateRouter> {
    let engine = Arc::new(load_engine::<E>(templates)?);
    info!(
        "Loaded {} {} templates from {}",
        engine.template_names().len(),
        templates.engine,
        templates.directory.display()
    );

    let route = PreviewRoute::new(engine)?
        .with_defaults(Context::from(config.template_vars.clone()));
    Ok(TemplateRouter::new().get(route)?)
}

/// Serve the preview route until shutdown
pub async fn serve_templates(
    host: Option<String>,
    port: Option<u16>,
    source: TemplateArgs,
    config: &Config,
) -> Result<()> {
    let templates = resolve_templates(config, &source);

    let mut server = config.server.clone();
    if let Some(host) = host {
        server.host = host;
    }
    if let Some(port) = port {
        server.port = port;
    }
    let addr = server.socket_addr().await?;

    let router = match templates.engine {
        EngineKind::Handlebars => preview_router::<HandlebarsEngine>(&templates, config)?,
        EngineKind::Tera => preview_router::<TeraEngine>(&templates, config)?,
    };

    router.serve(addr).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn template_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("hello.hbs"), "Hello, {{name}}!").unwrap();
        fs::write(dir.path().join("hello.tera"), "Hello, {{ name }}!").unwrap();
        dir
    }

    fn templates_config(dir: &TempDir, engine: EngineKind) -> TemplatesConfig {
        TemplatesConfig {
            directory: dir.path().to_path_buf(),
            engine,
            ..TemplatesConfig::default()
        }
    }

    #[test]
    fn test_resolve_templates_overrides() {
        let config = Config::default();
        let source = TemplateArgs {
            templates: Some(PathBuf::from("views")),
            engine: Some(EngineKind::Tera),
            strict: true,
        };

        let templates = resolve_templates(&config, &source);
        assert_eq!(templates.directory, PathBuf::from("views"));
        assert_eq!(templates.engine, EngineKind::Tera);
        assert!(templates.options.strict);

        let untouched = resolve_templates(&config, &TemplateArgs::default());
        assert_eq!(untouched.directory, config.templates.directory);
    }

    #[test]
    fn test_render_with_both_engines() {
        let dir = template_dir();
        let mut context = Context::new();
        context.insert_value("name", "Ada");

        let hbs = render_with::<HandlebarsEngine>(
            &templates_config(&dir, EngineKind::Handlebars),
            "hello.hbs",
            &context,
        )
        .unwrap();
        assert_eq!(hbs, "Hello, Ada!");

        let tera = render_with::<TeraEngine>(
            &templates_config(&dir, EngineKind::Tera),
            "hello.tera",
            &context,
        )
        .unwrap();
        assert_eq!(tera, "Hello, Ada!");
    }

    #[test]
    fn test_load_engine_missing_directory() {
        let dir = TempDir::new().unwrap();
        let templates = TemplatesConfig {
            directory: dir.path().join("absent"),
            ..TemplatesConfig::default()
        };
        let err = load_engine::<HandlebarsEngine>(&templates).unwrap_err();
        assert!(err.to_string().contains("Failed to load handlebars templates"));
    }

    #[tokio::test]
    async fn test_render_template_to_file() {
        let dir = template_dir();
        let output = dir.path().join("out.txt");
        let mut config = Config::default();
        config.templates = templates_config(&dir, EngineKind::Handlebars);
        config
            .template_vars
            .insert("name".to_string(), "Grace".to_string());

        render_template(
            "hello.hbs".to_string(),
            Some(output.clone()),
            TemplateArgs::default(),
            &config,
        )
        .await
        .unwrap();

        assert_eq!(fs::read_to_string(output).unwrap(), "Hello, Grace!");
    }

    #[tokio::test]
    async fn test_render_unknown_template_fails() {
        let dir = template_dir();
        let mut config = Config::default();
        config.templates = templates_config(&dir, EngineKind::Handlebars);

        let result =
            render_template("missing.hbs".to_string(), None, TemplateArgs::default(), &config).await;
        assert!(result.is_err());
    }
}
