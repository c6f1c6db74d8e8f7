// ABOUTME: Handlebars-backed template engine (Mustache-compatible syntax)
// ABOUTME: Templates are compiled at registration, lookups only check the registry

use handlebars::Handlebars;
use std::fmt;
use std::path::Path;
use tracing::debug;

use crate::template::context::Context;
use crate::template::engine::{EngineOptions, TemplateEngine};
use crate::template::error::{error_chain, Result, TemplateError};
use crate::template::{helpers, loader};

/// Handle to a template registered with a [`HandlebarsEngine`].
#[derive(Debug, Clone)]
pub struct HandlebarsTemplate {
    name: String,
}

#[derive(Clone)]
pub struct HandlebarsEngine {
    handlebars: Handlebars<'static>,
    options: EngineOptions,
}

impl HandlebarsEngine {
    /// Create an engine with no templates and the built-in helpers
    pub fn new(options: EngineOptions) -> Self {
        let mut handlebars = Handlebars::new();

        handlebars.set_strict_mode(options.strict);
        handlebars.set_dev_mode(options.dev_mode);

        if !options.escape_html {
            handlebars.register_escape_fn(handlebars::no_escape);
        }

        helpers::register_helpers(&mut handlebars);

        Self {
            handlebars,
            options,
        }
    }

    /// Compile and register a template from source
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.handlebars
            .register_template_string(name, source)
            .map_err(|e| TemplateError::CompileError {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Compile and register a template from a file
    pub fn add_template_file(&mut self, name: &str, path: impl AsRef<Path>) -> Result<()> {
        self.handlebars
            .register_template_file(name, path.as_ref())
            .map_err(|e| TemplateError::CompileError {
                name: name.to_string(),
                message: e.to_string(),
            })
    }

    /// Builder-style variant of [`add_template`](Self::add_template)
    pub fn with_template(mut self, name: &str, source: &str) -> Result<Self> {
        self.add_template(name, source)?;
        Ok(self)
    }

    pub fn options(&self) -> EngineOptions {
        self.options
    }
}

impl fmt::Debug for HandlebarsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HandlebarsEngine")
            .field("options", &self.options)
            .field("templates", &self.template_names())
            .finish_non_exhaustive()
    }
}

impl Default for HandlebarsEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl TemplateEngine for HandlebarsEngine {
    type Compiled = HandlebarsTemplate;

    fn lookup(&self, name: &str) -> Result<HandlebarsTemplate> {
        if self.handlebars.has_template(name) {
            Ok(HandlebarsTemplate {
                name: name.to_string(),
            })
        } else {
            Err(TemplateError::not_found(name))
        }
    }

    fn merge(&self, compiled: &HandlebarsTemplate, context: &Context) -> Result<String> {
        self.handlebars
            .render(&compiled.name, context)
            .map_err(|e| TemplateError::RenderError {
                name: compiled.name.clone(),
                message: error_chain(&e),
            })
    }

    fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.handlebars.get_templates().keys().cloned().collect();
        names.sort();
        names
    }

    fn from_directory(dir: impl AsRef<Path>, options: EngineOptions) -> Result<Self> {
        let dir = dir.as_ref();
        let mut engine = Self::new(options);

        for file in loader::discover(dir)? {
            engine.add_template_file(&file.name, &file.path)?;
        }

        debug!(
            "Loaded {} handlebars templates from {}",
            engine.handlebars.get_templates().len(),
            dir.display()
        );
        Ok(engine)
    }
}
