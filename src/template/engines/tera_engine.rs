// ABOUTME: Tera-backed template engine with Jinja2-style syntax and inheritance
// ABOUTME: All templates are parsed up front so extends/include chains are checked at load time

use std::fmt;
use std::path::Path;
use tera::Tera;
use tracing::debug;

use crate::template::context::Context;
use crate::template::engine::{EngineOptions, TemplateEngine};
use crate::template::error::{error_chain, Result, TemplateError};
use crate::template::loader;

const AUTOESCAPE_SUFFIXES: [&str; 3] = [".html", ".htm", ".xml"];

/// Handle to a template registered with a [`TeraEngine`].
#[derive(Debug, Clone)]
pub struct TeraTemplate {
    name: String,
}

/// Tera engine. Undefined variables are always render errors, so
/// [`EngineOptions::strict`] has no effect here, nor does `dev_mode`.
#[derive(Clone)]
pub struct TeraEngine {
    tera: Tera,
    options: EngineOptions,
}

impl TeraEngine {
    pub fn new(options: EngineOptions) -> Self {
        let mut tera = Tera::default();
        if options.escape_html {
            tera.autoescape_on(AUTOESCAPE_SUFFIXES.to_vec());
        } else {
            tera.autoescape_on(Vec::new());
        }
        Self { tera, options }
    }

    /// Parse and register a template from source
    pub fn add_template(&mut self, name: &str, source: &str) -> Result<()> {
        self.tera
            .add_raw_template(name, source)
            .map_err(|e| TemplateError::CompileError {
                name: name.to_string(),
                message: error_chain(&e),
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

impl fmt::Debug for TeraEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TeraEngine")
            .field("options", &self.options)
            .field("templates", &self.template_names())
            .finish_non_exhaustive()
    }
}

impl Default for TeraEngine {
    fn default() -> Self {
        Self::new(EngineOptions::default())
    }
}

impl TemplateEngine for TeraEngine {
    type Compiled = TeraTemplate;

    fn lookup(&self, name: &str) -> Result<TeraTemplate> {
        if self.tera.get_template_names().any(|n| n == name) {
            Ok(TeraTemplate {
                name: name.to_string(),
            })
        } else {
            Err(TemplateError::not_found(name))
        }
    }

    fn merge(&self, compiled: &TeraTemplate, context: &Context) -> Result<String> {
        let tera_context = tera::Context::from_serialize(context).map_err(|e| {
            TemplateError::ContextError(error_chain(&e))
        })?;

        self.tera
            .render(&compiled.name, &tera_context)
            .map_err(|e| TemplateError::RenderError {
                name: compiled.name.clone(),
                message: error_chain(&e),
            })
    }

    fn template_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.tera.get_template_names().map(String::from).collect();
        names.sort();
        names
    }

    fn from_directory(dir: impl AsRef<Path>, options: EngineOptions) -> Result<Self> {
        let dir = dir.as_ref();
        let mut engine = Self::new(options);

        let files: Vec<(std::path::PathBuf, Option<String>)> = loader::discover(dir)?
            .into_iter()
            .map(|file| (file.path, Some(file.name)))
            .collect();
        let count = files.len();

        engine
            .tera
            .add_template_files(files)
            .map_err(|e| TemplateError::CompileError {
                name: dir.display().to_string(),
                message: error_chain(&e),
            })?;

        debug!("Loaded {} tera templates from {}", count, dir.display());
        Ok(engine)
    }
}
