// ABOUTME: Capability trait implemented by concrete template engines
// ABOUTME: Provides lookup/merge, engine options, and the engine-bound EngineTemplate

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use super::context::Context;
use super::error::Result;
use super::render::Template;

/// Directory the default engines load their templates from.
pub const DEFAULT_TEMPLATE_DIR: &str = "templates";

/// A template engine that can resolve templates by name and merge a context into them.
pub trait TemplateEngine: Send + Sync + 'static {
    /// Handle to a template the engine has already compiled.
    type Compiled: Send + Sync;

    /// Resolve a template by name, failing if the engine does not know it.
    fn lookup(&self, name: &str) -> Result<Self::Compiled>;

    /// Merge a context into a resolved template and return the output.
    fn merge(&self, compiled: &Self::Compiled, context: &Context) -> Result<String>;

    /// Names of all templates known to the engine, sorted.
    fn template_names(&self) -> Vec<String>;

    /// Load templates from a directory using the given options.
    fn from_directory(dir: impl AsRef<Path>, options: EngineOptions) -> Result<Self>
    where
        Self: Sized;

    /// Engine with the default configuration: templates from [`DEFAULT_TEMPLATE_DIR`].
    fn bundled() -> Result<Self>
    where
        Self: Sized,
    {
        Self::from_directory(DEFAULT_TEMPLATE_DIR, EngineOptions::default())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Treat missing variables as render errors
    pub strict: bool,
    /// Re-read template files on every render
    pub dev_mode: bool,
    /// Escape HTML in variable output
    pub escape_html: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            strict: false,
            dev_mode: false,
            escape_html: true,
        }
    }
}

/// A template resolved from an engine.
///
/// Holds the engine it came from, so it always renders through the
/// same engine instance that compiled it.
pub struct EngineTemplate<E: TemplateEngine> {
    engine: Arc<E>,
    name: String,
    compiled: E::Compiled,
}

impl<E: TemplateEngine> EngineTemplate<E> {
    /// Resolve `name` against the engine now, not at render time
    pub fn resolve(engine: Arc<E>, name: &str) -> Result<Self> {
        let compiled = engine.lookup(name)?;
        Ok(Self {
            engine,
            name: name.to_string(),
            compiled,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }
}

impl<E: TemplateEngine> Template for EngineTemplate<E> {
    fn render(&self, context: &Context) -> Result<String> {
        self.engine.merge(&self.compiled, context)
    }
}

impl<E: TemplateEngine> fmt::Debug for EngineTemplate<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EngineTemplate")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}
