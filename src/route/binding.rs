// ABOUTME: The TemplateRoute trait and the path/engine binding each route carries
// ABOUTME: Routes implement handle(); template lookup goes through the bound engine

use std::fmt;
use std::sync::Arc;

use super::error::{Result, RouteError};
use super::request::{RouteRequest, RouteResponse};
use crate::template::{self, EngineTemplate, TemplateEngine};

/// A route path paired with the engine its templates come from.
pub struct RouteBinding<E: TemplateEngine> {
    path: String,
    engine: Arc<E>,
}

impl<E: TemplateEngine> RouteBinding<E> {
    /// Bind a path to an existing engine
    pub fn new(path: impl Into<String>, engine: Arc<E>) -> Result<Self> {
        let path = path.into();
        validate_path(&path)?;
        Ok(Self { path, engine })
    }

    /// Bind a path to an engine loaded from the default template directory
    pub fn with_default_engine(path: impl Into<String>) -> Result<Self> {
        let path = path.into();
        validate_path(&path)?;
        let engine = E::bundled()?;
        Ok(Self {
            path,
            engine: Arc::new(engine),
        })
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn engine(&self) -> &Arc<E> {
        &self.engine
    }

    /// Resolve a template by name against the bound engine
    pub fn template(&self, name: &str) -> template::Result<EngineTemplate<E>> {
        EngineTemplate::resolve(Arc::clone(&self.engine), name)
    }
}

impl<E: TemplateEngine> Clone for RouteBinding<E> {
    fn clone(&self) -> Self {
        Self {
            path: self.path.clone(),
            engine: Arc::clone(&self.engine),
        }
    }
}

impl<E: TemplateEngine> fmt::Debug for RouteBinding<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RouteBinding")
            .field("path", &self.path)
            .finish_non_exhaustive()
    }
}

fn validate_path(path: &str) -> Result<()> {
    let invalid = |reason: String| RouteError::InvalidPath {
        path: path.to_string(),
        reason,
    };

    if path.is_empty() {
        return Err(invalid("path must not be empty".to_string()));
    }
    if !path.starts_with('/') {
        return Err(invalid("path must start with '/'".to_string()));
    }

    let segments: Vec<&str> = path[1..].split('/').collect();
    let mut names: Vec<&str> = Vec::new();

    for (i, segment) in segments.iter().enumerate() {
        if segment.char_indices().any(|(i, c)| i > 0 && (c == ':' || c == '*')) {
            return Err(invalid(format!(
                "'{}': ':' and '*' may only start a segment",
                segment
            )));
        }

        let name = match segment.strip_prefix([':', '*']) {
            Some(name) => name,
            None => continue,
        };
        if name.is_empty() {
            return Err(invalid(format!("'{}': parameters must be named", segment)));
        }
        if segment.starts_with('*') && i + 1 != segments.len() {
            return Err(invalid(format!(
                "'{}': a wildcard must be the last segment",
                segment
            )));
        }
        if names.contains(&name) {
            return Err(invalid(format!("parameter '{}' appears twice", name)));
        }
        names.push(name);
    }

    Ok(())
}

/// A route that renders templates.
///
/// Implementors hold a [`RouteBinding`] and write `handle`:
///
/// ```no_run
/// use routeview::{RouteBinding, RouteRequest, RouteResponse, TemplateRoute, TemplateExt};
/// use routeview::route::RouteResult;
/// use routeview::template::HandlebarsEngine;
///
/// struct Hello {
///     binding: RouteBinding<HandlebarsEngine>,
/// }
///
/// impl TemplateRoute for Hello {
///     type Engine = HandlebarsEngine;
///
///     fn binding(&self) -> &RouteBinding<HandlebarsEngine> {
///         &self.binding
///     }
///
///     fn handle(&self, request: &RouteRequest, _: &mut RouteResponse) -> RouteResult<String> {
///         let name = request.params("name").unwrap_or("world");
///         Ok(self.template("hello.hbs")?.render_with("name", name)?)
///     }
/// }
/// ```
pub trait TemplateRoute: Send + Sync + 'static {
    type Engine: TemplateEngine;

    fn binding(&self) -> &RouteBinding<Self::Engine>;

    /// Produce the response body for a matched request.
    fn handle(&self, request: &RouteRequest, response: &mut RouteResponse) -> Result<String>;

    /// Path pattern this route is registered under.
    fn path(&self) -> &str {
        self.binding().path()
    }

    /// Resolve a template by name; unknown names are errors, never empty output.
    fn template(&self, name: &str) -> template::Result<EngineTemplate<Self::Engine>> {
        self.binding().template(name)
    }
}
