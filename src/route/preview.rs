// ABOUTME: Generic route that renders any known template with query parameters as context
// ABOUTME: Backs the `serve` command so template directories can be browsed without code

use std::sync::Arc;

use super::binding::{RouteBinding, TemplateRoute};
use super::error::{Result, RouteError};
use super::request::{RouteRequest, RouteResponse};
use crate::template::{Context, Template, TemplateEngine, TemplateError};

pub const PREVIEW_PATH: &str = "/preview/*template";

/// Renders `/preview/<name>?key=value` as template `<name>` with `{key: "value"}`.
pub struct PreviewRoute<E: TemplateEngine> {
    binding: RouteBinding<E>,
    defaults: Context,
}

impl<E: TemplateEngine> PreviewRoute<E> {
    pub fn new(engine: Arc<E>) -> Result<Self> {
        Ok(Self {
            binding: RouteBinding::new(PREVIEW_PATH, engine)?,
            defaults: Context::new(),
        })
    }

    /// Variables present in every render, overridden by query parameters
    pub fn with_defaults(mut self, defaults: Context) -> Self {
        self.defaults = defaults;
        self
    }
}

impl<E: TemplateEngine> TemplateRoute for PreviewRoute<E> {
    type Engine = E;

    fn binding(&self) -> &RouteBinding<E> {
        &self.binding
    }

    fn handle(&self, request: &RouteRequest, _response: &mut RouteResponse) -> Result<String> {
        let name = request
            .params("template")
            .map(|name| name.trim_start_matches('/'))
            .filter(|name| !name.is_empty())
            .ok_or_else(|| RouteError::BadRequest("missing template name".to_string()))?;

        let template = match self.template(name) {
            Ok(template) => template,
            Err(TemplateError::NotFound { name }) => {
                return Err(RouteError::NotFound(format!("Template '{}'", name)))
            }
            Err(e) => return Err(e.into()),
        };

        let mut context = self.defaults.clone();
        context.extend(
            request
                .query_map()
                .iter()
                .map(|(k, v)| (k.clone(), v.clone().into())),
        );

        Ok(template.render(&context)?)
    }
}
