// ABOUTME: Main library module for routeview
// ABOUTME: Template-rendering routes for axum with Handlebars and Tera engine bindings

pub mod cli;
pub mod route;
pub mod template;

// Re-export commonly used types
pub use route::{
    PreviewRoute, RouteBinding, RouteError, RouteRequest, RouteResponse, TemplateRoute,
    TemplateRouter,
};
pub use template::{
    Context, EngineOptions, EngineTemplate, HandlebarsEngine, Template, TemplateEngine,
    TemplateError, TemplateExt, TeraEngine,
};

// Error handling
pub type Result<T> = anyhow::Result<T>;

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
