// ABOUTME: Template module for rendering named templates against a key/value context
// ABOUTME: Defines the Template and TemplateEngine traits and the Handlebars/Tera bindings

pub mod context;
pub mod engine;
pub mod engines;
pub mod error;
pub mod helpers;
pub mod loader;
pub mod render;

pub use context::Context;
pub use engine::{EngineOptions, EngineTemplate, TemplateEngine, DEFAULT_TEMPLATE_DIR};
pub use engines::{HandlebarsEngine, TeraEngine};
pub use error::{Result, TemplateError};
pub use render::{Template, TemplateExt};
