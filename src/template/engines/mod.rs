// ABOUTME: Concrete template engine bindings
// ABOUTME: Each binding implements TemplateEngine over a wrapped third-party engine

pub mod handlebars_engine;
pub mod tera_engine;

pub use handlebars_engine::{HandlebarsEngine, HandlebarsTemplate};
pub use tera_engine::{TeraEngine, TeraTemplate};
