// ABOUTME: Error types for template lookup, loading, and rendering
// ABOUTME: Every engine failure is mapped onto one of these variants and propagated

use thiserror::Error;

#[derive(Error, Debug)]
pub enum TemplateError {
    #[error("Template not found: {name}")]
    NotFound { name: String },

    #[error("Template compile error in {name}: {message}")]
    CompileError { name: String, message: String },

    #[error("Template render error in {name}: {message}")]
    RenderError { name: String, message: String },

    #[error("Template context error: {0}")]
    ContextError(String),

    #[error("Template configuration error: {0}")]
    ConfigurationError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Template directory error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),
}

impl TemplateError {
    pub fn not_found(name: impl Into<String>) -> Self {
        Self::NotFound { name: name.into() }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }
}

/// Flatten an error and its sources into one line.
///
/// Tera only prints the outermost message in `Display`, the useful part
/// (which variable, which line) is usually further down the chain.
pub(crate) fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}

pub type Result<T> = std::result::Result<T, TemplateError>;
