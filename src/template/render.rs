// ABOUTME: The Template trait and the context-building render shorthands
// ABOUTME: All shorthands build a fresh Context and delegate to Template::render

use serde::Serialize;

use super::context::Context;
use super::error::Result;

/// A template bound to one engine, ready to render.
pub trait Template {
    /// Render this template with the given context.
    ///
    /// Implementations must not keep the context or mutate anything
    /// observable; the same context always renders the same output.
    fn render(&self, context: &Context) -> Result<String>;
}

impl<T: Template + ?Sized> Template for &T {
    fn render(&self, context: &Context) -> Result<String> {
        (**self).render(context)
    }
}

impl<T: Template + ?Sized> Template for Box<T> {
    fn render(&self, context: &Context) -> Result<String> {
        (**self).render(context)
    }
}

/// Render shorthands available on every [`Template`].
///
/// Implemented for all templates through a blanket impl, so the behavior
/// cannot be changed per engine.
pub trait TemplateExt: Template {
    /// Render with an empty context
    fn render_empty(&self) -> Result<String> {
        self.render(&Context::new())
    }

    /// Render with a single key/value pair as context
    fn render_with<K, V>(&self, key: K, value: V) -> Result<String>
    where
        K: Into<String>,
        V: Serialize,
    {
        let mut context = Context::new();
        context.insert(key, &value)?;
        self.render(&context)
    }

    /// Render with the given pairs as context, later duplicates win
    fn render_pairs<I, K, V>(&self, pairs: I) -> Result<String>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        let context = Context::from_pairs(pairs)?;
        self.render(&context)
    }
}

impl<T: Template + ?Sized> TemplateExt for T {}
