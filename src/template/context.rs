// ABOUTME: Render context passed to templates as a key/value mapping
// ABOUTME: Values are serde_json values, keys are unique and the last write wins

use serde::Serialize;
use serde_json::Value as JsonValue;
use std::collections::{BTreeMap, HashMap};

use super::error::{Result, TemplateError};

/// Variables bound for a single render call.
///
/// Keys are kept sorted so that templates iterating the root context
/// render the same output for the same input.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Context {
    values: BTreeMap<String, JsonValue>,
}

impl Context {
    /// Create an empty context
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from key/value pairs, later duplicates overwrite earlier ones
    pub fn from_pairs<I, K, V>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Serialize,
    {
        let mut context = Self::new();
        for (key, value) in pairs {
            context.insert(key, &value)?;
        }
        Ok(context)
    }

    /// Build a context from a JSON object
    pub fn from_json(value: JsonValue) -> Result<Self> {
        match value {
            JsonValue::Object(map) => Ok(map.into_iter().collect()),
            JsonValue::Null => Ok(Self::new()),
            other => Err(TemplateError::ContextError(format!(
                "context must be a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    /// Serialize a value and bind it to a key
    pub fn insert<K, V>(&mut self, key: K, value: &V) -> Result<()>
    where
        K: Into<String>,
        V: Serialize + ?Sized,
    {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| {
            TemplateError::ContextError(format!("cannot bind value for '{}': {}", key, e))
        })?;
        self.values.insert(key, value);
        Ok(())
    }

    /// Bind an already converted value
    pub fn insert_value(&mut self, key: impl Into<String>, value: impl Into<JsonValue>) {
        self.values.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&JsonValue> {
        self.values.get(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn remove(&mut self, key: &str) -> Option<JsonValue> {
        self.values.remove(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &JsonValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Convert context to a JSON object
    pub fn to_json(&self) -> JsonValue {
        JsonValue::Object(
            self.values
                .iter()
                .map(|(k, v)| (k.clone(), v.clone()))
                .collect(),
        )
    }
}

fn json_kind(value: &JsonValue) -> &'static str {
    match value {
        JsonValue::Null => "null",
        JsonValue::Bool(_) => "a boolean",
        JsonValue::Number(_) => "a number",
        JsonValue::String(_) => "a string",
        JsonValue::Array(_) => "an array",
        JsonValue::Object(_) => "an object",
    }
}

impl FromIterator<(String, JsonValue)> for Context {
    fn from_iter<T: IntoIterator<Item = (String, JsonValue)>>(iter: T) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

impl Extend<(String, JsonValue)> for Context {
    fn extend<T: IntoIterator<Item = (String, JsonValue)>>(&mut self, iter: T) {
        self.values.extend(iter);
    }
}

impl From<HashMap<String, String>> for Context {
    fn from(vars: HashMap<String, String>) -> Self {
        vars.into_iter()
            .map(|(k, v)| (k, JsonValue::String(v)))
            .collect()
    }
}

impl From<BTreeMap<String, JsonValue>> for Context {
    fn from(values: BTreeMap<String, JsonValue>) -> Self {
        Self { values }
    }
}

/// Build a [`Context`] from `key => value` pairs with mixed value types.
///
/// Evaluates to `Result<Context, TemplateError>`; a value that cannot be
/// serialized fails the whole context.
///
/// ```
/// use routeview::context;
///
/// let ctx = context! { "title" => "Users", "count" => 3 }.unwrap();
/// assert_eq!(ctx.len(), 2);
/// ```
#[macro_export]
macro_rules! context {
    () => {
        ::std::result::Result::<$crate::template::Context, $crate::template::TemplateError>::Ok(
            $crate::template::Context::new(),
        )
    };
    ($($key:expr => $value:expr),+ $(,)?) => {
        (|| -> ::std::result::Result<$crate::template::Context, $crate::template::TemplateError> {
            let mut context = $crate::template::Context::new();
            $( context.insert($key, &$value)?; )+
            ::std::result::Result::Ok(context)
        })()
    };
}
