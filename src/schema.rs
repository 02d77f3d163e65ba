//! The declared shape of a configuration: which keys exist, which are
//! required, their fallbacks, and how raw strings become typed values.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;

/// A pure conversion from a present raw string to a typed value.
pub type Transform = Arc<dyn Fn(&str) -> Value + Send + Sync>;

/// One declared key.
#[derive(Clone)]
pub struct KeyDecl {
    pub key: String,
    pub required: bool,
    /// Fallback used when the source has no entry. For required keys `None`
    /// means "still required, no fallback".
    pub default: Option<Value>,
    pub transform: Option<Transform>,
}

impl KeyDecl {
    pub fn required(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            required: true,
            default: None,
            transform: None,
        }
    }

    pub fn optional(key: impl Into<String>) -> Self {
        Self {
            required: false,
            ..Self::required(key)
        }
    }

    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        self.default = Some(default.into());
        self
    }

    pub fn with_transform<F>(mut self, transform: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        let transform: Transform = Arc::new(transform);
        self.transform = Some(transform);
        self
    }
}

impl fmt::Debug for KeyDecl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyDecl")
            .field("key", &self.key)
            .field("required", &self.required)
            .field("default", &self.default)
            .field("transform", &self.transform.as_ref().map(|_| "<fn>"))
            .finish()
    }
}

/// An ordered list of key declarations.
///
/// Declaring the same key twice replaces the earlier declaration in place.
#[derive(Debug, Clone, Default)]
pub struct Schema {
    decls: Vec<KeyDecl>,
}

impl Schema {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a schema from two default maps, the declarative form used by
    /// [`Environment::from`](crate::Environment::from).
    ///
    /// Every key in `required` is required; a `None` default keeps it
    /// mandatory. Every key in `optional` is optional. Either side may be empty.
    pub fn from_defaults<K, V>(
        required: impl IntoIterator<Item = (K, Option<V>)>,
        optional: impl IntoIterator<Item = (K, Option<V>)>,
    ) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        let mut schema = Self::new();
        for (key, default) in optional {
            schema = schema.optional(key, default);
        }
        for (key, default) in required {
            schema = schema.required(key, default);
        }
        schema
    }

    /// Declare a required key with an optional string fallback.
    pub fn required(self, key: impl Into<String>, default: Option<impl Into<String>>) -> Self {
        let decl = KeyDecl::required(key);
        self.with(match default {
            Some(d) => decl.with_default(Value::String(d.into())),
            None => decl,
        })
    }

    /// Declare an optional key with an optional string fallback.
    pub fn optional(self, key: impl Into<String>, default: Option<impl Into<String>>) -> Self {
        let decl = KeyDecl::optional(key);
        self.with(match default {
            Some(d) => decl.with_default(Value::String(d.into())),
            None => decl,
        })
    }

    /// Add a fully specified declaration.
    pub fn with(mut self, decl: KeyDecl) -> Self {
        match self.decls.iter_mut().find(|d| d.key == decl.key) {
            Some(existing) => *existing = decl,
            None => self.decls.push(decl),
        }
        self
    }

    pub fn get(&self, key: &str) -> Option<&KeyDecl> {
        self.decls.iter().find(|d| d.key == key)
    }

    /// All declarations in declaration order.
    pub fn decls(&self) -> &[KeyDecl] {
        &self.decls
    }

    pub fn required_decls(&self) -> impl Iterator<Item = &KeyDecl> {
        self.decls.iter().filter(|d| d.required)
    }

    pub fn optional_decls(&self) -> impl Iterator<Item = &KeyDecl> {
        self.decls.iter().filter(|d| !d.required)
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn from_defaults_splits_required_and_optional() {
        let schema = Schema::from_defaults(
            [("a", None::<&str>), ("c", Some("x"))],
            [("b", Some("def"))],
        );
        let required: Vec<_> = schema.required_decls().map(|d| d.key.as_str()).collect();
        let optional: Vec<_> = schema.optional_decls().map(|d| d.key.as_str()).collect();
        assert_eq!(required, ["a", "c"]);
        assert_eq!(optional, ["b"]);
        assert_eq!(schema.get("c").unwrap().default, Some(json!("x")));
        assert_eq!(schema.get("a").unwrap().default, None);
    }

    #[test]
    fn all_optional_schema_is_valid() {
        let schema = Schema::from_defaults(Vec::<(&str, Option<&str>)>::new(), [("b", None)]);
        assert_eq!(schema.len(), 1);
        assert_eq!(schema.required_decls().count(), 0);
    }

    #[test]
    fn redeclaring_replaces_in_place() {
        let schema = Schema::new()
            .optional("a", None::<&str>)
            .optional("b", None::<&str>)
            .required("a", Some("x"));
        let keys: Vec<_> = schema.decls().iter().map(|d| d.key.as_str()).collect();
        assert_eq!(keys, ["a", "b"]);
        assert!(schema.get("a").unwrap().required);
    }

    #[test]
    fn key_decl_builders() {
        let decl = KeyDecl::optional("debug")
            .with_default(false)
            .with_transform(|s| Value::Bool(s == "true"));
        assert!(!decl.required);
        assert_eq!(decl.default, Some(Value::Bool(false)));
        let transform = decl.transform.as_ref().unwrap();
        assert_eq!(transform("true"), Value::Bool(true));
    }

    #[test]
    fn debug_hides_transform_body() {
        let decl = KeyDecl::required("a").with_transform(|s| Value::String(s.into()));
        assert!(format!("{decl:?}").contains("<fn>"));
    }
}
