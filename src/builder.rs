use std::collections::HashMap;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::env::EnvSnapshot;
use crate::error::EnvfigError;
use crate::resolve;
use crate::resolved::ResolvedEnv;
use crate::schema::{KeyDecl, Schema, Transform};
use crate::source::Source;

/// Entry point for declaring an environment.
pub struct Envfig;

impl Envfig {
    /// Start a declaration with `keys` as required keys.
    pub fn create<I, K>(keys: I) -> EnvfigBuilder
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        EnvfigBuilder::new(keys.into_iter().map(Into::into).collect())
    }
}

/// Accumulates required keys, optional keys, defaults, and transforms.
///
/// Nothing is read until [`resolve()`](Self::resolve). Every chained call
/// consumes the builder and returns a new one; clone to branch. Resolution
/// is all-or-nothing: a single missing required key fails the whole call.
#[derive(Clone)]
pub struct EnvfigBuilder {
    required: Vec<String>,
    optional: Vec<String>,
    defaults: Map<String, Value>,
    transforms: HashMap<String, Transform>,
}

impl EnvfigBuilder {
    fn new(required: Vec<String>) -> Self {
        Self {
            required,
            optional: Vec::new(),
            defaults: Map::new(),
            transforms: HashMap::new(),
        }
    }

    /// Append optional keys.
    pub fn optionals<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.optional.extend(keys.into_iter().map(Into::into));
        self
    }

    /// Replace the default map. Not merged with an earlier call.
    ///
    /// Defaults of required keys are used as given, so give them in the
    /// transformed type (`false`, not `"false"`). String defaults of optional
    /// keys still pass through the key's transform.
    pub fn defaults<I, K, V>(mut self, defaults: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<Value>,
    {
        self.defaults = defaults
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self
    }

    /// Register `transform` for each of `keys`, replacing any earlier one.
    pub fn transform<F, I, K>(mut self, transform: F, keys: I) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        let transform: Transform = Arc::new(transform);
        for key in keys {
            self.transforms.insert(key.into(), Arc::clone(&transform));
        }
        self
    }

    /// The declaration as a [`Schema`]. A key listed both as optional and as
    /// required is required, and resolves in the required group: after every
    /// optional key, not at its place in the optional list.
    pub fn schema(&self) -> Schema {
        let optional = self.optional.iter().map(|k| self.decl(KeyDecl::optional(k)));
        let required = self.required.iter().map(|k| self.decl(KeyDecl::required(k)));
        optional
            .chain(required)
            .fold(Schema::new(), |schema, decl| schema.with(decl))
    }

    fn decl(&self, mut decl: KeyDecl) -> KeyDecl {
        decl.default = self.defaults.get(&decl.key).cloned();
        decl.transform = self.transforms.get(&decl.key).cloned();
        decl
    }

    /// Resolve against `source`.
    pub fn resolve<S: Source + ?Sized>(&self, source: &S) -> Result<ResolvedEnv, EnvfigError> {
        resolve::resolve(source, &self.schema()).into_result()
    }

    /// Resolve against a fresh snapshot of the process environment.
    pub fn resolve_env(&self) -> Result<ResolvedEnv, EnvfigError> {
        self.resolve(&EnvSnapshot::capture())
    }

    /// Resolve against `source` and deserialize into `T`.
    pub fn resolve_into<T, S>(&self, source: &S) -> Result<T, EnvfigError>
    where
        T: DeserializeOwned,
        S: Source + ?Sized,
    {
        self.resolve(source)?.into_typed()
    }
}

impl std::fmt::Debug for EnvfigBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let mut transformed: Vec<_> = self.transforms.keys().collect();
        transformed.sort();
        f.debug_struct("EnvfigBuilder")
            .field("required", &self.required)
            .field("optional", &self.optional)
            .field("defaults", &self.defaults)
            .field("transforms", &transformed)
            .finish()
    }
}
