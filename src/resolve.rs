//! Core resolution: merge a raw source with a declared schema.
//!
//! Pure apart from `tracing` events; the source is pre-loaded, so every rule
//! is testable with synthetic maps. Steps:
//!
//! 1. Optional keys, in declaration order: source value, else default. A
//!    transform runs on the source string or a string default. Never an error.
//! 2. Required keys, in declaration order, merged on top: source value
//!    (transformed), else default (stored as given), else recorded as missing
//!    and stored as undefined.
//!
//! The caller decides what a non-empty `missing` list means: the builder
//! always fails, the [`Environment`](crate::Environment) asks its policy.

use serde_json::Value;

use crate::error::EnvfigError;
use crate::resolved::ResolvedEnv;
use crate::schema::{KeyDecl, Schema};
use crate::source::Source;

/// What resolution produced: a fully keyed map and the required keys that
/// could not be satisfied.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Resolution {
    pub env: ResolvedEnv,
    /// Missing required keys in declaration order.
    pub missing: Vec<String>,
}

impl Resolution {
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }

    /// The aggregate error for this attempt, if any key is missing.
    pub fn error(&self) -> Option<EnvfigError> {
        if self.missing.is_empty() {
            return None;
        }
        Some(EnvfigError::MissingRequired {
            keys: self.missing.clone(),
        })
    }

    /// The resolved map, or the aggregate error. Nothing partial escapes.
    pub fn into_result(self) -> Result<ResolvedEnv, EnvfigError> {
        match self.error() {
            Some(err) => Err(err),
            None => Ok(self.env),
        }
    }
}

/// Resolve `schema` against `source`.
pub fn resolve<S: Source + ?Sized>(source: &S, schema: &Schema) -> Resolution {
    let mut resolution = Resolution::default();

    for decl in schema.optional_decls() {
        let (value, raw) = resolve_optional(source, decl);
        resolution.env.insert(&decl.key, value, raw.as_deref());
    }

    for decl in schema.required_decls() {
        match resolve_required(source, decl) {
            Some((value, raw)) => resolution.env.insert(&decl.key, value, raw.as_deref()),
            None => {
                tracing::trace!(key = %decl.key, "required key absent");
                resolution.env.insert(&decl.key, Value::Null, None);
                resolution.missing.push(decl.key.clone());
            }
        }
    }

    if !resolution.missing.is_empty() {
        tracing::debug!(missing = ?resolution.missing, "required keys not set");
    }
    resolution
}

fn resolve_optional<S: Source + ?Sized>(source: &S, decl: &KeyDecl) -> (Value, Option<String>) {
    if let Some(raw) = source.lookup(&decl.key) {
        tracing::trace!(key = %decl.key, "optional key from source");
        return (apply(decl, raw), Some(raw.to_string()));
    }
    match &decl.default {
        Some(Value::String(raw)) => {
            tracing::trace!(key = %decl.key, "optional key from default");
            (apply(decl, raw), Some(raw.clone()))
        }
        Some(typed) => (typed.clone(), None),
        None => {
            tracing::trace!(key = %decl.key, "optional key undefined");
            (Value::Null, None)
        }
    }
}

/// `None` when the key has neither a source value nor a default.
fn resolve_required<S: Source + ?Sized>(
    source: &S,
    decl: &KeyDecl,
) -> Option<(Value, Option<String>)> {
    if let Some(raw) = source.lookup(&decl.key) {
        tracing::trace!(key = %decl.key, "required key from source");
        return Some((apply(decl, raw), Some(raw.to_string())));
    }
    // Defaults of required keys are already in their final form.
    let default = decl.default.clone()?;
    tracing::trace!(key = %decl.key, "required key from default");
    let raw = default.as_str().map(str::to_string);
    Some((default, raw))
}

fn apply(decl: &KeyDecl, raw: &str) -> Value {
    match &decl.transform {
        Some(transform) => transform(raw),
        None => Value::String(raw.to_string()),
    }
}
