//! Typed access over a resolved environment.
//!
//! An [`Environment`] resolves once at construction, then answers every
//! accessor from the stored values. Failures go through its
//! [`ConfigPolicy`], so whether a missing key or a malformed JSON value stops
//! the caller is the policy's decision, not the accessor's.

use std::sync::OnceLock;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::coerce;
use crate::env::EnvSnapshot;
use crate::error::EnvfigError;
use crate::policy::ConfigPolicy;
use crate::resolve::resolve;
use crate::resolved::{ResolvedEnv, value_text};
use crate::schema::Schema;
use crate::source::Source;

#[derive(Debug)]
pub struct Environment {
    env: ResolvedEnv,
    policy: ConfigPolicy,
    /// Masked view for printing, computed on first print.
    printable: OnceLock<Map<String, Value>>,
}

impl Environment {
    /// Resolve `schema` against `source`.
    ///
    /// Missing required keys are handed to the policy's error reaction along
    /// with the partially resolved values. With the default policy that
    /// returns the error; a policy that returns `Ok(())` gets an environment
    /// whose missing keys read as undefined.
    pub fn from<S: Source + ?Sized>(
        source: &S,
        schema: &Schema,
        policy: ConfigPolicy,
    ) -> Result<Self, EnvfigError> {
        let resolution = resolve(source, schema);
        if let Some(error) = resolution.error() {
            policy.react(error, &resolution.missing, Some(&resolution.env))?;
        }
        Ok(Self {
            env: resolution.env,
            policy,
            printable: OnceLock::new(),
        })
    }

    /// [`from`](Self::from) against a fresh snapshot of the process environment.
    pub fn from_env(schema: &Schema, policy: ConfigPolicy) -> Result<Self, EnvfigError> {
        Self::from(&EnvSnapshot::capture(), schema, policy)
    }

    /// Declare keys as plain lists plus one default map.
    ///
    /// A default for a key that is in neither list is ignored.
    pub fn define<S, D>(
        source: &S,
        required: &[&str],
        optional: &[&str],
        defaults: D,
        policy: ConfigPolicy,
    ) -> Result<Self, EnvfigError>
    where
        S: Source + ?Sized,
        D: Source,
    {
        let mut schema = Schema::new();
        for key in optional {
            schema = schema.optional(*key, defaults.lookup(key));
        }
        for key in required {
            schema = schema.required(*key, defaults.lookup(key));
        }
        Self::from(source, &schema, policy)
    }

    /// [`define`](Self::define) against a fresh snapshot of the process environment.
    pub fn define_env<D: Source>(
        required: &[&str],
        optional: &[&str],
        defaults: D,
        policy: ConfigPolicy,
    ) -> Result<Self, EnvfigError> {
        Self::define(&EnvSnapshot::capture(), required, optional, defaults, policy)
    }

    /// The stored value, untouched. `None` when undefined.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.env.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.env.get_str(key)
    }

    /// `Some(true)` only when the value's text is exactly `"true"`.
    pub fn get_boolean(&self, key: &str) -> Option<bool> {
        self.get(key).map(|v| coerce::to_bool(&value_text(v)))
    }

    /// The value as a number; text that is not numeric gives NaN.
    pub fn get_number(&self, key: &str) -> Option<f64> {
        self.get(key).map(|v| match v {
            Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
            other => coerce::to_number(&value_text(other)),
        })
    }

    /// A deferred JSON accessor; call [`JsonValue::parse`] to decode.
    pub fn get_json<'a>(&'a self, key: &'a str) -> JsonValue<'a> {
        JsonValue { owner: self, key }
    }

    pub fn values(&self) -> &ResolvedEnv {
        &self.env
    }

    pub fn policy(&self) -> &ConfigPolicy {
        &self.policy
    }

    /// Deserialize the whole environment into a caller-defined struct.
    pub fn into_typed<T: DeserializeOwned>(self) -> Result<T, EnvfigError> {
        self.env.into_typed()
    }

    /// Log the environment, secrets masked, as two-space indented JSON with
    /// undefined values as `null`. Floats with no fractional part print as
    /// integers (`1000000`, not `1000000.0`).
    pub fn print_environment(&self) -> Result<(), EnvfigError> {
        let view = integral_floats(Value::Object(self.printable().clone()));
        let rendered = serde_json::to_string_pretty(&view)
            .map_err(|source| EnvfigError::Render { source })?;
        self.policy.emit(&rendered);
        Ok(())
    }

    /// Log the environment, secrets masked, rendered by `convert`.
    pub fn print_environment_with<F>(&self, convert: F)
    where
        F: FnOnce(&Map<String, Value>) -> String,
    {
        self.policy.emit(&convert(self.printable()));
    }

    /// Computed once; later prints reuse the same view.
    fn printable(&self) -> &Map<String, Value> {
        self.printable.get_or_init(|| {
            self.env
                .iter()
                .map(|(key, value)| {
                    let shown = if self.policy.is_secret(key) {
                        self.policy
                            .mask(key, self.env.raw(key).as_deref())
                            .map_or(Value::Null, Value::String)
                    } else {
                        value.clone()
                    };
                    (key.to_string(), shown)
                })
                .collect()
        })
    }
}

/// Largest magnitude at which every integer is exactly representable as f64.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_991.0;

fn integral_floats(value: Value) -> Value {
    match value {
        Value::Number(n) if n.is_f64() => match n.as_f64() {
            Some(f) if f.fract() == 0.0 && f.abs() <= MAX_SAFE_INTEGER => Value::from(f as i64),
            _ => Value::Number(n),
        },
        Value::Array(items) => Value::Array(items.into_iter().map(integral_floats).collect()),
        Value::Object(map) => Value::Object(
            map.into_iter()
                .map(|(k, v)| (k, integral_floats(v)))
                .collect(),
        ),
        other => other,
    }
}

/// Returned by [`Environment::get_json`].
#[derive(Debug, Clone, Copy)]
pub struct JsonValue<'a> {
    owner: &'a Environment,
    key: &'a str,
}

impl JsonValue<'_> {
    /// Decode the stored value as `T`.
    ///
    /// Undefined gives `Ok(None)`. A value that is not valid JSON for `T` is
    /// handed to the policy's error reaction with this key; if the reaction
    /// continues, the result is `Ok(None)`.
    pub fn parse<T: DeserializeOwned>(&self) -> Result<Option<T>, EnvfigError> {
        let Some(value) = self.owner.get(self.key) else {
            return Ok(None);
        };
        let decoded = match value {
            Value::String(text) => serde_json::from_str::<T>(text),
            other => serde_json::from_value::<T>(other.clone()),
        };
        match decoded {
            Ok(parsed) => Ok(Some(parsed)),
            Err(source) => {
                let error = EnvfigError::MalformedJson {
                    key: self.key.to_string(),
                    source,
                };
                self.owner
                    .policy
                    .react(error, &[self.key.to_string()], None)?;
                Ok(None)
            }
        }
    }
}
