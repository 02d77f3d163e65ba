//! How an [`Environment`](crate::Environment) logs, masks secrets, and reacts
//! to failures.
//!
//! Start from [`ConfigPolicy::default()`] and override only what you need:
//!
//! ```ignore
//! let policy = ConfigPolicy::default()
//!     .secrets(["DATABASE_PASSWORD"])
//!     .log(|message| eprintln!("{message}"));
//! ```
//!
//! The default error reaction keeps the split between failures that break
//! the whole configuration and failures local to one accessor: missing
//! required keys are raised, malformed JSON is logged and swallowed.

use std::fmt;
use std::sync::Arc;

use crate::error::EnvfigError;
use crate::resolved::ResolvedEnv;

/// Maps `(key, raw value)` of a secret to its printable form. `None` prints as `null`.
pub type SecretMapper = Arc<dyn Fn(&str, Option<&str>) -> Option<String> + Send + Sync>;

/// Receives every printed environment.
pub type LogSink = Arc<dyn Fn(&str) + Send + Sync>;

/// Reacts to a failure. `Err` raises it to the caller, `Ok(())` continues.
///
/// Arguments are the error, the keys involved, and the partially resolved
/// environment when the failure came from resolution.
pub type ErrorReaction =
    Arc<dyn Fn(EnvfigError, &[String], Option<&ResolvedEnv>) -> Result<(), EnvfigError> + Send + Sync>;

/// Tag placed in front of masked secrets.
pub const SECRET_TAG: &str = "SECRET ";

#[derive(Clone)]
pub struct ConfigPolicy {
    pub(crate) secrets: Vec<String>,
    pub(crate) secret_mapper: SecretMapper,
    pub(crate) log: LogSink,
    pub(crate) on_error: ErrorReaction,
}

impl Default for ConfigPolicy {
    fn default() -> Self {
        Self {
            secrets: Vec::new(),
            secret_mapper: Arc::new(mask_secret),
            log: Arc::new(|message: &str| tracing::debug!("{message}")),
            on_error: Arc::new(default_reaction),
        }
    }
}

impl ConfigPolicy {
    /// Keys whose values are masked when printed.
    pub fn secrets<I, K>(mut self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        self.secrets = keys.into_iter().map(Into::into).collect();
        self
    }

    pub fn secret_mapper<F>(mut self, mapper: F) -> Self
    where
        F: Fn(&str, Option<&str>) -> Option<String> + Send + Sync + 'static,
    {
        self.secret_mapper = Arc::new(mapper);
        self
    }

    pub fn log<F>(mut self, sink: F) -> Self
    where
        F: Fn(&str) + Send + Sync + 'static,
    {
        self.log = Arc::new(sink);
        self
    }

    pub fn on_error<F>(mut self, reaction: F) -> Self
    where
        F: Fn(EnvfigError, &[String], Option<&ResolvedEnv>) -> Result<(), EnvfigError>
            + Send
            + Sync
            + 'static,
    {
        self.on_error = Arc::new(reaction);
        self
    }

    pub fn is_secret(&self, key: &str) -> bool {
        self.secrets.iter().any(|s| s == key)
    }

    pub(crate) fn mask(&self, key: &str, raw: Option<&str>) -> Option<String> {
        (self.secret_mapper)(key, raw)
    }

    pub(crate) fn emit(&self, message: &str) {
        (self.log)(message)
    }

    pub(crate) fn react(
        &self,
        error: EnvfigError,
        keys: &[String],
        env: Option<&ResolvedEnv>,
    ) -> Result<(), EnvfigError> {
        (self.on_error)(error, keys, env)
    }
}

impl fmt::Debug for ConfigPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConfigPolicy")
            .field("secrets", &self.secrets)
            .finish_non_exhaustive()
    }
}

/// The tag plus one `x` per character of the value. An undefined value
/// yields the bare tag.
pub fn mask_secret(_key: &str, value: Option<&str>) -> Option<String> {
    let len = value.map_or(0, |v| v.chars().count());
    Some(format!("{SECRET_TAG}{}", "x".repeat(len)))
}

/// Raise missing required keys, report malformed values and carry on.
pub fn default_reaction(
    error: EnvfigError,
    keys: &[String],
    _env: Option<&ResolvedEnv>,
) -> Result<(), EnvfigError> {
    match error {
        EnvfigError::MalformedJson { .. } => {
            tracing::warn!(keys = ?keys, "{error}");
            Ok(())
        }
        other => Err(other),
    }
}
