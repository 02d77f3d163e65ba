//! Resolve environment variables into validated, typed configuration.
//!
//! Envfig takes a string-keyed source (the process environment or any map you
//! already hold), checks it against the keys you declare, and hands back a
//! fully keyed result or a single error naming every missing key.
//!
//! ```ignore
//! let env = Envfig::create(["DATABASE_URL"])
//!     .optionals(["LOG_LEVEL", "DEBUG"])
//!     .transform(|s| serde_json::Value::Bool(s == "true"), ["DEBUG"])
//!     .resolve_env()?;
//! ```
//!
//! # Required and optional keys
//!
//! - **Required** keys must come from the source or from a default. If any
//!   cannot be satisfied, resolution fails with one error listing all of them
//!   in declaration order:
//!
//!   ```text
//!   The following environment variables are required but not set ["a","c"]
//!   ```
//!
//! - **Optional** keys resolve to undefined (`null`) when absent and never
//!   cause an error.
//!
//! Keys that are not declared are ignored, however many the source holds.
//! The result iterates optional keys first, then required keys, each group in
//! declaration order. A key declared both ways is required.
//!
//! # Defaults and transforms
//!
//! A default fills a key the source does not have. A transform converts a
//! raw string into any [`serde_json::Value`]. The two interact differently for
//! the two kinds of key:
//!
//! | Key | Source value | String default | Typed default |
//! |-----|--------------|----------------|---------------|
//! | required | transformed | stored as given | stored as given |
//! | optional | transformed | transformed | stored as given |
//!
//! Required defaults are expected in their final form, so a boolean key gets
//! `false`, not `"false"`.
//!
//! # Two entry points
//!
//! - **[`Envfig::create`]** returns an [`EnvfigBuilder`]. Chain `optionals`,
//!   `defaults`, `transform`, then `resolve`. A missing required key is always
//!   an error. Use [`resolve_into`](EnvfigBuilder::resolve_into) to land the
//!   result in your own `Deserialize` struct.
//!
//! - **[`Environment`]** is built from a [`Schema`] (or plain key lists with
//!   [`Environment::define`]) plus a [`ConfigPolicy`]. It adds typed
//!   accessors and masked printing, and routes failures through the policy.
//!
//! # Typed accessors
//!
//! | Accessor | Undefined | Otherwise |
//! |----------|-----------|-----------|
//! | `get` | `None` | the stored value |
//! | `get_boolean` | `None` | `true` only for exactly `"true"` |
//! | `get_number` | `None` | the number, NaN when not numeric |
//! | `get_json(k).parse::<T>()` | `Ok(None)` | decoded `T`, or the policy decides |
//!
//! Coercions are permissive: `"TRUE"`, `"1"` and `"yes"` are `false`, not
//! errors.
//!
//! # Policy
//!
//! [`ConfigPolicy`] bundles four decisions, each overridable on its own:
//!
//! - **secrets**: keys masked when printing.
//! - **secret mapper**: how a secret is shown. The default prints
//!   `SECRET ` followed by one `x` per character.
//! - **log sink**: where printed output goes. The default is
//!   `tracing::debug!`.
//! - **error reaction**: what happens on failure. By default missing
//!   required keys are returned as errors while malformed JSON is logged at
//!   warn level and the accessor yields `None`.
//!
//! # Printing
//!
//! [`Environment::print_environment`] sends two-space indented JSON to the
//! log sink, undefined values as `null` and secrets masked. The masked view
//! is computed on the first print and reused afterwards.
//!
//! # Error handling
//!
//! All fallible operations return [`EnvfigError`]. With the `rich-errors`
//! feature the error also implements `miette::Diagnostic`.

pub mod error;
pub mod policy;

mod builder;
mod coerce;
mod env;
mod environment;
mod resolve;
mod resolved;
mod schema;
mod source;

#[cfg(test)]
mod fixtures;

pub use builder::{Envfig, EnvfigBuilder};
pub use coerce::{to_bool, to_number};
pub use env::EnvSnapshot;
pub use environment::{Environment, JsonValue};
pub use error::EnvfigError;
pub use policy::ConfigPolicy;
pub use resolve::{Resolution, resolve};
pub use resolved::ResolvedEnv;
pub use schema::{KeyDecl, Schema, Transform};
pub use source::Source;
