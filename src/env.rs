use std::collections::HashMap;

use crate::source::Source;

/// A one-time copy of the process environment.
///
/// Variables whose name or value is not valid UTF-8 are skipped.
///
/// [`from_vars`](Self::from_vars) takes an iterator so tests can pass synthetic
/// data instead of `std::env::vars_os()`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EnvSnapshot {
    vars: HashMap<String, String>,
}

impl EnvSnapshot {
    /// Copy the current process environment.
    pub fn capture() -> Self {
        let vars = std::env::vars_os()
            .filter_map(|(key, value)| Some((key.into_string().ok()?, value.into_string().ok()?)))
            .collect::<HashMap<_, _>>();
        tracing::trace!(count = vars.len(), "captured process environment");
        Self { vars }
    }

    /// Build a snapshot from explicit pairs. Later pairs override earlier ones.
    pub fn from_vars<K, V>(vars: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            vars: vars
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.vars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vars.is_empty()
    }
}

impl Source for EnvSnapshot {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.vars.get(key).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn from_vars_lookup() {
        let snapshot = EnvSnapshot::from_vars([("HOST", "0.0.0.0"), ("PORT", "3000")]);
        assert_eq!(snapshot.lookup("HOST"), Some("0.0.0.0"));
        assert_eq!(snapshot.lookup("PORT"), Some("3000"));
        assert_eq!(snapshot.lookup("MISSING"), None);
        assert_eq!(snapshot.len(), 2);
    }

    #[test]
    fn later_pair_overrides_earlier() {
        let snapshot = EnvSnapshot::from_vars([("PORT", "1"), ("PORT", "2")]);
        assert_eq!(snapshot.lookup("PORT"), Some("2"));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        let snapshot = EnvSnapshot::from_vars([("host", "x")]);
        assert_eq!(snapshot.lookup("HOST"), None);
    }

    #[test]
    fn capture_sees_cargo_variables() {
        let snapshot = EnvSnapshot::capture();
        assert_eq!(snapshot.lookup("CARGO_PKG_NAME"), Some(env!("CARGO_PKG_NAME")));
    }

    #[test]
    fn default_is_empty() {
        assert!(EnvSnapshot::default().is_empty());
    }
}
