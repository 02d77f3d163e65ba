//! Raw string-keyed inputs for resolution.
//!
//! Resolution never reads the process environment on its own. Whatever mapping
//! the caller hands in (a `HashMap`, a literal list of pairs, or an
//! [`EnvSnapshot`](crate::env::EnvSnapshot)) is the only place values come from.

use std::borrow::Borrow;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hash};

/// A read-only mapping from key to raw string value.
pub trait Source {
    /// The raw value for `key`, or `None` when the key has no entry.
    fn lookup(&self, key: &str) -> Option<&str>;
}

impl<T: Source + ?Sized> Source for &T {
    fn lookup(&self, key: &str) -> Option<&str> {
        (**self).lookup(key)
    }
}

impl<K, V, S> Source for HashMap<K, V, S>
where
    K: Borrow<str> + Hash + Eq,
    V: AsRef<str>,
    S: BuildHasher,
{
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

impl<K, V> Source for BTreeMap<K, V>
where
    K: Borrow<str> + Ord,
    V: AsRef<str>,
{
    fn lookup(&self, key: &str) -> Option<&str> {
        self.get(key).map(AsRef::as_ref)
    }
}

/// Pair lists behave like a map where the last entry for a key wins.
impl<K: AsRef<str>, V: AsRef<str>> Source for [(K, V)] {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.iter()
            .rev()
            .find(|(k, _)| k.as_ref() == key)
            .map(|(_, v)| v.as_ref())
    }
}

impl<K: AsRef<str>, V: AsRef<str>, const N: usize> Source for [(K, V); N] {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.as_slice().lookup(key)
    }
}

impl<K: AsRef<str>, V: AsRef<str>> Source for Vec<(K, V)> {
    fn lookup(&self, key: &str) -> Option<&str> {
        self.as_slice().lookup(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_map_lookup() {
        let map: HashMap<String, String> = [("a".to_string(), "abc".to_string())].into();
        assert_eq!(map.lookup("a"), Some("abc"));
        assert_eq!(map.lookup("b"), None);
    }

    #[test]
    fn borrowed_hash_map_lookup() {
        let map: HashMap<&str, &str> = [("a", "abc")].into();
        assert_eq!((&map).lookup("a"), Some("abc"));
    }

    #[test]
    fn btree_map_lookup() {
        let map: BTreeMap<&str, String> = [("port", "8080".to_string())].into();
        assert_eq!(map.lookup("port"), Some("8080"));
    }

    #[test]
    fn pair_array_lookup() {
        let pairs = [("a", "abc"), ("b", "123")];
        assert_eq!(pairs.lookup("b"), Some("123"));
        assert_eq!(pairs.lookup("c"), None);
    }

    #[test]
    fn pair_list_last_entry_wins() {
        let pairs = vec![("a", "first"), ("a", "second")];
        assert_eq!(pairs.lookup("a"), Some("second"));
    }

    #[test]
    fn empty_value_is_present() {
        let pairs = [("a", "")];
        assert_eq!(pairs.lookup("a"), Some(""));
    }
}
