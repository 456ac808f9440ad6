//! Redirect lookup table.
//!
//! # Responsibilities
//! - Store the canonical path → target URL mapping
//! - Exact-match lookup for a request path
//!
//! # Design Decisions
//! - Immutable after construction (thread-safe without locks)
//! - O(1) lookup via HashMap
//! - No prefix or wildcard matching: the key is the whole path

use std::collections::HashMap;

/// Canonical mapping from request path to redirect target.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RedirectMap {
    targets: HashMap<String, String>,
}

impl RedirectMap {
    /// Collapse authored pairs into a map. Later duplicates overwrite earlier ones.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut targets = HashMap::new();
        for (path, url) in pairs {
            targets.insert(path.into(), url.into());
        }
        Self { targets }
    }

    /// Look up the redirect target for an exact path.
    pub fn lookup(&self, path: &str) -> Option<&str> {
        self.targets.get(path).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.targets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.targets.is_empty()
    }

    /// Iterate entries in arbitrary order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.targets.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for RedirectMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::from_pairs(iter)
    }
}

impl From<HashMap<String, String>> for RedirectMap {
    fn from(targets: HashMap<String, String>) -> Self {
        Self { targets }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let map = RedirectMap::from_pairs([("/a", "u1"), ("/b", "u2"), ("/a", "u3")]);

        assert_eq!(map.len(), 2);
        assert_eq!(map.lookup("/a"), Some("u3"));
        assert_eq!(map.lookup("/b"), Some("u2"));
    }

    #[test]
    fn test_exact_match_only() {
        let map: RedirectMap = [("/dogs", "https://example.com/dogs")].into_iter().collect();

        assert_eq!(map.lookup("/dogs"), Some("https://example.com/dogs"));
        assert_eq!(map.lookup("/dogs/"), None);
        assert_eq!(map.lookup("/dogs/beagle"), None);
        assert_eq!(map.lookup("/DOGS"), None); // Case sensitive
    }

    #[test]
    fn test_from_hash_map() {
        let mut raw = HashMap::new();
        raw.insert("/x".to_string(), "https://example.com/x".to_string());
        let map = RedirectMap::from(raw);

        assert!(!map.is_empty());
        assert_eq!(map.iter().collect::<Vec<_>>(), vec![("/x", "https://example.com/x")]);
    }
}
