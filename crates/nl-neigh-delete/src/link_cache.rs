//! Interface name/index table
//!
//! Populated once from an RTM_GETLINK dump before arguments are parsed, so
//! `--dev` can be resolved and dumped neighbours can be printed by name.

use neigh_types::ParseError;
use std::collections::HashMap;

#[derive(Debug, Default, Clone)]
pub struct LinkCache {
    by_index: HashMap<u32, String>,
    by_name: HashMap<String, u32>,
}

impl LinkCache {
    /// Add interface to cache
    pub fn insert(&mut self, ifindex: u32, name: impl Into<String>) {
        let name = name.into();
        if let Some(old) = self.by_index.insert(ifindex, name.clone()) {
            self.by_name.remove(&old);
        }
        self.by_name.insert(name, ifindex);
    }

    /// Look up interface name by index
    pub fn name(&self, ifindex: u32) -> Option<&str> {
        self.by_index.get(&ifindex).map(|s| s.as_str())
    }

    /// Look up interface index by name
    pub fn index(&self, name: &str) -> Option<u32> {
        self.by_name.get(name).copied()
    }

    /// Resolve a device name given on the command line
    pub fn resolve(&self, name: &str) -> Result<u32, ParseError> {
        self.index(name)
            .ok_or_else(|| ParseError::UnknownDevice(name.to_string()))
    }

    /// Name for display, falling back to the numeric index
    pub fn display_name(&self, ifindex: u32) -> String {
        self.name(ifindex)
            .map(str::to_string)
            .unwrap_or_else(|| ifindex.to_string())
    }

    pub fn len(&self) -> usize {
        self.by_index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_index.is_empty()
    }
}

impl<S: Into<String>> FromIterator<(u32, S)> for LinkCache {
    fn from_iter<I: IntoIterator<Item = (u32, S)>>(iter: I) -> Self {
        let mut cache = LinkCache::default();
        for (ifindex, name) in iter {
            cache.insert(ifindex, name);
        }
        cache
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lookup_both_ways() {
        let cache: LinkCache = [(1, "lo"), (2, "eth0")].into_iter().collect();
        assert_eq!(cache.index("eth0"), Some(2));
        assert_eq!(cache.name(1), Some("lo"));
        assert_eq!(cache.len(), 2);
    }

    #[test]
    fn test_resolve_unknown_device() {
        let cache: LinkCache = [(2, "eth0")].into_iter().collect();
        assert_eq!(cache.resolve("eth0"), Ok(2));
        assert_eq!(
            cache.resolve("eth9"),
            Err(ParseError::UnknownDevice("eth9".to_string()))
        );
    }

    #[test]
    fn test_rename_drops_old_name() {
        let mut cache = LinkCache::default();
        cache.insert(3, "eth1");
        cache.insert(3, "wan0");
        assert_eq!(cache.index("eth1"), None);
        assert_eq!(cache.index("wan0"), Some(3));
    }

    #[test]
    fn test_display_name_fallback() {
        let cache = LinkCache::default();
        assert!(cache.is_empty());
        assert_eq!(cache.display_name(7), "7");
    }
}
