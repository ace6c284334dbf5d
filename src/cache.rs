use std::collections::HashMap;

use crate::data::model::{MasterTable, SpectrumTable};

/// Which operation produced a cached value, and for which remote path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum CacheKey {
    Listing(String),
    Master(String),
    Spectrum(String),
}

#[derive(Debug, Clone)]
pub enum Cached {
    Listing(Vec<String>),
    Master(MasterTable),
    Spectrum(SpectrumTable),
}

/// Append-only memo of successful fetches for one session. No eviction.
///
/// Not synchronized: a session is driven from a single thread.
#[derive(Debug, Default)]
pub struct FetchCache {
    entries: HashMap<CacheKey, Cached>,
    hits: usize,
}

impl FetchCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&mut self, key: &CacheKey) -> Option<&Cached> {
        let found = self.entries.get(key);
        if found.is_some() {
            self.hits += 1;
            log::debug!("cache hit: {key:?}");
        }
        found
    }

    /// Keeps the first value stored under `key`.
    pub fn insert(&mut self, key: CacheKey, value: Cached) {
        self.entries.entry(key).or_insert(value);
    }

    pub fn contains(&self, key: &CacheKey) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn hits(&self) -> usize {
        self.hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_distinguish_operation() {
        let mut cache = FetchCache::new();
        cache.insert(CacheKey::Listing("/x".into()), Cached::Listing(vec!["a".into()]));
        assert!(cache.contains(&CacheKey::Listing("/x".into())));
        assert!(!cache.contains(&CacheKey::Master("/x".into())));
        assert!(cache.get(&CacheKey::Spectrum("/x".into())).is_none());
        assert_eq!(cache.hits(), 0);
    }

    #[test]
    fn first_insert_wins() {
        let mut cache = FetchCache::new();
        let key = CacheKey::Listing("/x".into());
        cache.insert(key.clone(), Cached::Listing(vec!["a".into()]));
        cache.insert(key.clone(), Cached::Listing(vec!["b".into()]));
        match cache.get(&key) {
            Some(Cached::Listing(v)) => assert_eq!(v, &vec!["a".to_string()]),
            other => panic!("unexpected: {other:?}"),
        }
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.hits(), 1);
    }
}
