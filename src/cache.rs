//! Compiled-stylesheet cache.
//!
//! Compiling a DocBook customization layer pulls in hundreds of imported
//! modules, so each distinct stylesheet is compiled once per builder and
//! every transformer after that is instantiated from the stored program.

use docweave_traits::{CompiledStylesheet, Location};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::num::NonZeroUsize;
use std::sync::Arc;

/// Key under which a compiled stylesheet is stored: the canonical string
/// form of its location. Locations that print the same share an entry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CacheKey(String);

impl CacheKey {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&Location> for CacheKey {
    fn from(location: &Location) -> Self {
        CacheKey(location.as_str().to_string())
    }
}

impl fmt::Display for CacheKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// When, if ever, compiled stylesheets leave the cache.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EvictionPolicy {
    /// Entries live as long as the cache. (Default)
    #[default]
    Never,
    /// Holds at most this many programs; the oldest insertion goes first.
    MaxEntries(NonZeroUsize),
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub evictions: u64,
}

/// Maps stylesheet locations to compiled programs.
///
/// Not synchronized: one cache serves one build session on one thread.
#[derive(Default)]
pub struct StylesheetCache {
    entries: HashMap<CacheKey, Arc<dyn CompiledStylesheet>>,
    insertion_order: VecDeque<CacheKey>,
    policy: EvictionPolicy,
    stats: CacheStats,
}

impl StylesheetCache {
    pub fn new(policy: EvictionPolicy) -> Self {
        Self {
            policy,
            ..Default::default()
        }
    }

    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    /// Returns the cached program for `location`, running `compile` only on
    /// a miss. A failed compile stores nothing.
    pub fn get_or_compile<E, F>(
        &mut self,
        location: &Location,
        compile: F,
    ) -> Result<Arc<dyn CompiledStylesheet>, E>
    where
        F: FnOnce() -> Result<Arc<dyn CompiledStylesheet>, E>,
    {
        let key = CacheKey::from(location);
        if let Some(compiled) = self.entries.get(&key) {
            self.stats.hits += 1;
            log::debug!("Stylesheet cache hit for {}", key);
            return Ok(Arc::clone(compiled));
        }

        self.stats.misses += 1;
        log::debug!("Stylesheet cache miss for {}; compiling", key);
        let compiled = compile()?;
        self.insert(key, Arc::clone(&compiled));
        Ok(compiled)
    }

    fn insert(&mut self, key: CacheKey, compiled: Arc<dyn CompiledStylesheet>) {
        if let EvictionPolicy::MaxEntries(max) = self.policy {
            while self.entries.len() >= max.get() {
                let Some(oldest) = self.insertion_order.pop_front() else {
                    break;
                };
                self.entries.remove(&oldest);
                self.stats.evictions += 1;
                log::debug!("Evicted compiled stylesheet {}", oldest);
            }
        }
        self.insertion_order.push_back(key.clone());
        self.entries.insert(key, compiled);
    }

    pub fn contains(&self, location: &Location) -> bool {
        self.entries.contains_key(&CacheKey::from(location))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn stats(&self) -> CacheStats {
        self.stats
    }
}

impl fmt::Debug for StylesheetCache {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("StylesheetCache")
            .field("entries", &self.insertion_order)
            .field("policy", &self.policy)
            .field("stats", &self.stats)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use docweave_traits::{CompileError, Transformer};

    #[derive(Debug)]
    struct Program(&'static str);

    impl CompiledStylesheet for Program {
        fn new_transformer(&self) -> Result<Box<dyn Transformer>, CompileError> {
            Err(CompileError::new(self.0))
        }
    }

    fn loc(s: &str) -> Location {
        Location::parse(s).unwrap()
    }

    fn program(name: &'static str) -> Result<Arc<dyn CompiledStylesheet>, CompileError> {
        Ok(Arc::new(Program(name)))
    }

    #[test]
    fn test_hit_skips_compile() {
        let mut cache = StylesheetCache::default();
        let location = loc("mem:/html.xsl");

        let first = cache.get_or_compile(&location, || program("html")).unwrap();
        let second = cache
            .get_or_compile(&location, || -> Result<_, CompileError> {
                panic!("compiled twice")
            })
            .unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(
            cache.stats(),
            CacheStats {
                hits: 1,
                misses: 1,
                evictions: 0
            }
        );
    }

    #[test]
    fn test_canonically_equal_locations_share_entry() {
        let mut cache = StylesheetCache::default();
        cache
            .get_or_compile(&loc("HTTP://Example.com/a.xsl"), || program("a"))
            .unwrap();
        assert!(cache.contains(&loc("http://example.com/a.xsl")));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_failed_compile_is_not_cached() {
        let mut cache = StylesheetCache::default();
        let location = loc("mem:/broken.xsl");

        let result = cache.get_or_compile(&location, || Err(CompileError::new("syntax")));
        assert!(result.is_err());
        assert!(cache.is_empty());

        cache.get_or_compile(&location, || program("fixed")).unwrap();
        assert_eq!(cache.stats().misses, 2);
    }

    #[test]
    fn test_never_policy_keeps_everything() {
        let mut cache = StylesheetCache::new(EvictionPolicy::Never);
        for i in 0..50 {
            let location = loc(&format!("mem:/s{i}.xsl"));
            cache.get_or_compile(&location, || program("s")).unwrap();
        }
        assert_eq!(cache.len(), 50);
        assert_eq!(cache.stats().evictions, 0);
    }

    #[test]
    fn test_max_entries_evicts_oldest() {
        let max = NonZeroUsize::new(2).unwrap();
        let mut cache = StylesheetCache::new(EvictionPolicy::MaxEntries(max));
        let (a, b, c) = (loc("mem:/a.xsl"), loc("mem:/b.xsl"), loc("mem:/c.xsl"));

        cache.get_or_compile(&a, || program("a")).unwrap();
        cache.get_or_compile(&b, || program("b")).unwrap();
        cache.get_or_compile(&a, || program("a")).unwrap();
        cache.get_or_compile(&c, || program("c")).unwrap();

        assert_eq!(cache.len(), 2);
        assert!(!cache.contains(&a));
        assert!(cache.contains(&b));
        assert!(cache.contains(&c));
        assert_eq!(cache.stats().evictions, 1);
    }

    #[test]
    fn test_cache_key_display() {
        let key = CacheKey::from(&loc("mem:/a.xsl"));
        assert_eq!(key.to_string(), "mem:/a.xsl");
        assert_eq!(key.as_str(), "mem:/a.xsl");
    }
}
