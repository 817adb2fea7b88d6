// # Resolver Caches
//
// In-memory lookup caches owned by the provider.
//
// ## Purpose
//
// Resolving a zone by tags and a load balancer by DNS name both require
// scanning paginated inventories. Results are cached for the lifetime of the
// provider because the bindings they record are assumed stable:
//
// - a hosted zone keeps its tags
// - a load balancer DNS name keeps its canonical hosted zone
//
// ## Staleness
//
// Nothing is ever evicted. If a load balancer is deleted and recreated under
// the same DNS name with a different hosted zone, the old zone keeps being
// returned until the process restarts.
//
// ## Locking
//
// Both caches live in one `ResolverCaches` value behind a single
// `tokio::sync::Mutex`. A resolver holds the guard across its inventory
// search so a lookup and the cache write that follows it are atomic.

use std::collections::HashMap;

use crate::zone::TagSet;

/// Hosted zone ids keyed to the exact tag set that resolved them
#[derive(Debug, Clone, Default)]
pub struct ZoneCache {
    ids_to_tags: HashMap<String, TagSet>,
}

impl ZoneCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Find the zone id cached for exactly `tags`
    ///
    /// Subsets and supersets do not match.
    pub fn find(&self, tags: &TagSet) -> Option<&str> {
        self.ids_to_tags
            .iter()
            .find(|(_, cached)| *cached == tags)
            .map(|(id, _)| id.as_str())
    }

    /// Remember that `tags` resolved to `id`
    ///
    /// An existing entry for the same id is replaced.
    pub fn insert(&mut self, id: impl Into<String>, tags: TagSet) {
        self.ids_to_tags.insert(id.into(), tags);
    }

    /// Number of cached zones
    pub fn len(&self) -> usize {
        self.ids_to_tags.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.ids_to_tags.is_empty()
    }
}

/// Load balancer DNS names mapped to their canonical hosted zone
#[derive(Debug, Clone, Default)]
pub struct LoadBalancerZoneCache {
    zones: HashMap<String, String>,
}

impl LoadBalancerZoneCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached hosted zone for `dns_name`
    pub fn get(&self, dns_name: &str) -> Option<&str> {
        self.zones.get(dns_name).map(String::as_str)
    }

    /// Remember the hosted zone of `dns_name`
    pub fn insert(&mut self, dns_name: impl Into<String>, zone_id: impl Into<String>) {
        self.zones.insert(dns_name.into(), zone_id.into());
    }

    /// Number of cached load balancers
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Check if the cache is empty
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }
}

/// Every cache the provider owns, guarded together
#[derive(Debug, Default)]
pub struct ResolverCaches {
    pub zones: ZoneCache,
    pub load_balancer_zones: LoadBalancerZoneCache,
}

impl ResolverCaches {
    pub fn new() -> Self {
        Self::default()
    }
}
