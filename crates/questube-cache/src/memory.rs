use async_trait::async_trait;
use dashmap::DashMap;
use jiff::Timestamp;
use questube_core::{CacheEntry, FormatCache, MediaFormat, MediaInfo, SourceUrl};
use tracing::{debug, trace};
use url::Url;

/// Default bound on the number of live entries.
pub const DEFAULT_CAPACITY: usize = 1024;

/// In-memory format cache backed by a sharded concurrent map.
///
/// Entry lifetime is governed by the absolute `expire` instant embedded in
/// the resolved direct URL. Expired entries are evicted lazily on lookup;
/// there is no background sweeper. The map is additionally bounded: once
/// the capacity is reached, a store first purges expired entries and then,
/// if still full, drops the entry closest to expiry.
#[derive(Debug)]
pub struct MemoryFormatCache {
    entries: DashMap<String, CacheEntry>,
    capacity: usize,
}

impl MemoryFormatCache {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: DashMap::new(),
            capacity: capacity.max(1),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn make_room(&self) {
        self.entries.retain(|_, entry| !entry.is_expired());
        while self.entries.len() >= self.capacity {
            let victim = self
                .entries
                .iter()
                .min_by_key(|entry| entry.expires_at)
                .map(|entry| entry.key().clone());
            match victim {
                Some(key) => {
                    debug!(url = %key, "evicting entry closest to expiry");
                    self.entries.remove(&key);
                }
                None => break,
            }
        }
    }
}

impl Default for MemoryFormatCache {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormatCache for MemoryFormatCache {
    async fn lookup(&self, url: &SourceUrl) -> Option<CacheEntry> {
        let Some(entry) = self.entries.get(url.as_str()) else {
            trace!(url = %url, "cache miss");
            return None;
        };

        if entry.is_expired() {
            drop(entry);
            self.entries.remove(url.as_str());
            debug!(url = %url, "cache entry expired, removed");
            return None;
        }

        debug!(url = %url, "cache hit");
        Some(entry.clone())
    }

    async fn store(&self, url: &SourceUrl, format: &MediaFormat, info: &MediaInfo) -> bool {
        let Some(expires_at) = expiry_from_url(&format.url) else {
            trace!(url = %url, "direct url carries no usable expiry, skipping store");
            return false;
        };

        if !self.entries.contains_key(url.as_str()) && self.entries.len() >= self.capacity {
            self.make_room();
        }

        self.entries.insert(
            url.as_str().to_owned(),
            CacheEntry {
                expires_at,
                format: format.clone(),
                info: info.clone(),
            },
        );
        debug!(url = %url, expires_at = %expires_at, "stored resolution result");
        true
    }
}

/// Extracts the upstream-issued `expire` epoch timestamp from a direct URL.
fn expiry_from_url(direct_url: &str) -> Option<Timestamp> {
    let parsed = Url::parse(direct_url).ok()?;
    let (_, value) = parsed.query_pairs().find(|(key, _)| key == "expire")?;
    let seconds: i64 = value.parse().ok()?;
    Timestamp::from_second(seconds).ok()
}
