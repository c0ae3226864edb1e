use crate::media::{CacheEntry, MediaFormat, MediaInfo};
use crate::source_url::SourceUrl;
use async_trait::async_trait;

/// A cache of resolved formats, keyed by canonical source URL.
///
/// Entries expire at the absolute instant the upstream embedded in the
/// direct URL, not a fixed duration from insertion.
#[async_trait]
pub trait FormatCache: Send + Sync + 'static {
    /// Returns the entry for `url` while it is still live.
    ///
    /// An expired entry is removed as a side effect and reported as absent.
    async fn lookup(&self, url: &SourceUrl) -> Option<CacheEntry>;

    /// Stores a resolution result under `url`, replacing any previous entry.
    ///
    /// The expiry is taken from the `expire` query parameter of
    /// `format.url`; when that is missing or unparsable the store is a
    /// no-op and returns `false`.
    async fn store(&self, url: &SourceUrl, format: &MediaFormat, info: &MediaInfo) -> bool;
}
