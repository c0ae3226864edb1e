//! Core types and traits for the Questube video redirector.
//!
//! This crate provides the shared domain model: the canonical source URL,
//! the media document returned by the resolver, the cache entry shape, and
//! the trait seams between the gateway, the resolver, and the cache.

pub mod cache;
pub mod error;
pub mod media;
pub mod resolver;
pub mod source_url;
pub mod trusted;

pub use cache::FormatCache;
pub use error::{ResolveError, SelectError, UrlError};
pub use media::{CacheEntry, MediaFormat, MediaInfo, CODEC_NONE};
pub use resolver::MediaResolver;
pub use source_url::SourceUrl;
pub use trusted::TrustedHosts;
