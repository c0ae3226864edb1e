use crate::error::ResolveError;
use crate::media::MediaInfo;
use crate::source_url::SourceUrl;
use async_trait::async_trait;

/// The external media-resolution collaborator.
///
/// Given a source page URL and a list of pass-through request headers,
/// an implementation produces the structured media document for that page.
/// Implementations do not cache and do not retry; the coordinator decides
/// the user-visible fallback on failure.
#[async_trait]
pub trait MediaResolver: Send + Sync + 'static {
    async fn resolve(
        &self,
        url: &SourceUrl,
        headers: &[(String, String)],
    ) -> Result<MediaInfo, ResolveError>;
}
