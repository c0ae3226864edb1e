use jiff::Timestamp;
use serde::{Deserialize, Deserializer, Serialize};

/// Sentinel codec value meaning "this variant carries no such track".
pub const CODEC_NONE: &str = "none";

/// One direct-media-URL variant from the resolver's document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaFormat {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub format_id: String,
    /// Container extension, e.g. `mp4` or `webm`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub ext: String,
    /// The direct, time-limited media URL.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub url: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub vcodec: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub acodec: String,
}

impl MediaFormat {
    /// Only the literal `"none"` sentinel marks an absent track; anything
    /// else, including an empty field, counts as present.
    pub fn has_video(&self) -> bool {
        self.vcodec != CODEC_NONE
    }

    pub fn has_audio(&self) -> bool {
        self.acodec != CODEC_NONE
    }

    /// A variant carrying both a video and an audio track.
    pub fn is_complete(&self) -> bool {
        self.has_video() && self.has_audio()
    }
}

/// The resolver's structured description of a source page.
///
/// `formats` keeps exactly the resolver's ordering; it is never re-sorted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaInfo {
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub title: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub description: String,
    /// Duration in seconds, when the resolver reports one.
    #[serde(default)]
    pub duration: Option<f64>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub webpage_url: String,
    #[serde(default)]
    pub formats: Vec<MediaFormat>,
}

/// A cached resolution result.
///
/// Owned by the cache and replaced wholesale on update; `expires_at` comes
/// from the upstream-issued `expire` parameter on the direct URL.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    pub expires_at: Timestamp,
    pub format: MediaFormat,
    pub info: MediaInfo,
}

impl CacheEntry {
    pub fn is_expired(&self) -> bool {
        Timestamp::now() >= self.expires_at
    }
}

/// The resolver emits `null` for some string fields; treat that the same
/// as an absent field.
fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
