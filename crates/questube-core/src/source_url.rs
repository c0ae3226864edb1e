use crate::error::UrlError;
use std::fmt::Display;
use url::Url;

/// A validated, canonical source URL.
///
/// Produced from the raw request path (everything after the URL root) plus
/// the raw query string. The scheme defaults to `https` when the path does
/// not literally start with one. The canonical string form (lowercased
/// scheme and host, normalized percent-encoding, default ports dropped)
/// is what the cache keys on.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SourceUrl(Url);

impl SourceUrl {
    /// Parses a raw path and optional raw query string into a canonical URL.
    ///
    /// `Some("")` clears any query carried in the path; `None` leaves it
    /// untouched, so re-parsing a canonical URL yields the same value.
    pub fn parse(raw: &str, query: Option<&str>) -> Result<Self, UrlError> {
        let candidate = if has_explicit_scheme(raw) {
            raw.to_owned()
        } else {
            format!("https://{raw}")
        };

        let mut url = Url::parse(&candidate).map_err(|e| UrlError::Malformed {
            input: raw.to_owned(),
            reason: e.to_string(),
        })?;

        if let Some(q) = query {
            url.set_query(if q.is_empty() { None } else { Some(q) });
        }

        Ok(Self(url))
    }

    /// Returns the host component, or an empty string for host-less URLs.
    pub fn host(&self) -> &str {
        self.0.host_str().unwrap_or_default()
    }

    /// Returns the canonical string form.
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Display for SourceUrl {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.0.as_str())
    }
}

/// Whether `raw` literally begins with a `scheme:` prefix.
fn has_explicit_scheme(raw: &str) -> bool {
    let mut chars = raw.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() => {}
        _ => return false,
    }
    for c in chars {
        match c {
            ':' => return true,
            c if c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.') => {}
            _ => return false,
        }
    }
    false
}
