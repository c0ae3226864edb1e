use std::collections::HashSet;

/// Process-lifetime allow-list of source hosts.
///
/// Built once at startup and never mutated afterwards, so it needs no
/// locking. Lookups are by exact host string.
#[derive(Debug, Clone)]
pub struct TrustedHosts(HashSet<String>);

impl TrustedHosts {
    pub fn new<I, S>(hosts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(hosts.into_iter().map(Into::into).collect())
    }

    pub fn contains(&self, host: &str) -> bool {
        self.0.contains(host)
    }
}

impl Default for TrustedHosts {
    fn default() -> Self {
        Self::new(["www.youtube.com", "youtu.be"])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_allows_youtube_hosts() {
        let trusted = TrustedHosts::default();
        assert!(trusted.contains("www.youtube.com"));
        assert!(trusted.contains("youtu.be"));
    }

    #[test]
    fn default_rejects_other_hosts() {
        let trusted = TrustedHosts::default();
        assert!(!trusted.contains("youtube.com"));
        assert!(!trusted.contains("example.com"));
        assert!(!trusted.contains(""));
    }

    #[test]
    fn custom_hosts() {
        let trusted = TrustedHosts::new(["vimeo.com"]);
        assert!(trusted.contains("vimeo.com"));
        assert!(!trusted.contains("www.youtube.com"));
    }
}
