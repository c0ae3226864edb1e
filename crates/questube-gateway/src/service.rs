use crate::error::GatewayError;
use parking_lot::Mutex;
use questube_core::{FormatCache, MediaResolver, SourceUrl, TrustedHosts};
use questube_resolver::{default_containers, select_format};
use std::collections::{HashMap, HashSet};
use std::sync::Arc;
use tracing::{debug, warn};
use typed_builder::TypedBuilder;

/// Desktop user agents are redirected straight back to the page URL so the
/// full web player is used instead of a bare media stream.
const DESKTOP_UA_MARKER: &str = "Windows";

#[derive(Debug, TypedBuilder)]
pub struct RedirectConfig {
    #[builder(default)]
    pub trusted_hosts: TrustedHosts,
    #[builder(default = default_containers())]
    pub containers: HashSet<String>,
    #[builder(default = true)]
    pub cache_enabled: bool,
}

/// Resolution pipeline behind the redirect endpoint.
///
/// Requests for the same source URL serialize on a per-URL gate, so a burst
/// of clients opening one video costs a single resolver invocation; requests
/// for distinct URLs proceed in parallel.
pub struct RedirectService {
    resolver: Arc<dyn MediaResolver>,
    cache: Arc<dyn FormatCache>,
    trusted: TrustedHosts,
    containers: HashSet<String>,
    cache_enabled: bool,
    in_flight: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl RedirectService {
    pub fn new(
        resolver: Arc<dyn MediaResolver>,
        cache: Arc<dyn FormatCache>,
        config: RedirectConfig,
    ) -> Self {
        Self {
            resolver,
            cache,
            trusted: config.trusted_hosts,
            containers: config.containers,
            cache_enabled: config.cache_enabled,
            in_flight: Mutex::new(HashMap::new()),
        }
    }

    /// Maps one incoming request to the URL it should be redirected to.
    ///
    /// Untrusted hosts and unparsable paths are rejected; once past those
    /// checks the answer is always a redirect target, with the source page
    /// itself standing in whenever resolution fails.
    pub async fn redirect(
        &self,
        path: &str,
        query: Option<&str>,
        user_agent: Option<&str>,
    ) -> Result<String, GatewayError> {
        let url = SourceUrl::parse(path, query)?;

        if !self.trusted.contains(url.host()) {
            debug!(url = %url, "host is not trusted, rejecting");
            return Err(GatewayError::NotFound);
        }

        if let Some(ua) = user_agent {
            if ua.contains(DESKTOP_UA_MARKER) {
                debug!(url = %url, "desktop client, redirecting to page");
                return Ok(url.as_str().to_owned());
            }
        }

        let headers: Vec<(String, String)> = user_agent
            .map(|ua| vec![("User-Agent".to_owned(), ua.to_owned())])
            .unwrap_or_default();

        Ok(self.resolve_gated(&url, &headers).await)
    }

    async fn resolve_gated(&self, url: &SourceUrl, headers: &[(String, String)]) -> String {
        let gate = self.gate(url.as_str());
        let target = {
            let _held = gate.lock().await;
            self.resolve_target(url, headers).await
        };
        self.retire_gate(url.as_str(), &gate);
        target
    }

    async fn resolve_target(&self, url: &SourceUrl, headers: &[(String, String)]) -> String {
        if self.cache_enabled {
            if let Some(entry) = self.cache.lookup(url).await {
                debug!(url = %url, format_id = %entry.format.format_id, "serving cached target");
                return entry.format.url;
            }
        }

        let info = match self.resolver.resolve(url, headers).await {
            Ok(info) => info,
            Err(e) => {
                warn!(url = %url, error = %e, "resolution failed, redirecting to page");
                return url.as_str().to_owned();
            }
        };

        let format = match select_format(&info, &self.containers) {
            Ok(format) => format,
            Err(e) => {
                warn!(url = %url, error = %e, "no usable format, redirecting to page");
                return url.as_str().to_owned();
            }
        };

        if self.cache_enabled && !self.cache.store(url, format, &info).await {
            debug!(url = %url, "target carries no expiry, not cached");
        }

        debug!(url = %url, format_id = %format.format_id, "redirecting to media url");
        format.url.clone()
    }

    fn gate(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        self.in_flight
            .lock()
            .entry(key.to_owned())
            .or_default()
            .clone()
    }

    fn retire_gate(&self, key: &str, gate: &Arc<tokio::sync::Mutex<()>>) {
        let mut gates = self.in_flight.lock();
        // One handle in the map plus the caller's: nobody is waiting. A
        // request arriving right after the removal simply opens a fresh
        // gate and resolves on its own.
        if Arc::strong_count(gate) <= 2 {
            gates.remove(key);
        }
    }
}
