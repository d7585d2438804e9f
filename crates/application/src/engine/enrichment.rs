use crate::ports::{GeoProvider, HostnameResolver};
use apollo_domain::GeoInfo;
use dashmap::DashMap;
use rustc_hash::FxBuildHasher;
use std::net::IpAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::timeout;
use tracing::debug;

/// Cached geolocation + reverse-DNS enrichment.
///
/// Each sub-lookup runs under a soft timeout; any failure or timeout is
/// recorded as `"N/A"` and cached, so a dead resolver cannot cost the same
/// expensive miss twice. Concurrent lookups for one uncached IP may both
/// hit the resolvers; the first writer wins and both callers observe the
/// cached value.
pub struct EnrichmentService {
    cache: DashMap<IpAddr, GeoInfo, FxBuildHasher>,
    geo: Arc<dyn GeoProvider>,
    rdns: Arc<dyn HostnameResolver>,
    lookup_timeout: Duration,
}

impl EnrichmentService {
    pub fn new(
        geo: Arc<dyn GeoProvider>,
        rdns: Arc<dyn HostnameResolver>,
        lookup_timeout: Duration,
    ) -> Self {
        Self {
            cache: DashMap::with_hasher(FxBuildHasher),
            geo,
            rdns,
            lookup_timeout,
        }
    }

    pub async fn enrich(&self, ip: IpAddr) -> GeoInfo {
        if let Some(hit) = self.cache.get(&ip) {
            return hit.clone();
        }

        let country_code = match timeout(self.lookup_timeout, self.geo.country_code(ip)).await {
            Ok(Ok(Some(code))) => code,
            Ok(Ok(None)) => GeoInfo::UNAVAILABLE.to_string(),
            Ok(Err(e)) => {
                debug!(ip = %ip, error = %e, "GeoIP lookup failed");
                GeoInfo::UNAVAILABLE.to_string()
            }
            Err(_) => {
                debug!(ip = %ip, "GeoIP lookup timed out");
                GeoInfo::UNAVAILABLE.to_string()
            }
        };

        let hostname = match timeout(self.lookup_timeout, self.rdns.resolve_hostname(ip)).await {
            Ok(Ok(Some(name))) => name,
            Ok(Ok(None)) => GeoInfo::UNAVAILABLE.to_string(),
            Ok(Err(e)) => {
                debug!(ip = %ip, error = %e, "Reverse DNS lookup failed");
                GeoInfo::UNAVAILABLE.to_string()
            }
            Err(_) => {
                debug!(ip = %ip, "Reverse DNS lookup timed out");
                GeoInfo::UNAVAILABLE.to_string()
            }
        };

        let info = GeoInfo::new(country_code, hostname);
        self.cache.entry(ip).or_insert_with(|| info.clone());
        self.cache
            .get(&ip)
            .map(|entry| entry.clone())
            .unwrap_or(info)
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.len()
    }
}
