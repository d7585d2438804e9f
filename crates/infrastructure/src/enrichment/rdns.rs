use apollo_application::ports::HostnameResolver;
use apollo_domain::DomainError;
use async_trait::async_trait;
use hickory_resolver::config::{ResolverConfig, ResolverOpts};
use hickory_resolver::TokioAsyncResolver;
use std::net::IpAddr;
use tracing::{debug, warn};

/// Reverse-DNS adapter over the system resolver.
///
/// Lookup failures are an expected condition (most hostile sources have no
/// PTR record) and surface as `Ok(None)`, not as errors.
pub struct PtrHostnameResolver {
    resolver: TokioAsyncResolver,
}

impl PtrHostnameResolver {
    /// Use the system resolv.conf; fall back to public defaults when it
    /// cannot be read.
    pub fn from_system() -> Self {
        let resolver = match TokioAsyncResolver::tokio_from_system_conf() {
            Ok(resolver) => resolver,
            Err(e) => {
                warn!(error = %e, "System resolver config unavailable, using defaults");
                TokioAsyncResolver::tokio(ResolverConfig::default(), ResolverOpts::default())
            }
        };
        Self { resolver }
    }
}

#[async_trait]
impl HostnameResolver for PtrHostnameResolver {
    async fn resolve_hostname(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        match self.resolver.reverse_lookup(ip).await {
            Ok(lookup) => Ok(lookup
                .iter()
                .next()
                .map(|name| name.to_utf8().trim_end_matches('.').to_string())),
            Err(e) => {
                debug!(ip = %ip, error = %e, "PTR lookup failed");
                Ok(None)
            }
        }
    }
}
