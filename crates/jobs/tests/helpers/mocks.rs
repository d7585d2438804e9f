use apollo_application::ports::{
    FirewallController, GeoProvider, HostnameResolver, ThreatFeedFetcher,
};
use apollo_domain::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

// ============================================================================
// Mock ThreatFeedFetcher
// ============================================================================

pub struct MockFeed {
    call_count: AtomicU64,
    bodies: Mutex<Vec<Result<String, String>>>,
}

impl MockFeed {
    /// Serves the given responses in order; repeats the last one after.
    pub fn with_responses(responses: Vec<Result<&str, &str>>) -> Self {
        Self {
            call_count: AtomicU64::new(0),
            bodies: Mutex::new(
                responses
                    .into_iter()
                    .map(|r| r.map(str::to_string).map_err(str::to_string))
                    .collect(),
            ),
        }
    }

    pub fn call_count(&self) -> u64 {
        self.call_count.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl ThreatFeedFetcher for MockFeed {
    async fn fetch(&self, _url: &str) -> Result<String, DomainError> {
        let call = self.call_count.fetch_add(1, Ordering::Relaxed) as usize;
        let bodies = self.bodies.lock().unwrap();
        let index = call.min(bodies.len().saturating_sub(1));
        match bodies.get(index) {
            Some(Ok(body)) => Ok(body.clone()),
            Some(Err(detail)) => Err(DomainError::ThreatFeedFetch(detail.clone())),
            None => Ok(String::new()),
        }
    }
}

// ============================================================================
// Null port implementations for engine construction
// ============================================================================

pub struct NoFirewall;

#[async_trait]
impl FirewallController for NoFirewall {
    async fn install_block(&self, _ip: IpAddr) -> Result<(), DomainError> {
        Ok(())
    }

    async fn remove_block(&self, _ip: IpAddr) -> Result<(), DomainError> {
        Ok(())
    }
}

pub struct NoGeo;

#[async_trait]
impl GeoProvider for NoGeo {
    async fn country_code(&self, _ip: IpAddr) -> Result<Option<String>, DomainError> {
        Ok(None)
    }
}

pub struct NoRdns;

#[async_trait]
impl HostnameResolver for NoRdns {
    async fn resolve_hostname(&self, _ip: IpAddr) -> Result<Option<String>, DomainError> {
        Ok(None)
    }
}

pub struct EmptyFeed;

#[async_trait]
impl ThreatFeedFetcher for EmptyFeed {
    async fn fetch(&self, _url: &str) -> Result<String, DomainError> {
        Ok(String::new())
    }
}
