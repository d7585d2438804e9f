use apollo_application::ports::{
    FirewallController, GeoProvider, HostnameResolver, ThreatFeedFetcher,
};
use apollo_domain::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Mutex;

// ============================================================================
// Recording FirewallController
// ============================================================================

#[derive(Default)]
pub struct RecordingFirewall {
    install_calls: AtomicU64,
    remove_calls: AtomicU64,
    fail_install: AtomicBool,
    installed: Mutex<Vec<IpAddr>>,
    removed: Mutex<Vec<IpAddr>>,
}

impl RecordingFirewall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn install_calls(&self) -> u64 {
        self.install_calls.load(Ordering::Relaxed)
    }

    pub fn remove_calls(&self) -> u64 {
        self.remove_calls.load(Ordering::Relaxed)
    }

    pub fn installed(&self) -> Vec<IpAddr> {
        self.installed.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<IpAddr> {
        self.removed.lock().unwrap().clone()
    }

    pub fn set_fail_install(&self, fail: bool) {
        self.fail_install.store(fail, Ordering::Relaxed);
    }
}

#[async_trait]
impl FirewallController for RecordingFirewall {
    async fn install_block(&self, ip: IpAddr) -> Result<(), DomainError> {
        self.install_calls.fetch_add(1, Ordering::Relaxed);
        if self.fail_install.load(Ordering::Relaxed) {
            return Err(DomainError::FirewallInstall("injected failure".to_string()));
        }
        self.installed.lock().unwrap().push(ip);
        Ok(())
    }

    async fn remove_block(&self, ip: IpAddr) -> Result<(), DomainError> {
        self.remove_calls.fetch_add(1, Ordering::Relaxed);
        self.removed.lock().unwrap().push(ip);
        Ok(())
    }
}

// ============================================================================
// Counting enrichment providers
// ============================================================================

pub struct CountingGeo {
    calls: AtomicU64,
    code: Option<String>,
}

impl CountingGeo {
    pub fn with_code(code: &str) -> Self {
        Self {
            calls: AtomicU64::new(0),
            code: Some(code.to_string()),
        }
    }

    pub fn empty() -> Self {
        Self {
            calls: AtomicU64::new(0),
            code: None,
        }
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl GeoProvider for CountingGeo {
    async fn country_code(&self, _ip: IpAddr) -> Result<Option<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.code.clone())
    }
}

pub struct CountingRdns {
    calls: AtomicU64,
    hostname: Option<String>,
}

impl CountingRdns {
    pub fn with_hostname(hostname: &str) -> Self {
        Self {
            calls: AtomicU64::new(0),
            hostname: Some(hostname.to_string()),
        }
    }

    pub fn empty() -> Self {
        Self {
            calls: AtomicU64::new(0),
            hostname: None,
        }
    }

    pub fn call_count(&self) -> u64 {
        self.calls.load(Ordering::Relaxed)
    }
}

#[async_trait]
impl HostnameResolver for CountingRdns {
    async fn resolve_hostname(&self, _ip: IpAddr) -> Result<Option<String>, DomainError> {
        self.calls.fetch_add(1, Ordering::Relaxed);
        Ok(self.hostname.clone())
    }
}

// ============================================================================
// Static ThreatFeedFetcher
// ============================================================================

pub struct StaticFeed {
    body: String,
}

impl StaticFeed {
    pub fn with_body(body: &str) -> Self {
        Self {
            body: body.to_string(),
        }
    }
}

#[async_trait]
impl ThreatFeedFetcher for StaticFeed {
    async fn fetch(&self, _url: &str) -> Result<String, DomainError> {
        Ok(self.body.clone())
    }
}
