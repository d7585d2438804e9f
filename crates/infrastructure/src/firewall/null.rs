use apollo_application::ports::FirewallController;
use apollo_domain::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;
use std::sync::Mutex;

/// No-op firewall that records every call. Used by tests and as the
/// fallback on platforms without a supported backend.
#[derive(Default)]
pub struct NullFirewall {
    installed: Mutex<Vec<IpAddr>>,
    removed: Mutex<Vec<IpAddr>>,
}

impl NullFirewall {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn installed(&self) -> Vec<IpAddr> {
        self.installed.lock().unwrap().clone()
    }

    pub fn removed(&self) -> Vec<IpAddr> {
        self.removed.lock().unwrap().clone()
    }
}

#[async_trait]
impl FirewallController for NullFirewall {
    async fn install_block(&self, ip: IpAddr) -> Result<(), DomainError> {
        self.installed.lock().unwrap().push(ip);
        Ok(())
    }

    async fn remove_block(&self, ip: IpAddr) -> Result<(), DomainError> {
        self.removed.lock().unwrap().push(ip);
        Ok(())
    }
}
