use apollo_domain::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;

/// Application-layer port for the platform firewall.
///
/// The core carries no platform branches: the Linux (iptables), Windows
/// (named inbound rule) and null implementations live in the infrastructure
/// layer and are injected at DI time.
///
/// Both operations are keyed by source IP only. `install_block` must be
/// idempotent at the caller (the scheduler guarantees it is never invoked
/// twice for a live block), and `remove_block` failures are reported but do
/// not keep the block alive in the engine's view.
#[async_trait]
pub trait FirewallController: Send + Sync {
    /// Install a rule dropping all inbound traffic from `ip`.
    async fn install_block(&self, ip: IpAddr) -> Result<(), DomainError>;

    /// Remove the rule previously installed for `ip`.
    async fn remove_block(&self, ip: IpAddr) -> Result<(), DomainError>;
}
