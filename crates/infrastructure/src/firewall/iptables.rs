use apollo_application::ports::FirewallController;
use apollo_domain::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;
use tokio::process::Command;
use tracing::debug;

/// Linux firewall backend: inserts/deletes `DROP` rules at the head of the
/// `INPUT` chain. IPv6 sources go through `ip6tables`.
pub struct IptablesFirewall;

impl IptablesFirewall {
    pub fn new() -> Self {
        Self
    }

    fn binary_for(ip: IpAddr) -> &'static str {
        match ip {
            IpAddr::V4(_) => "iptables",
            IpAddr::V6(_) => "ip6tables",
        }
    }
}

impl Default for IptablesFirewall {
    fn default() -> Self {
        Self::new()
    }
}

async fn run(binary: &str, args: &[&str]) -> Result<(), String> {
    let output = Command::new(binary)
        .args(args)
        .output()
        .await
        .map_err(|e| format!("{binary}: {e}"))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!("{binary} exited with {}: {}", output.status, stderr.trim()))
    }
}

#[async_trait]
impl FirewallController for IptablesFirewall {
    async fn install_block(&self, ip: IpAddr) -> Result<(), DomainError> {
        let addr = ip.to_string();
        debug!(ip = %ip, "Inserting DROP rule");
        run(
            Self::binary_for(ip),
            &["-I", "INPUT", "1", "-s", &addr, "-j", "DROP"],
        )
        .await
        .map_err(DomainError::FirewallInstall)
    }

    async fn remove_block(&self, ip: IpAddr) -> Result<(), DomainError> {
        let addr = ip.to_string();
        debug!(ip = %ip, "Deleting DROP rule");
        run(
            Self::binary_for(ip),
            &["-D", "INPUT", "-s", &addr, "-j", "DROP"],
        )
        .await
        .map_err(DomainError::FirewallRemoval)
    }
}
