use apollo_application::ports::FirewallController;
use apollo_domain::DomainError;
use async_trait::async_trait;
use std::net::IpAddr;
use tokio::process::Command;
use tracing::debug;

/// Windows firewall backend: one named inbound block rule per source,
/// managed through PowerShell.
pub struct WindowsFirewall;

impl WindowsFirewall {
    pub fn new() -> Self {
        Self
    }

    pub fn rule_name(ip: IpAddr) -> String {
        format!("PROJECT-APOLLO-BLOCK-{ip}")
    }
}

impl Default for WindowsFirewall {
    fn default() -> Self {
        Self::new()
    }
}

async fn run_powershell(command: &str) -> Result<(), String> {
    let output = Command::new("powershell")
        .args(["-ExecutionPolicy", "Bypass", "-Command", command])
        .output()
        .await
        .map_err(|e| format!("powershell: {e}"))?;

    if output.status.success() {
        Ok(())
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr);
        Err(format!(
            "powershell exited with {}: {}",
            output.status,
            stderr.trim()
        ))
    }
}

#[async_trait]
impl FirewallController for WindowsFirewall {
    async fn install_block(&self, ip: IpAddr) -> Result<(), DomainError> {
        let rule = Self::rule_name(ip);
        debug!(ip = %ip, rule = %rule, "Creating inbound block rule");
        let command = format!(
            "New-NetFirewallRule -DisplayName \"{rule}\" -Direction Inbound -Action Block -RemoteAddress \"{ip}\""
        );
        run_powershell(&command)
            .await
            .map_err(DomainError::FirewallInstall)
    }

    async fn remove_block(&self, ip: IpAddr) -> Result<(), DomainError> {
        let rule = Self::rule_name(ip);
        debug!(ip = %ip, rule = %rule, "Removing inbound block rule");
        let command = format!("Remove-NetFirewallRule -DisplayName \"{rule}\"");
        run_powershell(&command)
            .await
            .map_err(DomainError::FirewallRemoval)
    }
}
