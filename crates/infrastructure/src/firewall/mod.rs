pub mod iptables;
pub mod null;
pub mod windows;

pub use iptables::IptablesFirewall;
pub use null::NullFirewall;
pub use windows::WindowsFirewall;

use apollo_application::ports::FirewallController;
use std::sync::Arc;

/// The firewall controller for the platform this binary was built for.
pub fn platform_firewall() -> Arc<dyn FirewallController> {
    #[cfg(target_os = "linux")]
    {
        Arc::new(IptablesFirewall::new())
    }
    #[cfg(target_os = "windows")]
    {
        Arc::new(WindowsFirewall::new())
    }
    #[cfg(not(any(target_os = "linux", target_os = "windows")))]
    {
        tracing::warn!(
            "No firewall backend for this platform; blocks will be recorded but not enforced"
        );
        Arc::new(NullFirewall::new())
    }
}
