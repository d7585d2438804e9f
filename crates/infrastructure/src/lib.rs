//! Apollo IPS Infrastructure Layer
//!
//! Adapters for the application-layer ports: platform firewalls, the
//! GeoIP and reverse-DNS enrichment providers, the HTTP threat feed and
//! the datalink packet capture source.
pub mod capture;
pub mod enrichment;
pub mod firewall;
pub mod threat_feed;

pub use capture::PacketSniffer;
pub use enrichment::{MaxmindGeoProvider, PtrHostnameResolver};
pub use firewall::{platform_firewall, IptablesFirewall, NullFirewall, WindowsFirewall};
pub use threat_feed::HttpThreatFeed;
