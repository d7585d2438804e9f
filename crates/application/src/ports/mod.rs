pub mod firewall_controller;
pub mod geo_provider;
pub mod hostname_resolver;
pub mod threat_feed;

pub use firewall_controller::FirewallController;
pub use geo_provider::GeoProvider;
pub use hostname_resolver::HostnameResolver;
pub use threat_feed::ThreatFeedFetcher;
