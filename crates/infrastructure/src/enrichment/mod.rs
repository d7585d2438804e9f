pub mod geoip;
pub mod rdns;

pub use geoip::MaxmindGeoProvider;
pub use rdns::PtrHostnameResolver;
