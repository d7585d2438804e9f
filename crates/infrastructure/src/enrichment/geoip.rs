use apollo_application::ports::GeoProvider;
use apollo_domain::DomainError;
use async_trait::async_trait;
use maxminddb::geoip2;
use std::net::IpAddr;
use std::path::Path;
use tracing::{info, warn};

/// Country lookup over a GeoLite2-Country MMDB file.
///
/// The database is optional: an absent or unreadable file degrades to a
/// provider that answers `None` for every address rather than failing
/// startup.
pub struct MaxmindGeoProvider {
    reader: Option<maxminddb::Reader<Vec<u8>>>,
}

impl MaxmindGeoProvider {
    pub fn open(path: Option<&Path>) -> Self {
        let reader = path.and_then(|p| match maxminddb::Reader::open_readfile(p) {
            Ok(reader) => {
                info!(path = %p.display(), "GeoIP database loaded");
                Some(reader)
            }
            Err(e) => {
                warn!(path = %p.display(), error = %e, "GeoIP database unavailable; country lookups disabled");
                None
            }
        });
        Self { reader }
    }

    pub fn disabled() -> Self {
        Self { reader: None }
    }
}

#[async_trait]
impl GeoProvider for MaxmindGeoProvider {
    async fn country_code(&self, ip: IpAddr) -> Result<Option<String>, DomainError> {
        let Some(reader) = &self.reader else {
            return Ok(None);
        };
        match reader.lookup::<geoip2::Country>(ip) {
            Ok(country) => Ok(country
                .country
                .and_then(|c| c.iso_code)
                .map(str::to_string)),
            Err(maxminddb::MaxMindDBError::AddressNotFoundError(_)) => Ok(None),
            Err(e) => Err(DomainError::EnrichmentLookup(e.to_string())),
        }
    }
}
