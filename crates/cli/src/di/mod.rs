use apollo_application::Engine;
use apollo_domain::Config;
use apollo_infrastructure::{
    platform_firewall, HttpThreatFeed, MaxmindGeoProvider, PtrHostnameResolver,
};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;

/// Observer channel depth. A lagging observer skips messages rather than
/// back-pressuring the broadcast loop.
const PUSH_CHANNEL_CAPACITY: usize = 1024;

/// The wired application: engine plus the observer publisher and the
/// process-wide shutdown token.
pub struct AppServices {
    pub engine: Arc<Engine>,
    pub publisher: broadcast::Sender<String>,
    pub shutdown: CancellationToken,
}

pub fn build_services(config: &Config) -> anyhow::Result<AppServices> {
    let firewall = platform_firewall();
    let geo = Arc::new(MaxmindGeoProvider::open(
        config.enrichment.geoip_database.as_deref(),
    ));
    let rdns = Arc::new(PtrHostnameResolver::from_system());
    let feed = Arc::new(HttpThreatFeed::new()?);

    let engine = Arc::new(Engine::new(
        config,
        firewall,
        geo,
        rdns,
        feed,
        Handle::current(),
    )?);

    let (publisher, _) = broadcast::channel(PUSH_CHANNEL_CAPACITY);

    Ok(AppServices {
        engine,
        publisher,
        shutdown: CancellationToken::new(),
    })
}
