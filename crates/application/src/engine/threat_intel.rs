use crate::ports::ThreatFeedFetcher;
use apollo_domain::DomainError;
use arc_swap::ArcSwap;
use rustc_hash::FxHashSet;
use std::net::IpAddr;
use std::sync::Arc;
use tracing::{debug, info};

/// Hostile-IP membership set, refreshable from a newline-delimited feed.
///
/// Reads are lock-free: the active set lives behind an `ArcSwap` and every
/// refresh publishes a new snapshot atomically. Refreshes union into the
/// existing set; a failed fetch leaves the current snapshot untouched.
pub struct ThreatIntelStore {
    set: ArcSwap<FxHashSet<IpAddr>>,
    fetcher: Arc<dyn ThreatFeedFetcher>,
    url: Option<String>,
}

impl ThreatIntelStore {
    pub fn new(fetcher: Arc<dyn ThreatFeedFetcher>, url: Option<String>) -> Self {
        Self {
            set: ArcSwap::from_pointee(FxHashSet::default()),
            fetcher,
            url,
        }
    }

    pub fn contains(&self, ip: IpAddr) -> bool {
        self.set.load().contains(&ip)
    }

    pub fn len(&self) -> usize {
        self.set.load().len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.load().is_empty()
    }

    /// Fetch the configured feed and merge it into the active set.
    ///
    /// Returns the number of newly learned addresses. Without a configured
    /// URL this is a no-op.
    pub async fn refresh(&self) -> Result<usize, DomainError> {
        let Some(url) = self.url.as_deref() else {
            debug!("No threat intelligence feed configured");
            return Ok(0);
        };
        let text = self.fetcher.fetch(url).await?;
        let added = self.merge_feed_text(&text);
        info!(added, total = self.len(), "Threat intelligence updated");
        Ok(added)
    }

    /// Parse feed text (one IP per line, `#` comments and blanks ignored)
    /// and publish a new snapshot containing the union.
    pub fn merge_feed_text(&self, text: &str) -> usize {
        let current = self.set.load_full();
        let mut next: FxHashSet<IpAddr> = (*current).clone();
        let mut added = 0usize;
        let mut unparsable = 0usize;

        for line in text.lines() {
            let line = line.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            match line.parse::<IpAddr>() {
                Ok(ip) => {
                    if next.insert(ip) {
                        added += 1;
                    }
                }
                Err(_) => unparsable += 1,
            }
        }

        if unparsable > 0 {
            debug!(unparsable, "Ignored unparsable feed lines");
        }
        self.set.store(Arc::new(next));
        added
    }
}
