use apollo_application::Engine;
use apollo_domain::PushMessage;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

/// The broadcast tick loop.
///
/// Every tick (1 s by default) it drains the previous throughput window
/// and all queued alerts from the engine and publishes them, already
/// serialized, to the observer channel. Publication is fire-and-forget:
/// with no observer connected the messages are dropped.
pub struct BroadcastTickJob {
    engine: Arc<Engine>,
    publisher: broadcast::Sender<String>,
    tick: Duration,
    shutdown: CancellationToken,
}

impl BroadcastTickJob {
    pub fn new(engine: Arc<Engine>, publisher: broadcast::Sender<String>) -> Self {
        Self {
            engine,
            publisher,
            tick: Duration::from_secs(1),
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub async fn start(self: Arc<Self>) {
        info!(tick_ms = self.tick.as_millis() as u64, "Starting broadcast tick job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(self.tick);
            interval.tick().await;

            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("BroadcastTickJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        self.publish_pending();
                    }
                }
            }
        });
    }

    fn publish_pending(&self) {
        if let Some((window, bucket)) = self.engine.drain_throughput_window() {
            self.publish(&PushMessage::throughput(window, bucket));
        }
        for alert in self.engine.drain_alerts() {
            self.publish(&PushMessage::alert(alert));
        }
    }

    fn publish(&self, message: &PushMessage) {
        let serialized = match serde_json::to_string(message) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "Failed to serialize push message");
                return;
            }
        };
        // send only fails when no observer is subscribed
        if self.publisher.send(serialized).is_err() {
            debug!("No observers connected, message dropped");
        }
    }
}
