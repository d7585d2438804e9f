use apollo_domain::config::ServerConfig;
use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::Router;
use std::net::SocketAddr;
use tokio::sync::broadcast;
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

/// Serve the observer push channel at `/ws/data`.
///
/// Each connected observer gets its own subscription to the broadcast
/// channel; a failed write disconnects that observer only, and a lagging
/// observer skips messages instead of stalling the others.
pub async fn start_push_server(
    config: ServerConfig,
    publisher: broadcast::Sender<String>,
    shutdown: CancellationToken,
) -> anyhow::Result<()> {
    let app = Router::new()
        .route("/ws/data", get(ws_handler))
        .layer(CorsLayer::permissive())
        .with_state(publisher);

    let addr: SocketAddr = format!("{}:{}", config.bind_address, config.port).parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(addr = %addr, "Push channel listening on /ws/data");

    axum::serve(listener, app)
        .with_graceful_shutdown(async move { shutdown.cancelled().await })
        .await?;

    Ok(())
}

async fn ws_handler(
    ws: WebSocketUpgrade,
    State(publisher): State<broadcast::Sender<String>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| observer_loop(socket, publisher.subscribe()))
}

async fn observer_loop(mut socket: WebSocket, mut feed: broadcast::Receiver<String>) {
    info!("Observer connected");

    loop {
        match feed.recv().await {
            Ok(message) => {
                if socket.send(Message::Text(message.into())).await.is_err() {
                    info!("Observer disconnected");
                    break;
                }
            }
            Err(broadcast::error::RecvError::Lagged(skipped)) => {
                warn!(skipped, "Observer lagging, skipping messages");
            }
            Err(broadcast::error::RecvError::Closed) => break,
        }
    }
}
