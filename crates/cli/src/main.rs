//! # Apollo IPS
//!
//! Host-resident intrusion prevention: passive capture, parallel threat
//! detection, automatic time-bounded firewall blocks, and a live observer
//! push channel.

mod bootstrap;
mod di;
mod server;

use apollo_domain::{CliOverrides, DomainError};
use apollo_infrastructure::PacketSniffer;
use apollo_jobs::{BroadcastTickJob, JobRunner, ThreatSyncJob};
use clap::Parser;
use std::sync::Arc;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "apollo-ips")]
#[command(version)]
#[command(about = "Host-resident network IPS with live observer push channel")]
struct Cli {
    /// Path to the YAML configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Capture interface (overrides the config file)
    #[arg(short, long)]
    interface: Option<String>,

    /// Push channel bind address
    #[arg(short, long)]
    bind: Option<String>,

    /// Push channel port
    #[arg(short, long)]
    port: Option<u16>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let overrides = CliOverrides {
        interface: cli.interface,
        bind_address: cli.bind,
        port: cli.port,
        log_level: cli.log_level,
    };

    let config = match bootstrap::load_config(cli.config.as_deref(), overrides) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("apollo-ips: configuration error: {e}");
            std::process::exit(1);
        }
    };
    bootstrap::init_logging(&config);

    info!(
        config_file = cli.config.as_deref().unwrap_or("default"),
        rules = config.signature_rules.len(),
        port_scan_threshold = config.port_scan_threshold,
        scan_time_window = config.scan_time_window,
        "Configuration loaded"
    );

    if let Ok(server_ip) = std::env::var("SERVER_IP") {
        info!(server_ip = %server_ip, "Observational server address set");
    }

    // Resolve the capture interface before anything else: a bad interface
    // is a startup error, not a runtime one.
    let sniffer = match PacketSniffer::open(config.capture.interface.as_deref()) {
        Ok(sniffer) => sniffer,
        Err(e) => {
            error!(error = %e, "Cannot open capture interface");
            std::process::exit(1);
        }
    };
    info!(interface = sniffer.interface_name(), "Capture interface selected");

    let services = match di::build_services(&config) {
        Ok(services) => services,
        Err(e) => {
            error!(error = %e, "Engine construction failed");
            std::process::exit(1);
        }
    };
    let di::AppServices {
        engine,
        publisher,
        shutdown,
    } = services;

    JobRunner::new()
        .with_threat_sync(
            ThreatSyncJob::new(Arc::clone(engine.threat_intel()))
                .with_interval(config.threat_sync.refresh_interval_secs)
                .with_cancellation(shutdown.child_token()),
        )
        .with_broadcast(
            BroadcastTickJob::new(Arc::clone(&engine), publisher.clone())
                .with_cancellation(shutdown.child_token()),
        )
        .start()
        .await;

    // The capture loop blocks, so it lives on its own OS thread; a fatal
    // capture fault is reported back through the oneshot.
    let (capture_fault_tx, capture_fault_rx) = tokio::sync::oneshot::channel::<DomainError>();
    let capture_engine = Arc::clone(&engine);
    let capture_thread = std::thread::Builder::new()
        .name("apollo-capture".to_string())
        .spawn(move || {
            if let Err(e) = sniffer.run(capture_engine) {
                let _ = capture_fault_tx.send(e);
            }
        });
    if let Err(e) = capture_thread {
        error!(error = %e, "Cannot spawn capture thread");
        std::process::exit(1);
    }

    let server = tokio::spawn(server::start_push_server(
        config.server.clone(),
        publisher.clone(),
        shutdown.child_token(),
    ));

    tokio::select! {
        _ = tokio::signal::ctrl_c() => {
            info!("Shutdown requested");
        }
        fault = capture_fault_rx => {
            if let Ok(e) = fault {
                match &e {
                    DomainError::CapturePermission(_) => {
                        error!(error = %e, "Permission denied; run as root/Administrator")
                    }
                    _ => error!(error = %e, "Capture failed"),
                }
                shutdown.cancel();
                engine.shutdown();
                std::process::exit(1);
            }
        }
        result = server => {
            if let Ok(Err(e)) = result {
                error!(error = %e, "Push channel server failed");
            }
        }
    }

    shutdown.cancel();
    // Pending unblock timers are cancelled; installed rules stay in place
    // so an exiting process does not open ports.
    engine.shutdown();
    info!("Apollo IPS stopped");
}
