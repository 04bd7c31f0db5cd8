//! mevtax server
//!
//! Backend for the MEV tax dashboard: tails capture events (or
//! fabricates demo data), keeps the in-memory capture and tax channel
//! ledgers, and exposes them over REST and a WebSocket event stream.

mod api;
mod broadcast;
mod config;
mod server;
mod shutdown;
mod state;
mod views;

use broadcast::BroadcastSink;
use clap::Parser;
use config::{ConfigLoader, FeedMode, demo_feed_config};
use mevtax_core::events::{EventSink, capture_event_channel};
use mevtax_core::ledger::{CaptureLedger, ChannelLedger};
use mevtax_core::processors::{CaptureIndexer, DemoCaptureFeed};
use mevtax_core::settlement::MockSettlementBackend;
use server::{build_router, run_server};
use state::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::{broadcast as tokio_broadcast, watch};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Buffer size for the WebSocket fan-out channel.
const EVENT_FANOUT_BUFFER: usize = 256;

/// mevtax - MEV tax ledger and settlement backend
#[derive(Parser, Debug)]
#[command(name = "mevtax-server")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./mevtax.toml")]
    config: PathBuf,

    /// Override the listen address (e.g., 0.0.0.0:3001)
    #[arg(short, long)]
    listen: Option<SocketAddr>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    init_tracing();

    // Parse command line arguments
    let args = Args::parse();

    tracing::info!("Starting mevtax-server v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let config_loader = ConfigLoader::new(&args.config, args.listen);
    let config = config_loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    let listen_addr = config.server.listen;

    // WebSocket fan-out channel; ledger events are published here
    let (events_tx, _) = tokio_broadcast::channel(EVENT_FANOUT_BUFFER);
    let sink: Arc<dyn EventSink> = Arc::new(BroadcastSink::new(events_tx.clone()));

    // Instantiate the ledgers once; everything else holds shared handles
    let mut capture_ledger = CaptureLedger::new();
    capture_ledger.set_sink(sink.clone());
    let mut channel_ledger = ChannelLedger::new(Arc::new(MockSettlementBackend));
    channel_ledger.set_sink(sink);

    let state = AppState::new(capture_ledger, channel_ledger, events_tx);

    // Capture pipeline: source -> channel -> indexer -> ledger
    let (shutdown_tx, shutdown_rx) = watch::channel(false);
    let (capture_tx, capture_rx) = capture_event_channel();

    let indexer = CaptureIndexer::new(state.captures.clone(), capture_rx, shutdown_rx.clone());
    let indexer_handle = tokio::spawn(indexer.run());

    let feed_handle = match config.feed.mode {
        FeedMode::Demo => {
            let feed = DemoCaptureFeed::new(
                demo_feed_config(&config.feed),
                capture_tx,
                shutdown_rx.clone(),
            );
            Some(tokio::spawn(feed.run()))
        }
        FeedMode::Off => {
            tracing::info!("capture feed disabled, waiting for an external source");
            drop(capture_tx);
            None
        }
    };

    // Build the router
    let router = build_router(state);

    // Run the server
    tracing::info!("Starting HTTP server on {}", listen_addr);
    tracing::info!("WebSocket event stream at ws://{}/ws", listen_addr);
    let result = run_server(router, listen_addr).await;

    // Stop the background processors
    let _ = shutdown_tx.send(true);
    let _ = indexer_handle.await;
    if let Some(handle) = feed_handle {
        let _ = handle.await;
    }
    tracing::info!("Server shutdown complete");

    result.map_err(Into::into)
}

/// Initialize the tracing subscriber with environment-based filtering.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,tower_http=debug"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}
