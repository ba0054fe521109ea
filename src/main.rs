use anyhow::Result;
use clap::Parser;
use dictation_core::gateway::PersistenceGateway;
use dictation_core::{Config, HttpGateway};
use tracing::{info, warn};

/// Probe the persistence/transcription service and report what it offers.
///
/// The dictation engine itself is a library embedded in a host UI; this
/// binary only exercises the gateway side.
#[derive(Parser)]
struct Args {
    /// Config file to load (without extension)
    #[arg(long, default_value = "config/dictation")]
    config: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let cfg = match Config::load(&args.config) {
        Ok(cfg) => cfg,
        Err(e) => {
            warn!("No config at {} ({}); using defaults", args.config, e);
            Config::default()
        }
    };

    info!("dictation-core v0.1.0");
    info!("Gateway: {}", cfg.gateway.base_url);
    info!(
        "Capture profile: {} Hz, {} channel(s), {}ms fragments",
        cfg.capture.sample_rate, cfg.capture.channels, cfg.capture.fragment_interval_ms
    );

    let gateway = HttpGateway::new(cfg.gateway.base_url.clone());

    match gateway.health().await {
        Ok(health) => {
            if health.transcription_backend_configured {
                info!("Transcription backend configured; batch mode fully functional");
            } else {
                warn!("Transcription backend NOT configured; batch uploads will fail");
            }
        }
        Err(e) => {
            warn!("Cannot connect to server at {}: {}", cfg.gateway.base_url, e);
            return Ok(());
        }
    }

    match gateway.fetch_history().await {
        Ok(history) => {
            info!("{} saved transcripts on record", history.len());
            for item in history.iter().take(5) {
                info!(
                    "  [{}] {}",
                    item.method.as_deref().unwrap_or("webkit"),
                    item.text
                );
            }
        }
        Err(e) => warn!("Error fetching saved transcripts: {}", e),
    }

    Ok(())
}
