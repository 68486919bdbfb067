//! Transit parking service
//!
//! Reads configuration from TOML (`$PARKING_CONFIG` or
//! `~/.config/transit-parking/config.toml`), then serves the REST API until
//! SIGINT/SIGTERM.

use tracing::{error, info, warn};

use transit_parking::config::{default_config_path, AppConfig};
use transit_parking::server::{init_tracing, ServerHandle, ServerOptions};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // ── Load configuration ─────────────────────────────────────
    let config_path = default_config_path();
    let (app_cfg, load_error) = if config_path.exists() {
        match AppConfig::load(&config_path) {
            Ok(cfg) => (cfg, None),
            Err(e) => (AppConfig::default(), Some(e)),
        }
    } else {
        (AppConfig::default(), None)
    };
    let app_cfg = app_cfg.with_env_overrides();

    init_tracing(&app_cfg.logging);
    match load_error {
        Some(e) => warn!(path = %config_path.display(), error = %e, "Failed to load config, using defaults"),
        None if config_path.exists() => info!(path = %config_path.display(), "Configuration loaded"),
        None => info!(path = %config_path.display(), "No config file, using defaults"),
    }

    // ── Start ──────────────────────────────────────────────────
    let handle = match ServerHandle::start(ServerOptions {
        config: app_cfg,
        ..Default::default()
    })
    .await
    {
        Ok(handle) => handle,
        Err(e) => {
            error!(error = %e, "Failed to start server");
            return Err(e.into());
        }
    };

    handle.install_signal_handler();
    handle.shutdown_signal().wait().await;
    handle.wait().await;
    Ok(())
}
