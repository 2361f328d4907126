//! termhome gateway binary. Reads `config.toml` (or `TERMHOME_CONFIG`), then
//! serves the terminal page and `/api/command` on `server.host:server.port`.

use std::net::SocketAddr;
use std::sync::Arc;

use termhome_core::HomeConfig;
use termhome_gateway::{build_app, AppState};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(e) = dotenvy::dotenv() {
        eprintln!("[termhome-gateway] .env not loaded: {} (using system environment)", e);
    }

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config_path = HomeConfig::default_path();
    let cfg = match HomeConfig::load_from_path(&config_path) {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!(
                "[termhome-gateway] cannot load {}: {}. Check that the config file exists.",
                config_path.display(),
                e
            );
            std::process::exit(1);
        }
    };
    if cfg.commands.is_empty() {
        tracing::warn!("no [commands] configured; every command will be rejected");
    }

    let state = Arc::new(AppState::from_config(&cfg));
    tracing::info!(
        commands = state.table.len(),
        config = %config_path.display(),
        "command table loaded"
    );

    let app = build_app(state, &cfg.server.static_dir);
    let addr = cfg.server.bind_addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("termhome gateway listening on http://{}", addr);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
