mod api;
mod middleware;

use std::sync::Arc;

use collabdesk_core::{ConfigError, SeedData};
use collabdesk_store::{Store, StoreConfig};
use tracing_subscriber::EnvFilter;

use crate::api::{build_app, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = collabdesk_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let seed = match collabdesk_core::load_seed(&config.seed_path) {
        Ok(seed) => seed,
        Err(ConfigError::SeedFileIo { path, source })
            if source.kind() == std::io::ErrorKind::NotFound =>
        {
            tracing::warn!(path = %path, "seed file not found; starting with an empty store");
            SeedData::default()
        }
        Err(e) => return Err(e.into()),
    };

    let store_config = StoreConfig::from_app_config(&config);
    let store = Arc::new(Store::seeded(store_config, seed).await);

    tracing::info!(
        env = %config.env,
        bind_addr = %config.bind_addr,
        latency_ms = config.store_latency_ms,
        enforce_campaign_refs = config.enforce_campaign_refs,
        "starting collabdesk-server"
    );

    let app = build_app(AppState { store });
    let listener = tokio::net::TcpListener::bind(config.bind_addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("received shutdown signal, starting graceful shutdown");
}
