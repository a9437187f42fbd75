//! `todolist-server` entry point.

use anyhow::{Context, Result};
use clap::Parser;
use log::{error, info};
use todolist_core::init_logging;
use todolist_server::{serve, AppState, ServerConfig};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<()> {
    let config = ServerConfig::parse();

    let log_dir = config
        .resolved_log_dir()
        .context("failed to resolve log directory")?;
    init_logging("server", config.log_level(), &log_dir.to_string_lossy())
        .map_err(anyhow::Error::msg)?;

    let state = AppState::open(&config.database)
        .with_context(|| format!("failed to open store `{}`", config.database))?;
    info!(
        "event=store_connected module=server status=ok database={}",
        config.database
    );

    let listener = TcpListener::bind(config.bind)
        .await
        .with_context(|| format!("failed to bind {}", config.bind))?;

    serve(listener, state, shutdown_signal()).await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!("event=signal_install module=server status=error signal=ctrl_c error={err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(err) => {
                error!("event=signal_install module=server status=error signal=sigterm error={err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => info!("event=shutdown module=server status=start signal=ctrl_c"),
        () = terminate => info!("event=shutdown module=server status=start signal=sigterm"),
    }
}
