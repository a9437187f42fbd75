//! HTTP API service for the todo collection.
//!
//! Four routes over `/todos`, each a single store call; see [`routes::router`].

pub mod config;
pub mod error;
pub mod routes;
pub mod state;

pub use config::ServerConfig;
pub use error::{ApiError, MessageBody};
pub use routes::router;
pub use state::AppState;

use log::info;
use std::future::Future;
use tokio::net::TcpListener;

/// Serves the API on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!("event=server_listen module=server status=ok addr={addr}");

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("event=server_stop module=server status=ok addr={addr}");
    Ok(())
}
