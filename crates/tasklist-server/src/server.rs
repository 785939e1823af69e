//! Serve loop and shutdown handling.

use std::future::Future;
use std::net::SocketAddr;

use tasklist_config::TasklistConfig;
use tasklist_db::error::DatabaseError;
use tasklist_db::service::TaskService;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::signal;

use crate::routes::router;
use crate::state::AppState;

#[derive(Debug, Error)]
pub enum ServerError {
    #[error("failed to open task database: {0}")]
    Database(#[from] DatabaseError),

    #[error("failed to bind {addr}: {source}")]
    Bind {
        addr: String,
        source: std::io::Error,
    },

    #[error("server error: {0}")]
    Io(#[from] std::io::Error),
}

/// Serve the router on an already-bound listener until `shutdown` resolves.
///
/// # Errors
///
/// Returns `ServerError::Io` if the accept loop fails.
pub async fn serve<F>(listener: TcpListener, state: AppState, shutdown: F) -> Result<(), ServerError>
where
    F: Future<Output = ()> + Send + 'static,
{
    match listener.local_addr() {
        Ok(address) => tracing::info!("Listening on {address}"),
        Err(error) => tracing::warn!(%error, "Could not determine local address"),
    }

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    tracing::info!("Server shutdown complete");
    Ok(())
}

/// Open the configured database, bind the configured address and serve
/// until Ctrl+C or SIGTERM.
///
/// # Errors
///
/// Returns `ServerError` if the database cannot be opened, the address
/// cannot be bound, or serving fails.
pub async fn run(config: &TasklistConfig) -> Result<(), ServerError> {
    let service = TaskService::new_local(&config.database.path).await?;
    let addr = config.server.bind_addr();
    let listener = TcpListener::bind(&addr)
        .await
        .map_err(|source| ServerError::Bind {
            addr: addr.clone(),
            source,
        })?;
    serve(listener, AppState::new(service), shutdown_signal()).await
}

/// Resolves on Ctrl+C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(error) = signal::ctrl_c().await {
            tracing::warn!(%error, "Failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(error) => {
                tracing::warn!(%error, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received Ctrl+C, initiating graceful shutdown"),
        () = terminate => tracing::info!("Received SIGTERM, initiating graceful shutdown"),
    }
}

/// Bind an ephemeral local port, for tests and embedded use.
///
/// # Errors
///
/// Returns `ServerError::Bind` if no port is available.
pub async fn bind_ephemeral() -> Result<(TcpListener, SocketAddr), ServerError> {
    let listener = TcpListener::bind("127.0.0.1:0")
        .await
        .map_err(|source| ServerError::Bind {
            addr: "127.0.0.1:0".to_string(),
            source,
        })?;
    let addr = listener.local_addr()?;
    Ok((listener, addr))
}
