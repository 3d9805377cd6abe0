use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use axum::extract::State;
use axum::http::{Method, StatusCode, Uri};
use axum::routing::{get, post};
use tokio::net::TcpListener;
use tracing::info;

use crate::config::ServiceConfig;
use crate::dispatcher::{Dispatcher, ProcessLauncher};
use crate::error::ControlError;
use crate::status_relay::StatusRelay;
use crate::types::{Envelope, StartConfig};

pub const START_ROUTE: &str = "/start_pco_writer";
pub const STATUS_ROUTE: &str = "/status";

/// Shared by every request and never mutated after startup.
#[derive(Clone)]
pub struct AppState {
    dispatcher: Dispatcher,
    relay: StatusRelay,
}

impl AppState {
    pub const fn new(dispatcher: Dispatcher, relay: StatusRelay) -> Self {
        Self { dispatcher, relay }
    }

    /// Build the production state: a process launcher for the configured
    /// writer binary and a relay for the configured status endpoint.
    ///
    /// # Errors
    /// Returns an error if the status HTTP client cannot be built
    pub fn from_config(config: &ServiceConfig) -> Result<Self> {
        let dispatcher = Dispatcher::new(&config.writer_binary, Arc::new(ProcessLauncher));
        let relay = StatusRelay::new(&config.status_url, config.status_timeout())
            .context("failed to build writer status client")?;
        info!(
            target: "writer_control::server",
            writer_binary = %dispatcher.writer_binary().display(),
            status_url = relay.status_url(),
            "Writer control configured"
        );
        Ok(Self::new(dispatcher, relay))
    }
}

/// Routes of the control surface.
///
/// Unsupported methods on a known route are answered with
/// `405 Method Not Allowed` and a failure envelope.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route(START_ROUTE, post(start_writer))
        .route(STATUS_ROUTE, get(writer_status))
        .method_not_allowed_fallback(method_not_allowed)
        .fallback(not_found)
        .with_state(state)
}

async fn start_writer(
    State(state): State<AppState>,
    config: StartConfig,
) -> Result<Envelope, ControlError> {
    state.dispatcher.dispatch(&config)
}

async fn writer_status(State(state): State<AppState>) -> Envelope {
    state.relay.get_status().await
}

async fn method_not_allowed(method: Method, uri: Uri) -> (StatusCode, Envelope) {
    (
        StatusCode::METHOD_NOT_ALLOWED,
        Envelope::failure(format!("{method} is not allowed on {}", uri.path())),
    )
}

async fn not_found(uri: Uri) -> (StatusCode, Envelope) {
    (
        StatusCode::NOT_FOUND,
        Envelope::failure(format!("{} not found", uri.path())),
    )
}

/// `StartServer` Function
///
/// Serve `app` on `addr` until ctrl-c or SIGTERM, then drain open
/// connections and return.
///
/// # Arguments
/// * `app` - The router built by [`router`]
/// * `addr` - The address to bind, `0.0.0.0:9901` by default
///
/// # Returns
/// * `Result<()>` - Ok once the server has shut down gracefully
///
/// # Errors
/// * This function will return an error if the address cannot be bound
/// * This function will return an error if the server fails while serving
pub async fn start_server(app: Router, addr: SocketAddr) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    info!(target: "writer_control::server", %addr, "Writer control listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!(target: "writer_control::server", "Writer control stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!(target: "writer_control::server", %err, "Failed to listen for ctrl-c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!(target: "writer_control::server", %err, "Failed to listen for SIGTERM");
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
    info!(target: "writer_control::server", "Shutdown signal received");
}
