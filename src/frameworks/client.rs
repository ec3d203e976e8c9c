// Framework bootstrap for the game client runtime.

use crate::domain::ControlTuning;
use crate::frameworks::config;
use crate::interface_adapters::channel;
use crate::interface_adapters::clients::auth::{AuthClient, LoginError};
use crate::interface_adapters::protocol::JoinPayload;
use crate::interface_adapters::state::ClientState;
use crate::interface_adapters::term;
use crate::interface_adapters::utils::ids;
use crate::use_cases::{ConnectionStatus, InputController};

use std::io::Result;
use tokio::sync::{broadcast, mpsc, watch};

fn init_runtime() {
    let _ = dotenvy::dotenv();

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let json = matches!(std::env::var("LOG_FORMAT").as_deref(), Ok("json"));
    if json {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .json()
            .with_current_span(true)
            .init();
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_target(false)
            .compact()
            .init();
    }

    std::panic::set_hook(Box::new(|info| {
        let backtrace = std::backtrace::Backtrace::capture();
        tracing::error!(%info, ?backtrace, "panic");
    }));
}

async fn login() -> Result<JoinPayload> {
    let base_url = config::auth_service_url();
    let auth_client = AuthClient::new(base_url.clone(), config::auth_login_timeout())
        .map_err(|e| std::io::Error::other(format!("failed to initialize auth client: {e}")))?;

    let guest_id = ids::guest_id().to_string();
    let display_name = config::display_name();
    tracing::debug!(
        auth_base_url = %base_url,
        guest_id = %guest_id,
        "requesting guest session"
    );

    let session = auth_client
        .guest_login(&guest_id, &display_name)
        .await
        .map_err(|e| match e {
            LoginError::Rejected { message } => {
                std::io::Error::other(format!("login rejected: {message}"))
            }
            LoginError::UpstreamUnavailable => std::io::Error::other("auth service unavailable"),
        })?;

    Ok(JoinPayload {
        guest_id,
        display_name,
        session_token: session.token,
    })
}

pub async fn run() -> Result<()> {
    let join = login().await?;

    // Channel wiring between the driver, the channel task and UIs.
    let (event_tx, event_rx) = mpsc::channel(config::EVENT_CHANNEL_CAPACITY);
    let (frame_tx, _frame_rx) = broadcast::channel(config::FRAME_BROADCAST_CAPACITY);
    let (status_tx, status_rx) = watch::channel(ConnectionStatus::Connecting);

    let url = config::game_server_ws_url();
    tracing::info!(%url, "connecting");
    let session = channel::connect_and_join(&url, join, &status_tx)
        .await
        .map_err(|e| std::io::Error::other(format!("join failed: {e:?}")))?;

    let channel_handle = tokio::spawn(channel::channel_task(
        session,
        event_rx,
        status_tx,
        frame_tx.clone(),
    ));

    // The state moves into the driver whole, so the last event sender drops
    // with it and the channel task sees an orderly shutdown.
    let state = ClientState {
        event_tx,
        status_rx,
        frame_tx,
    };
    let tuning = ControlTuning::default();
    let controller = InputController::new(tuning.shoot_zone());

    // The driver owns the terminal; run it off the async runtime.
    let driver = tokio::task::spawn_blocking(move || {
        term::run_terminal_driver(controller, tuning, state)
    });
    driver.await.map_err(std::io::Error::other)??;

    if let Err(e) = channel_handle.await {
        tracing::error!(error = %e, "channel task panicked");
    }
    Ok(())
}

pub async fn run_with_config() -> Result<()> {
    init_runtime();
    run().await
}
