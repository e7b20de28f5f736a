mod app;
mod config;
mod handlers;
mod queue;
mod relay;
mod state;
mod storage;

use anyhow::Result;
use clap::{Parser, Subcommand};
use listenfd::ListenFd;
use tokio::{net::TcpListener, signal};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::{app::create_app, config::Config, state::AppState};

/// Book Club - Sign up for a genre book club
#[derive(Parser, Debug)]
#[command(name = "bookclub")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Host address to bind the server to
    #[arg(long, short = 'H', default_value = "0.0.0.0", env = "HOST", global = true)]
    host: String,

    /// Port to listen on
    #[arg(long, short, default_value = "3000", env = "PORT", global = true)]
    port: u16,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
enum Command {
    /// Serve the signup API only
    Api,
    /// Run the queue trigger only
    Processor {
        /// Process the messages currently queued, then exit
        #[arg(long)]
        once: bool,
    },
    /// Serve the API and run the queue trigger in one process (default)
    Standalone,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bookclub=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let state = AppState::new(&config).await?;
    let command = cli.command.unwrap_or(Command::Standalone);

    tracing::info!(
        ?command,
        storage = state.storage_backend,
        queue = state.queue_backend,
        queue_name = %config.queue_name,
        table_name = %config.table_name,
        "Starting bookclub"
    );

    if state.queue_backend == "memory" && command != Command::Standalone {
        tracing::warn!(
            "The memory queue is not shared between processes; only `standalone` relays signups"
        );
    }

    match command {
        Command::Api => serve(&cli, state).await,
        Command::Processor { once: true } => {
            let outcomes = state.queue_trigger(&config).drain().await?;
            let failed: Vec<String> = outcomes
                .iter()
                .filter(|o| o.result.is_err())
                .map(|o| o.message_id.to_string())
                .collect();
            tracing::info!(
                processed = outcomes.len(),
                failed = failed.len(),
                "Drained signup queue"
            );
            if !failed.is_empty() {
                tracing::warn!(message_ids = ?failed, "Some signups were not stored");
            }
            Ok(())
        }
        Command::Processor { once: false } => {
            let trigger = state.queue_trigger(&config);
            let shutdown_rx = state.subscribe_shutdown();
            let signal_state = state.clone();
            tokio::spawn(async move { shutdown_signal(signal_state).await });

            trigger.run(shutdown_rx).await?;
            tracing::info!("Processor stopped");
            Ok(())
        }
        Command::Standalone => {
            let trigger = state.queue_trigger(&config);
            let shutdown_rx = state.subscribe_shutdown();
            let processor = tokio::spawn(trigger.run(shutdown_rx));

            serve(&cli, state).await?;

            processor.await??;
            Ok(())
        }
    }
}

/// Serve the HTTP API until a shutdown signal arrives.
async fn serve(cli: &Cli, state: AppState) -> Result<()> {
    let app = create_app(state.clone());

    // Auto-reload support via listenfd
    let mut listenfd = ListenFd::from_env();
    let listener = match listenfd.take_tcp_listener(0)? {
        // If we are given a tcp listener on listen fd 0, use that one
        Some(listener) => {
            listener.set_nonblocking(true)?;
            TcpListener::from_std(listener)?
        }
        // Otherwise fall back to CLI-specified host:port
        None => {
            let addr = format!("{}:{}", cli.host, cli.port);
            TcpListener::bind(&addr).await?
        }
    };

    tracing::info!("listening on {}", listener.local_addr()?);

    // Run the server with graceful shutdown
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(state))
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// Wait for shutdown signals (Ctrl+C or SIGTERM) and notify background tasks.
async fn shutdown_signal(state: AppState) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            tracing::info!("Received SIGTERM, shutting down...");
        }
    }

    // Stop the queue trigger
    state.signal_shutdown();
}
