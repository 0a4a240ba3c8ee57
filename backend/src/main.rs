use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use tiffin_tracker::config::AppConfig;
use tiffin_tracker::domain::{LogNotifier, ReminderHandle, ReminderScheduler, SystemClock};
use tiffin_tracker::{create_router, initialize_backend};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::load()?;
    let clock = Arc::new(SystemClock);
    let app_state = initialize_backend(&config, clock.clone()).await?;

    let reminder = if config.reminder.enabled {
        let settings = config.reminder_settings()?;
        info!("Daily reminder at {}", settings.time);
        Some(ReminderScheduler::new(settings, clock, Arc::new(LogNotifier)).start())
    } else {
        info!("Daily reminder disabled");
        None
    };

    let app = create_router(app_state, &config.cors_origin);

    let addr: SocketAddr = config
        .bind_address
        .parse()
        .with_context(|| format!("Invalid bind address {}", config.bind_address))?;
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("Listening on {}", addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(wait_for_shutdown_signal())
        .await?;

    stop_reminder(reminder).await;
    info!("Server stopped");
    Ok(())
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

async fn stop_reminder(reminder: Option<ReminderHandle>) {
    if let Some(handle) = reminder {
        handle.shutdown().await;
    }
}

async fn wait_for_shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};
        match (signal(SignalKind::terminate()), signal(SignalKind::interrupt())) {
            (Ok(mut sigterm), Ok(mut sigint)) => {
                tokio::select! {
                    _ = sigterm.recv() => {}
                    _ = sigint.recv() => {}
                }
            }
            _ => {
                warn!("Could not register signal handlers, falling back to Ctrl+C");
                let _ = tokio::signal::ctrl_c().await;
            }
        }
    }
    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
    info!("Shutdown signal received");
}
