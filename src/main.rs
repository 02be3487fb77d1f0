//! Arena Duel - headless exhibition runner
//!
//! Runs one duel between an autopiloted player and the timed opponent:
//! - Configuration comes from the environment (and `.env`)
//! - Snapshots are traced as they are broadcast
//! - The final match summary is printed as JSON

use tracing::{debug, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use arena_duel::game::OpponentAi;
use arena_duel::util::time::Timer;
use arena_duel::{Config, DuelMatch};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Load configuration
    let config = Config::from_env()?;

    // Initialize tracing
    init_tracing(&config.log_level);

    let settings = config.match_settings();
    info!(
        player = %settings.player,
        opponent = %settings.opponent,
        arena = %settings.arena,
        seed = settings.seed,
        realtime = settings.realtime,
        "Starting Arena Duel exhibition"
    );

    // The player corner gets its own AI so the exhibition plays itself
    let (duel, handle) = DuelMatch::new(&settings);
    let duel = duel.with_autopilot(Box::new(OpponentAi::new(settings.seed.wrapping_add(1))));

    // Trace snapshots as they are broadcast
    let mut snapshots = handle.subscribe();
    tokio::spawn(async move {
        loop {
            match snapshots.recv().await {
                Ok(snapshot) => {
                    for event in &snapshot.events {
                        debug!(tick = snapshot.tick, ?event, "Duel event");
                    }
                }
                Err(tokio::sync::broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "Snapshot observer lagged");
                }
                Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
            }
        }
    });

    let timer = Timer::new();
    let summary = tokio::select! {
        summary = duel.run() => summary,
        _ = shutdown_signal() => {
            info!("Exhibition interrupted");
            return Ok(());
        }
    };

    info!(
        outcome = ?summary.outcome,
        ticks = summary.ticks,
        elapsed_ms = timer.elapsed_ms(),
        "Exhibition complete"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(log_level: &str) {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_target(true))
        .init();
}

/// Graceful shutdown signal handler
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            warn!(error = %err, "Failed to install Ctrl+C handler");
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
                warn!(error = %err, "Failed to install signal handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, stopping exhibition");
        }
        _ = terminate => {
            info!("Received terminate signal, stopping exhibition");
        }
    }
}
