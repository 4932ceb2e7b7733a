//! arsync main entry point
//!
//! Replays a tracking session script against the headless renderer:
//! `arsync [config.ron]`.

use std::process::ExitCode;

use arsync_frontend::{App, AppConfig, AppError, ConfigManager, ScriptedTracker, SessionScript};

fn main() -> ExitCode {
    use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "arsync_frontend=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting arsync");

    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

fn load_config() -> Result<AppConfig, AppError> {
    let manager = match std::env::args().nth(1) {
        Some(path) => ConfigManager::open(path)?,
        None => ConfigManager::new(),
    };
    Ok(manager.into_config())
}

fn run() -> Result<(), AppError> {
    let config = load_config()?;
    let Some(session_path) = config.session_path.clone() else {
        tracing::warn!(
            "No session script configured; set `session_path` in {:?}",
            ConfigManager::default_config_path()
        );
        return Ok(());
    };

    let script = SessionScript::load(&session_path)?;
    let mut app = App::new(ScriptedTracker::new(script), config);

    match app.run_headless() {
        Ok(summary) => {
            tracing::info!(
                "Replayed {} events, drew {} frames, final phase {:?}",
                summary.events,
                summary.frames,
                summary.final_state.phase
            );
            Ok(())
        }
        Err(e) => {
            let screens = app.screens();
            if screens.error_visible {
                tracing::error!("{}: {}", screens.error_title, screens.error_message);
            }
            Err(e)
        }
    }
}
