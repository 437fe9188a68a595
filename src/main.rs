use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use doctrack::server::{
    config::Config,
    error::startup::StartupError,
    router::HandlerGroups,
    scheduler::document_reminders::{DocumentReminderService, StoreHeartbeat},
    shutdown::{listen_for_os_signals, shutdown_channel},
    startup::{Bootstrap, SeaOrmConnector},
};

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();

    if let Err(e) = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init()
    {
        tracing::warn!("tracing init failed: {}", e);
    }

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("Startup failed: {}", err);
            ExitCode::from(err.exit_code())
        }
    }
}

async fn run() -> Result<(), StartupError> {
    let config = Config::from_env()?;

    let (trigger, shutdown) = shutdown_channel();
    listen_for_os_signals(trigger).map_err(StartupError::Signal)?;

    let schedule = config.reminder_schedule.clone();
    let connector = SeaOrmConnector::new(config.clone());

    tracing::info!("Starting server");

    Bootstrap::new(config, connector, HandlerGroups::new(), move |db| {
        DocumentReminderService::new(schedule, StoreHeartbeat::new(db.clone()))
    })
    .run(shutdown)
    .await
}
