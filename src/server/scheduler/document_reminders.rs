use std::{future::Future, sync::Arc};

use sea_orm::DatabaseConnection;
use tokio::sync::Mutex;
use tokio_cron_scheduler::{Job, JobScheduler};

use crate::server::{error::AppError, scheduler::BackgroundService};

/// Work executed on every tick of the reminder schedule.
pub trait ScheduledTask: Send + Sync + 'static {
    fn run(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}

/// Cron-driven document reminder service.
///
/// Owns a `JobScheduler` with a single async job that invokes the task on each tick. A
/// failing tick is logged and the schedule keeps running.
pub struct DocumentReminderService<T> {
    schedule: String,
    task: Arc<T>,
    scheduler: Mutex<Option<JobScheduler>>,
}

impl<T: ScheduledTask> DocumentReminderService<T> {
    /// Creates the service without scheduling anything yet.
    ///
    /// # Arguments
    /// - `schedule` - Six-field cron expression (seconds first)
    /// - `task` - Work run on every tick
    ///
    /// # Returns
    /// - `DocumentReminderService` - Service ready to be started
    pub fn new(schedule: impl Into<String>, task: T) -> Self {
        Self {
            schedule: schedule.into(),
            task: Arc::new(task),
            scheduler: Mutex::new(None),
        }
    }

    pub fn schedule(&self) -> &str {
        &self.schedule
    }
}

impl<T: ScheduledTask> BackgroundService for DocumentReminderService<T> {
    fn name(&self) -> &'static str {
        "Document reminder service"
    }

    /// Creates the scheduler, registers the reminder job and starts ticking.
    ///
    /// # Returns
    /// - `Ok(())` - Scheduler running
    /// - `Err(AppError::SchedulerErr)` - Invalid cron expression or scheduler failure
    async fn start(&self) -> Result<(), AppError> {
        let scheduler = JobScheduler::new().await?;

        let job_task = self.task.clone();
        let job = Job::new_async(self.schedule.as_str(), move |_uuid, _lock| {
            let task = job_task.clone();

            Box::pin(async move {
                if let Err(e) = task.run().await {
                    tracing::error!("Error processing document reminders: {}", e);
                }
            })
        })?;

        scheduler.add(job).await?;
        scheduler.start().await?;

        *self.scheduler.lock().await = Some(scheduler);

        tracing::info!("Document reminder scheduler started ({})", self.schedule);

        Ok(())
    }

    async fn stop(&self) -> Result<(), AppError> {
        let scheduler = self.scheduler.lock().await.take();

        if let Some(mut scheduler) = scheduler {
            scheduler.shutdown().await?;
            tracing::info!("Document reminder scheduler shut down");
        }

        Ok(())
    }
}

/// Reminder task that checks the store is reachable on every tick.
///
/// Plugged into the reminder service by default; reminder delivery itself is provided by
/// the document handler group's owners.
pub struct StoreHeartbeat {
    db: DatabaseConnection,
}

impl StoreHeartbeat {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

impl ScheduledTask for StoreHeartbeat {
    async fn run(&self) -> Result<(), AppError> {
        self.db.ping().await?;
        tracing::debug!("Document reminder tick: store reachable");

        Ok(())
    }
}
