//! Background services running alongside request handling.
//!
//! A background service exposes `start` and `stop`. [`ServiceLifecycle`] wraps one service
//! and guarantees each of those reaches the service at most once per process, however many
//! times bootstrap or signal handling ask for it.

pub mod document_reminders;

use std::future::Future;

use tokio::sync::Mutex;

use crate::server::error::AppError;

/// A long-running job with an explicit start and stop.
pub trait BackgroundService: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Begins running the job.
    fn start(&self) -> impl Future<Output = Result<(), AppError>> + Send;

    /// Releases everything the job holds (timers, in-flight work).
    fn stop(&self) -> impl Future<Output = Result<(), AppError>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleState {
    Idle,
    Running,
    Stopped,
}

/// Start-once, stop-once guard around a background service.
///
/// Shared behind an `Arc` between bootstrap and shutdown handling. The state lock is held
/// across the service call, so concurrent `stop` requests cannot both reach the service.
pub struct ServiceLifecycle<S> {
    service: S,
    state: Mutex<LifecycleState>,
}

impl<S: BackgroundService> ServiceLifecycle<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            state: Mutex::new(LifecycleState::Idle),
        }
    }

    /// Starts the service if it has never been started.
    ///
    /// A failed start leaves the lifecycle `Idle`. Calls made while `Running` or after
    /// `Stopped` are ignored.
    ///
    /// # Returns
    /// - `Ok(())` - Service running, or the call was ignored
    /// - `Err(AppError)` - The service's own start failed
    pub async fn start(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;

        match *state {
            LifecycleState::Idle => {
                self.service.start().await?;
                *state = LifecycleState::Running;
                tracing::info!("{} started", self.service.name());
            }
            LifecycleState::Running => {
                tracing::warn!("{} already running, ignoring start", self.service.name());
            }
            LifecycleState::Stopped => {
                tracing::warn!("{} already stopped, ignoring start", self.service.name());
            }
        }

        Ok(())
    }

    /// Stops the service if it is running.
    ///
    /// The lifecycle is `Stopped` afterwards even if the service reports an error; a stop is
    /// never retried. Stopping a service that never started only records the state.
    ///
    /// # Returns
    /// - `Ok(())` - Service stopped, or there was nothing to stop
    /// - `Err(AppError)` - The service's own stop failed
    pub async fn stop(&self) -> Result<(), AppError> {
        let mut state = self.state.lock().await;

        match *state {
            LifecycleState::Running => {
                *state = LifecycleState::Stopped;
                self.service.stop().await?;
                tracing::info!("{} stopped", self.service.name());
            }
            LifecycleState::Idle => {
                *state = LifecycleState::Stopped;
                tracing::debug!("{} was never started", self.service.name());
            }
            LifecycleState::Stopped => {
                tracing::debug!("{} already stopped", self.service.name());
            }
        }

        Ok(())
    }

    pub async fn state(&self) -> LifecycleState {
        *self.state.lock().await
    }

    /// The wrapped service.
    pub fn service(&self) -> &S {
        &self.service
    }
}

#[cfg(test)]
pub(crate) mod test;
