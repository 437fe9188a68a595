use std::sync::{
    atomic::{AtomicUsize, Ordering},
    Arc,
};

use crate::server::{
    error::AppError,
    scheduler::{BackgroundService, LifecycleState, ServiceLifecycle},
};

mod lifecycle;

/// Background service double counting how often it was started and stopped.
#[derive(Clone, Default)]
pub(crate) struct RecordingService {
    pub starts: Arc<AtomicUsize>,
    pub stops: Arc<AtomicUsize>,
    pub fail_start: bool,
}

impl RecordingService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail_start: true,
            ..Self::default()
        }
    }

    pub fn start_count(&self) -> usize {
        self.starts.load(Ordering::SeqCst)
    }

    pub fn stop_count(&self) -> usize {
        self.stops.load(Ordering::SeqCst)
    }
}

impl BackgroundService for RecordingService {
    fn name(&self) -> &'static str {
        "Recording service"
    }

    async fn start(&self) -> Result<(), AppError> {
        self.starts.fetch_add(1, Ordering::SeqCst);

        if self.fail_start {
            return Err(AppError::InternalError("scheduler unavailable".to_string()));
        }

        Ok(())
    }

    async fn stop(&self) -> Result<(), AppError> {
        self.stops.fetch_add(1, Ordering::SeqCst);

        Ok(())
    }
}
