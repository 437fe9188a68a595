use super::*;

/// Tests a started service is stopped exactly once across repeated stops.
///
/// Mirrors a termination signal being delivered several times in one process lifetime.
///
/// Expected: one start, one stop, final state Stopped
#[tokio::test]
async fn stops_running_service_once() -> Result<(), AppError> {
    let service = RecordingService::new();
    let lifecycle = ServiceLifecycle::new(service.clone());

    lifecycle.start().await?;
    assert_eq!(lifecycle.state().await, LifecycleState::Running);

    lifecycle.stop().await?;
    lifecycle.stop().await?;
    lifecycle.stop().await?;

    assert_eq!(service.start_count(), 1);
    assert_eq!(service.stop_count(), 1);
    assert_eq!(lifecycle.state().await, LifecycleState::Stopped);

    Ok(())
}

/// Tests concurrent stop requests reach the service once.
///
/// Expected: one stop call
#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_stops_reach_service_once() -> Result<(), AppError> {
    let service = RecordingService::new();
    let lifecycle = Arc::new(ServiceLifecycle::new(service.clone()));
    lifecycle.start().await?;

    let handles: Vec<_> = (0..8)
        .map(|_| {
            let lifecycle = lifecycle.clone();
            tokio::spawn(async move { lifecycle.stop().await })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap()?;
    }

    assert_eq!(service.stop_count(), 1);

    Ok(())
}

#[tokio::test]
async fn second_start_is_ignored() -> Result<(), AppError> {
    let service = RecordingService::new();
    let lifecycle = ServiceLifecycle::new(service.clone());

    lifecycle.start().await?;
    lifecycle.start().await?;

    assert_eq!(service.start_count(), 1);

    Ok(())
}

/// Tests stopping a service that never started does not call it.
///
/// Expected: no stop call, state Stopped, later start ignored
#[tokio::test]
async fn stop_before_start_skips_service() -> Result<(), AppError> {
    let service = RecordingService::new();
    let lifecycle = ServiceLifecycle::new(service.clone());

    lifecycle.stop().await?;
    assert_eq!(lifecycle.state().await, LifecycleState::Stopped);

    lifecycle.start().await?;

    assert_eq!(service.start_count(), 0);
    assert_eq!(service.stop_count(), 0);

    Ok(())
}

/// Tests a failed start leaves nothing to stop.
///
/// Expected: Err from start, state Idle, stop does not reach the service
#[tokio::test]
async fn failed_start_stays_idle() -> Result<(), AppError> {
    let service = RecordingService::failing();
    let lifecycle = ServiceLifecycle::new(service.clone());

    assert!(lifecycle.start().await.is_err());
    assert_eq!(lifecycle.state().await, LifecycleState::Idle);

    lifecycle.stop().await?;

    assert_eq!(service.stop_count(), 0);

    Ok(())
}
