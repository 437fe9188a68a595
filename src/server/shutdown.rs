//! Termination signal plumbing.
//!
//! A [`ShutdownTrigger`] may fire any number of times; every [`ShutdownSignal`] cloned from
//! the same channel resolves once it has fired at least once. The channel counts requests so
//! repeated deliveries stay visible in the logs. OS signals are forwarded to
//! the trigger by [`listen_for_os_signals`].

use std::sync::Arc;

use tokio::sync::watch;

/// Creates a connected trigger and signal pair.
pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(0);

    (ShutdownTrigger { tx: Arc::new(tx) }, ShutdownSignal { rx })
}

#[derive(Clone)]
pub struct ShutdownTrigger {
    tx: Arc<watch::Sender<usize>>,
}

impl ShutdownTrigger {
    /// Requests shutdown.
    ///
    /// # Arguments
    /// - `source` - What requested the shutdown, for logs
    ///
    /// # Returns
    /// - `true` - This was the first request
    /// - `false` - Shutdown had already been requested
    pub fn fire(&self, source: &str) -> bool {
        let mut requests = 0;
        self.tx.send_modify(|count| {
            *count += 1;
            requests = *count;
        });

        if requests > 1 {
            tracing::info!(
                "Received {} again ({} requests), shutdown already in progress",
                source,
                requests
            );
        } else {
            tracing::info!("Received {}, shutting down", source);
        }

        requests == 1
    }
}

#[derive(Clone)]
pub struct ShutdownSignal {
    rx: watch::Receiver<usize>,
}

impl ShutdownSignal {
    /// Resolves once shutdown has been requested.
    ///
    /// Dropping every trigger also counts as a request, since nothing could fire it anymore.
    pub async fn wait(&mut self) {
        if self.rx.wait_for(|requests| *requests > 0).await.is_err() {
            tracing::debug!("Shutdown trigger dropped");
        }
    }

    pub fn is_requested(&self) -> bool {
        *self.rx.borrow() > 0
    }
}

/// Forwards process termination signals to `trigger`.
///
/// On Unix both `SIGTERM` and `SIGINT` fire the trigger, each delivery separately; elsewhere
/// Ctrl-C does. Must be called from within the tokio runtime.
///
/// # Returns
/// - `Ok(())` - Listener task spawned
/// - `Err(std::io::Error)` - Signal handlers could not be installed
pub fn listen_for_os_signals(trigger: ShutdownTrigger) -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{signal, SignalKind};

        let mut terminate = signal(SignalKind::terminate())?;
        let mut interrupt = signal(SignalKind::interrupt())?;

        tokio::spawn(async move {
            loop {
                let source = tokio::select! {
                    Some(()) = terminate.recv() => "SIGTERM",
                    Some(()) = interrupt.recv() => "SIGINT",
                    else => break,
                };

                trigger.fire(source);
            }
        });
    }

    #[cfg(not(unix))]
    {
        tokio::spawn(async move {
            while tokio::signal::ctrl_c().await.is_ok() {
                trigger.fire("Ctrl-C");
            }
        });
    }

    Ok(())
}
