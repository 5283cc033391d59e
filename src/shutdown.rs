//! Graceful shutdown plumbing.
//!
//! A [`ShutdownHandle`]/[`ShutdownToken`] pair carries cancellation
//! from the owner to background tasks. The token is awaitable so the
//! refresh loop can select on it against its timer.

use tokio::signal::unix::{signal, SignalKind};
use tokio::sync::watch;
use tracing::{info, warn};

/// Triggering side of a shutdown pair.
pub struct ShutdownHandle {
    tx: watch::Sender<bool>,
}

/// Cancellation side of a shutdown pair. Cloneable; hand one to each
/// task. Dropping every handle without triggering also counts as
/// cancellation, since the owning context is gone.
#[derive(Clone)]
pub struct ShutdownToken {
    rx: watch::Receiver<bool>,
}

/// Create a connected handle/token pair.
pub fn channel() -> (ShutdownHandle, ShutdownToken) {
    let (tx, rx) = watch::channel(false);
    (ShutdownHandle { tx }, ShutdownToken { rx })
}

impl ShutdownHandle {
    /// Request shutdown. Idempotent.
    pub fn trigger(&self) {
        let _ = self.tx.send(true);
    }
}

impl ShutdownToken {
    /// Check for shutdown without waiting.
    pub fn is_cancelled(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolve once shutdown is requested or the handle is dropped.
    pub async fn cancelled(&mut self) {
        let _ = self.rx.wait_for(|cancelled| *cancelled).await;
    }
}

/// Listen for SIGINT and SIGTERM and trigger `handle` on the first
/// one received.
///
/// If neither handler can be registered (restricted environments),
/// the handle is parked so the service keeps running; shutdown then
/// requires an external kill.
pub fn listen_for_signals(handle: ShutdownHandle) {
    tokio::spawn(async move {
        let sigint = match signal(SignalKind::interrupt()) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!("failed to register SIGINT handler: {}", e);
                None
            }
        };

        let sigterm = match signal(SignalKind::terminate()) {
            Ok(s) => Some(s),
            Err(e) => {
                warn!("failed to register SIGTERM handler: {}", e);
                None
            }
        };

        match (sigint, sigterm) {
            (Some(mut int), Some(mut term)) => {
                tokio::select! {
                    _ = int.recv() => info!("received SIGINT, shutting down"),
                    _ = term.recv() => info!("received SIGTERM, shutting down"),
                }
            }
            (Some(mut int), None) => {
                int.recv().await;
                info!("received SIGINT, shutting down");
            }
            (None, Some(mut term)) => {
                term.recv().await;
                info!("received SIGTERM, shutting down");
            }
            (None, None) => {
                warn!("no signal handlers registered - graceful shutdown disabled");
                // Park the handle; dropping it would read as cancellation.
                std::future::pending::<()>().await;
            }
        }

        handle.trigger();
    });
}
