//! Graceful shutdown: a cancellation token plus a bounded drain period.
//!
//! ```ignore
//! let shutdown = Shutdown::new();
//! shutdown.listen_for_signals();
//!
//! // stop accepting on cancel, then allow 3s for in-flight calls
//! let deadline = CallDeadline::new(shutdown.clone(), Duration::from_secs(3));
//! drain(server_future, &shutdown, Duration::from_secs(3)).await?;
//! ```
//!
//! Servers run each connection on its own task, so dropping the server
//! future alone does not stop calls already in progress. Handlers run their
//! work under a [`CallDeadline`] built from the same token and grace period;
//! once it expires they give up and answer "unavailable".

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{error, info, warn};

/// Cancellation token shared by every component that must stop together.
/// Clones observe the same state; cancelling is idempotent.
#[derive(Clone)]
pub struct Shutdown {
    sender: Arc<watch::Sender<bool>>,
}

impl Default for Shutdown {
    fn default() -> Self {
        Self::new()
    }
}

impl Shutdown {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(false);
        Self {
            sender: Arc::new(sender),
        }
    }

    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }

    pub fn is_cancelled(&self) -> bool {
        *self.sender.borrow()
    }

    /// Resolves once [`cancel`](Self::cancel) has been called.
    pub async fn cancelled(&self) {
        let mut rx = self.sender.subscribe();
        // The sender lives as long as `self`, so this only returns on cancel.
        let _ = rx.wait_for(|cancelled| *cancelled).await;
    }

    /// Owned variant of [`cancelled`](Self::cancelled) for spawned servers.
    pub fn cancelled_owned(&self) -> impl Future<Output = ()> + Send + 'static {
        let token = self.clone();
        async move { token.cancelled().await }
    }

    /// Cancel this token on SIGINT or SIGTERM.
    pub fn listen_for_signals(&self) -> JoinHandle<()> {
        let token = self.clone();
        tokio::spawn(async move {
            wait_for_signal().await;
            token.cancel();
        })
    }
}

/// Waits for Ctrl+C or SIGTERM.
pub async fn wait_for_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(error = %err, "unable to install Ctrl+C signal handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(error = %err, "unable to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received Ctrl+C, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}

/// The point, `grace` after shutdown fires, past which in-flight calls are
/// abandoned.
#[derive(Clone)]
pub struct CallDeadline {
    shutdown: Shutdown,
    grace: Duration,
}

impl CallDeadline {
    pub fn new(shutdown: Shutdown, grace: Duration) -> Self {
        Self { shutdown, grace }
    }

    /// A deadline that never expires.
    pub fn none() -> Self {
        Self::new(Shutdown::new(), Duration::MAX)
    }

    pub fn grace(&self) -> Duration {
        self.grace
    }

    /// Resolves `grace` after cancellation.
    pub async fn expired(&self) {
        self.shutdown.cancelled().await;
        tokio::time::sleep(self.grace).await;
    }

    /// Run `work` to completion, or drop it and return `None` once the
    /// deadline expires.
    pub async fn run<F: Future>(&self, work: F) -> Option<F::Output> {
        tokio::select! {
            out = work => Some(out),
            _ = self.expired() => None,
        }
    }
}

/// Failure to stop a server cleanly.
#[derive(Debug, Error)]
pub enum ServeError {
    #[cfg(feature = "grpc")]
    #[error("grpc transport error: {0}")]
    Grpc(#[from] tonic::transport::Error),
    #[error("listener error: {0}")]
    Io(#[from] std::io::Error),
    /// In-flight calls outlived the grace period and were dropped.
    #[error("in-flight calls did not finish within {0:?}; forced close")]
    GraceElapsed(Duration),
}

/// Drive `server` to completion. Once `shutdown` fires the server (which is
/// expected to stop accepting on the same token) gets `grace` to finish its
/// in-flight work; after that the server future is dropped. Connection
/// tasks it spawned are not cancelled by the drop; calls on them are cut off
/// by a [`CallDeadline`] over the same token and grace.
pub async fn drain<F, T>(server: F, shutdown: &Shutdown, grace: Duration) -> Result<T, ServeError>
where
    F: Future<Output = T>,
{
    tokio::pin!(server);

    tokio::select! {
        out = &mut server => return Ok(out),
        _ = shutdown.cancelled() => {}
    }

    info!(grace_ms = grace.as_millis() as u64, "draining in-flight calls");
    match tokio::time::timeout(grace, &mut server).await {
        Ok(out) => Ok(out),
        Err(_) => {
            warn!(grace_ms = grace.as_millis() as u64, "grace period elapsed, forcing close");
            Err(ServeError::GraceElapsed(grace))
        }
    }
}
