//! # OS termination signals.
//!
//! [`wait_for_termination`] completes with the name of the first termination signal
//! the process receives.
//!
//! - unix: `SIGINT`, `SIGTERM`, `SIGQUIT`
//! - elsewhere: Ctrl-C via [`tokio::signal::ctrl_c`]
//!
//! Signal registration failure is not fatal to the host: [`termination`] logs it
//! and degrades to a future that never completes.

use std::future::Future;

/// Waits for a termination signal and returns its name.
#[cfg(unix)]
pub(crate) async fn wait_for_termination() -> std::io::Result<&'static str> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    let name = tokio::select! {
        _ = sigint.recv()  => "SIGINT",
        _ = sigterm.recv() => "SIGTERM",
        _ = sigquit.recv() => "SIGQUIT",
    };
    Ok(name)
}

/// Waits for a termination signal and returns its name.
#[cfg(not(unix))]
pub(crate) async fn wait_for_termination() -> std::io::Result<&'static str> {
    tokio::signal::ctrl_c().await?;
    Ok("ctrl_c")
}

/// Termination future for the host loop.
///
/// Pending forever when `enabled` is false or registration fails.
pub(crate) fn termination(enabled: bool) -> impl Future<Output = &'static str> {
    async move {
        if !enabled {
            return std::future::pending().await;
        }
        match wait_for_termination().await {
            Ok(name) => name,
            Err(e) => {
                tracing::warn!(error = %e, "cannot listen for OS signals; continuing without them");
                std::future::pending().await
            }
        }
    }
}
