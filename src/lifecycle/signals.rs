//! OS signal handling.

/// Wait for the interrupt signal (Ctrl+C).
pub async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to install Ctrl+C handler");
        // Park; the shutdown broadcast remains the only stop signal.
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
