use std::time::Duration;

use tokio::time::sleep;

use crate::app::SharedState;

pub async fn graceful_shutdown(state: &SharedState) {
    tracing::info!("Shutdown sequence started");

    state.shutdown_token().cancel();
    tracing::info!("Shutdown: background loops and queue workers cancelled");

    // give workers a moment to observe the token and log their exit
    sleep(Duration::from_millis(200)).await;
    tracing::info!("Shutdown sequence completed");
}
