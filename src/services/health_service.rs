use tracing::warn;

use crate::{dto::health::HealthResponse, state::SharedState};

/// Ping the installed store; a failing or missing store reports degraded.
pub async fn health_status(state: &SharedState) -> HealthResponse {
    let Some(store) = state.match_store().await else {
        warn!("storage unavailable (degraded mode)");
        return HealthResponse::degraded();
    };

    match store.health_check().await {
        Ok(()) => HealthResponse::ok(),
        Err(err) => {
            warn!(error = %err, "storage health check failed");
            HealthResponse::degraded()
        }
    }
}
