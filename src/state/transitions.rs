use uuid::Uuid;

use crate::{
    dto::sse::MatchUpdateEvent, error::ServiceError, services::sse_events::broadcast_match_update,
    state::SharedState,
};

/// Run a match mutation under its gate, then broadcast the resulting update.
///
/// The broadcast happens after the gate is released and only when the work succeeded.
pub async fn run_mutation_with_broadcast<F, Fut>(
    state: &SharedState,
    match_id: Uuid,
    work: F,
) -> Result<MatchUpdateEvent, ServiceError>
where
    F: FnOnce() -> Fut,
    Fut: std::future::Future<Output = Result<MatchUpdateEvent, ServiceError>>,
{
    let update = state.run_match_mutation(match_id, work).await?;
    broadcast_match_update(state.broadcaster().as_ref(), &update);
    Ok(update)
}
