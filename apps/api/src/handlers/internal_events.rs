use axum::Json;
use axum::extract::State;
use axum::http::StatusCode;
use lanewright_core::AppError;
use lanewright_domain::EventEnvelope;

use crate::dto::EventAcceptedResponse;
use crate::error::ApiResult;
use crate::state::AppState;

/// Accepts a verified domain event and hands it to the event queue.
pub async fn receive_event_handler(
    State(state): State<AppState>,
    Json(envelope): Json<EventEnvelope>,
) -> ApiResult<(StatusCode, Json<EventAcceptedResponse>)> {
    if envelope.id.trim().is_empty() {
        return Err(AppError::Validation("event id must not be empty".to_owned()).into());
    }

    let response = EventAcceptedResponse {
        event_id: envelope.id.clone(),
        event_type: envelope.event.event_type(),
    };

    state.event_transport.emit(envelope).await?;
    tracing::info!(
        event_id = response.event_id.as_str(),
        event_type = response.event_type,
        "internal event accepted"
    );

    Ok((StatusCode::ACCEPTED, Json(response)))
}
