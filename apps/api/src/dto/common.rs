use serde::Serialize;

/// Health response payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Acknowledgement for an enqueued domain event.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAcceptedResponse {
    pub event_id: String,
    pub event_type: &'static str,
}
