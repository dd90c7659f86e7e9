use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::Response;
use lanewright_core::{ActorIdentity, AppError, UserId};

use crate::error::ApiResult;
use crate::state::AppState;

/// Header carrying the identity provider's user id.
pub const ACTOR_HEADER: &str = "x-lanewright-user";
/// Optional header carrying the actor's display name.
pub const ACTOR_NAME_HEADER: &str = "x-lanewright-user-name";

pub async fn require_actor(mut request: Request, next: Next) -> ApiResult<Response> {
    let actor = actor_from_headers(request.headers())?;

    request.extensions_mut().insert(actor);
    Ok(next.run(request).await)
}

pub async fn require_worker_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> ApiResult<Response> {
    let token = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| AppError::Unauthorized("worker bearer token required".to_owned()))?;

    if !constant_time_eq(token.trim(), state.worker_shared_secret.as_str()) {
        return Err(AppError::Unauthorized("invalid worker credentials".to_owned()).into());
    }

    Ok(next.run(request).await)
}

fn actor_from_headers(headers: &HeaderMap) -> Result<ActorIdentity, AppError> {
    let user_id = headers
        .get(ACTOR_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("authentication required".to_owned()))?;
    let user_id = UserId::new(user_id)?;

    let display_name = headers
        .get(ACTOR_NAME_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map_or_else(|| user_id.as_str().to_owned(), ToOwned::to_owned);

    Ok(ActorIdentity::new(user_id, display_name))
}

fn constant_time_eq(left: &str, right: &str) -> bool {
    if left.len() != right.len() {
        return false;
    }

    left.bytes()
        .zip(right.bytes())
        .fold(0u8, |acc, (x, y)| acc | (x ^ y))
        == 0
}
