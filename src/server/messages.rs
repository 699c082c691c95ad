use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::header::AUTHORIZATION;
use axum::http::{HeaderMap, StatusCode};
use base64::prelude::{BASE64_STANDARD, Engine as _};
use serde::Serialize;

use crate::domain::activity::{IncomingActivity, Reply};
use crate::server::AppState;
use crate::workflow::conversation::handle_message;

#[derive(Debug, Serialize)]
pub struct MessagesResponse {
    pub replies: Vec<Reply>,
}

pub async fn receive_activity(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: Result<Json<IncomingActivity>, JsonRejection>,
) -> Result<Json<MessagesResponse>, StatusCode> {
    if !authorized(&headers, state.ctx.config.webhook_credentials()) {
        tracing::warn!("rejecting webhook call with missing or wrong credentials");
        return Err(StatusCode::UNAUTHORIZED);
    }

    let Json(activity) = payload.map_err(|err| {
        tracing::warn!("rejecting malformed activity: {err}");
        StatusCode::BAD_REQUEST
    })?;

    if !activity.is_message() {
        tracing::debug!(kind = %activity.kind, "ignoring non-message activity");
        return Ok(Json(MessagesResponse {
            replies: Vec::new(),
        }));
    }

    let replies = handle_message(&state.ctx, &activity.conversation.id, activity.text())
        .await
        .map_err(|err| {
            tracing::error!(
                conversation_id = %activity.conversation.id,
                "failed to handle message: {err}"
            );
            StatusCode::INTERNAL_SERVER_ERROR
        })?;

    Ok(Json(MessagesResponse { replies }))
}

pub fn basic_auth_header(app_id: &str, app_password: &str) -> String {
    let credentials = format!("{app_id}:{app_password}");
    let encoded = BASE64_STANDARD.encode(credentials);
    format!("Basic {encoded}")
}

/// Compares digests of the header and the expected value; `blake3::Hash`
/// equality runs in constant time.
fn authorized(headers: &HeaderMap, credentials: Option<(&str, &str)>) -> bool {
    let Some((app_id, app_password)) = credentials else {
        return true;
    };
    let expected = blake3::hash(basic_auth_header(app_id, app_password).as_bytes());
    headers
        .get(AUTHORIZATION)
        .is_some_and(|value| blake3::hash(value.as_bytes()) == expected)
}
