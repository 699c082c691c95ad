//! Local ticket endpoint mounted next to the webhook.
//!
//! Keeps submitted tickets in memory and hands out sequential ids, which is
//! enough for the bot to run end to end without a separate ticketing system.

use axum::Json;
use axum::extract::State;
use axum::extract::rejection::JsonRejection;
use axum::http::StatusCode;
use tokio::sync::Mutex;

use crate::domain::ticket::{REJECTED_TICKET_ID, TicketRequest};
use crate::server::AppState;

#[derive(Default)]
pub struct TicketLedger {
    tickets: Mutex<Vec<TicketRequest>>,
}

impl TicketLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `request` and returns its id, or the rejection sentinel when a
    /// required field is blank.
    pub async fn record(&self, request: TicketRequest) -> i64 {
        if request.category.trim().is_empty() || request.description.trim().is_empty() {
            return REJECTED_TICKET_ID;
        }
        let mut tickets = self.tickets.lock().await;
        tickets.push(request);
        tickets.len() as i64
    }

    pub async fn len(&self) -> usize {
        self.tickets.lock().await.len()
    }
}

pub async fn create_ticket(
    State(state): State<AppState>,
    payload: Result<Json<TicketRequest>, JsonRejection>,
) -> Result<Json<i64>, StatusCode> {
    let Json(request) = payload.map_err(|err| {
        tracing::warn!("rejecting malformed ticket: {err}");
        StatusCode::BAD_REQUEST
    })?;

    let severity = request.severity.to_string();
    let id = state.ledger.record(request).await;
    if id == REJECTED_TICKET_ID {
        tracing::warn!("ticket rejected: category and description are required");
    } else {
        tracing::info!(ticket_id = id, severity = %severity, "ticket stored");
    }
    Ok(Json(id))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ticket::Severity;

    fn request(category: &str, description: &str) -> TicketRequest {
        TicketRequest {
            category: category.to_string(),
            severity: Severity::Normal,
            description: description.to_string(),
        }
    }

    #[tokio::test]
    async fn assigns_sequential_ids() {
        let ledger = TicketLedger::new();
        assert_eq!(ledger.record(request("hardware", "cannot print")).await, 1);
        assert_eq!(ledger.record(request("network", "no wifi")).await, 2);
        assert_eq!(ledger.len().await, 2);
    }

    #[tokio::test]
    async fn blank_fields_are_rejected() {
        let ledger = TicketLedger::new();
        assert_eq!(ledger.record(request(" ", "cannot print")).await, -1);
        assert_eq!(ledger.record(request("hardware", "")).await, -1);
        assert_eq!(ledger.len().await, 0);
    }
}
