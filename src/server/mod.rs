//! Axum routes: the chat webhook and the local ticket endpoint.

pub mod messages;
pub mod tickets;

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use axum::routing::post;

use crate::context::AppContext;
use crate::error::AppResult;

pub use tickets::TicketLedger;

#[derive(Clone)]
pub struct AppState {
    pub ctx: AppContext,
    pub ledger: Arc<TicketLedger>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/messages", post(messages::receive_activity))
        .route("/api/tickets", post(tickets::create_ticket))
        .with_state(state)
}

pub async fn serve(ctx: AppContext) -> AppResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], ctx.config.port));
    let state = AppState {
        ctx,
        ledger: Arc::new(TicketLedger::new()),
    };

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("helpdesk-bot listening on {}", listener.local_addr()?);
    axum::serve(listener, router(state)).await?;
    Ok(())
}
