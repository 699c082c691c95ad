use async_trait::async_trait;

use crate::domain::ticket::{TicketId, TicketRequest};
use crate::error::AppResult;

#[async_trait]
pub trait TicketApi: Send + Sync {
    async fn submit_ticket(&self, request: &TicketRequest) -> AppResult<TicketId>;
}
