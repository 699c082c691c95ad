use async_trait::async_trait;

use crate::dialog::DialogSession;
use crate::error::AppResult;

/// Conversation-scoped storage for the dialog waiting on a reply.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn load(&self, conversation_id: &str) -> AppResult<Option<DialogSession>>;
    async fn save(&self, conversation_id: &str, session: &DialogSession) -> AppResult<()>;
    async fn remove(&self, conversation_id: &str) -> AppResult<()>;
}
