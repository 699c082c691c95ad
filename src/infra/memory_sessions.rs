use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::dialog::DialogSession;
use crate::error::AppResult;
use crate::services::SessionStore;

pub const DEFAULT_SESSION_LIMIT: usize = 1024;

#[derive(Default)]
struct Sessions {
    by_conversation: HashMap<String, DialogSession>,
    /// Conversation ids, least recently saved first.
    order: VecDeque<String>,
}

/// Sessions held in process memory. At most `limit` conversations are kept;
/// saving past the limit drops the least recently saved ones.
pub struct InMemorySessionStore {
    sessions: Mutex<Sessions>,
    limit: usize,
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::with_limit(DEFAULT_SESSION_LIMIT)
    }
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_limit(limit: usize) -> Self {
        Self {
            sessions: Mutex::new(Sessions::default()),
            limit: limit.max(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.lock().await.by_conversation.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn load(&self, conversation_id: &str) -> AppResult<Option<DialogSession>> {
        Ok(self
            .sessions
            .lock()
            .await
            .by_conversation
            .get(conversation_id)
            .cloned())
    }

    async fn save(&self, conversation_id: &str, session: &DialogSession) -> AppResult<()> {
        let mut sessions = self.sessions.lock().await;
        if sessions
            .by_conversation
            .insert(conversation_id.to_string(), session.clone())
            .is_some()
        {
            sessions.order.retain(|id| id != conversation_id);
        }
        sessions.order.push_back(conversation_id.to_string());

        while sessions.order.len() > self.limit {
            if let Some(oldest) = sessions.order.pop_front() {
                sessions.by_conversation.remove(&oldest);
            }
        }
        Ok(())
    }

    async fn remove(&self, conversation_id: &str) -> AppResult<()> {
        let mut sessions = self.sessions.lock().await;
        if sessions.by_conversation.remove(conversation_id).is_some() {
            sessions.order.retain(|id| id != conversation_id);
        }
        Ok(())
    }
}
