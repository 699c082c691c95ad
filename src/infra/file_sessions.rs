use std::fs;
use std::path::PathBuf;

use async_trait::async_trait;
use blake3::Hasher;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;

use crate::dialog::DialogSession;
use crate::error::{AppError, AppResult};
use crate::services::SessionStore;

const SESSION_LIMIT: usize = 256;

#[derive(Default, Clone, Serialize, Deserialize)]
struct SessionFile {
    entries: Vec<SessionEntry>,
}

#[derive(Serialize, Deserialize, Clone)]
struct SessionEntry {
    key: String,
    session: DialogSession,
}

/// Sessions kept in a single JSON file so dialogs survive a restart.
///
/// Conversation ids are hashed before they are written. The file holds at
/// most `SESSION_LIMIT` entries; the oldest are dropped first. Changes are
/// applied to a copy and only become visible once the file write succeeded.
pub struct FileSessionStore {
    file_path: PathBuf,
    file: Mutex<SessionFile>,
}

impl FileSessionStore {
    pub fn open(file_path: impl Into<PathBuf>) -> AppResult<Self> {
        let file_path = file_path.into();
        let file = match fs::read_to_string(&file_path) {
            Ok(contents) => serde_json::from_str::<SessionFile>(&contents)
                .map_err(|err| AppError::Session(format!("invalid session file: {err}")))?,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => SessionFile::default(),
            Err(err) => return Err(AppError::Io(err)),
        };

        Ok(Self {
            file_path,
            file: Mutex::new(file),
        })
    }

    fn compute_key(conversation_id: &str) -> String {
        let mut hasher = Hasher::new();
        hasher.update(conversation_id.as_bytes());
        hasher.finalize().to_hex().to_string()
    }

    async fn write(&self, file: &SessionFile) -> AppResult<()> {
        if let Some(parent) = self.file_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let data = serde_json::to_string_pretty(file)
            .map_err(|err| AppError::Session(format!("failed to write sessions: {err}")))?;
        tokio::fs::write(&self.file_path, data).await?;
        Ok(())
    }
}

#[async_trait]
impl SessionStore for FileSessionStore {
    async fn load(&self, conversation_id: &str) -> AppResult<Option<DialogSession>> {
        let key = Self::compute_key(conversation_id);
        let file = self.file.lock().await;
        Ok(file
            .entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| entry.session.clone()))
    }

    async fn save(&self, conversation_id: &str, session: &DialogSession) -> AppResult<()> {
        let key = Self::compute_key(conversation_id);
        let mut file = self.file.lock().await;
        let mut next = file.clone();
        next.entries.retain(|entry| entry.key != key);
        next.entries.push(SessionEntry {
            key,
            session: session.clone(),
        });

        if next.entries.len() > SESSION_LIMIT {
            let overflow = next.entries.len() - SESSION_LIMIT;
            next.entries.drain(0..overflow);
        }

        self.write(&next).await?;
        *file = next;
        Ok(())
    }

    async fn remove(&self, conversation_id: &str) -> AppResult<()> {
        let key = Self::compute_key(conversation_id);
        let mut file = self.file.lock().await;
        if !file.entries.iter().any(|entry| entry.key == key) {
            return Ok(());
        }
        let mut next = file.clone();
        next.entries.retain(|entry| entry.key != key);

        self.write(&next).await?;
        *file = next;
        Ok(())
    }
}
