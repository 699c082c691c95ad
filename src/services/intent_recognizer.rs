use async_trait::async_trait;

use crate::domain::intent::RecognizedIntent;
use crate::error::AppResult;

#[async_trait]
pub trait IntentRecognizer: Send + Sync {
    /// Classifies `text`. `Ok(None)` means no intent stood out.
    async fn recognize(&self, text: &str) -> AppResult<Option<RecognizedIntent>>;
}
