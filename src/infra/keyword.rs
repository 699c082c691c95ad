use async_trait::async_trait;

use crate::dialog::DialogKind;
use crate::domain::intent::RecognizedIntent;
use crate::error::AppResult;
use crate::services::IntentRecognizer;

const HELP_WORDS: [&str; 3] = ["help", "?", "what can you do"];
const TICKET_WORDS: [&str; 4] = ["ticket", "cannot", "can't", "broken"];

/// Offline recognizer used when no LUIS credentials are configured.
///
/// It only knows a handful of trigger words and never extracts entities, so
/// ticket submissions always go through every prompt.
#[derive(Debug, Default)]
pub struct KeywordRecognizer;

impl KeywordRecognizer {
    pub fn new() -> Self {
        Self
    }

    fn classify(text: &str) -> Option<DialogKind> {
        let lowered = text.trim().to_lowercase();
        if lowered.is_empty() {
            return None;
        }
        if HELP_WORDS.iter().any(|word| lowered == *word || lowered.starts_with(&format!("{word} "))) {
            return Some(DialogKind::Help);
        }
        if TICKET_WORDS.iter().any(|word| lowered.contains(word)) {
            return Some(DialogKind::SubmitTicket);
        }
        None
    }
}

#[async_trait]
impl IntentRecognizer for KeywordRecognizer {
    async fn recognize(&self, text: &str) -> AppResult<Option<RecognizedIntent>> {
        Ok(Self::classify(text).map(|kind| RecognizedIntent::new(kind.as_str())))
    }
}
