use std::sync::Arc;

use crate::card::CardRenderer;
use crate::config::AppConfig;
use crate::services::{IntentRecognizer, SessionStore, TicketApi};

#[derive(Clone)]
pub struct AppContext {
    pub config: AppConfig,
    pub recognizer: Arc<dyn IntentRecognizer>,
    pub ticket_api: Arc<dyn TicketApi>,
    pub sessions: Arc<dyn SessionStore>,
    pub cards: CardRenderer,
}

impl AppContext {
    pub fn new(
        config: AppConfig,
        recognizer: Arc<dyn IntentRecognizer>,
        ticket_api: Arc<dyn TicketApi>,
        sessions: Arc<dyn SessionStore>,
    ) -> Self {
        let cards = CardRenderer::new(config.card_template_path.clone());
        Self {
            config,
            recognizer,
            ticket_api,
            sessions,
            cards,
        }
    }
}
