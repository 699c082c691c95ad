use std::sync::Arc;

use crate::config::{AppConfig, RecognizerKind, SessionStoreKind};
use crate::context::AppContext;
use crate::error::AppResult;
use crate::infra::file_sessions::FileSessionStore;
use crate::infra::keyword::KeywordRecognizer;
use crate::infra::luis::LuisClient;
use crate::infra::memory_sessions::InMemorySessionStore;
use crate::infra::tickets::TicketsClient;
use crate::server;
use crate::services::{IntentRecognizer, SessionStore};

#[derive(Debug, Clone)]
pub struct ServeCommandArgs {
    pub port: Option<u16>,
}

pub async fn run(args: ServeCommandArgs) -> AppResult<()> {
    let mut config = AppConfig::load()?;
    if let Some(port) = args.port {
        config = config.with_port(port);
    }

    let ctx = build_context(config)?;
    server::serve(ctx).await
}

pub fn build_context(config: AppConfig) -> AppResult<AppContext> {
    if config.webhook_credentials().is_none() {
        tracing::warn!("MicrosoftAppId/MicrosoftAppPassword not configured; webhook accepts unauthenticated calls.");
    }

    let recognizer: Arc<dyn IntentRecognizer> = match config.recognizer {
        RecognizerKind::Luis => {
            if config.luis_app_id.is_none() || config.luis_api_key.is_none() {
                tracing::warn!("LUIS credentials not configured; every message will get the fallback answer.");
            }
            Arc::new(LuisClient::new(
                config.luis_host.clone(),
                config.luis_app_id.clone(),
                config.luis_api_key.clone(),
            ))
        }
        RecognizerKind::Keyword => {
            tracing::info!("using keyword recognizer");
            Arc::new(KeywordRecognizer::new())
        }
    };

    let sessions: Arc<dyn SessionStore> = match &config.session_store {
        SessionStoreKind::Memory => Arc::new(InMemorySessionStore::new()),
        SessionStoreKind::File(path) => {
            tracing::info!("keeping dialog sessions in {}", path.display());
            Arc::new(FileSessionStore::open(path)?)
        }
    };

    let ticket_base = config.ticket_submission_url();
    tracing::info!(
        url = %ticket_base,
        timeout_secs = config.ticket_api.timeout.as_secs(),
        retries = config.ticket_api.retries,
        "ticket submission configured"
    );
    let ticket_api = Arc::new(TicketsClient::new(ticket_base, config.ticket_api.clone())?);

    if !config.card_template_path.exists() {
        tracing::warn!(
            "card template {} not found; successful submissions will fail to render.",
            config.card_template_path.display()
        );
    }

    Ok(AppContext::new(config, recognizer, ticket_api, sessions))
}
