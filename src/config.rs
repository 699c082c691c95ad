use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};

pub const DEFAULT_PORT: u16 = 3978;
pub const DEFAULT_LUIS_HOST: &str = "westus.api.cognitive.microsoft.com";
pub const DEFAULT_CARD_TEMPLATE: &str = "./cards/ticket.json";
pub const DEFAULT_SESSION_FILE: &str = "./data/sessions.json";
const DEFAULT_TICKET_TIMEOUT_SECS: u64 = 30;
const DEFAULT_TICKET_RETRY_DELAY_MS: u64 = 500;

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub app_id: Option<String>,
    pub app_password: Option<String>,
    pub luis_app_id: Option<String>,
    pub luis_api_key: Option<String>,
    pub luis_host: String,
    pub port: u16,
    ticket_submission_url: Option<String>,
    pub ticket_api: TicketApiPolicy,
    pub card_template_path: PathBuf,
    pub recognizer: RecognizerKind,
    pub session_store: SessionStoreKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerKind {
    Luis,
    Keyword,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionStoreKind {
    Memory,
    File(PathBuf),
}

/// Timeout and retry behaviour for the outbound ticket call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TicketApiPolicy {
    pub timeout: Duration,
    /// Extra attempts after the first failure. Zero disables retries.
    pub retries: u32,
    pub retry_delay: Duration,
}

impl Default for TicketApiPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TICKET_TIMEOUT_SECS),
            retries: 0,
            retry_delay: Duration::from_millis(DEFAULT_TICKET_RETRY_DELAY_MS),
        }
    }
}

impl AppConfig {
    /// Reads the process environment. Call `dotenvy::dotenv()` first to pick up `.env`.
    pub fn load() -> AppResult<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> AppResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let var = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        let port = match var("PORT").or_else(|| var("port")) {
            Some(raw) => parse_number::<u16>("PORT", &raw)?,
            None => DEFAULT_PORT,
        };

        let luis_app_id = var("LuisAppId");
        let luis_api_key = var("LuisAPIKey");

        let recognizer = match var("RECOGNIZER").map(|value| value.to_lowercase()) {
            Some(value) if value == "luis" => RecognizerKind::Luis,
            Some(value) if value == "keyword" => RecognizerKind::Keyword,
            Some(other) => {
                return Err(AppError::Configuration(format!(
                    "unknown recognizer '{other}' (expected luis or keyword)"
                )));
            }
            None if luis_app_id.is_some() && luis_api_key.is_some() => RecognizerKind::Luis,
            None => RecognizerKind::Keyword,
        };

        let session_store = match var("SESSION_STORE").map(|value| value.to_lowercase()) {
            None => SessionStoreKind::Memory,
            Some(value) if value == "memory" => SessionStoreKind::Memory,
            Some(value) if value == "file" => SessionStoreKind::File(
                var("SESSION_STORE_PATH")
                    .map(PathBuf::from)
                    .unwrap_or_else(|| PathBuf::from(DEFAULT_SESSION_FILE)),
            ),
            Some(other) => {
                return Err(AppError::Configuration(format!(
                    "unknown session store '{other}' (expected memory or file)"
                )));
            }
        };

        let mut ticket_api = TicketApiPolicy::default();
        if let Some(raw) = var("TICKET_API_TIMEOUT_SECS") {
            ticket_api.timeout = Duration::from_secs(parse_number("TICKET_API_TIMEOUT_SECS", &raw)?);
        }
        if let Some(raw) = var("TICKET_API_RETRIES") {
            ticket_api.retries = parse_number("TICKET_API_RETRIES", &raw)?;
        }

        Ok(Self {
            app_id: var("MicrosoftAppId"),
            app_password: var("MicrosoftAppPassword"),
            luis_app_id,
            luis_api_key,
            luis_host: var("LuisAPIHostName").unwrap_or_else(|| DEFAULT_LUIS_HOST.to_string()),
            port,
            ticket_submission_url: var("TICKET_SUBMISSION_URL"),
            ticket_api,
            card_template_path: var("CARD_TEMPLATE_PATH")
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CARD_TEMPLATE)),
            recognizer,
            session_store,
        })
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Base URL of the ticket API; defaults to this server's own ticket endpoint.
    pub fn ticket_submission_url(&self) -> String {
        self.ticket_submission_url
            .clone()
            .unwrap_or_else(|| format!("http://localhost:{}", self.port))
    }

    /// Credentials the webhook requires, when both halves are configured.
    pub fn webhook_credentials(&self) -> Option<(&str, &str)> {
        match (self.app_id.as_deref(), self.app_password.as_deref()) {
            (Some(id), Some(password)) => Some((id, password)),
            _ => None,
        }
    }
}

fn parse_number<T: std::str::FromStr>(key: &str, raw: &str) -> AppResult<T> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| AppError::Configuration(format!("{key} must be a number, got '{raw}'")))
}
