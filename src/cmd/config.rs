use clap::{Args, Subcommand};

use crate::config::{AppConfig, RecognizerKind, SessionStoreKind};
use crate::error::AppResult;

#[derive(Args, Debug, Clone)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommand {
    /// Show the effective configuration (secrets masked).
    Show,
}

pub fn run(command: ConfigCommand) -> AppResult<()> {
    match command {
        ConfigCommand::Show => run_show(),
    }
}

fn run_show() -> AppResult<()> {
    let cfg = AppConfig::load()?;
    for line in describe(&cfg) {
        println!("{line}");
    }
    Ok(())
}

fn describe(cfg: &AppConfig) -> Vec<String> {
    let recognizer = match cfg.recognizer {
        RecognizerKind::Luis => "luis",
        RecognizerKind::Keyword => "keyword",
    };
    let sessions = match &cfg.session_store {
        SessionStoreKind::Memory => "memory".to_string(),
        SessionStoreKind::File(path) => format!("file ({})", path.display()),
    };

    vec![
        format!("Port: {}", cfg.port),
        format!("Microsoft app id: {}", display_value(&cfg.app_id)),
        format!("Microsoft app password: {}", mask_secret(&cfg.app_password)),
        format!("Recognizer: {recognizer}"),
        format!("LUIS app id: {}", display_value(&cfg.luis_app_id)),
        format!("LUIS API key: {}", mask_secret(&cfg.luis_api_key)),
        format!("LUIS host: {}", cfg.luis_host),
        format!("Ticket submission URL: {}", cfg.ticket_submission_url()),
        format!("Ticket API timeout: {}s", cfg.ticket_api.timeout.as_secs()),
        format!("Ticket API retries: {}", cfg.ticket_api.retries),
        format!("Card template: {}", cfg.card_template_path.display()),
        format!("Session store: {sessions}"),
    ]
}

fn display_value(value: &Option<String>) -> String {
    value
        .as_deref()
        .filter(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| "<not set>".to_string())
}

fn mask_secret(value: &Option<String>) -> String {
    match value {
        Some(token) if token.len() > 6 => {
            let prefix: String = token.chars().take(3).collect();
            let suffix: String = token
                .chars()
                .rev()
                .take(3)
                .collect::<Vec<_>>()
                .into_iter()
                .rev()
                .collect();
            format!("{prefix}***{suffix}")
        }
        Some(token) if !token.is_empty() => "***".to_string(),
        _ => "<not set>".to_string(),
    }
}
