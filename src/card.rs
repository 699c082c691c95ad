use std::fs;
use std::path::PathBuf;

use serde_json::Value;

use crate::domain::ticket::{TicketId, TicketRequest};
use crate::error::{AppError, AppResult};

const TICKET_ID_TOKEN: &str = "{ticketId}";
const SEVERITY_TOKEN: &str = "{severity}";
const CATEGORY_TOKEN: &str = "{category}";
const DESCRIPTION_TOKEN: &str = "{description}";

/// Renders the ticket confirmation card from a JSON template on disk.
///
/// The template is read on every call. Placeholders are expected inside JSON
/// string literals; substituted values are escaped as string content so user
/// text containing quotes or backslashes still yields a valid document.
#[derive(Debug, Clone)]
pub struct CardRenderer {
    template_path: PathBuf,
}

impl CardRenderer {
    pub fn new(template_path: impl Into<PathBuf>) -> Self {
        Self {
            template_path: template_path.into(),
        }
    }

    pub fn render(&self, ticket_id: &TicketId, request: &TicketRequest) -> AppResult<Value> {
        let template = fs::read_to_string(&self.template_path).map_err(|err| {
            AppError::Template(format!(
                "failed to read {}: {err}",
                self.template_path.display()
            ))
        })?;

        let rendered = substitute(&template, ticket_id, request);

        serde_json::from_str(&rendered).map_err(|err| {
            AppError::Template(format!(
                "{} is not valid JSON after substitution: {err}",
                self.template_path.display()
            ))
        })
    }
}

/// Replaces tokens in a single left-to-right pass; substituted values are
/// never rescanned, so user text containing a token stays literal.
fn substitute(template: &str, ticket_id: &TicketId, request: &TicketRequest) -> String {
    let values = [
        (TICKET_ID_TOKEN, escape(&ticket_id.display_text())),
        (SEVERITY_TOKEN, escape(request.severity.as_str())),
        (CATEGORY_TOKEN, escape(&request.category)),
        (DESCRIPTION_TOKEN, escape(&request.description)),
    ];

    let mut rendered = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(start) = rest.find('{') {
        rendered.push_str(&rest[..start]);
        let tail = &rest[start..];
        match values.iter().find(|(token, _)| tail.starts_with(*token)) {
            Some((token, value)) => {
                rendered.push_str(value);
                rest = &tail[token.len()..];
            }
            None => {
                rendered.push('{');
                rest = &tail[1..];
            }
        }
    }
    rendered.push_str(rest);
    rendered
}

/// Escapes `value` as the inside of a JSON string literal.
fn escape(value: &str) -> String {
    let quoted = Value::String(value.to_string()).to_string();
    quoted[1..quoted.len() - 1].to_string()
}
