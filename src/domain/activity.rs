use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const ADAPTIVE_CARD_CONTENT_TYPE: &str = "application/vnd.microsoft.card.adaptive";
pub const MESSAGE_ACTIVITY: &str = "message";

#[derive(Debug, Clone, Deserialize)]
pub struct ConversationAccount {
    pub id: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChannelAccount {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// Subset of a chat-channel activity delivered to the webhook.
#[derive(Debug, Clone, Deserialize)]
pub struct IncomingActivity {
    #[serde(rename = "type", default = "default_activity_type")]
    pub kind: String,
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
    pub conversation: ConversationAccount,
    #[serde(default)]
    pub from: Option<ChannelAccount>,
}

fn default_activity_type() -> String {
    MESSAGE_ACTIVITY.to_string()
}

impl IncomingActivity {
    pub fn is_message(&self) -> bool {
        self.kind == MESSAGE_ACTIVITY
    }

    pub fn text(&self) -> &str {
        self.text.as_deref().unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub content_type: String,
    pub content: Value,
}

/// One outgoing message. Prompts list their options as suggested actions.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub suggested_actions: Vec<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

impl Reply {
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            text: Some(text.into()),
            ..Self::default()
        }
    }

    pub fn prompt(text: impl Into<String>, choices: Vec<String>) -> Self {
        Self {
            text: Some(text.into()),
            suggested_actions: choices,
            ..Self::default()
        }
    }

    pub fn adaptive_card(content: Value) -> Self {
        Self {
            attachments: vec![Attachment {
                content_type: ADAPTIVE_CARD_CONTENT_TYPE.to_string(),
                content,
            }],
            ..Self::default()
        }
    }
}
