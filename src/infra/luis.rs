use async_trait::async_trait;
use reqwest::{Client, header::ACCEPT};
use serde::Deserialize;

use crate::domain::intent::{Entity, RecognizedIntent};
use crate::error::{AppError, AppResult};
use crate::services::IntentRecognizer;

/// Intent name LUIS reports when nothing matched.
const NONE_INTENT: &str = "None";

pub struct LuisClient {
    http: Client,
    host: String,
    app_id: Option<String>,
    api_key: Option<String>,
}

impl LuisClient {
    pub fn new(host: String, app_id: Option<String>, api_key: Option<String>) -> Self {
        Self {
            http: Client::new(),
            host,
            app_id,
            api_key,
        }
    }

    fn api_details(&self) -> AppResult<(&str, &str)> {
        let app_id = self
            .app_id
            .as_deref()
            .ok_or_else(|| AppError::Configuration("LUIS app id not configured".to_string()))?;
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Configuration("LUIS API key not configured".to_string()))?;
        Ok((app_id, api_key))
    }

    fn endpoint(&self, app_id: &str) -> String {
        let host = self
            .host
            .trim_start_matches("https://")
            .trim_start_matches("http://")
            .trim_end_matches('/');
        let scheme = if self.host.starts_with("http://") {
            "http"
        } else {
            "https"
        };
        format!("{scheme}://{host}/luis/v2.0/apps/{app_id}")
    }
}

#[async_trait]
impl IntentRecognizer for LuisClient {
    async fn recognize(&self, text: &str) -> AppResult<Option<RecognizedIntent>> {
        if text.trim().is_empty() {
            return Ok(None);
        }

        let (app_id, api_key) = self.api_details()?;

        let response = self
            .http
            .get(self.endpoint(app_id))
            .query(&[
                ("subscription-key", api_key),
                ("verbose", "true"),
                ("timezoneOffset", "0"),
                ("q", text),
            ])
            .header(ACCEPT, "application/json")
            .send()
            .await
            .map_err(|err| AppError::Recognizer(format!("failed to call LUIS: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::Recognizer(format!(
                "LUIS responded with {status}: {body}"
            )));
        }

        let payload: LuisResponse = response
            .json()
            .await
            .map_err(|err| AppError::Recognizer(format!("failed to parse LUIS response: {err}")))?;

        Ok(payload.into_intent())
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct LuisResponse {
    top_scoring_intent: Option<LuisIntent>,
    #[serde(default)]
    entities: Vec<Entity>,
}

#[derive(Deserialize)]
struct LuisIntent {
    intent: String,
    #[serde(default)]
    score: f64,
}

impl LuisResponse {
    fn into_intent(self) -> Option<RecognizedIntent> {
        let top = self.top_scoring_intent?;
        if top.intent == NONE_INTENT {
            return None;
        }
        Some(RecognizedIntent {
            name: top.intent,
            score: top.score,
            entities: self.entities,
        })
    }
}

#[cfg(test)]
mod tests {
    use axum::extract::Query;
    use axum::routing::get;
    use axum::{Json, Router};
    use std::collections::HashMap;

    use super::*;

    async fn serve(router: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[test]
    fn parses_top_intent_and_entities() {
        let payload: LuisResponse = serde_json::from_value(serde_json::json!({
            "query": "I cannot print, it's urgent",
            "topScoringIntent": { "intent": "SubmitTicket", "score": 0.93 },
            "entities": [
                { "entity": "print", "type": "category", "resolution": { "values": ["hardware"] } },
                { "entity": "urgent", "type": "severity", "resolution": { "values": ["high"] } }
            ]
        }))
        .unwrap();

        let intent = payload.into_intent().unwrap();
        assert_eq!(intent.name, "SubmitTicket");
        assert_eq!(intent.resolved_entity("category"), Some("hardware"));
        assert_eq!(intent.resolved_entity("severity"), Some("high"));
    }

    #[test]
    fn none_intent_is_no_match() {
        let payload: LuisResponse = serde_json::from_value(serde_json::json!({
            "topScoringIntent": { "intent": "None", "score": 0.4 },
            "entities": []
        }))
        .unwrap();
        assert!(payload.into_intent().is_none());
    }

    #[tokio::test]
    async fn missing_credentials_fail_at_call_time() {
        let client = LuisClient::new("localhost".to_string(), None, Some("key".to_string()));
        let err = client.recognize("help").await.unwrap_err();
        assert!(matches!(err, AppError::Configuration(_)));
    }

    #[tokio::test]
    async fn queries_the_app_endpoint() {
        let router = Router::new().route(
            "/luis/v2.0/apps/app-1",
            get(|Query(params): Query<HashMap<String, String>>| async move {
                assert_eq!(params.get("subscription-key").map(String::as_str), Some("secret"));
                assert_eq!(params.get("verbose").map(String::as_str), Some("true"));
                let intent = if params.get("q").map(String::as_str) == Some("help me") {
                    "Help"
                } else {
                    "None"
                };
                Json(serde_json::json!({
                    "topScoringIntent": { "intent": intent, "score": 0.9 },
                    "entities": []
                }))
            }),
        );
        let base = serve(router).await;
        let client = LuisClient::new(base, Some("app-1".to_string()), Some("secret".to_string()));

        let help = client.recognize("help me").await.unwrap();
        assert_eq!(help.map(|intent| intent.name), Some("Help".to_string()));
        assert!(client.recognize("weather?").await.unwrap().is_none());
    }
}
