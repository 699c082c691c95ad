use async_trait::async_trait;
use reqwest::{
    Client,
    header::{ACCEPT, CONTENT_TYPE},
};

use crate::config::TicketApiPolicy;
use crate::domain::ticket::{TicketId, TicketRequest};
use crate::error::{AppError, AppResult};
use crate::services::TicketApi;

pub struct TicketsClient {
    http: Client,
    base_url: String,
    policy: TicketApiPolicy,
}

impl TicketsClient {
    pub fn new(base_url: String, policy: TicketApiPolicy) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(policy.timeout)
            .build()
            .map_err(|err| AppError::Configuration(format!("failed to build HTTP client: {err}")))?;
        Ok(Self {
            http,
            base_url,
            policy,
        })
    }

    fn tickets_endpoint(base_url: &str) -> String {
        format!("{}/api/tickets", base_url.trim_end_matches('/'))
    }

    async fn post_once(&self, request: &TicketRequest) -> AppResult<TicketId> {
        let response = self
            .http
            .post(Self::tickets_endpoint(&self.base_url))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json")
            .json(request)
            .send()
            .await
            .map_err(|err| AppError::TicketApi(format!("failed to call ticket API: {err}")))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read response>".to_string());
            return Err(AppError::TicketApi(format!(
                "ticket API responded with {status}: {body}"
            )));
        }

        response
            .json::<TicketId>()
            .await
            .map_err(|err| AppError::TicketApi(format!("failed to parse ticket API response: {err}")))
    }
}

#[async_trait]
impl TicketApi for TicketsClient {
    async fn submit_ticket(&self, request: &TicketRequest) -> AppResult<TicketId> {
        let mut attempt = 0;
        loop {
            match self.post_once(request).await {
                Ok(ticket_id) => return Ok(ticket_id),
                Err(err) if attempt < self.policy.retries => {
                    attempt += 1;
                    tracing::warn!(
                        attempt,
                        retries = self.policy.retries,
                        "ticket submission failed, retrying: {err}"
                    );
                    tokio::time::sleep(self.policy.retry_delay).await;
                }
                Err(err) => return Err(err),
            }
        }
    }
}
