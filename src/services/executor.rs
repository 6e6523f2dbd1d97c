use async_trait::async_trait;
use reqwest::Client;

use crate::config::Config;
use crate::errors::{AppError, Result};
use crate::models::ApiEnvelope;

/// Issues a GET against the usage service and returns the decoded envelope.
#[async_trait]
pub trait RequestExecutor: Send + Sync {
    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<ApiEnvelope>;
}

pub struct HttpExecutor {
    client: Client,
    base_url: String,
    access_token: Option<String>,
    user_id: Option<String>,
}

impl HttpExecutor {
    pub fn new(config: &Config) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout())
            .build()?;

        Ok(Self {
            client,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            access_token: config.access_token.clone(),
            user_id: config.user_id.clone(),
        })
    }
}

#[async_trait]
impl RequestExecutor for HttpExecutor {
    async fn get(&self, path: &str, query: &[(&'static str, String)]) -> Result<ApiEnvelope> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.get(&url).query(query);
        if let Some(token) = &self.access_token {
            request = request.bearer_auth(token);
        }
        if let Some(user_id) = &self.user_id {
            request = request.header("New-Api-User", user_id);
        }

        let response = request.send().await?;

        if !response.status().is_success() {
            tracing::error!("Usage service returned error: {}", response.status());
            return Err(AppError::UpstreamStatus(response.status().as_u16()));
        }

        let body = response.bytes().await?;
        let envelope: ApiEnvelope = serde_json::from_slice(&body)?;

        tracing::debug!(url = %url, success = envelope.success, "Usage service responded");
        Ok(envelope)
    }
}
