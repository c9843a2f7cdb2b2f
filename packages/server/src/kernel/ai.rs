// AI implementation using OpenAI
//
// This is the infrastructure implementation of BaseAI.
// Business logic (what to prompt for) lives in domain layers.

use anyhow::{Context, Result};
use async_trait::async_trait;
use openai_client::{ChatRequest, Message, OpenAIClient};

use super::{BaseAI, CompletionRequest};
use crate::config::Config;

/// OpenAI-backed completion service
#[derive(Clone)]
pub struct OpenAICompleter {
    client: OpenAIClient,
    model: String,
}

impl OpenAICompleter {
    pub fn new(client: OpenAIClient, model: impl Into<String>) -> Self {
        Self {
            client,
            model: model.into(),
        }
    }

    /// Build from configuration. Returns `None` when no API key is configured.
    pub fn from_config(config: &Config) -> Result<Option<Self>> {
        let Some(api_key) = config.openai_api_key.clone() else {
            return Ok(None);
        };

        let mut client = OpenAIClient::new(api_key)
            .with_timeout(config.llm_timeout)
            .context("Failed to create OpenAI client")?;
        if let Some(base_url) = &config.openai_base_url {
            client = client.with_base_url(base_url.clone());
        }

        Ok(Some(Self::new(client, config.openai_model.clone())))
    }

    pub fn model(&self) -> &str {
        &self.model
    }
}

#[async_trait]
impl BaseAI for OpenAICompleter {
    async fn complete(&self, request: CompletionRequest) -> Result<String> {
        tracing::debug!(
            model = %self.model,
            prompt_length = request.system.len() + request.user.len(),
            temperature = request.temperature,
            "Calling OpenAI API"
        );

        let response = self
            .client
            .chat_completion(
                ChatRequest::new(&self.model)
                    .message(Message::system(request.system))
                    .message(Message::user(request.user))
                    .temperature(request.temperature),
            )
            .await
            .map_err(|e| {
                if e.is_network() {
                    tracing::warn!(error = %e, model = %self.model, "OpenAI unreachable");
                } else {
                    tracing::error!(error = %e, model = %self.model, "OpenAI API call failed");
                }
                e
            })
            .context("Failed to call OpenAI API")?;

        tracing::info!(
            response_length = response.content.len(),
            total_tokens = response.usage.as_ref().map(|u| u.total_tokens),
            model = %self.model,
            "OpenAI API response received"
        );

        Ok(response.content)
    }
}
