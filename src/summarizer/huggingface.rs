use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{Summarizer, SummarizerError};
use crate::config::SummarizerConfig;

/// Summarizer backed by a Hugging Face style inference endpoint
/// (`POST {base_url}/models/{model}`).
pub struct HuggingFaceSummarizer {
    client: Client,
    endpoint: String,
    api_token: Option<String>,
}

#[derive(Debug, Serialize)]
struct SummarizationRequest<'a> {
    inputs: &'a str,
    parameters: SummarizationParameters,
}

#[derive(Debug, Serialize)]
struct SummarizationParameters {
    max_length: u32,
    min_length: u32,
    do_sample: bool,
}

#[derive(Debug, Deserialize)]
struct SummarizationOutput {
    summary_text: String,
}

impl HuggingFaceSummarizer {
    pub fn new(config: &SummarizerConfig) -> Result<Self, SummarizerError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(SummarizerError::Client)?;

        let endpoint = format!(
            "{}/models/{}",
            config.base_url.trim_end_matches('/'),
            config.model
        );

        tracing::info!("Summarizer initialized: endpoint={}", endpoint);

        Ok(Self {
            client,
            endpoint,
            api_token: config.api_token.clone(),
        })
    }
}

#[async_trait]
impl Summarizer for HuggingFaceSummarizer {
    async fn summarize(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
    ) -> Result<String, SummarizerError> {
        let request = SummarizationRequest {
            inputs: text,
            parameters: SummarizationParameters {
                max_length,
                min_length,
                do_sample: false,
            },
        };

        let mut call = self.client.post(&self.endpoint).json(&request);
        if let Some(token) = &self.api_token {
            call = call.bearer_auth(token);
        }

        let response = call.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(SummarizerError::Status { status, body });
        }

        let outputs: Vec<SummarizationOutput> = response
            .json()
            .await
            .map_err(|e| SummarizerError::Payload(e.to_string()))?;

        let summary = outputs
            .into_iter()
            .next()
            .map(|output| output.summary_text)
            .ok_or_else(|| SummarizerError::Payload("no summaries in response".to_string()))?;

        if summary.trim().is_empty() {
            return Err(SummarizerError::Empty);
        }

        Ok(summary)
    }
}
