mod huggingface;
#[cfg(test)]
pub mod stub;

pub use huggingface::HuggingFaceSummarizer;

use async_trait::async_trait;

#[derive(Debug, thiserror::Error)]
pub enum SummarizerError {
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    #[error("inference request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("inference endpoint returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("unexpected inference response: {0}")]
    Payload(String),

    #[error("inference endpoint returned an empty summary")]
    Empty,
}

/// Text-to-text summarization backend.
///
/// Built once at startup and shared by every request; implementations must
/// not keep per-call state.
#[async_trait]
pub trait Summarizer: Send + Sync {
    async fn summarize(
        &self,
        text: &str,
        max_length: u32,
        min_length: u32,
    ) -> Result<String, SummarizerError>;
}

/// Caps a summary at `max_length` whitespace-separated tokens.
pub fn bound_summary(summary: &str, max_length: u32) -> String {
    let limit = usize::try_from(max_length).unwrap_or(usize::MAX);
    let words: Vec<&str> = summary.split_whitespace().collect();

    if words.len() <= limit {
        return summary.trim().to_string();
    }

    words[..limit].join(" ")
}
