use async_trait::async_trait;

use std::sync::atomic::{AtomicUsize, Ordering};

use super::{Summarizer, SummarizerError};

/// Deterministic summarizer for router tests: echoes its input unchanged,
/// or fails every call.
#[derive(Default)]
pub struct StubSummarizer {
    fail: bool,
    calls: AtomicUsize,
}

impl StubSummarizer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Summarizer for StubSummarizer {
    async fn summarize(
        &self,
        text: &str,
        _max_length: u32,
        _min_length: u32,
    ) -> Result<String, SummarizerError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(SummarizerError::Payload("stub failure".to_string()));
        }
        // Echo, unbounded
        Ok(text.to_string())
    }
}
