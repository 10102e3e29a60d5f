//! Scoring oracle seam: the analysis flow talks to this trait, not to Gemini.
//!
//! Default: `GeminiOracle` over the shared `LlmClient`.
//! `AppState` holds an `Arc<dyn ScoringOracle>`, so tests can plug in a fake.

use async_trait::async_trait;

use crate::llm_client::{GenerateRequest, LlmClient, LlmError};

#[async_trait]
pub trait ScoringOracle: Send + Sync {
    /// Sends one request and returns the raw JSON text of the answer.
    async fn score(&self, request: &GenerateRequest) -> Result<String, LlmError>;
}

pub struct GeminiOracle(pub LlmClient);

#[async_trait]
impl ScoringOracle for GeminiOracle {
    async fn score(&self, request: &GenerateRequest) -> Result<String, LlmError> {
        self.0.call_json_text(request).await
    }
}
