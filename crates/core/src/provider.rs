use std::time::Duration;

use async_trait::async_trait;

use crate::{sample::sample_document, types::AnalysisDocument};

#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("A análise de {source_id} falhou: {reason}")]
    Failed { source_id: String, reason: String },
}

/// Something that turns a video source into an [`AnalysisDocument`].
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    fn name(&self) -> &'static str;

    async fn analyze(&self, source: &str) -> Result<AnalysisDocument, ProviderError>;
}

/// Returns the canned demo report after a fixed delay.
#[derive(Clone, Debug)]
pub struct SampleProvider {
    latency: Duration,
}

impl SampleProvider {
    pub const DEFAULT_LATENCY: Duration = Duration::from_millis(3000);

    pub fn new(latency: Duration) -> Self {
        Self { latency }
    }
}

impl Default for SampleProvider {
    fn default() -> Self {
        Self::new(Self::DEFAULT_LATENCY)
    }
}

#[async_trait]
impl AnalysisProvider for SampleProvider {
    fn name(&self) -> &'static str {
        "Sample"
    }

    async fn analyze(&self, source: &str) -> Result<AnalysisDocument, ProviderError> {
        tracing::debug!(source, latency_ms = self.latency.as_millis() as u64, "analyzing");
        tokio::time::sleep(self.latency).await;
        let date = chrono::Local::now().format("%d/%m/%Y").to_string();
        Ok(sample_document(&date))
    }
}
