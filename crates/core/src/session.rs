//! The analysis page state: URL input, the in-flight flag and the current
//! report.

use std::sync::Arc;

use crate::{
    error::Result,
    provider::{AnalysisProvider, ProviderError},
    types::AnalysisDocument,
    view::ReportView,
};

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SessionError {
    #[error("Por favor, insira uma URL do YouTube válida.")]
    EmptyUrl,

    #[error("Já existe uma análise em andamento.")]
    AlreadyProcessing,

    #[error("A análise foi descartada.")]
    Discarded,
}

/// A started analysis: the URL to hand to the provider and the id its
/// result must be delivered under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    pub id: u64,
    pub url: String,
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    id: u64,
    /// Set when the session was reset while this request was running.
    discard: bool,
}

#[derive(Debug, Default)]
pub struct AnalysisSession {
    url: String,
    in_flight: Option<InFlight>,
    next_id: u64,
    view: Option<ReportView>,
}

impl AnalysisSession {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn set_url(&mut self, url: impl Into<String>) {
        self.url = url.into();
    }

    pub fn is_processing(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Whether the analyze action is enabled.
    pub fn can_submit(&self) -> bool {
        !self.is_processing() && !self.url.trim().is_empty()
    }

    /// Validate the URL and mark the session busy.
    pub fn begin(&mut self) -> std::result::Result<AnalysisRequest, SessionError> {
        if self.is_processing() {
            return Err(SessionError::AlreadyProcessing);
        }
        let url = self.url.trim();
        if url.is_empty() {
            return Err(SessionError::EmptyUrl);
        }
        let url = url.to_string();
        self.next_id += 1;
        self.in_flight = Some(InFlight {
            id: self.next_id,
            discard: false,
        });
        Ok(AnalysisRequest {
            id: self.next_id,
            url,
        })
    }

    /// Store the provider's answer to request `id`. A failure leaves the
    /// previous report in place; either way the session is no longer busy.
    ///
    /// Returns `Ok(None)` when the answer is not for the running request, or
    /// when the session was reset after the request started. Such answers are
    /// dropped, whether they succeeded or not.
    pub fn finish(
        &mut self,
        id: u64,
        result: std::result::Result<AnalysisDocument, ProviderError>,
    ) -> std::result::Result<Option<&mut ReportView>, ProviderError> {
        let Some(in_flight) = self.in_flight.filter(|f| f.id == id) else {
            tracing::debug!(request = id, "dropping result of a stale analysis");
            return Ok(None);
        };
        self.in_flight = None;
        if in_flight.discard {
            tracing::debug!(request = id, "dropping result of a discarded analysis");
            return Ok(None);
        }

        match result {
            Ok(doc) => {
                tracing::info!(
                    words = doc.metadata.word_count,
                    segments = doc.metadata.segments,
                    "analysis complete"
                );
                Ok(Some(self.view.insert(ReportView::new(Arc::new(doc)))))
            }
            Err(e) => {
                tracing::error!("analysis failed: {e}");
                Err(e)
            }
        }
    }

    /// Run one analysis of the current URL against `provider`.
    pub async fn analyze(&mut self, provider: &dyn AnalysisProvider) -> Result<&mut ReportView> {
        let request = self.begin()?;
        tracing::info!(provider = provider.name(), url = %request.url, "starting analysis");
        let result = provider.analyze(&request.url).await;
        match self.finish(request.id, result)? {
            Some(view) => Ok(view),
            None => Err(SessionError::Discarded.into()),
        }
    }

    pub fn view(&self) -> Option<&ReportView> {
        self.view.as_ref()
    }

    pub fn view_mut(&mut self) -> Option<&mut ReportView> {
        self.view.as_mut()
    }

    pub fn document(&self) -> Option<&AnalysisDocument> {
        self.view.as_ref().map(ReportView::document)
    }

    /// Drop the current report and URL, e.g. on logout. A request still
    /// running keeps the session busy until its answer arrives, and that
    /// answer is then thrown away.
    pub fn reset(&mut self) {
        self.url.clear();
        self.view = None;
        if let Some(in_flight) = &mut self.in_flight {
            in_flight.discard = true;
        }
    }
}
