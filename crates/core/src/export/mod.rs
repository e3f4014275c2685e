//! Report export: one serializer per output format behind [`Exporter`].

pub mod docx;
pub mod download;
pub mod json;
pub mod pdf;

use std::path::{Path, PathBuf};

use chrono::{NaiveDate, Utc};

use crate::{
    config::Config,
    error::Result,
    format::format_report_text,
    types::AnalysisDocument,
    view::ReportView,
};

pub use download::save_as;
pub use pdf::PdfSettings;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExportFormat {
    Text,
    Json,
    Pdf,
    Docx,
}

impl ExportFormat {
    pub const ALL: [ExportFormat; 4] = [
        ExportFormat::Text,
        ExportFormat::Json,
        ExportFormat::Pdf,
        ExportFormat::Docx,
    ];

    /// Parse a user-facing format tag. Unknown tags yield `None`.
    pub fn parse(tag: &str) -> Option<Self> {
        match tag.trim().to_ascii_lowercase().as_str() {
            "text" | "txt" => Some(ExportFormat::Text),
            "json" => Some(ExportFormat::Json),
            "pdf" => Some(ExportFormat::Pdf),
            "docx" => Some(ExportFormat::Docx),
            _ => None,
        }
    }

    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Text => "txt",
            ExportFormat::Json => "json",
            ExportFormat::Pdf => "pdf",
            ExportFormat::Docx => "docx",
        }
    }

    /// `analise-<YYYY-MM-DD>.<ext>`
    pub fn file_name(&self, date: NaiveDate) -> String {
        format!("analise-{}.{}", date.format("%Y-%m-%d"), self.extension())
    }
}

/// Routes an export request to the matching serializer and saves the result
/// into the output directory.
#[derive(Debug, Clone)]
pub struct Exporter {
    output_dir: PathBuf,
    pdf: PdfSettings,
    date: Option<NaiveDate>,
}

impl Exporter {
    pub fn new(output_dir: impl Into<PathBuf>, pdf: PdfSettings) -> Self {
        Self {
            output_dir: output_dir.into(),
            pdf,
            date: None,
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.output_dir, config.pdf.clone())
    }

    /// Pin the date used in file names instead of today's UTC date.
    pub fn with_date(mut self, date: NaiveDate) -> Self {
        self.date = Some(date);
        self
    }

    pub fn output_dir(&self) -> &Path {
        &self.output_dir
    }

    fn file_name(&self, format: ExportFormat) -> String {
        let date = self.date.unwrap_or_else(|| Utc::now().date_naive());
        format.file_name(date)
    }

    /// Export by tag. Returns the saved path, or `None` when nothing was
    /// written (unknown tag, or a PDF requested with no rendered view).
    pub async fn export(
        &self,
        tag: &str,
        doc: &AnalysisDocument,
        view: Option<&ReportView>,
    ) -> Result<Option<PathBuf>> {
        let Some(format) = ExportFormat::parse(tag) else {
            tracing::warn!(tag, "unknown export format, nothing exported");
            return Ok(None);
        };
        self.export_format(format, doc, view).await
    }

    pub async fn export_format(
        &self,
        format: ExportFormat,
        doc: &AnalysisDocument,
        view: Option<&ReportView>,
    ) -> Result<Option<PathBuf>> {
        let file_name = self.file_name(format);

        let saved = match format {
            ExportFormat::Text => {
                let text = format_report_text(doc);
                Some(save_as(&self.output_dir, &file_name, text.as_bytes()).await?)
            }
            ExportFormat::Json => {
                let json = json::to_json(doc)?;
                Some(save_as(&self.output_dir, &file_name, json.as_bytes()).await?)
            }
            ExportFormat::Pdf => {
                pdf::export_pdf(view, &self.pdf, &self.output_dir, &file_name).await?
            }
            ExportFormat::Docx => {
                Some(docx::export_docx(doc, &self.output_dir, &file_name).await?)
            }
        };

        if let Some(path) = &saved {
            tracing::info!(format = format.extension(), path = %path.display(), "report exported");
        }
        Ok(saved)
    }
}
